//! System bus access registers
use bitfield::bitfield;

use super::{impl_raw_conversions, AccessSize, DMReg, DMRegArray, Field, Registers};

bitfield! {
    /// System Bus Access Control and Status
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Sbcs(u32);
    impl Debug;
    pub u8, sbversion, _: 31, 29;
    pub sbbusyerror, set_sbbusyerror: 22;
    pub sbbusy, _: 21;
    pub sbreadonaddr, set_sbreadonaddr: 20;
    pub u8, sbaccess, _: 19, 17;
    u8, _, set_sbaccess_bits: 19, 17;
    pub sbautoincrement, set_sbautoincrement: 16;
    pub sbreadondata, set_sbreadondata: 15;
    pub u8, sberror, set_sberror: 14, 12;
    pub u8, sbasize, _: 11, 5;
    pub sbaccess128, _: 4;
    pub sbaccess64, _: 3;
    pub sbaccess32, _: 2;
    pub sbaccess16, _: 1;
    pub sbaccess8, _: 0;
}

impl Sbcs {
    pub fn set_sbaccess(&mut self, size: AccessSize) {
        self.set_sbaccess_bits(size as u8);
    }

    /// Prepare the write-1-to-clear acknowledge of `sberror`
    pub fn sberror_clear(&mut self) {
        self.set_sberror(0b111);
    }

    /// Prepare the write-1-to-clear acknowledge of `sbbusyerror`
    pub fn sbbusyerror_clear(&mut self) {
        self.set_sbbusyerror(true);
    }

    pub fn sbversion_name(&self) -> &'static str {
        match self.sbversion() {
            0 => "pre 2018",
            1 => "0.13",
            _ => "unknown",
        }
    }

    pub fn sbaccess_name(&self) -> &'static str {
        match self.sbaccess() {
            0 => "8-bit",
            1 => "16-bit",
            2 => "32-bit",
            3 => "64-bit",
            4 => "128-bit",
            _ => "unknown",
        }
    }

    pub fn sberror_name(&self) -> &'static str {
        match self.sberror() {
            0 => "none",
            1 => "timeout",
            2 => "bad address",
            3 => "alignment",
            4 => "bad size",
            7 => "other",
            _ => "unknown",
        }
    }
}

impl DMReg for Sbcs {
    const NAME: &'static str = "sbcs";
    const ADDR: u8 = 0x38;
    const RESET_VALUE: u32 = 0x2004_0000;
    const WRITE_RETURNS_VALUE: bool = true;
    const FIELDS: &'static [Field] = &[
        Field::new("sbversion", 29, 3),
        Field::new("sbbusyerror", 22, 1),
        Field::new("sbbusy", 21, 1),
        Field::new("sbreadonaddr", 20, 1),
        Field::new("sbaccess", 17, 3),
        Field::new("sbautoincrement", 16, 1),
        Field::new("sbreadondata", 15, 1),
        Field::new("sberror", 12, 3),
        Field::new("sbasize", 5, 7),
        Field::new("sbaccess128", 4, 1),
        Field::new("sbaccess64", 3, 1),
        Field::new("sbaccess32", 2, 1),
        Field::new("sbaccess16", 1, 1),
        Field::new("sbaccess8", 0, 1),
    ];

    fn shadow(regs: &Registers) -> &Self {
        &regs.sbcs
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.sbcs
    }
}

bitfield! {
    /// System Bus Address, 32 bits per instance (sbaddress0 holds the low word)
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Sbaddress(u32);
    impl Debug;
    pub address, set_address: 31, 0;
}

impl DMRegArray for Sbaddress {
    const NAME: &'static str = "sbaddress";
    const ADDRS: &'static [u8] = &[0x39, 0x3a, 0x3b, 0x37];
    const FIELDS: &'static [Field] = &[Field::new("address", 0, 32)];

    fn shadows(regs: &Registers) -> &[Self] {
        &regs.sbaddress
    }

    fn shadows_mut(regs: &mut Registers) -> &mut [Self] {
        &mut regs.sbaddress
    }
}

bitfield! {
    /// System Bus Data, 32 bits per instance (sbdata0 holds the low word)
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Sbdata(u32);
    impl Debug;
    pub data, set_data: 31, 0;
}

impl DMRegArray for Sbdata {
    const NAME: &'static str = "sbdata";
    const ADDRS: &'static [u8] = &[0x3c, 0x3d, 0x3e, 0x3f];
    const FIELDS: &'static [Field] = &[Field::new("data", 0, 32)];

    fn shadows(regs: &Registers) -> &[Self] {
        &regs.sbdata
    }

    fn shadows_mut(regs: &mut Registers) -> &mut [Self] {
        &mut regs.sbdata
    }
}

impl_raw_conversions!(Sbcs, Sbaddress, Sbdata);
