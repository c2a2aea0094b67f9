use bitfield::bitfield;

use super::{impl_raw_conversions, Access, DMReg, DMRegArray, Field, Registers};

bitfield! {
    /// Configuration String Pointer, valid when `dmstatus.confstrptrvalid`
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Confstrptr(u32);
    impl Debug;
    pub addr, _: 31, 0;
}

impl DMRegArray for Confstrptr {
    const NAME: &'static str = "confstrptr";
    const ADDRS: &'static [u8] = &[0x19, 0x1a, 0x1b, 0x1c];
    const ACCESS: Access = Access::ReadOnly;
    const FIELDS: &'static [Field] = &[Field::new("addr", 0, 32)];

    fn shadows(regs: &Registers) -> &[Self] {
        &regs.confstrptr
    }

    fn shadows_mut(regs: &mut Registers) -> &mut [Self] {
        &mut regs.confstrptr
    }
}

bitfield! {
    /// Next Debug Module, zero for the last one in the chain
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Nextdm(u32);
    impl Debug;
    pub addr, _: 31, 0;
}

impl DMReg for Nextdm {
    const NAME: &'static str = "nextdm";
    const ADDR: u8 = 0x1d;
    const ACCESS: Access = Access::ReadOnly;
    const FIELDS: &'static [Field] = &[Field::new("addr", 0, 32)];

    fn shadow(regs: &Registers) -> &Self {
        &regs.nextdm
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.nextdm
    }
}

bitfield! {
    /// Authentication Data
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Authdata(u32);
    impl Debug;
    pub data, set_data: 31, 0;
}

impl DMReg for Authdata {
    const NAME: &'static str = "authdata";
    const ADDR: u8 = 0x30;
    const FIELDS: &'static [Field] = &[Field::new("data", 0, 32)];

    fn shadow(regs: &Registers) -> &Self {
        &regs.authdata
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.authdata
    }
}

impl_raw_conversions!(Confstrptr, Nextdm, Authdata);
