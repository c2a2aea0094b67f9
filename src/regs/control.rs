//! Run control and hart status registers
use bitfield::bitfield;

use super::{impl_raw_conversions, Access, DMReg, DMRegArray, Field, Registers};

/// Largest hart number `dmcontrol` can encode (hartselhi:hartsello, 20 bits)
pub const HARTSEL_MAX: u32 = (1 << 20) - 1;

const HARTSELLO_WIDTH: u32 = 10;
const HARTSELLO_MASK: u32 = (1 << HARTSELLO_WIDTH) - 1;

bitfield! {
    /// Debug Module Control
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Dmcontrol(u32);
    impl Debug;
    pub haltreq, set_haltreq: 31;
    pub resumereq, set_resumereq: 30;
    pub hartreset, _: 29;
    pub ackhavereset, set_ackhavereset: 28;
    pub hasel, _: 26;
    pub hartsello, set_hartsello: 25, 16;
    pub hartselhi, set_hartselhi: 15, 6;
    pub setresethaltreq, _: 3;
    pub clrresethaltreq, _: 2;
    pub ndmreset, set_ndmreset: 1;
    pub dmactive, set_dmactive: 0;
}

impl Dmcontrol {
    /// Hart selection, reassembled from `hartselhi` and `hartsello`
    pub fn hartsel(&self) -> u32 {
        (self.hartselhi() << HARTSELLO_WIDTH) | self.hartsello()
    }

    /// Select hart `hartsel`. Values wider than 20 bits are truncated.
    pub fn set_hartsel(&mut self, hartsel: u32) {
        if hartsel > HARTSEL_MAX {
            log::warn!(
                "dmcontrol: hartsel 0x{hartsel:x} exceeds 20 bits, truncated to 0x{:x}",
                hartsel & HARTSEL_MAX
            );
        }
        let hartsel = hartsel & HARTSEL_MAX;
        self.set_hartsello(hartsel & HARTSELLO_MASK);
        self.set_hartselhi(hartsel >> HARTSELLO_WIDTH);
    }

    /// Set every hart select bit, used to probe the implemented width
    pub fn set_hartsel_max(&mut self) {
        self.set_hartsel(HARTSEL_MAX);
    }

    pub fn set_hartreset(&mut self, _value: bool) {
        log::warn!("dmcontrol: hartreset is not implemented by this debug module: ignored");
    }

    pub fn set_hasel(&mut self, _value: bool) {
        log::warn!("dmcontrol: hasel is not implemented by this debug module: ignored");
    }

    pub fn set_setresethaltreq(&mut self, _value: bool) {
        log::warn!("dmcontrol: setresethaltreq is not implemented by this debug module: ignored");
    }

    pub fn set_clrresethaltreq(&mut self, _value: bool) {
        log::warn!("dmcontrol: clrresethaltreq is not implemented by this debug module: ignored");
    }
}

impl DMReg for Dmcontrol {
    const NAME: &'static str = "dmcontrol";
    const ADDR: u8 = 0x10;
    // the hart selection survives until it is explicitly changed
    const RESET_KEEPS: u32 = (HARTSELLO_MASK << 16) | (HARTSELLO_MASK << 6);
    const FIELDS: &'static [Field] = &[
        Field::new("haltreq", 31, 1),
        Field::new("resumereq", 30, 1),
        Field::new("hartreset", 29, 1),
        Field::new("ackhavereset", 28, 1),
        Field::new("hasel", 26, 1),
        Field::new("hartsello", 16, 10),
        Field::new("hartselhi", 6, 10),
        Field::new("setresethaltreq", 3, 1),
        Field::new("clrresethaltreq", 2, 1),
        Field::new("ndmreset", 1, 1),
        Field::new("dmactive", 0, 1),
    ];

    fn shadow(regs: &Registers) -> &Self {
        &regs.dmcontrol
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.dmcontrol
    }
}

bitfield! {
    /// Debug Module Status
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Dmstatus(u32);
    impl Debug;
    pub impebreak, _: 22;
    pub allhavereset, _: 19;
    pub anyhavereset, _: 18;
    pub allresumeack, _: 17;
    pub anyresumeack, _: 16;
    pub allnonexistent, _: 15;
    pub anynonexistent, _: 14;
    pub allunavail, _: 13;
    pub anyunavail, _: 12;
    pub allrunning, _: 11;
    pub anyrunning, _: 10;
    pub allhalted, _: 9;
    pub anyhalted, _: 8;
    pub authenticated, _: 7;
    pub authbusy, _: 6;
    pub hasresethaltreq, _: 5;
    pub confstrptrvalid, _: 4;
    pub u8, version, _: 3, 0;
}

// The combined flags OR the "any" and "all" variants, which is exact when a
// single hart is selected.
impl Dmstatus {
    pub fn havereset(&self) -> bool {
        self.anyhavereset() || self.allhavereset()
    }

    pub fn resumeack(&self) -> bool {
        self.anyresumeack() || self.allresumeack()
    }

    pub fn nonexistent(&self) -> bool {
        self.anynonexistent() || self.allnonexistent()
    }

    pub fn unavail(&self) -> bool {
        self.anyunavail() || self.allunavail()
    }

    pub fn running(&self) -> bool {
        self.anyrunning() || self.allrunning()
    }

    pub fn halted(&self) -> bool {
        self.anyhalted() || self.allhalted()
    }

    pub fn version_name(&self) -> &'static str {
        match self.version() {
            0 => "none",
            1 => "0.11",
            2 => "0.13",
            3 => "1.0",
            15 => "unknown",
            _ => "reserved",
        }
    }
}

impl DMReg for Dmstatus {
    const NAME: &'static str = "dmstatus";
    const ADDR: u8 = 0x11;
    const ACCESS: Access = Access::ReadOnly;
    const FIELDS: &'static [Field] = &[
        Field::new("impebreak", 22, 1),
        Field::new("allhavereset", 19, 1),
        Field::new("anyhavereset", 18, 1),
        Field::new("allresumeack", 17, 1),
        Field::new("anyresumeack", 16, 1),
        Field::new("allnonexistent", 15, 1),
        Field::new("anynonexistent", 14, 1),
        Field::new("allunavail", 13, 1),
        Field::new("anyunavail", 12, 1),
        Field::new("allrunning", 11, 1),
        Field::new("anyrunning", 10, 1),
        Field::new("allhalted", 9, 1),
        Field::new("anyhalted", 8, 1),
        Field::new("authenticated", 7, 1),
        Field::new("authbusy", 6, 1),
        Field::new("hasresethaltreq", 5, 1),
        Field::new("confstrptrvalid", 4, 1),
        Field::new("version", 0, 4),
    ];

    fn shadow(regs: &Registers) -> &Self {
        &regs.dmstatus
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.dmstatus
    }
}

bitfield! {
    /// Hart Info
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Hartinfo(u32);
    impl Debug;
    pub u8, nscratch, _: 23, 20;
    pub dataaccess, _: 16;
    pub u8, datasize, _: 15, 12;
    pub u16, dataaddr, _: 11, 0;
}

impl DMReg for Hartinfo {
    const NAME: &'static str = "hartinfo";
    const ADDR: u8 = 0x12;
    const ACCESS: Access = Access::ReadOnly;
    const FIELDS: &'static [Field] = &[
        Field::new("nscratch", 20, 4),
        Field::new("dataaccess", 16, 1),
        Field::new("datasize", 12, 4),
        Field::new("dataaddr", 0, 12),
    ];

    fn shadow(regs: &Registers) -> &Self {
        &regs.hartinfo
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.hartinfo
    }
}

bitfield! {
    /// Halt Summary, one bit per hart (haltsum0) or per group of harts
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Haltsum(u32);
    impl Debug;
    pub haltsum, _: 31, 0;
}

impl Haltsum {
    /// Whether the hart (or hart group) at `bit` reports halted
    pub fn is_halted(&self, bit: u32) -> bool {
        bit < 32 && (self.0 >> bit) & 1 == 1
    }
}

impl DMRegArray for Haltsum {
    const NAME: &'static str = "haltsum";
    const ADDRS: &'static [u8] = &[0x40, 0x13, 0x34, 0x35];
    const ACCESS: Access = Access::ReadOnly;
    const FIELDS: &'static [Field] = &[Field::new("haltsum", 0, 32)];

    fn shadows(regs: &Registers) -> &[Self] {
        &regs.haltsum
    }

    fn shadows_mut(regs: &mut Registers) -> &mut [Self] {
        &mut regs.haltsum
    }
}

bitfield! {
    /// Hart Array Window Select
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Hawindowsel(u32);
    impl Debug;
    pub hawindowsel, set_hawindowsel: 14, 0;
}

impl DMReg for Hawindowsel {
    const NAME: &'static str = "hawindowsel";
    const ADDR: u8 = 0x14;
    const FIELDS: &'static [Field] = &[Field::new("hawindowsel", 0, 15)];

    fn shadow(regs: &Registers) -> &Self {
        &regs.hawindowsel
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.hawindowsel
    }
}

bitfield! {
    /// Hart Array Window
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Hawindow(u32);
    impl Debug;
    pub maskdata, set_maskdata: 31, 0;
}

impl DMReg for Hawindow {
    const NAME: &'static str = "hawindow";
    const ADDR: u8 = 0x15;
    const FIELDS: &'static [Field] = &[Field::new("maskdata", 0, 32)];

    fn shadow(regs: &Registers) -> &Self {
        &regs.hawindow
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.hawindow
    }
}

impl_raw_conversions!(Dmcontrol, Dmstatus, Hartinfo, Haltsum, Hawindowsel, Hawindow);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_logger;

    #[test]
    fn test_hartsel_split() {
        let mut dmcontrol = Dmcontrol::from(0);
        dmcontrol.set_hartsel(0xabcde);
        assert_eq!(dmcontrol.hartsel(), 0xabcde);
        assert_eq!(dmcontrol.hartsello(), 0xde);
        assert_eq!(dmcontrol.hartselhi(), 0x2af);
        assert_eq!(dmcontrol.0, (0x0de << 16) | (0x2af << 6));
    }

    #[test]
    fn test_hartsel_round_trip() {
        let mut dmcontrol = Dmcontrol::from(0);
        for hartsel in [0, 1, 0x3ff, 0x400, 0x12345, HARTSEL_MAX] {
            dmcontrol.set_hartsel(hartsel);
            assert_eq!(dmcontrol.hartsel(), hartsel);
        }
    }

    #[test]
    fn test_hartsel_truncation() {
        let mut dmcontrol = Dmcontrol::from(0);
        dmcontrol.set_dmactive(true);
        dmcontrol.set_hartsel((1 << 20) | 5);
        assert_eq!(dmcontrol.hartsel(), 5);
        dmcontrol.set_hartsel(0xffff_ffff);
        assert_eq!(dmcontrol.hartsel(), HARTSEL_MAX);
        // neighbours untouched
        assert!(dmcontrol.dmactive());
        assert!(!dmcontrol.haltreq());
    }

    #[test]
    fn test_hartsel_truncation_warns() {
        test_logger::set_logger();
        let mut dmcontrol = Dmcontrol::from(0);
        dmcontrol.set_hartsel(HARTSEL_MAX);
        assert!(test_logger::take_warnings().is_empty());

        dmcontrol.set_hartsel(1 << 20);
        let warnings = test_logger::take_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("truncated"), "{warnings:?}");
    }

    #[test]
    fn test_reset_keeps_hartsel() {
        let mut dmcontrol = Dmcontrol::from(0);
        dmcontrol.set_hartsel(0x12345);
        dmcontrol.set_haltreq(true);
        dmcontrol.set_ndmreset(true);
        dmcontrol.set_dmactive(true);
        dmcontrol.reset();
        assert_eq!(dmcontrol.hartsel(), 0x12345);
        assert!(!dmcontrol.haltreq());
        assert!(!dmcontrol.ndmreset());
        assert!(!dmcontrol.dmactive());
    }

    #[test]
    fn test_hartsel_max() {
        let mut dmcontrol = Dmcontrol::from(0);
        dmcontrol.set_hartsel_max();
        assert_eq!(dmcontrol.0, 0x03ff_ffc0);
    }

    #[test]
    fn test_unsupported_fields_are_ignored() {
        let mut dmcontrol = Dmcontrol::from(0);
        dmcontrol.set_hartreset(true);
        dmcontrol.set_hasel(true);
        dmcontrol.set_setresethaltreq(true);
        dmcontrol.set_clrresethaltreq(true);
        assert_eq!(dmcontrol.0, 0);
    }

    #[test]
    fn test_dmstatus_any_or_all() {
        // anyhalted set, allhalted clear
        let dmstatus = Dmstatus::from(0x0000_0100);
        assert!(dmstatus.halted());
        assert!(dmstatus.anyhalted());
        assert!(!dmstatus.allhalted());

        let dmstatus = Dmstatus::from(0x0000_8000);
        assert!(dmstatus.nonexistent());
        assert!(!dmstatus.running());

        let dmstatus = Dmstatus::from(0x0040_0c82);
        assert!(dmstatus.impebreak());
        assert!(dmstatus.running());
        assert!(dmstatus.authenticated());
        assert_eq!(dmstatus.version(), 2);
        assert_eq!(dmstatus.version_name(), "0.13");
    }

    #[test]
    fn test_hartinfo_fields() {
        let hartinfo = Hartinfo::from(0x0031_2bf0);
        assert_eq!(hartinfo.nscratch(), 3);
        assert!(hartinfo.dataaccess());
        assert_eq!(hartinfo.datasize(), 2);
        assert_eq!(hartinfo.dataaddr(), 0xbf0);
    }

    #[test]
    fn test_haltsum_bits() {
        let haltsum = Haltsum::from(0b1010);
        assert!(haltsum.is_halted(1));
        assert!(!haltsum.is_halted(2));
        assert!(!haltsum.is_halted(40));
    }
}
