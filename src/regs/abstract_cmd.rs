//! Abstract command registers
use bitfield::bitfield;

use super::{impl_raw_conversions, Access, DMReg, DMRegArray, Field, Registers};

bitfield! {
    /// Abstract Control and Status
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Abstractcs(u32);
    impl Debug;
    pub u8, progbufsize, _: 28, 24;
    pub busy, _: 12;
    pub u8, cmderr, set_cmderr: 10, 8;
    pub u8, datacount, _: 3, 0;
}

impl Abstractcs {
    /// Prepare the write-1-to-clear acknowledge of every `cmderr` bit
    pub fn cmderr_clear(&mut self) {
        self.set_cmderr(0b111);
    }

    pub fn cmderr_name(&self) -> &'static str {
        match self.cmderr() {
            0 => "none",
            1 => "busy",
            2 => "not supported",
            3 => "exception",
            4 => "halt/resume",
            5 => "bus",
            7 => "other",
            _ => "reserved",
        }
    }
}

impl DMReg for Abstractcs {
    const NAME: &'static str = "abstractcs";
    const ADDR: u8 = 0x16;
    const RESET_VALUE: u32 = 0x0000_0700;
    const WRITE_RETURNS_VALUE: bool = true;
    const FIELDS: &'static [Field] = &[
        Field::new("progbufsize", 24, 5),
        Field::new("busy", 12, 1),
        Field::new("cmderr", 8, 3),
        Field::new("datacount", 0, 4),
    ];

    fn shadow(regs: &Registers) -> &Self {
        &regs.abstractcs
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.abstractcs
    }
}

/// `command.cmdtype`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CmdType {
    AccessRegister = 0,
    QuickAccess = 1,
    AccessMemory = 2,
}

impl CmdType {
    pub fn try_from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CmdType::AccessRegister),
            1 => Some(CmdType::QuickAccess),
            2 => Some(CmdType::AccessMemory),
            _ => None,
        }
    }
}

/// `command.aarsize` / `command.aamsize` encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AccessSize {
    Bits8 = 0,
    Bits16 = 1,
    Bits32 = 2,
    Bits64 = 3,
    Bits128 = 4,
}

bitfield! {
    /// Abstract Command. The layout of `control` depends on `cmdtype`, so
    /// the register and memory access views overlap.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Command(u32);
    impl Debug;
    pub u8, cmdtype, _: 31, 24;
    u8, _, set_cmdtype_bits: 31, 24;
    pub control, set_control: 23, 0;
    pub aamvirtual, set_aamvirtual: 23;
    pub u8, aarsize, _: 22, 20;
    pub u8, aamsize, _: 22, 20;
    u8, _, set_size_bits: 22, 20;
    pub aapostincrement, set_aapostincrement: 19;
    pub postexec, set_postexec: 18;
    pub transfer, set_transfer: 17;
    pub write, set_write: 16;
    pub u8, target_specific, set_target_specific: 15, 14;
    pub u16, regno, set_regno: 15, 0;
}

impl Command {
    pub fn set_cmdtype(&mut self, cmdtype: CmdType) {
        self.set_cmdtype_bits(cmdtype as u8);
    }

    /// Register access width. Only 32, 64 and 128 bits are defined for
    /// register access, other sizes are ignored.
    pub fn set_aarsize(&mut self, size: AccessSize) {
        match size {
            AccessSize::Bits32 | AccessSize::Bits64 | AccessSize::Bits128 => {
                self.set_size_bits(size as u8)
            }
            _ => log::warn!("command: aarsize {size:?} is not a register access size: ignored"),
        }
    }

    pub fn set_aamsize(&mut self, size: AccessSize) {
        self.set_size_bits(size as u8);
    }

    /// Build a 32-bit Access Register command for abstract register `regno`
    pub fn access_register(regno: u16, write: bool) -> Self {
        let mut command = Command(0);
        command.set_cmdtype(CmdType::AccessRegister);
        command.set_aarsize(AccessSize::Bits32);
        command.set_transfer(true);
        command.set_write(write);
        command.set_regno(regno);
        command
    }
}

impl DMReg for Command {
    const NAME: &'static str = "command";
    const ADDR: u8 = 0x17;
    const ACCESS: Access = Access::WriteOnly;
    const FIELDS: &'static [Field] = &[
        Field::new("cmdtype", 24, 8),
        Field::new("control", 0, 24),
        Field::new("aamvirtual", 23, 1),
        Field::new("aarsize", 20, 3),
        Field::new("aamsize", 20, 3),
        Field::new("aapostincrement", 19, 1),
        Field::new("postexec", 18, 1),
        Field::new("transfer", 17, 1),
        Field::new("write", 16, 1),
        Field::new("target_specific", 14, 2),
        Field::new("regno", 0, 16),
    ];

    fn shadow(regs: &Registers) -> &Self {
        &regs.command
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.command
    }
}

bitfield! {
    /// Abstract Command Autoexec
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Abstractauto(u32);
    impl Debug;
    pub u16, autoexecprogbuf, set_autoexecprogbuf: 31, 16;
    pub u16, autoexecdata, set_autoexecdata: 11, 0;
}

impl DMReg for Abstractauto {
    const NAME: &'static str = "abstractauto";
    const ADDR: u8 = 0x18;
    const FIELDS: &'static [Field] = &[
        Field::new("autoexecprogbuf", 16, 16),
        Field::new("autoexecdata", 0, 12),
    ];

    fn shadow(regs: &Registers) -> &Self {
        &regs.abstractauto
    }

    fn shadow_mut(regs: &mut Registers) -> &mut Self {
        &mut regs.abstractauto
    }
}

bitfield! {
    /// Abstract Data, arguments and results of abstract commands
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Data(u32);
    impl Debug;
    pub data, set_data: 31, 0;
}

impl DMRegArray for Data {
    const NAME: &'static str = "data";
    const ADDRS: &'static [u8] = &[
        0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    ];
    const FIELDS: &'static [Field] = &[Field::new("data", 0, 32)];

    fn shadows(regs: &Registers) -> &[Self] {
        &regs.data
    }

    fn shadows_mut(regs: &mut Registers) -> &mut [Self] {
        &mut regs.data
    }
}

bitfield! {
    /// Program Buffer
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Progbuf(u32);
    impl Debug;
    pub data, set_data: 31, 0;
}

impl DMRegArray for Progbuf {
    const NAME: &'static str = "progbuf";
    const ADDRS: &'static [u8] = &[
        0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x2b, 0x2c, 0x2d, 0x2e,
        0x2f,
    ];
    const FIELDS: &'static [Field] = &[Field::new("data", 0, 32)];

    fn shadows(regs: &Registers) -> &[Self] {
        &regs.progbuf
    }

    fn shadows_mut(regs: &mut Registers) -> &mut [Self] {
        &mut regs.progbuf
    }
}

impl_raw_conversions!(Abstractcs, Command, Abstractauto, Data, Progbuf);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abstractcs_reset_has_all_cmderr_bits() {
        let mut abstractcs = Abstractcs::from(0x1000_1003);
        abstractcs.reset();
        assert_eq!(abstractcs.cmderr(), 0b111);
        assert!(!abstractcs.busy());
        assert_eq!(abstractcs.cmderr_name(), "other");
    }

    #[test]
    fn test_abstractcs_cmderr_clear() {
        let mut abstractcs = Abstractcs::from(0);
        abstractcs.cmderr_clear();
        assert_eq!(abstractcs.0, 0x700);
    }

    #[test]
    fn test_abstractcs_decode() {
        let abstractcs = Abstractcs::from(0x0800_1202);
        assert_eq!(abstractcs.progbufsize(), 8);
        assert!(abstractcs.busy());
        assert_eq!(abstractcs.cmderr(), 2);
        assert_eq!(abstractcs.cmderr_name(), "not supported");
        assert_eq!(abstractcs.datacount(), 2);
    }

    #[test]
    fn test_access_register_command() {
        // read dpc
        let command = Command::access_register(0x7b1, false);
        assert_eq!(command.0, 0x0022_07b1);
        assert_eq!(CmdType::try_from_u8(command.cmdtype()), Some(CmdType::AccessRegister));

        // write x1
        let command = Command::access_register(0x1001, true);
        assert_eq!(command.0, 0x0023_1001);
    }

    #[test]
    fn test_aarsize_rejects_small_sizes() {
        let mut command = Command::from(0);
        command.set_aarsize(AccessSize::Bits64);
        assert_eq!(command.aarsize(), 3);
        command.set_aarsize(AccessSize::Bits8);
        assert_eq!(command.aarsize(), 3);
        command.set_aamsize(AccessSize::Bits8);
        assert_eq!(command.aamsize(), 0);
    }

    #[test]
    fn test_cmdtype_names() {
        assert_eq!(CmdType::try_from_u8(2), Some(CmdType::AccessMemory));
        assert_eq!(CmdType::try_from_u8(3), None);
    }
}
