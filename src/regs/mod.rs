//! Debug Module register definitions
//!
//! Every register is a `bitfield!` newtype over its raw 32-bit value. The
//! newtype doubles as the session's shadow copy: field accessors only touch
//! that value, the [`crate::dmi::Dmi`] read/write calls are the only things
//! that scan.
//!
//! Each register also carries a [`Field`] descriptor table, so generic code
//! (logging, tests, the `set_field` escape hatch) can walk the layout without
//! knowing the concrete type.
use std::fmt;

mod abstract_cmd;
mod control;
mod misc;
mod sysbus;

pub use abstract_cmd::*;
pub use control::*;
pub use misc::*;
pub use sysbus::*;

/// Direction(s) in which a register may be accessed through the DMI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl Access {
    pub fn readable(self) -> bool {
        !matches!(self, Access::WriteOnly)
    }

    pub fn writable(self) -> bool {
        !matches!(self, Access::ReadOnly)
    }
}

/// A named bit-field `(offset, width)` inside a 32-bit register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: u32,
    pub width: u32,
}

impl Field {
    pub const fn new(name: &'static str, offset: u32, width: u32) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    /// Largest value the field can hold
    pub const fn max(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    pub const fn mask(&self) -> u32 {
        self.max() << self.offset
    }

    pub const fn get(&self, raw: u32) -> u32 {
        (raw & self.mask()) >> self.offset
    }

    /// Merge `value` into `raw`, bits of `value` above the width are dropped
    pub const fn set(&self, raw: u32, value: u32) -> u32 {
        (raw & !self.mask()) | ((value << self.offset) & self.mask())
    }
}

fn lookup_field(fields: &'static [Field], name: &str) -> Option<&'static Field> {
    fields.iter().find(|f| f.name == name)
}

/// Debug Module Register
pub trait DMReg: From<u32> + Into<u32> + Copy + fmt::Debug {
    const NAME: &'static str;
    const ADDR: u8;
    const RESET_VALUE: u32 = 0;
    const ACCESS: Access = Access::ReadWrite;
    const FIELDS: &'static [Field];
    /// The DMI answers a write to this register with the register's live value
    const WRITE_RETURNS_VALUE: bool = false;
    /// Bits that [`DMReg::reset`] leaves as they are
    const RESET_KEEPS: u32 = 0;

    fn shadow(regs: &Registers) -> &Self;
    fn shadow_mut(regs: &mut Registers) -> &mut Self;

    fn value(&self) -> u32 {
        (*self).into()
    }

    /// Reload the architectural reset value, except for the bits in
    /// `RESET_KEEPS`. No scan.
    fn reset(&mut self) {
        let kept = self.value() & Self::RESET_KEEPS;
        *self = Self::from((Self::RESET_VALUE & !Self::RESET_KEEPS) | kept);
    }

    fn field(&self, name: &str) -> Option<u32> {
        lookup_field(Self::FIELDS, name).map(|f| f.get(self.value()))
    }

    fn set_field(&mut self, name: &str, value: u32) {
        match lookup_field(Self::FIELDS, name) {
            Some(f) => *self = Self::from(f.set(self.value(), value)),
            None => log::warn!("{} has no field {name:?}: ignored", Self::NAME),
        }
    }
}

/// Debug Module Register with several instances at fixed, possibly
/// non-contiguous, addresses
pub trait DMRegArray: From<u32> + Into<u32> + Copy + fmt::Debug {
    const NAME: &'static str;
    const ADDRS: &'static [u8];
    const RESET_VALUE: u32 = 0;
    const ACCESS: Access = Access::ReadWrite;
    const FIELDS: &'static [Field];

    fn shadows(regs: &Registers) -> &[Self];
    fn shadows_mut(regs: &mut Registers) -> &mut [Self];

    fn value(&self) -> u32 {
        (*self).into()
    }

    fn reset(&mut self) {
        *self = Self::from(Self::RESET_VALUE);
    }

    fn field(&self, name: &str) -> Option<u32> {
        lookup_field(Self::FIELDS, name).map(|f| f.get(self.value()))
    }

    fn set_field(&mut self, name: &str, value: u32) {
        match lookup_field(Self::FIELDS, name) {
            Some(f) => *self = Self::from(f.set(self.value(), value)),
            None => log::warn!("{} has no field {name:?}: ignored", Self::NAME),
        }
    }
}

macro_rules! impl_raw_conversions {
    ($($reg:ident),+ $(,)?) => {
        $(
            impl From<u32> for $reg {
                fn from(value: u32) -> Self {
                    Self(value)
                }
            }

            impl From<$reg> for u32 {
                fn from(val: $reg) -> Self {
                    val.0
                }
            }
        )+
    };
}
pub(crate) use impl_raw_conversions;

/// Shadow copies of every Debug Module register, owned by one DMI session
#[derive(Debug, Clone, Copy)]
pub struct Registers {
    pub dmcontrol: Dmcontrol,
    pub dmstatus: Dmstatus,
    pub hartinfo: Hartinfo,
    pub haltsum: [Haltsum; 4],
    pub hawindowsel: Hawindowsel,
    pub hawindow: Hawindow,
    pub abstractcs: Abstractcs,
    pub command: Command,
    pub abstractauto: Abstractauto,
    pub data: [Data; 12],
    pub progbuf: [Progbuf; 16],
    pub confstrptr: [Confstrptr; 4],
    pub nextdm: Nextdm,
    pub authdata: Authdata,
    pub sbcs: Sbcs,
    pub sbaddress: [Sbaddress; 4],
    pub sbdata: [Sbdata; 4],
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            dmcontrol: Dmcontrol::from(<Dmcontrol as DMReg>::RESET_VALUE),
            dmstatus: Dmstatus::from(<Dmstatus as DMReg>::RESET_VALUE),
            hartinfo: Hartinfo::from(<Hartinfo as DMReg>::RESET_VALUE),
            haltsum: [Haltsum::from(<Haltsum as DMRegArray>::RESET_VALUE); 4],
            hawindowsel: Hawindowsel::from(<Hawindowsel as DMReg>::RESET_VALUE),
            hawindow: Hawindow::from(<Hawindow as DMReg>::RESET_VALUE),
            abstractcs: Abstractcs::from(<Abstractcs as DMReg>::RESET_VALUE),
            command: Command::from(<Command as DMReg>::RESET_VALUE),
            abstractauto: Abstractauto::from(<Abstractauto as DMReg>::RESET_VALUE),
            data: [Data::from(<Data as DMRegArray>::RESET_VALUE); 12],
            progbuf: [Progbuf::from(<Progbuf as DMRegArray>::RESET_VALUE); 16],
            confstrptr: [Confstrptr::from(<Confstrptr as DMRegArray>::RESET_VALUE); 4],
            nextdm: Nextdm::from(<Nextdm as DMReg>::RESET_VALUE),
            authdata: Authdata::from(<Authdata as DMReg>::RESET_VALUE),
            sbcs: Sbcs::from(<Sbcs as DMReg>::RESET_VALUE),
            sbaddress: [Sbaddress::from(<Sbaddress as DMRegArray>::RESET_VALUE); 4],
            sbdata: [Sbdata::from(<Sbdata as DMRegArray>::RESET_VALUE); 4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_fields(name: &str, fields: &[Field]) {
        for f in fields {
            assert!(f.offset + f.width <= 32, "{name}.{} out of range", f.name);
            for v in [0, 1, f.max() / 2, f.max()] {
                for background in [0u32, u32::MAX, 0xa5a5_5a5a] {
                    let raw = f.set(background, v);
                    assert_eq!(f.get(raw), v, "{name}.{} round trip", f.name);
                    assert_eq!(
                        raw & !f.mask(),
                        background & !f.mask(),
                        "{name}.{} touched bits outside its mask",
                        f.name
                    );
                }
            }
        }
    }

    fn check_reg<R: DMReg>() {
        check_fields(R::NAME, R::FIELDS);
        let mut reg = R::from(0xdead_beef);
        reg.reset();
        assert_eq!(
            reg.value(),
            (R::RESET_VALUE & !R::RESET_KEEPS) | (0xdead_beef & R::RESET_KEEPS),
            "{} reset value",
            R::NAME
        );

        let mut reg = R::from(0);
        reg.reset();
        assert_eq!(reg.value(), R::RESET_VALUE, "{} reset value", R::NAME);
    }

    fn check_array<R: DMRegArray>() {
        check_fields(R::NAME, R::FIELDS);
        let mut reg = R::from(0xdead_beef);
        reg.reset();
        assert_eq!(reg.value(), R::RESET_VALUE, "{} reset value", R::NAME);
    }

    #[test]
    fn test_field_descriptor() {
        let f = Field::new("cmderr", 8, 3);
        assert_eq!(f.mask(), 0x700);
        assert_eq!(f.get(0x0000_0500), 5);
        assert_eq!(f.set(0xffff_ffff, 0), 0xffff_f8ff);
        // value wider than the field is cut to the field
        assert_eq!(f.set(0, 0xf), 0x700);

        let whole = Field::new("data", 0, 32);
        assert_eq!(whole.mask(), u32::MAX);
        assert_eq!(whole.set(0, 0x1234_5678), 0x1234_5678);
    }

    #[test]
    fn test_every_register_layout() {
        check_reg::<Dmcontrol>();
        check_reg::<Dmstatus>();
        check_reg::<Hartinfo>();
        check_reg::<Hawindowsel>();
        check_reg::<Hawindow>();
        check_reg::<Abstractcs>();
        check_reg::<Command>();
        check_reg::<Abstractauto>();
        check_reg::<Nextdm>();
        check_reg::<Authdata>();
        check_reg::<Sbcs>();
        check_array::<Haltsum>();
        check_array::<Data>();
        check_array::<Progbuf>();
        check_array::<Confstrptr>();
        check_array::<Sbaddress>();
        check_array::<Sbdata>();
    }

    #[test]
    fn test_registers_default_to_reset_values() {
        let regs = Registers::default();
        assert_eq!(regs.abstractcs.value(), 0x700);
        assert_eq!(regs.sbcs.value(), 0x2004_0000);
        assert_eq!(regs.dmcontrol.value(), 0);
        assert!(regs.data.iter().all(|d| d.value() == 0));
    }

    #[test]
    fn test_array_address_maps() {
        assert_eq!(
            Data::ADDRS,
            &[0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f]
        );
        assert_eq!(Progbuf::ADDRS.len(), 16);
        assert_eq!(Progbuf::ADDRS[15], 0x2f);
        assert_eq!(Haltsum::ADDRS, &[0x40, 0x13, 0x34, 0x35]);
        assert_eq!(Sbaddress::ADDRS, &[0x39, 0x3a, 0x3b, 0x37]);
        assert_eq!(Sbdata::ADDRS, &[0x3c, 0x3d, 0x3e, 0x3f]);
        assert_eq!(Confstrptr::ADDRS, &[0x19, 0x1a, 0x1b, 0x1c]);
    }

    #[test]
    fn test_named_field_access() {
        let mut regs = Registers::default();
        regs.command.set_field("regno", 0x7b1);
        regs.command.set_field("transfer", 1);
        assert_eq!(regs.command.regno(), 0x7b1);
        assert!(regs.command.transfer());
        assert_eq!(regs.command.field("regno"), Some(0x7b1));
        assert_eq!(regs.command.field("bogus"), None);

        // unknown names are ignored
        let before = regs.command.value();
        regs.command.set_field("bogus", 1);
        assert_eq!(regs.command.value(), before);
    }
}
