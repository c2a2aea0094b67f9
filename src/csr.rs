//! CSR catalog
//!
//! Addresses are the native CSR numbers, which is also how the Access
//! Register abstract command numbers them. GPRs and FPRs live above the CSR
//! space at [`GPR_BASE`] and [`FPR_BASE`].

/// Abstract register number of `x0`
pub const GPR_BASE: u16 = 0x1000;
/// Abstract register number of `f0`
pub const FPR_BASE: u16 = GPR_BASE + 0x20;

pub const FFLAGS: u16 = 0x001;
pub const FRM: u16 = 0x002;
pub const FCSR: u16 = 0x003;
pub const CYCLE: u16 = 0xc00;
pub const INSTRET: u16 = 0xc02;
pub const HPMCOUNTER3: u16 = 0xc03;
pub const HPMCOUNTER4: u16 = 0xc04;
pub const HPMCOUNTER5: u16 = 0xc05;
pub const HPMCOUNTER6: u16 = 0xc06;
pub const HPMCOUNTER7: u16 = 0xc07;
pub const HPMCOUNTER8: u16 = 0xc08;
pub const HPMCOUNTER9: u16 = 0xc09;
pub const HPMCOUNTER10: u16 = 0xc0a;
pub const HPMCOUNTER11: u16 = 0xc0b;
pub const HPMCOUNTER12: u16 = 0xc0c;
pub const HPMCOUNTER13: u16 = 0xc0d;
pub const HPMCOUNTER14: u16 = 0xc0e;
pub const HPMCOUNTER15: u16 = 0xc0f;
pub const HPMCOUNTER16: u16 = 0xc10;
pub const HPMCOUNTER17: u16 = 0xc11;
pub const HPMCOUNTER18: u16 = 0xc12;
pub const HPMCOUNTER19: u16 = 0xc13;
pub const HPMCOUNTER20: u16 = 0xc14;
pub const HPMCOUNTER21: u16 = 0xc15;
pub const HPMCOUNTER22: u16 = 0xc16;
pub const HPMCOUNTER23: u16 = 0xc17;
pub const HPMCOUNTER24: u16 = 0xc18;
pub const HPMCOUNTER25: u16 = 0xc19;
pub const HPMCOUNTER26: u16 = 0xc1a;
pub const HPMCOUNTER27: u16 = 0xc1b;
pub const HPMCOUNTER28: u16 = 0xc1c;
pub const HPMCOUNTER29: u16 = 0xc1d;
pub const HPMCOUNTER30: u16 = 0xc1e;
pub const HPMCOUNTER31: u16 = 0xc1f;
pub const CYCLEH: u16 = 0xc80;
pub const INSTRETH: u16 = 0xc82;
pub const HPMCOUNTERH3: u16 = 0xc83;
pub const HPMCOUNTERH4: u16 = 0xc84;
pub const HPMCOUNTERH5: u16 = 0xc85;
pub const HPMCOUNTERH6: u16 = 0xc86;
pub const HPMCOUNTERH7: u16 = 0xc87;
pub const HPMCOUNTERH8: u16 = 0xc88;
pub const HPMCOUNTERH9: u16 = 0xc89;
pub const HPMCOUNTERH10: u16 = 0xc8a;
pub const HPMCOUNTERH11: u16 = 0xc8b;
pub const HPMCOUNTERH12: u16 = 0xc8c;
pub const HPMCOUNTERH13: u16 = 0xc8d;
pub const HPMCOUNTERH14: u16 = 0xc8e;
pub const HPMCOUNTERH15: u16 = 0xc8f;
pub const HPMCOUNTERH16: u16 = 0xc90;
pub const HPMCOUNTERH17: u16 = 0xc91;
pub const HPMCOUNTERH18: u16 = 0xc92;
pub const HPMCOUNTERH19: u16 = 0xc93;
pub const HPMCOUNTERH20: u16 = 0xc94;
pub const HPMCOUNTERH21: u16 = 0xc95;
pub const HPMCOUNTERH22: u16 = 0xc96;
pub const HPMCOUNTERH23: u16 = 0xc97;
pub const HPMCOUNTERH24: u16 = 0xc98;
pub const HPMCOUNTERH25: u16 = 0xc99;
pub const HPMCOUNTERH26: u16 = 0xc9a;
pub const HPMCOUNTERH27: u16 = 0xc9b;
pub const HPMCOUNTERH28: u16 = 0xc9c;
pub const HPMCOUNTERH29: u16 = 0xc9d;
pub const HPMCOUNTERH30: u16 = 0xc9e;
pub const HPMCOUNTERH31: u16 = 0xc9f;
pub const LPSTART0: u16 = 0x800;
pub const LPEND0: u16 = 0x801;
pub const LPCOUNT0: u16 = 0x802;
pub const LPSTART1: u16 = 0x804;
pub const LPEND1: u16 = 0x805;
pub const LPCOUNT1: u16 = 0x806;
pub const UHARTID: u16 = 0xcc0;
pub const PRIVLV: u16 = 0xcc1;
pub const MSTATUS: u16 = 0x300;
pub const MISA: u16 = 0x301;
pub const MIE: u16 = 0x304;
pub const MTVEC: u16 = 0x305;
pub const MCOUNTINHIBIT: u16 = 0x320;
pub const MHPMEVENT3: u16 = 0x323;
pub const MHPMEVENT4: u16 = 0x324;
pub const MHPMEVENT5: u16 = 0x325;
pub const MHPMEVENT6: u16 = 0x326;
pub const MHPMEVENT7: u16 = 0x327;
pub const MHPMEVENT8: u16 = 0x328;
pub const MHPMEVENT9: u16 = 0x329;
pub const MHPMEVENT10: u16 = 0x32a;
pub const MHPMEVENT11: u16 = 0x32b;
pub const MHPMEVENT12: u16 = 0x32c;
pub const MHPMEVENT13: u16 = 0x32d;
pub const MHPMEVENT14: u16 = 0x32e;
pub const MHPMEVENT15: u16 = 0x32f;
pub const MHPMEVENT16: u16 = 0x330;
pub const MHPMEVENT17: u16 = 0x331;
pub const MHPMEVENT18: u16 = 0x332;
pub const MHPMEVENT19: u16 = 0x333;
pub const MHPMEVENT20: u16 = 0x334;
pub const MHPMEVENT21: u16 = 0x335;
pub const MHPMEVENT22: u16 = 0x336;
pub const MHPMEVENT23: u16 = 0x337;
pub const MHPMEVENT24: u16 = 0x338;
pub const MHPMEVENT25: u16 = 0x339;
pub const MHPMEVENT26: u16 = 0x33a;
pub const MHPMEVENT27: u16 = 0x33b;
pub const MHPMEVENT28: u16 = 0x33c;
pub const MHPMEVENT29: u16 = 0x33d;
pub const MHPMEVENT30: u16 = 0x33e;
pub const MHPMEVENT31: u16 = 0x33f;
pub const MSCRATCH: u16 = 0x340;
pub const MEPC: u16 = 0x341;
pub const MCAUSE: u16 = 0x342;
pub const MTVAL: u16 = 0x343;
pub const MIP: u16 = 0x344;
pub const TSELECT: u16 = 0x7a0;
pub const TDATA1: u16 = 0x7a1;
pub const TDATA2: u16 = 0x7a2;
pub const TDATA3: u16 = 0x7a3;
pub const TINFO: u16 = 0x7a4;
pub const MCONTEXT: u16 = 0x7a8;
pub const SCONTEXT: u16 = 0x7aa;
pub const DCSR: u16 = 0x7b0;
pub const DPC: u16 = 0x7b1;
pub const DSCRATCH0: u16 = 0x7b2;
pub const DSCRATCH1: u16 = 0x7b3;
pub const MCYCLE: u16 = 0xb00;
pub const MINSTRET: u16 = 0xb02;
pub const MHPMCOUNTER3: u16 = 0xb03;
pub const MHPMCOUNTER4: u16 = 0xb04;
pub const MHPMCOUNTER5: u16 = 0xb05;
pub const MHPMCOUNTER6: u16 = 0xb06;
pub const MHPMCOUNTER7: u16 = 0xb07;
pub const MHPMCOUNTER8: u16 = 0xb08;
pub const MHPMCOUNTER9: u16 = 0xb09;
pub const MHPMCOUNTER10: u16 = 0xb0a;
pub const MHPMCOUNTER11: u16 = 0xb0b;
pub const MHPMCOUNTER12: u16 = 0xb0c;
pub const MHPMCOUNTER13: u16 = 0xb0d;
pub const MHPMCOUNTER14: u16 = 0xb0e;
pub const MHPMCOUNTER15: u16 = 0xb0f;
pub const MHPMCOUNTER16: u16 = 0xb10;
pub const MHPMCOUNTER17: u16 = 0xb11;
pub const MHPMCOUNTER18: u16 = 0xb12;
pub const MHPMCOUNTER19: u16 = 0xb13;
pub const MHPMCOUNTER20: u16 = 0xb14;
pub const MHPMCOUNTER21: u16 = 0xb15;
pub const MHPMCOUNTER22: u16 = 0xb16;
pub const MHPMCOUNTER23: u16 = 0xb17;
pub const MHPMCOUNTER24: u16 = 0xb18;
pub const MHPMCOUNTER25: u16 = 0xb19;
pub const MHPMCOUNTER26: u16 = 0xb1a;
pub const MHPMCOUNTER27: u16 = 0xb1b;
pub const MHPMCOUNTER28: u16 = 0xb1c;
pub const MHPMCOUNTER29: u16 = 0xb1d;
pub const MHPMCOUNTER30: u16 = 0xb1e;
pub const MHPMCOUNTER31: u16 = 0xb1f;
pub const MCYCLEH: u16 = 0xb80;
pub const MINSTRETH: u16 = 0xb82;
pub const MHPMCOUNTERH3: u16 = 0xb83;
pub const MHPMCOUNTERH4: u16 = 0xb84;
pub const MHPMCOUNTERH5: u16 = 0xb85;
pub const MHPMCOUNTERH6: u16 = 0xb86;
pub const MHPMCOUNTERH7: u16 = 0xb87;
pub const MHPMCOUNTERH8: u16 = 0xb88;
pub const MHPMCOUNTERH9: u16 = 0xb89;
pub const MHPMCOUNTERH10: u16 = 0xb8a;
pub const MHPMCOUNTERH11: u16 = 0xb8b;
pub const MHPMCOUNTERH12: u16 = 0xb8c;
pub const MHPMCOUNTERH13: u16 = 0xb8d;
pub const MHPMCOUNTERH14: u16 = 0xb8e;
pub const MHPMCOUNTERH15: u16 = 0xb8f;
pub const MHPMCOUNTERH16: u16 = 0xb90;
pub const MHPMCOUNTERH17: u16 = 0xb91;
pub const MHPMCOUNTERH18: u16 = 0xb92;
pub const MHPMCOUNTERH19: u16 = 0xb93;
pub const MHPMCOUNTERH20: u16 = 0xb94;
pub const MHPMCOUNTERH21: u16 = 0xb95;
pub const MHPMCOUNTERH22: u16 = 0xb96;
pub const MHPMCOUNTERH23: u16 = 0xb97;
pub const MHPMCOUNTERH24: u16 = 0xb98;
pub const MHPMCOUNTERH25: u16 = 0xb99;
pub const MHPMCOUNTERH26: u16 = 0xb9a;
pub const MHPMCOUNTERH27: u16 = 0xb9b;
pub const MHPMCOUNTERH28: u16 = 0xb9c;
pub const MHPMCOUNTERH29: u16 = 0xb9d;
pub const MHPMCOUNTERH30: u16 = 0xb9e;
pub const MHPMCOUNTERH31: u16 = 0xb9f;
pub const MVENDORID: u16 = 0xf11;
pub const MARCHID: u16 = 0xf12;
pub const MIMPID: u16 = 0xf13;
pub const MHARTID: u16 = 0xf14;

/// Which target feature a CSR depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrClass {
    General,
    /// Only present with an FPU (F extension)
    FloatingPoint,
    /// Only present with the CORE-V hardware loop extension
    HardwareLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsrDescriptor {
    pub name: &'static str,
    pub address: u16,
    pub read_only: bool,
    pub class: CsrClass,
}

impl CsrDescriptor {
    const fn new(name: &'static str, address: u16, read_only: bool, class: CsrClass) -> Self {
        Self {
            name,
            address,
            read_only,
            class,
        }
    }
}

pub static CSRS: &[CsrDescriptor] = &[
    CsrDescriptor::new("fflags", FFLAGS, false, CsrClass::FloatingPoint),
    CsrDescriptor::new("frm", FRM, false, CsrClass::FloatingPoint),
    CsrDescriptor::new("fcsr", FCSR, false, CsrClass::FloatingPoint),
    CsrDescriptor::new("cycle", CYCLE, true, CsrClass::General),
    CsrDescriptor::new("instret", INSTRET, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter3", HPMCOUNTER3, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter4", HPMCOUNTER4, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter5", HPMCOUNTER5, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter6", HPMCOUNTER6, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter7", HPMCOUNTER7, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter8", HPMCOUNTER8, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter9", HPMCOUNTER9, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter10", HPMCOUNTER10, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter11", HPMCOUNTER11, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter12", HPMCOUNTER12, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter13", HPMCOUNTER13, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter14", HPMCOUNTER14, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter15", HPMCOUNTER15, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter16", HPMCOUNTER16, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter17", HPMCOUNTER17, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter18", HPMCOUNTER18, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter19", HPMCOUNTER19, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter20", HPMCOUNTER20, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter21", HPMCOUNTER21, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter22", HPMCOUNTER22, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter23", HPMCOUNTER23, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter24", HPMCOUNTER24, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter25", HPMCOUNTER25, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter26", HPMCOUNTER26, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter27", HPMCOUNTER27, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter28", HPMCOUNTER28, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter29", HPMCOUNTER29, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter30", HPMCOUNTER30, true, CsrClass::General),
    CsrDescriptor::new("hpmcounter31", HPMCOUNTER31, true, CsrClass::General),
    CsrDescriptor::new("cycleh", CYCLEH, true, CsrClass::General),
    CsrDescriptor::new("instreth", INSTRETH, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh3", HPMCOUNTERH3, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh4", HPMCOUNTERH4, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh5", HPMCOUNTERH5, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh6", HPMCOUNTERH6, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh7", HPMCOUNTERH7, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh8", HPMCOUNTERH8, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh9", HPMCOUNTERH9, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh10", HPMCOUNTERH10, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh11", HPMCOUNTERH11, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh12", HPMCOUNTERH12, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh13", HPMCOUNTERH13, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh14", HPMCOUNTERH14, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh15", HPMCOUNTERH15, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh16", HPMCOUNTERH16, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh17", HPMCOUNTERH17, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh18", HPMCOUNTERH18, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh19", HPMCOUNTERH19, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh20", HPMCOUNTERH20, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh21", HPMCOUNTERH21, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh22", HPMCOUNTERH22, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh23", HPMCOUNTERH23, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh24", HPMCOUNTERH24, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh25", HPMCOUNTERH25, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh26", HPMCOUNTERH26, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh27", HPMCOUNTERH27, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh28", HPMCOUNTERH28, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh29", HPMCOUNTERH29, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh30", HPMCOUNTERH30, true, CsrClass::General),
    CsrDescriptor::new("hpmcounterh31", HPMCOUNTERH31, true, CsrClass::General),
    CsrDescriptor::new("lpstart0", LPSTART0, false, CsrClass::HardwareLoop),
    CsrDescriptor::new("lpend0", LPEND0, false, CsrClass::HardwareLoop),
    CsrDescriptor::new("lpcount0", LPCOUNT0, false, CsrClass::HardwareLoop),
    CsrDescriptor::new("lpstart1", LPSTART1, false, CsrClass::HardwareLoop),
    CsrDescriptor::new("lpend1", LPEND1, false, CsrClass::HardwareLoop),
    CsrDescriptor::new("lpcount1", LPCOUNT1, false, CsrClass::HardwareLoop),
    CsrDescriptor::new("uhartid", UHARTID, true, CsrClass::General),
    CsrDescriptor::new("privlv", PRIVLV, true, CsrClass::General),
    CsrDescriptor::new("mstatus", MSTATUS, false, CsrClass::General),
    CsrDescriptor::new("misa", MISA, false, CsrClass::General),
    CsrDescriptor::new("mie", MIE, false, CsrClass::General),
    CsrDescriptor::new("mtvec", MTVEC, false, CsrClass::General),
    CsrDescriptor::new("mcountinhibit", MCOUNTINHIBIT, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent3", MHPMEVENT3, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent4", MHPMEVENT4, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent5", MHPMEVENT5, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent6", MHPMEVENT6, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent7", MHPMEVENT7, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent8", MHPMEVENT8, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent9", MHPMEVENT9, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent10", MHPMEVENT10, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent11", MHPMEVENT11, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent12", MHPMEVENT12, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent13", MHPMEVENT13, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent14", MHPMEVENT14, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent15", MHPMEVENT15, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent16", MHPMEVENT16, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent17", MHPMEVENT17, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent18", MHPMEVENT18, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent19", MHPMEVENT19, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent20", MHPMEVENT20, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent21", MHPMEVENT21, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent22", MHPMEVENT22, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent23", MHPMEVENT23, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent24", MHPMEVENT24, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent25", MHPMEVENT25, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent26", MHPMEVENT26, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent27", MHPMEVENT27, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent28", MHPMEVENT28, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent29", MHPMEVENT29, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent30", MHPMEVENT30, false, CsrClass::General),
    CsrDescriptor::new("mhpmevent31", MHPMEVENT31, false, CsrClass::General),
    CsrDescriptor::new("mscratch", MSCRATCH, false, CsrClass::General),
    CsrDescriptor::new("mepc", MEPC, false, CsrClass::General),
    CsrDescriptor::new("mcause", MCAUSE, false, CsrClass::General),
    CsrDescriptor::new("mtval", MTVAL, false, CsrClass::General),
    CsrDescriptor::new("mip", MIP, false, CsrClass::General),
    CsrDescriptor::new("tselect", TSELECT, false, CsrClass::General),
    CsrDescriptor::new("tdata1", TDATA1, false, CsrClass::General),
    CsrDescriptor::new("tdata2", TDATA2, false, CsrClass::General),
    CsrDescriptor::new("tdata3", TDATA3, false, CsrClass::General),
    CsrDescriptor::new("tinfo", TINFO, true, CsrClass::General),
    CsrDescriptor::new("mcontext", MCONTEXT, false, CsrClass::General),
    CsrDescriptor::new("scontext", SCONTEXT, false, CsrClass::General),
    CsrDescriptor::new("dcsr", DCSR, false, CsrClass::General),
    CsrDescriptor::new("dpc", DPC, false, CsrClass::General),
    CsrDescriptor::new("dscratch0", DSCRATCH0, false, CsrClass::General),
    CsrDescriptor::new("dscratch1", DSCRATCH1, false, CsrClass::General),
    CsrDescriptor::new("mcycle", MCYCLE, false, CsrClass::General),
    CsrDescriptor::new("minstret", MINSTRET, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter3", MHPMCOUNTER3, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter4", MHPMCOUNTER4, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter5", MHPMCOUNTER5, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter6", MHPMCOUNTER6, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter7", MHPMCOUNTER7, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter8", MHPMCOUNTER8, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter9", MHPMCOUNTER9, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter10", MHPMCOUNTER10, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter11", MHPMCOUNTER11, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter12", MHPMCOUNTER12, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter13", MHPMCOUNTER13, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter14", MHPMCOUNTER14, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter15", MHPMCOUNTER15, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter16", MHPMCOUNTER16, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter17", MHPMCOUNTER17, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter18", MHPMCOUNTER18, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter19", MHPMCOUNTER19, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter20", MHPMCOUNTER20, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter21", MHPMCOUNTER21, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter22", MHPMCOUNTER22, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter23", MHPMCOUNTER23, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter24", MHPMCOUNTER24, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter25", MHPMCOUNTER25, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter26", MHPMCOUNTER26, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter27", MHPMCOUNTER27, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter28", MHPMCOUNTER28, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter29", MHPMCOUNTER29, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter30", MHPMCOUNTER30, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounter31", MHPMCOUNTER31, false, CsrClass::General),
    CsrDescriptor::new("mcycleh", MCYCLEH, false, CsrClass::General),
    CsrDescriptor::new("minstreth", MINSTRETH, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh3", MHPMCOUNTERH3, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh4", MHPMCOUNTERH4, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh5", MHPMCOUNTERH5, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh6", MHPMCOUNTERH6, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh7", MHPMCOUNTERH7, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh8", MHPMCOUNTERH8, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh9", MHPMCOUNTERH9, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh10", MHPMCOUNTERH10, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh11", MHPMCOUNTERH11, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh12", MHPMCOUNTERH12, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh13", MHPMCOUNTERH13, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh14", MHPMCOUNTERH14, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh15", MHPMCOUNTERH15, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh16", MHPMCOUNTERH16, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh17", MHPMCOUNTERH17, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh18", MHPMCOUNTERH18, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh19", MHPMCOUNTERH19, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh20", MHPMCOUNTERH20, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh21", MHPMCOUNTERH21, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh22", MHPMCOUNTERH22, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh23", MHPMCOUNTERH23, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh24", MHPMCOUNTERH24, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh25", MHPMCOUNTERH25, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh26", MHPMCOUNTERH26, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh27", MHPMCOUNTERH27, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh28", MHPMCOUNTERH28, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh29", MHPMCOUNTERH29, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh30", MHPMCOUNTERH30, false, CsrClass::General),
    CsrDescriptor::new("mhpmcounterh31", MHPMCOUNTERH31, false, CsrClass::General),
    CsrDescriptor::new("mvendorid", MVENDORID, true, CsrClass::General),
    CsrDescriptor::new("marchid", MARCHID, true, CsrClass::General),
    CsrDescriptor::new("mimpid", MIMPID, true, CsrClass::General),
    CsrDescriptor::new("mhartid", MHARTID, true, CsrClass::General),
];

/// Standard user mode CSRs, in probing order
pub static USER_CSRS: &[u16] = &[
    FFLAGS,
    FRM,
    FCSR,
    CYCLE,
    INSTRET,
    HPMCOUNTER3,
    HPMCOUNTER4,
    HPMCOUNTER5,
    HPMCOUNTER6,
    HPMCOUNTER7,
    HPMCOUNTER8,
    HPMCOUNTER9,
    HPMCOUNTER10,
    HPMCOUNTER11,
    HPMCOUNTER12,
    HPMCOUNTER13,
    HPMCOUNTER14,
    HPMCOUNTER15,
    HPMCOUNTER16,
    HPMCOUNTER17,
    HPMCOUNTER18,
    HPMCOUNTER19,
    HPMCOUNTER20,
    HPMCOUNTER21,
    HPMCOUNTER22,
    HPMCOUNTER23,
    HPMCOUNTER24,
    HPMCOUNTER25,
    HPMCOUNTER26,
    HPMCOUNTER27,
    HPMCOUNTER28,
    HPMCOUNTER29,
    HPMCOUNTER30,
    HPMCOUNTER31,
    CYCLEH,
    INSTRETH,
    HPMCOUNTERH3,
    HPMCOUNTERH4,
    HPMCOUNTERH5,
    HPMCOUNTERH6,
    HPMCOUNTERH7,
    HPMCOUNTERH8,
    HPMCOUNTERH9,
    HPMCOUNTERH10,
    HPMCOUNTERH11,
    HPMCOUNTERH12,
    HPMCOUNTERH13,
    HPMCOUNTERH14,
    HPMCOUNTERH15,
    HPMCOUNTERH16,
    HPMCOUNTERH17,
    HPMCOUNTERH18,
    HPMCOUNTERH19,
    HPMCOUNTERH20,
    HPMCOUNTERH21,
    HPMCOUNTERH22,
    HPMCOUNTERH23,
    HPMCOUNTERH24,
    HPMCOUNTERH25,
    HPMCOUNTERH26,
    HPMCOUNTERH27,
    HPMCOUNTERH28,
    HPMCOUNTERH29,
    HPMCOUNTERH30,
    HPMCOUNTERH31,
];

/// CORE-V custom user mode CSRs
pub static CUSTOM_USER_CSRS: &[u16] = &[
    LPSTART0,
    LPEND0,
    LPCOUNT0,
    LPSTART1,
    LPEND1,
    LPCOUNT1,
    UHARTID,
    PRIVLV,
];

/// Standard machine mode CSRs, including trigger and debug CSRs
pub static MACHINE_CSRS: &[u16] = &[
    MSTATUS,
    MISA,
    MIE,
    MTVEC,
    MCOUNTINHIBIT,
    MHPMEVENT3,
    MHPMEVENT4,
    MHPMEVENT5,
    MHPMEVENT6,
    MHPMEVENT7,
    MHPMEVENT8,
    MHPMEVENT9,
    MHPMEVENT10,
    MHPMEVENT11,
    MHPMEVENT12,
    MHPMEVENT13,
    MHPMEVENT14,
    MHPMEVENT15,
    MHPMEVENT16,
    MHPMEVENT17,
    MHPMEVENT18,
    MHPMEVENT19,
    MHPMEVENT20,
    MHPMEVENT21,
    MHPMEVENT22,
    MHPMEVENT23,
    MHPMEVENT24,
    MHPMEVENT25,
    MHPMEVENT26,
    MHPMEVENT27,
    MHPMEVENT28,
    MHPMEVENT29,
    MHPMEVENT30,
    MHPMEVENT31,
    MSCRATCH,
    MEPC,
    MCAUSE,
    MTVAL,
    MIP,
    TSELECT,
    TDATA1,
    TDATA2,
    TDATA3,
    TINFO,
    MCONTEXT,
    SCONTEXT,
    DCSR,
    DPC,
    DSCRATCH0,
    DSCRATCH1,
    MCYCLE,
    MINSTRET,
    MHPMCOUNTER3,
    MHPMCOUNTER4,
    MHPMCOUNTER5,
    MHPMCOUNTER6,
    MHPMCOUNTER7,
    MHPMCOUNTER8,
    MHPMCOUNTER9,
    MHPMCOUNTER10,
    MHPMCOUNTER11,
    MHPMCOUNTER12,
    MHPMCOUNTER13,
    MHPMCOUNTER14,
    MHPMCOUNTER15,
    MHPMCOUNTER16,
    MHPMCOUNTER17,
    MHPMCOUNTER18,
    MHPMCOUNTER19,
    MHPMCOUNTER20,
    MHPMCOUNTER21,
    MHPMCOUNTER22,
    MHPMCOUNTER23,
    MHPMCOUNTER24,
    MHPMCOUNTER25,
    MHPMCOUNTER26,
    MHPMCOUNTER27,
    MHPMCOUNTER28,
    MHPMCOUNTER29,
    MHPMCOUNTER30,
    MHPMCOUNTER31,
    MCYCLEH,
    MINSTRETH,
    MHPMCOUNTERH3,
    MHPMCOUNTERH4,
    MHPMCOUNTERH5,
    MHPMCOUNTERH6,
    MHPMCOUNTERH7,
    MHPMCOUNTERH8,
    MHPMCOUNTERH9,
    MHPMCOUNTERH10,
    MHPMCOUNTERH11,
    MHPMCOUNTERH12,
    MHPMCOUNTERH13,
    MHPMCOUNTERH14,
    MHPMCOUNTERH15,
    MHPMCOUNTERH16,
    MHPMCOUNTERH17,
    MHPMCOUNTERH18,
    MHPMCOUNTERH19,
    MHPMCOUNTERH20,
    MHPMCOUNTERH21,
    MHPMCOUNTERH22,
    MHPMCOUNTERH23,
    MHPMCOUNTERH24,
    MHPMCOUNTERH25,
    MHPMCOUNTERH26,
    MHPMCOUNTERH27,
    MHPMCOUNTERH28,
    MHPMCOUNTERH29,
    MHPMCOUNTERH30,
    MHPMCOUNTERH31,
    MVENDORID,
    MARCHID,
    MIMPID,
    MHARTID,
];

pub fn lookup(address: u16) -> Option<&'static CsrDescriptor> {
    CSRS.iter().find(|csr| csr.address == address)
}

/// Name of a CSR, "UNKNOWN" if it is not catalogued
pub fn name(address: u16) -> &'static str {
    lookup(address).map_or("UNKNOWN", |csr| csr.name)
}

/// Unknown CSRs report read-only, so nobody writes to them blindly
pub fn is_read_only(address: u16) -> bool {
    lookup(address).map_or(true, |csr| csr.read_only)
}

pub fn class(address: u16) -> Option<CsrClass> {
    lookup(address).map(|csr| csr.class)
}

static GPR_ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0/fp", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

static FPR_ABI_NAMES: [&str; 32] = [
    "ft0", "ft1", "ft2", "ft3", "ft4", "ft5", "ft6", "ft7", "fs0", "fs1", "fa0", "fa1", "fa2",
    "fa3", "fa4", "fa5", "fa6", "fa7", "fs2", "fs3", "fs4", "fs5", "fs6", "fs7", "fs8", "fs9",
    "fs10", "fs11", "ft8", "ft9", "ft10", "ft11",
];

pub fn gpr_abi_name(regno: usize) -> &'static str {
    GPR_ABI_NAMES.get(regno).copied().unwrap_or("(unknown)")
}

pub fn fpr_abi_name(regno: usize) -> &'static str {
    FPR_ABI_NAMES.get(regno).copied().unwrap_or("(unknown)")
}

/// `x5 (t0)` style name
pub fn gpr_full_name(regno: usize) -> String {
    format!("x{regno} ({})", gpr_abi_name(regno))
}

/// `f10 (fa0)` style name
pub fn fpr_full_name(regno: usize) -> String {
    format!("f{regno} ({})", fpr_abi_name(regno))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_bases() {
        assert_eq!(GPR_BASE, 0x1000);
        assert_eq!(FPR_BASE, 0x1020);
    }

    #[test]
    fn test_catalog_is_unique() {
        for (i, a) in CSRS.iter().enumerate() {
            for b in &CSRS[i + 1..] {
                assert_ne!(a.address, b.address, "{} and {} collide", a.name, b.name);
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_probe_lists_are_catalogued() {
        for addr in USER_CSRS.iter().chain(CUSTOM_USER_CSRS).chain(MACHINE_CSRS) {
            assert!(lookup(*addr).is_some(), "0x{addr:03x} not in catalog");
        }
        assert_eq!(
            USER_CSRS.len() + CUSTOM_USER_CSRS.len() + MACHINE_CSRS.len(),
            CSRS.len()
        );
    }

    #[test]
    fn test_lookups() {
        assert_eq!(name(DPC), "dpc");
        assert_eq!(name(0x7b1), "dpc");
        assert_eq!(name(MSTATUS), "mstatus");
        assert_eq!(name(0x123), "UNKNOWN");

        assert!(is_read_only(MHARTID));
        assert!(is_read_only(TINFO));
        assert!(!is_read_only(DCSR));
        assert!(is_read_only(0x123));

        assert_eq!(class(FCSR), Some(CsrClass::FloatingPoint));
        assert_eq!(class(LPCOUNT1), Some(CsrClass::HardwareLoop));
        assert_eq!(class(MHPMCOUNTERH31), Some(CsrClass::General));
        assert_eq!(class(0x123), None);
    }

    #[test]
    fn test_counter_addresses() {
        assert_eq!(HPMCOUNTER31, 0xc1f);
        assert_eq!(HPMCOUNTERH3, 0xc83);
        assert_eq!(MHPMEVENT31, 0x33f);
        assert_eq!(MHPMCOUNTER3, 0xb03);
        assert_eq!(MHPMCOUNTERH31, 0xb9f);
    }

    #[test]
    fn test_abi_names() {
        assert_eq!(gpr_abi_name(0), "zero");
        assert_eq!(gpr_abi_name(13), "a3");
        assert_eq!(gpr_abi_name(32), "(unknown)");
        assert_eq!(fpr_abi_name(10), "fa0");
        assert_eq!(gpr_full_name(8), "x8 (s0/fp)");
        assert_eq!(fpr_full_name(31), "f31 (ft11)");
    }
}
