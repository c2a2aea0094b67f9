//! JTAG Debug Transport Module
//!
//! The DTM sits behind a JTAG TAP and exposes two data registers: `dtmcs`
//! for control and status of the DTM itself, and `dmi` which tunnels
//! accesses to the Debug Module. A DMI access takes two scans: the first
//! shifts in the operation, the second (a NOP) shifts out its result.
use bitfield::bitfield;

use crate::error::{Error, Result};
use crate::transport::Transport;

/// TAP instruction selecting `IDCODE`
pub const IR_IDCODE: u8 = 0x01;
/// TAP instruction selecting `dtmcs`
pub const IR_DTMCS: u8 = 0x10;
/// TAP instruction selecting `dmi`
pub const IR_DMI: u8 = 0x11;
pub const IR_BYPASS0: u8 = 0x00;
pub const IR_BYPASS1: u8 = 0x1f;

/// Width of `IDCODE` and `dtmcs`
const DTM_REG_WIDTH: u32 = 32;

/// Offset of the `address` field in the `dmi` register
const DMI_ADDRESS_BIT_OFFSET: u32 = 34;
/// Offset of the `data` field in the `dmi` register
const DMI_VALUE_BIT_OFFSET: u32 = 2;
const DMI_OP_MASK: u128 = 0x3;

/// Scan-level access to a JTAG TAP
pub trait JtagAccess {
    /// Move the TAP through Test-Logic-Reset. Returns `Ok(false)` when the
    /// target terminated before the reset completed.
    fn tap_reset(&mut self) -> Result<bool>;

    /// Cycles spent in Run-Test/Idle after each data register update
    fn idle_cycles(&self) -> u8;

    fn set_idle_cycles(&mut self, idle_cycles: u8);

    /// Load instruction `ir`, then shift `len` bits of `data` through the
    /// selected data register. Returns the captured bits.
    fn write_register(&mut self, ir: u8, data: u128, len: u32) -> Result<u128>;

    /// Shift zeros through the data register selected by `ir`
    fn read_register(&mut self, ir: u8, len: u32) -> Result<u128> {
        self.write_register(ir, 0, len)
    }
}

impl<J: JtagAccess + ?Sized> JtagAccess for &mut J {
    fn tap_reset(&mut self) -> Result<bool> {
        (**self).tap_reset()
    }

    fn idle_cycles(&self) -> u8 {
        (**self).idle_cycles()
    }

    fn set_idle_cycles(&mut self, idle_cycles: u8) {
        (**self).set_idle_cycles(idle_cycles)
    }

    fn write_register(&mut self, ir: u8, data: u128, len: u32) -> Result<u128> {
        (**self).write_register(ir, data, len)
    }
}

bitfield! {
    /// The `dtmcs` register
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Dtmcs(u32);
    impl Debug;

    pub dmihardreset, set_dmihardreset: 17;
    pub dmireset, set_dmireset: 16;
    pub u8, idle, _: 14, 12;
    pub u8, dmistat, _: 11, 10;
    pub abits, _: 9, 4;
    pub u8, version, _: 3, 0;
}

bitfield! {
    /// The JTAG `IDCODE` register
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Idcode(u32);
    impl Debug;

    pub u8, version, _: 31, 28;
    pub u16, part_number, _: 27, 12;
    pub u16, manufacturer, _: 11, 1;
    pub u8, jep106_id, _: 7, 1;
    pub u8, jep106_continuation, _: 11, 8;
}

/// DMI operation shifted into the `dmi` register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DmiOperation {
    NoOp,
    Read { address: u64 },
    Write { address: u64, value: u32 },
}

impl DmiOperation {
    fn opcode(&self) -> u8 {
        match self {
            DmiOperation::NoOp => 0,
            DmiOperation::Read { .. } => 1,
            DmiOperation::Write { .. } => 2,
        }
    }

    /// Scan payload: `op | data << 2 | (address & address_mask) << 34`
    pub fn register_value(&self, address_mask: u64) -> u128 {
        let (address, value) = match *self {
            DmiOperation::NoOp => (0, 0),
            DmiOperation::Read { address } => (address, 0),
            DmiOperation::Write { address, value } => (address, value),
        };

        ((address & address_mask) as u128) << DMI_ADDRESS_BIT_OFFSET
            | (value as u128) << DMI_VALUE_BIT_OFFSET
            | self.opcode() as u128
    }
}

/// Status reported in the `op` field of a `dmi` scan
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DmiOperationStatus {
    Ok = 0,
    Reserved = 1,
    OperationFailed = 2,
    /// The DTM was still busy with the previous operation
    Retry = 3,
}

impl DmiOperationStatus {
    pub fn parse(response: u128) -> Self {
        match response & DMI_OP_MASK {
            0 => Self::Ok,
            1 => Self::Reserved,
            2 => Self::OperationFailed,
            _ => Self::Retry,
        }
    }
}

/// Debug transport over a JTAG TAP
#[derive(Debug)]
pub struct JtagDtm<J: JtagAccess> {
    jtag: J,
    /// Number of address bits in the `dmi` register
    abits: u32,
    idcode: Option<Idcode>,
    retry_limit: usize,
}

impl<J: JtagAccess> JtagDtm<J> {
    pub fn new(jtag: J) -> Self {
        Self {
            jtag,
            // plausible until reset() reads dtmcs
            abits: 7,
            idcode: None,
            retry_limit: 100,
        }
    }

    /// Bound the RETRY responses tolerated on one DMI access
    pub fn with_retry_limit(mut self, retry_limit: usize) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    pub fn abits(&self) -> u32 {
        self.abits
    }

    /// Total width of the `dmi` register
    pub fn dmi_width(&self) -> u32 {
        DMI_ADDRESS_BIT_OFFSET + self.abits
    }

    pub fn address_mask(&self) -> u64 {
        if self.abits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.abits) - 1
        }
    }

    /// IDCODE read during the last reset
    pub fn idcode(&self) -> Option<Idcode> {
        self.idcode
    }

    pub fn jtag(&self) -> &J {
        &self.jtag
    }

    pub fn jtag_mut(&mut self) -> &mut J {
        &mut self.jtag
    }

    pub fn into_inner(self) -> J {
        self.jtag
    }

    pub fn read_idcode(&mut self) -> Result<Idcode> {
        let raw = self.jtag.read_register(IR_IDCODE, DTM_REG_WIDTH)?;
        Ok(Idcode(raw as u32))
    }

    pub fn read_dtmcs(&mut self) -> Result<Dtmcs> {
        let raw = self.jtag.read_register(IR_DTMCS, DTM_REG_WIDTH)?;
        Ok(Dtmcs(raw as u32))
    }

    pub fn write_dtmcs(&mut self, dtmcs: Dtmcs) -> Result<()> {
        self.jtag
            .write_register(IR_DTMCS, dtmcs.0 as u128, DTM_REG_WIDTH)?;
        Ok(())
    }

    /// Clear the sticky DMI error state (`dtmcs.dmireset`)
    pub fn clear_error_state(&mut self) -> Result<()> {
        let mut dtmcs = Dtmcs(0);
        dtmcs.set_dmireset(true);
        self.write_dtmcs(dtmcs)
    }

    fn dmi_register_access(&mut self, op: DmiOperation) -> Result<u32> {
        let width = self.dmi_width();
        let payload = op.register_value(self.address_mask());
        log::trace!("dmi {op:x?}");
        self.jtag.write_register(IR_DMI, payload, width)?;

        let mut retries = 0;
        loop {
            let response = self.jtag.read_register(IR_DMI, width)?;
            let data = (response >> DMI_VALUE_BIT_OFFSET) as u32;
            match DmiOperationStatus::parse(response) {
                DmiOperationStatus::Ok => return Ok(data),
                DmiOperationStatus::Retry => {
                    if retries >= self.retry_limit {
                        return Err(Error::Timeout);
                    }
                    retries += 1;
                    log::warn!("dmi: busy, retrying");
                    self.clear_error_state()?;
                    let idle_cycles = self.jtag.idle_cycles().saturating_add(1);
                    self.jtag.set_idle_cycles(idle_cycles);
                }
                status => {
                    log::warn!("dmi: unexpected status {status:?} for {op:x?}: ignored");
                    self.clear_error_state()?;
                    return Ok(data);
                }
            }
        }
    }
}

impl<J: JtagAccess> Transport for JtagDtm<J> {
    fn reset(&mut self) -> Result<bool> {
        if !self.jtag.tap_reset()? {
            return Ok(false);
        }

        let idcode = self.read_idcode()?;
        let dtmcs = self.read_dtmcs()?;
        if dtmcs.0 == 0 {
            return Err(Error::NoDebugTransport);
        }

        log::debug!(
            "IDCODE = 0x{:08x} [version = 0x{:x}, part # = 0x{:04x}, manuf ID = 0x{:03x} [JEP106 ID = 0x{:02x}, continuation # = {}]]",
            idcode.0,
            idcode.version(),
            idcode.part_number(),
            idcode.manufacturer(),
            idcode.jep106_id(),
            idcode.jep106_continuation()
        );
        log::debug!("{dtmcs:#x?}");

        if dtmcs.version() != 1 {
            log::warn!(
                "dtmcs: version {} is not 0.13/1.0, continuing anyway",
                dtmcs.version()
            );
        }

        self.jtag.set_idle_cycles(dtmcs.idle());
        self.abits = dtmcs.abits();
        self.idcode = Some(idcode);
        log::debug!(
            "dmi: abits = {}, width = {}, address mask = 0x{:x}",
            self.abits,
            self.dmi_width(),
            self.address_mask()
        );

        self.clear_error_state()?;
        Ok(true)
    }

    fn dmi_read(&mut self, address: u64) -> Result<u32> {
        self.dmi_register_access(DmiOperation::Read { address })
    }

    fn dmi_write(&mut self, address: u64, data: u32) -> Result<u32> {
        self.dmi_register_access(DmiOperation::Write {
            address,
            value: data,
        })
    }
}
