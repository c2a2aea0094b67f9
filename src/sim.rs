//! Simulated RISC-V target behind a JTAG TAP
//!
//! A behavioural model of a Debug Module in the style of the CORE-V MCU
//! debug unit: hart selection with a configurable number of implemented
//! bits, halt/resume, Access Register abstract commands over GPRs, FPRs and
//! the catalogued CSRs, and 32-bit system bus access to a RAM region.
//! It speaks the DTM scan protocol of [`crate::jtag`], so the whole stack
//! from [`crate::dmi::Dmi`] down is exercised without hardware.
use std::collections::HashMap;

use crate::{
    csr::{self, CsrClass, FPR_BASE, GPR_BASE},
    error::{Error, Result},
    jtag::{DmiOperationStatus, JtagAccess, IR_DMI, IR_DTMCS, IR_IDCODE},
};

/// Shape of the simulated target
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub harts: u32,
    /// Implemented bits of `dmcontrol.hartsel`
    pub hartsel_bits: u32,
    pub fpu: bool,
    /// CORE-V hardware loop extension
    pub hwlp: bool,
    pub idcode: u32,
    pub abits: u32,
    pub idle: u8,
    /// RETRY responses returned before each DMI result
    pub busy_scans: usize,
    /// `abstractcs` reads reporting busy after each abstract command
    pub busy_polls: usize,
    pub ram_base: u32,
    pub ram_size: usize,
    pub progbufsize: u8,
    pub datacount: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            harts: 1,
            hartsel_bits: 5,
            fpu: false,
            hwlp: true,
            idcode: 0x249511c3,
            abits: 7,
            idle: 1,
            busy_scans: 0,
            busy_polls: 0,
            ram_base: 0x1c00_0000,
            ram_size: 0x1_0000,
            progbufsize: 8,
            datacount: 2,
        }
    }
}

const CMDERR_NONE: u32 = 0;
const CMDERR_NOT_SUPPORTED: u32 = 2;
const CMDERR_EXCEPTION: u32 = 3;
const CMDERR_HALT_RESUME: u32 = 4;

const SBERR_BADADDR: u32 = 2;
const SBERR_ALIGNMENT: u32 = 3;
const SBERR_BADSIZE: u32 = 4;

#[derive(Debug, Clone)]
pub struct SimHart {
    pub gprs: [u32; 32],
    pub fprs: [u32; 32],
    pub csrs: HashMap<u16, u32>,
    pub halted: bool,
    pub resumeack: bool,
    pub havereset: bool,
}

impl SimHart {
    fn new(hartid: u32, config: &SimConfig) -> Self {
        let mut csrs: HashMap<u16, u32> = csr::CSRS.iter().map(|c| (c.address, 0)).collect();
        // RV32IMC(F) with the X extension bit for the custom CSRs
        let misa = 0x4080_1104 | if config.fpu { 1 << 5 } else { 0 };
        csrs.insert(csr::MISA, misa);
        csrs.insert(csr::MHARTID, hartid);
        csrs.insert(csr::UHARTID, hartid);
        csrs.insert(csr::MVENDORID, 0x0000_0602);
        csrs.insert(csr::MARCHID, 0x0000_0004);
        csrs.insert(csr::MSTATUS, 0x0000_1800);
        csrs.insert(csr::PRIVLV, 0x0000_0003);
        // xdebugver 4, prv M
        csrs.insert(csr::DCSR, 0x4000_0003);
        csrs.insert(csr::DPC, config.ram_base + 0x80);

        Self {
            gprs: [0; 32],
            fprs: [0; 32],
            csrs,
            halted: false,
            resumeack: false,
            havereset: true,
        }
    }
}

#[derive(Debug, Clone)]
struct DebugModule {
    dmactive: bool,
    ndmreset: bool,
    hartsel: u32,
    cmderr: u32,
    busy_remaining: usize,
    abstractauto: u32,
    data: [u32; 12],
    progbuf: [u32; 16],
    authdata: u32,
    hawindowsel: u32,
    hawindow: u32,
    sbcs: u32,
    sberror: u32,
    sbbusyerror: bool,
    sbaddress: u32,
    sbdata: u32,
}

impl DebugModule {
    fn new() -> Self {
        Self {
            dmactive: false,
            ndmreset: false,
            hartsel: 0,
            cmderr: CMDERR_NONE,
            busy_remaining: 0,
            abstractauto: 0,
            data: [0; 12],
            progbuf: [0; 16],
            authdata: 0,
            hawindowsel: 0,
            hawindow: 0,
            // sbaccess = 32 bit
            sbcs: 2 << 17,
            sberror: 0,
            sbbusyerror: false,
            sbaddress: 0,
            sbdata: 0,
        }
    }
}

/// Simulated JTAG TAP with a Debug Module behind it
#[derive(Debug, Clone)]
pub struct SimTarget {
    config: SimConfig,
    dm: DebugModule,
    harts: Vec<SimHart>,
    memory: Vec<u8>,
    idle: u8,
    /// Result of the last DMI operation, shifted out by the next scan
    dmi_result: u128,
    retries_pending: usize,
    terminated: bool,
    scans: usize,
}

impl SimTarget {
    pub fn new(config: SimConfig) -> Self {
        let harts = (0..config.harts)
            .map(|id| SimHart::new(id, &config))
            .collect();
        let memory = vec![0; config.ram_size];
        Self {
            dm: DebugModule::new(),
            harts,
            memory,
            idle: 0,
            dmi_result: 0,
            retries_pending: 0,
            terminated: false,
            scans: 0,
            config,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn hart(&self, hart: usize) -> Option<&SimHart> {
        self.harts.get(hart)
    }

    pub fn hart_mut(&mut self, hart: usize) -> Option<&mut SimHart> {
        self.harts.get_mut(hart)
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Number of data register scans so far
    pub fn scans(&self) -> usize {
        self.scans
    }

    /// Make the target disappear, as if the simulation ended
    pub fn terminate(&mut self) {
        self.terminated = true;
    }

    fn dtmcs(&self) -> u32 {
        let sticky_busy = if self.retries_pending > 0 { 3 } else { 0 };
        (self.config.idle.min(7) as u32) << 12
            | sticky_busy << 10
            | (self.config.abits & 0x3f) << 4
            | 1
    }

    fn selected_hart(&self) -> Option<usize> {
        let hart = self.dm.hartsel as usize;
        (hart < self.harts.len()).then_some(hart)
    }

    fn hartsel_mask(&self) -> u32 {
        (1u32 << self.config.hartsel_bits.min(20)) - 1
    }

    fn dmcontrol(&self) -> u32 {
        let hartsel = self.dm.hartsel;
        (hartsel & 0x3ff) << 16
            | (hartsel >> 10) << 6
            | (self.dm.ndmreset as u32) << 1
            | self.dm.dmactive as u32
    }

    fn write_dmcontrol(&mut self, value: u32) {
        self.dm.dmactive = value & 1 != 0;
        if !self.dm.dmactive {
            self.dm = DebugModule::new();
            return;
        }
        self.dm.ndmreset = value & 2 != 0;
        let hartsel = ((value >> 16) & 0x3ff) | ((value >> 6) & 0x3ff) << 10;
        self.dm.hartsel = hartsel & self.hartsel_mask();

        let Some(hart) = self.selected_hart() else {
            return;
        };
        let hart = &mut self.harts[hart];
        if value & (1 << 31) != 0 {
            hart.halted = true;
            hart.resumeack = false;
        } else if value & (1 << 30) != 0 && hart.halted {
            hart.halted = false;
            hart.resumeack = true;
        }
        if value & (1 << 28) != 0 {
            hart.havereset = false;
        }
    }

    fn dmstatus(&self) -> u32 {
        // authenticated, version 0.13
        let mut value = 1 << 7 | 2;
        match self.selected_hart().map(|h| &self.harts[h]) {
            None => value |= 0b11 << 14,
            Some(hart) => {
                if hart.havereset {
                    value |= 0b11 << 18;
                }
                if hart.resumeack {
                    value |= 0b11 << 16;
                }
                if hart.halted {
                    value |= 0b11 << 8;
                } else {
                    value |= 0b11 << 10;
                }
            }
        }
        value
    }

    fn abstractcs(&self) -> u32 {
        let busy = (self.dm.busy_remaining > 0) as u32;
        (self.config.progbufsize as u32 & 0x1f) << 24
            | busy << 12
            | self.dm.cmderr << 8
            | (self.config.datacount as u32 & 0xf)
    }

    fn haltsum0(&self) -> u32 {
        self.harts
            .iter()
            .take(32)
            .enumerate()
            .filter(|(_, h)| h.halted)
            .fold(0, |acc, (i, _)| acc | 1 << i)
    }

    fn execute_command(&mut self, command: u32) {
        if self.dm.cmderr != CMDERR_NONE {
            log::trace!("sim: command ignored, cmderr pending");
            return;
        }
        self.dm.busy_remaining = self.config.busy_polls;
        self.dm.cmderr = self.access_register(command);
    }

    fn access_register(&mut self, command: u32) -> u32 {
        let cmdtype = command >> 24;
        let aarsize = (command >> 20) & 0x7;
        let transfer = command & (1 << 17) != 0;
        let write = command & (1 << 16) != 0;
        let regno = (command & 0xffff) as u16;

        if cmdtype != 0 || aarsize != 2 || command & (1 << 18) != 0 {
            return CMDERR_NOT_SUPPORTED;
        }
        let Some(hart) = self.selected_hart() else {
            return CMDERR_HALT_RESUME;
        };
        if !self.harts[hart].halted {
            return CMDERR_HALT_RESUME;
        }
        if !transfer {
            return CMDERR_NONE;
        }

        let fpu = self.config.fpu;
        let hwlp = self.config.hwlp;
        let data0 = self.dm.data[0];
        let hart = &mut self.harts[hart];
        match regno {
            r if (GPR_BASE..GPR_BASE + 32).contains(&r) => {
                let n = (r - GPR_BASE) as usize;
                if write {
                    // x0 is hard-wired to zero
                    if n != 0 {
                        hart.gprs[n] = data0;
                    }
                } else {
                    self.dm.data[0] = hart.gprs[n];
                }
                CMDERR_NONE
            }
            r if (FPR_BASE..FPR_BASE + 32).contains(&r) => {
                if !fpu {
                    return CMDERR_EXCEPTION;
                }
                let n = (r - FPR_BASE) as usize;
                if write {
                    hart.fprs[n] = data0;
                } else {
                    self.dm.data[0] = hart.fprs[n];
                }
                CMDERR_NONE
            }
            r if r < 0x1000 => {
                let Some(desc) = csr::lookup(r) else {
                    return CMDERR_EXCEPTION;
                };
                let present = match desc.class {
                    CsrClass::General => true,
                    CsrClass::FloatingPoint => fpu,
                    CsrClass::HardwareLoop => hwlp,
                };
                if !present {
                    return CMDERR_EXCEPTION;
                }
                if write {
                    if desc.read_only {
                        return CMDERR_EXCEPTION;
                    }
                    hart.csrs.insert(r, data0);
                } else {
                    self.dm.data[0] = hart.csrs.get(&r).copied().unwrap_or(0);
                }
                CMDERR_NONE
            }
            _ => CMDERR_NOT_SUPPORTED,
        }
    }

    fn sbcs(&self) -> u32 {
        // sbversion 1, sbasize 32, 8/16/32-bit accesses
        1 << 29
            | (self.dm.sbbusyerror as u32) << 22
            | self.dm.sbcs
            | self.dm.sberror << 12
            | 32 << 5
            | 0b111
    }

    fn write_sbcs(&mut self, value: u32) {
        // sbreadonaddr, sbaccess, sbautoincrement, sbreadondata
        self.dm.sbcs = value & 0x001f_8000;
        if value & (1 << 22) != 0 {
            self.dm.sbbusyerror = false;
        }
        self.dm.sberror &= !((value >> 12) & 0x7);
    }

    fn sb_autoincrement(&mut self) {
        if self.dm.sbcs & (1 << 16) != 0 {
            self.dm.sbaddress = self.dm.sbaddress.wrapping_add(4);
        }
    }

    fn sb_check(&self) -> std::result::Result<usize, u32> {
        if (self.dm.sbcs >> 17) & 0x7 != 2 {
            return Err(SBERR_BADSIZE);
        }
        let address = self.dm.sbaddress;
        if address % 4 != 0 {
            return Err(SBERR_ALIGNMENT);
        }
        let offset = address.wrapping_sub(self.config.ram_base) as usize;
        if address < self.config.ram_base || offset + 4 > self.memory.len() {
            return Err(SBERR_BADADDR);
        }
        Ok(offset)
    }

    fn sb_read(&mut self) {
        if self.dm.sberror != 0 {
            return;
        }
        match self.sb_check() {
            Ok(offset) => {
                let bytes = &self.memory[offset..offset + 4];
                self.dm.sbdata = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                self.sb_autoincrement();
            }
            Err(sberror) => self.dm.sberror = sberror,
        }
    }

    fn sb_write(&mut self) {
        if self.dm.sberror != 0 {
            return;
        }
        match self.sb_check() {
            Ok(offset) => {
                let bytes = self.dm.sbdata.to_le_bytes();
                self.memory[offset..offset + 4].copy_from_slice(&bytes);
                self.sb_autoincrement();
            }
            Err(sberror) => self.dm.sberror = sberror,
        }
    }

    fn dm_read(&mut self, address: u64) -> u32 {
        match address {
            0x04..=0x0f => self.dm.data[(address - 0x04) as usize],
            0x10 => self.dmcontrol(),
            0x11 => self.dmstatus(),
            // nscratch = 2
            0x12 => 2 << 20,
            0x14 => self.dm.hawindowsel,
            0x15 => self.dm.hawindow,
            0x16 => {
                let value = self.abstractcs();
                self.dm.busy_remaining = self.dm.busy_remaining.saturating_sub(1);
                value
            }
            0x18 => self.dm.abstractauto,
            0x20..=0x2f => self.dm.progbuf[(address - 0x20) as usize],
            0x30 => self.dm.authdata,
            0x38 => self.sbcs(),
            0x39 => self.dm.sbaddress,
            0x3c => {
                let value = self.dm.sbdata;
                if self.dm.sbcs & (1 << 15) != 0 {
                    self.sb_read();
                }
                value
            }
            0x40 => self.haltsum0(),
            _ => 0,
        }
    }

    fn dm_write(&mut self, address: u64, value: u32) -> u32 {
        match address {
            0x04..=0x0f => self.dm.data[(address - 0x04) as usize] = value,
            0x10 => self.write_dmcontrol(value),
            0x14 => self.dm.hawindowsel = value & 0x7fff,
            0x15 => self.dm.hawindow = value,
            0x16 => self.dm.cmderr &= !((value >> 8) & 0x7),
            0x17 => self.execute_command(value),
            0x18 => self.dm.abstractauto = value & 0xffff_0fff,
            0x20..=0x2f => self.dm.progbuf[(address - 0x20) as usize] = value,
            0x30 => self.dm.authdata = value,
            0x38 => self.write_sbcs(value),
            0x39 => {
                self.dm.sbaddress = value;
                if self.dm.sbcs & (1 << 20) != 0 {
                    self.sb_read();
                }
            }
            0x3c => {
                self.dm.sbdata = value;
                self.sb_write();
            }
            _ => log::trace!("sim: write to 0x{address:02x} ignored"),
        }
        match address {
            0x16 => self.abstractcs(),
            0x38 => self.sbcs(),
            _ => value,
        }
    }

    fn dmi_scan(&mut self, data: u128, len: u32) -> Result<u128> {
        let expected = 34 + self.config.abits;
        if len != expected {
            return Err(Error::Jtag(format!(
                "dmi scan of {len} bits, expected {expected}"
            )));
        }

        if self.retries_pending > 0 {
            self.retries_pending -= 1;
            return Ok(DmiOperationStatus::Retry as u128);
        }
        let captured = self.dmi_result;

        let op = (data & 0x3) as u8;
        let value = (data >> 2) as u32;
        let address = (data >> 34) as u64 & ((1u64 << self.config.abits) - 1);
        match op {
            1 => {
                let result = self.dm_read(address);
                self.dmi_result = (result as u128) << 2;
                self.retries_pending = self.config.busy_scans;
            }
            2 => {
                let result = self.dm_write(address, value);
                self.dmi_result = (result as u128) << 2;
                self.retries_pending = self.config.busy_scans;
            }
            _ => {}
        }
        Ok(captured)
    }
}

impl JtagAccess for SimTarget {
    fn tap_reset(&mut self) -> Result<bool> {
        if self.terminated {
            return Ok(false);
        }
        self.dmi_result = 0;
        self.retries_pending = 0;
        Ok(true)
    }

    fn idle_cycles(&self) -> u8 {
        self.idle
    }

    fn set_idle_cycles(&mut self, idle_cycles: u8) {
        self.idle = idle_cycles;
    }

    fn write_register(&mut self, ir: u8, data: u128, len: u32) -> Result<u128> {
        if self.terminated {
            return Err(Error::Jtag("target terminated".to_string()));
        }
        self.scans += 1;
        match ir {
            IR_IDCODE => Ok(self.config.idcode as u128),
            IR_DTMCS => {
                let captured = self.dtmcs();
                // dmireset or dmihardreset
                if data & (0b11 << 16) != 0 {
                    self.retries_pending = 0;
                }
                Ok(captured as u128)
            }
            IR_DMI => self.dmi_scan(data, len),
            // BYPASS and anything unimplemented
            _ => Ok(0),
        }
    }
}
