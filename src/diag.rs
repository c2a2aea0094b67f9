//! Predefined diagnostics over a debug session
use crate::{
    config::DmiConfig,
    csr::{self, CsrClass},
    dmi::{Dmi, NUM_REGS},
    error::{Error, Result},
    regs::{Abstractcs, DMReg, Dmstatus, Hartinfo},
    transport::Transport,
};

const REGS_PER_ROW: usize = 4;

/// Values every register is written with, before restoring the original
const TEST_VALUES: [u32; 3] = [0xffff_ffff, 0x0000_0000, 0xdead_beef];

/// A region of target memory to exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemRegion {
    pub name: &'static str,
    pub base: u32,
    pub size: u32,
    /// Only read the region, never write it
    pub read_only: bool,
}

impl MemRegion {
    pub const fn new(name: &'static str, base: u32, size: u32) -> Self {
        Self {
            name,
            base,
            size,
            read_only: false,
        }
    }

    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// CORE-V MCU memory map
pub const BOOT_ROM: MemRegion = MemRegion::new("boot rom", 0x1a00_0000, 0x4_0000).read_only();
pub const MEMORY_BANK_0: MemRegion = MemRegion::new("memory bank 0", 0x1c00_0000, 0x8000);
pub const MEMORY_BANK_1: MemRegion = MemRegion::new("memory bank 1", 0x1c00_8000, 0x8000);
pub const MEMORY_BANK_INTERLEAVED: MemRegion =
    MemRegion::new("memory bank interleaved", 0x1c01_0000, 0x8_0000);

/// A register or memory location that did not read back what was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub name: String,
    pub wrote: u32,
    pub read: u32,
}

/// A running diagnostic session, hart discovery, register and memory tests
pub struct DiagSession<T: Transport> {
    pub dmi: Dmi<T>,
    pub num_harts: u32,
}

impl<T: Transport> DiagSession<T> {
    /// Reset the transport and discover the harts behind it
    pub fn attach(transport: T, config: DmiConfig) -> Result<Self> {
        let mut dmi = Dmi::with_config(transport, config);
        dmi.dtm_reset()?;
        let num_harts = count_harts(&mut dmi)?;
        log::info!("Num harts: {num_harts}");
        Ok(Self { dmi, num_harts })
    }

    /// Read `hartinfo` and `abstractcs` for `hart`
    pub fn hart_status(&mut self, hart: u32) -> Result<(Hartinfo, Abstractcs)> {
        self.dmi.select_hart(hart)?;
        let hartinfo = self.dmi.read::<Hartinfo>()?;
        log::info!("hartinfo: 0x{:08x} {hartinfo:x?}", hartinfo.value());
        let abstractcs = self.dmi.read::<Abstractcs>()?;
        log::info!("abstractcs: 0x{:08x} {abstractcs:x?}", abstractcs.value());
        Ok((hartinfo, abstractcs))
    }

    /// Halt `hart` and leave it selected. Returns whether it halted.
    pub fn halt_hart(&mut self, hart: u32) -> Result<bool> {
        self.dmi.halt_hart(hart)?;
        let dmstatus = self.dmi.read::<Dmstatus>()?;
        if !dmstatus.halted() {
            log::warn!(
                "Hart {hart} failed to halt, dmstatus: 0x{:08x} {dmstatus:x?}",
                dmstatus.value()
            );
        }
        Ok(dmstatus.halted())
    }

    /// PC of the selected, halted hart
    pub fn report_pc(&mut self) -> Result<u32> {
        let pc = self.dmi.read_csr(csr::DPC)?;
        log::info!("PC = 0x{pc:08x}");
        Ok(pc)
    }

    /// Dump, then write and read back every GPR of the selected hart
    pub fn test_gprs(&mut self) -> Result<Vec<Mismatch>> {
        let mut saved = [0u32; NUM_REGS];
        for (r, value) in saved.iter_mut().enumerate() {
            *value = self.dmi.read_gpr(r)?;
        }
        log::info!("Reading GPR values:");
        dump_registers(&saved, csr::gpr_full_name);

        log::info!("Writing GPR values:");
        let mut mismatches = vec![];
        for (r, &original) in saved.iter().enumerate() {
            for wrote in TEST_VALUES.into_iter().chain([original]) {
                self.dmi.write_gpr(r, wrote)?;
                let read = self.dmi.read_gpr(r)?;
                // x0 is hard-wired to zero
                let expected = if r == 0 { 0 } else { wrote };
                if read != expected {
                    let name = csr::gpr_full_name(r);
                    log::warn!("{name}: wrote: 0x{wrote:08x}, read back: 0x{read:08x}");
                    mismatches.push(Mismatch { name, wrote, read });
                }
            }
        }
        if mismatches.is_empty() {
            log::info!("All GPRs written and read back correctly");
        }
        Ok(mismatches)
    }

    /// Same as [`Self::test_gprs`] over the FPRs. Only for harts with an FPU.
    pub fn test_fprs(&mut self) -> Result<Vec<Mismatch>> {
        let mut saved = [0u32; NUM_REGS];
        for (r, value) in saved.iter_mut().enumerate() {
            *value = self.dmi.read_fpr(r)?;
        }
        log::info!("Reading FPR values:");
        dump_registers(&saved, csr::fpr_full_name);

        log::info!("Writing FPR values:");
        let mut mismatches = vec![];
        for (r, &original) in saved.iter().enumerate() {
            for wrote in TEST_VALUES.into_iter().chain([original]) {
                self.dmi.write_fpr(r, wrote)?;
                let read = self.dmi.read_fpr(r)?;
                if read != wrote {
                    let name = csr::fpr_full_name(r);
                    log::warn!("{name}: wrote: 0x{wrote:08x}, read back: 0x{read:08x}");
                    mismatches.push(Mismatch { name, wrote, read });
                }
            }
        }
        if mismatches.is_empty() {
            log::info!("All FPRs written and read back correctly");
        }
        Ok(mismatches)
    }

    /// Read every catalogued CSR of the selected hart and report the non-zero
    /// ones. CSRs are never written, that may have side effects.
    ///
    /// A CSR the hart refuses is reported and skipped.
    pub fn test_csrs(&mut self, fpu: bool, hwlp: bool) -> Result<Vec<(u16, u32)>> {
        let groups = [
            ("standard user", csr::USER_CSRS),
            ("custom user", csr::CUSTOM_USER_CSRS),
            ("standard machine", csr::MACHINE_CSRS),
        ];

        let mut values = vec![];
        for (group, addrs) in groups {
            log::info!("Test reading {group} CSRs:");
            for &addr in addrs {
                let skip = match self.dmi.csr_type(addr) {
                    Some(CsrClass::FloatingPoint) => !fpu,
                    Some(CsrClass::HardwareLoop) => !hwlp,
                    _ => false,
                };
                if skip {
                    continue;
                }
                let name = self.dmi.csr_name(addr);
                match self.dmi.read_csr(addr) {
                    Ok(0) => {}
                    Ok(value) => {
                        log::info!("{group} CSR {name} (0x{addr:03x}) = 0x{value:08x}");
                        values.push((addr, value));
                    }
                    Err(Error::AbstractCommand(cmderr)) => {
                        log::warn!("{group} CSR {name} (0x{addr:03x}): {cmderr:?}");
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(values)
    }

    /// Write a pattern into `region` in blocks of at most `max_block` bytes,
    /// read it back and compare. Read-only regions are only read.
    ///
    /// Block sizes vary so that misaligned heads and tails are covered.
    /// Returns the number of bytes that did not read back.
    pub fn test_mem(&mut self, region: &MemRegion, max_block: usize, seed: u32) -> Result<usize> {
        let max_block = max_block.max(1);
        log::info!(
            "Testing {} 0x{:08x}..0x{:08x}",
            region.name,
            region.base,
            region.base as u64 + region.size as u64
        );

        if region.read_only {
            let mut offset = 0;
            while offset < region.size {
                let len = (region.size - offset).min(max_block as u32);
                let bytes = self.dmi.read_mem(region.base + offset, len as usize)?;
                log::trace!("0x{:08x}: {}", region.base + offset, hex::encode(&bytes));
                offset += len;
            }
            log::info!("Read {} bytes from {}", region.size, region.name);
            return Ok(0);
        }

        let mut rng = seed.max(1);
        let mut failed = 0;
        let mut offset = 0;
        let mut block = 0;
        while offset < region.size {
            let len = (1 + (block * 7) % max_block).min((region.size - offset) as usize);
            let addr = region.base + offset;
            let pattern: Vec<u8> = (0..len).map(|_| next_byte(&mut rng)).collect();

            self.dmi.write_mem(addr, &pattern)?;
            let readback = self.dmi.read_mem(addr, len)?;
            for (i, (wrote, read)) in pattern.iter().zip(&readback).enumerate() {
                if wrote != read {
                    if failed == 0 {
                        log::warn!(
                            "0x{:08x}: wrote 0x{wrote:02x}, read back 0x{read:02x}",
                            addr + i as u32
                        );
                    }
                    failed += 1;
                }
            }

            offset += len as u32;
            block += 1;
        }

        if failed == 0 {
            log::info!("All of {} written and read back correctly", region.name);
        } else {
            log::warn!("{failed} bytes of {} did not read back", region.name);
        }
        Ok(failed)
    }
}

/// Number of harts behind the Debug Module. Harts are probed in order until
/// one reports itself nonexistent.
pub fn count_harts<T: Transport>(dmi: &mut Dmi<T>) -> Result<u32> {
    let hartsellen = dmi.hartsellen()?;
    log::info!("Max HARTS: 0x{:x}", hartsellen as u64 + 1);

    let mut num_harts = 0;
    while num_harts <= hartsellen {
        dmi.select_hart(num_harts)?;
        let dmstatus = dmi.read::<Dmstatus>()?;
        log::debug!("Hart {num_harts}, dmstatus: 0x{:08x}", dmstatus.value());
        if dmstatus.nonexistent() {
            break;
        }
        num_harts += 1;
    }
    Ok(num_harts)
}

fn dump_registers(values: &[u32], name: fn(usize) -> String) {
    for (row, chunk) in values.chunks(REGS_PER_ROW).enumerate() {
        let line = chunk
            .iter()
            .enumerate()
            .map(|(i, value)| {
                format!("{:<12} = {value:08x}", name(row * REGS_PER_ROW + i))
            })
            .collect::<Vec<_>>()
            .join("  ");
        log::info!("  {line}");
    }
}

// xorshift32
fn next_byte(state: &mut u32) -> u8 {
    *state ^= *state << 13;
    *state ^= *state >> 17;
    *state ^= *state << 5;
    *state as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jtag::JtagDtm;
    use crate::sim::{SimConfig, SimTarget};

    fn session(config: SimConfig) -> DiagSession<JtagDtm<SimTarget>> {
        let dtm = JtagDtm::new(SimTarget::new(config));
        DiagSession::attach(dtm, DmiConfig::default()).unwrap()
    }

    #[test]
    fn test_count_harts() {
        for harts in [1, 3, 4] {
            let s = session(SimConfig {
                harts,
                hartsel_bits: 2,
                ..Default::default()
            });
            assert_eq!(s.num_harts, harts);
        }
    }

    #[test]
    fn test_halt_and_report_pc() {
        let mut s = session(SimConfig {
            harts: 2,
            ..Default::default()
        });
        assert!(s.halt_hart(1).unwrap());
        assert_eq!(s.report_pc().unwrap(), 0x1c00_0080);

        let (hartinfo, abstractcs) = s.hart_status(1).unwrap();
        assert_eq!(hartinfo.nscratch(), 2);
        assert_eq!(abstractcs.cmderr(), 0);
    }

    #[test]
    fn test_halt_nonexistent_hart() {
        let mut s = session(SimConfig::default());
        assert!(!s.halt_hart(3).unwrap());
    }

    #[test]
    fn test_registers() {
        let mut s = session(SimConfig {
            fpu: true,
            ..Default::default()
        });
        s.halt_hart(0).unwrap();
        s.dmi.write_gpr(10, 0x1234).unwrap();

        assert!(s.test_gprs().unwrap().is_empty());
        assert!(s.test_fprs().unwrap().is_empty());
        // original values are restored
        assert_eq!(s.dmi.read_gpr(10).unwrap(), 0x1234);
    }

    #[test]
    fn test_csrs_report_nonzero() {
        let mut s = session(SimConfig::default());
        s.halt_hart(0).unwrap();
        let values = s.test_csrs(false, true).unwrap();
        assert!(values.contains(&(csr::MVENDORID, 0x602)));
        assert!(values.contains(&(csr::DCSR, 0x4000_0003)));
        assert!(!values.iter().any(|(addr, _)| *addr == csr::MHARTID));
        assert!(!values.iter().any(|(addr, _)| *addr == csr::FCSR));
    }

    #[test]
    fn test_csrs_without_hwlp() {
        let mut s = session(SimConfig {
            hwlp: false,
            ..Default::default()
        });
        s.halt_hart(0).unwrap();
        // refused CSRs are skipped, not fatal
        assert!(s.test_csrs(true, true).is_ok());
        assert!(s.test_csrs(false, false).is_ok());
    }

    #[test]
    fn test_memory_regions() {
        let mut s = session(SimConfig::default());
        let region = MemRegion::new("bank", 0x1c00_0100, 0x203);
        assert_eq!(s.test_mem(&region, 13, 42).unwrap(), 0);

        let rom = MemRegion::new("rom", 0x1c00_0000, 0x40).read_only();
        assert_eq!(s.test_mem(&rom, 16, 0).unwrap(), 0);

        let missing = MemRegion::new("missing", 0x2000_0000, 4);
        assert!(s.test_mem(&missing, 4, 1).is_err());
    }

    #[test]
    fn test_pattern_is_seeded() {
        let mut a = 7;
        let mut b = 7;
        let x: Vec<u8> = (0..16).map(|_| next_byte(&mut a)).collect();
        let y: Vec<u8> = (0..16).map(|_| next_byte(&mut b)).collect();
        assert_eq!(x, y);
        assert!(x.iter().any(|&v| v != x[0]));
    }
}
