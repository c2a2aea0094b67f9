//! RISC-V Debug Module Interface session
//!
//! [`Dmi`] owns the transport and the shadow copy of every Debug Module
//! register. Register field accessors only work on the shadows, the
//! `read*`/`write*` methods are the only ones that scan.
use crate::{
    config::DmiConfig,
    csr::{self, CsrClass, FPR_BASE, GPR_BASE},
    error::{AbstractcsCmdErr, Error, Result, SbError},
    regs::{
        Abstractcs, AccessSize, Command, DMReg, DMRegArray, Data, Dmcontrol, Registers, Sbaddress,
        Sbcs, Sbdata,
    },
    transport::Transport,
};

/// Number of GPRs (and FPRs) reachable through abstract commands
pub const NUM_REGS: usize = 32;

/// A debug session over one transport
#[derive(Debug)]
pub struct Dmi<T: Transport> {
    transport: T,
    regs: Registers,
    config: DmiConfig,
}

impl<T: Transport> Dmi<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DmiConfig::default())
    }

    pub fn with_config(transport: T, config: DmiConfig) -> Self {
        Self {
            transport,
            regs: Registers::default(),
            config,
        }
    }

    pub fn config(&self) -> &DmiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// End the session, handing back the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Reset the transport. A target that terminates during reset is fatal
    /// for the session.
    pub fn dtm_reset(&mut self) -> Result<()> {
        if !self.transport.reset()? {
            return Err(Error::ResetIncomplete);
        }
        self.regs = Registers::default();
        Ok(())
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Shadow value of `R`, no scan
    pub fn reg<R: DMReg>(&self) -> &R {
        R::shadow(&self.regs)
    }

    pub fn reg_mut<R: DMReg>(&mut self) -> &mut R {
        R::shadow_mut(&mut self.regs)
    }

    /// Shadow value of instance `n` of `R`, no scan
    pub fn nth<R: DMRegArray>(&self, n: usize) -> Option<&R> {
        R::shadows(&self.regs).get(n)
    }

    pub fn nth_mut<R: DMRegArray>(&mut self, n: usize) -> Option<&mut R> {
        R::shadows_mut(&mut self.regs).get_mut(n)
    }

    /// Read `R` from the Debug Module into its shadow
    pub fn read<R: DMReg>(&mut self) -> Result<R> {
        if !R::ACCESS.readable() {
            log::warn!("{} is write-only, not read", R::NAME);
            return Ok(*self.reg::<R>());
        }
        let reg = R::from(self.transport.dmi_read(R::ADDR as u64)?);
        *self.reg_mut::<R>() = reg;
        Ok(reg)
    }

    /// Write the shadow of `R` to the Debug Module
    pub fn write<R: DMReg>(&mut self) -> Result<()> {
        if !R::ACCESS.writable() {
            log::warn!("{} is read-only, not written", R::NAME);
            return Ok(());
        }
        let value = self.reg::<R>().value();
        let answer = self.transport.dmi_write(R::ADDR as u64, value)?;
        if R::WRITE_RETURNS_VALUE {
            *self.reg_mut::<R>() = R::from(answer);
        }
        Ok(())
    }

    /// Reset the shadow of `R`, let `f` set fields, then write it
    pub fn write_with<R: DMReg>(&mut self, f: impl FnOnce(&mut R)) -> Result<()> {
        let reg = self.reg_mut::<R>();
        reg.reset();
        f(reg);
        self.write::<R>()
    }

    pub fn read_nth<R: DMRegArray>(&mut self, n: usize) -> Result<R> {
        let Some(&addr) = R::ADDRS.get(n) else {
            log::warn!("{}{n} does not exist: ignored", R::NAME);
            return Ok(R::from(0));
        };
        if !R::ACCESS.readable() {
            log::warn!("{}{n} is write-only, not read", R::NAME);
            return Ok(R::shadows(&self.regs)[n]);
        }
        let reg = R::from(self.transport.dmi_read(addr as u64)?);
        R::shadows_mut(&mut self.regs)[n] = reg;
        Ok(reg)
    }

    pub fn write_nth<R: DMRegArray>(&mut self, n: usize) -> Result<()> {
        let Some(&addr) = R::ADDRS.get(n) else {
            log::warn!("{}{n} does not exist: ignored", R::NAME);
            return Ok(());
        };
        if !R::ACCESS.writable() {
            log::warn!("{}{n} is read-only, not written", R::NAME);
            return Ok(());
        }
        let value = R::shadows(&self.regs)[n].value();
        self.transport.dmi_write(addr as u64, value)?;
        Ok(())
    }

    /// Select hart `hart` for all following hart-specific accesses
    pub fn select_hart(&mut self, hart: u32) -> Result<()> {
        self.write_with::<Dmcontrol>(|dmcontrol| {
            dmcontrol.set_hartsel(hart);
            dmcontrol.set_dmactive(true);
        })
    }

    /// Largest hart number the Debug Module can select. Hart select bits
    /// that are not implemented read back as zero.
    pub fn hartsellen(&mut self) -> Result<u32> {
        self.write_with::<Dmcontrol>(|dmcontrol| {
            dmcontrol.set_hartsel_max();
            dmcontrol.set_dmactive(true);
        })?;
        let dmcontrol = self.read::<Dmcontrol>()?;
        Ok(dmcontrol.hartsel())
    }

    /// Request hart `hart` to halt. Completion has to be observed through
    /// `dmstatus`.
    pub fn halt_hart(&mut self, hart: u32) -> Result<()> {
        self.write_with::<Dmcontrol>(|dmcontrol| {
            dmcontrol.set_haltreq(true);
            dmcontrol.set_hartsel(hart);
            dmcontrol.set_dmactive(true);
        })
    }

    /// Request hart `hart` to resume, acknowledged by `dmstatus.resumeack`
    pub fn resume_hart(&mut self, hart: u32) -> Result<()> {
        self.write_with::<Dmcontrol>(|dmcontrol| {
            dmcontrol.set_resumereq(true);
            dmcontrol.set_hartsel(hart);
            dmcontrol.set_dmactive(true);
        })
    }

    /// Clear `havereset` of hart `hart`
    pub fn ack_havereset(&mut self, hart: u32) -> Result<()> {
        self.write_with::<Dmcontrol>(|dmcontrol| {
            dmcontrol.set_ackhavereset(true);
            dmcontrol.set_hartsel(hart);
            dmcontrol.set_dmactive(true);
        })
    }

    /// Acknowledge a pending `abstractcs.cmderr`
    pub fn clear_cmderr(&mut self) -> Result<()> {
        self.write_with::<Abstractcs>(Abstractcs::cmderr_clear)
    }

    fn wait_for_command(&mut self) -> Result<()> {
        for _ in 0..self.config.busy_poll_limit {
            let abstractcs = self.read::<Abstractcs>()?;
            if abstractcs.busy() {
                log::trace!("abstractcs: busy");
                continue;
            }
            let cmderr = abstractcs.cmderr();
            if cmderr != 0 {
                log::debug!("abstractcs: cmderr {}", abstractcs.cmderr_name());
                if self.config.auto_clear_cmderr {
                    self.clear_cmderr()?;
                }
            }
            return AbstractcsCmdErr::try_from_cmderr(cmderr);
        }
        Err(Error::AbstractCommandTimeout(self.config.busy_poll_limit))
    }

    /// Write `command`, then wait until the Debug Module is done with it
    pub fn execute_command(&mut self, command: Command) -> Result<()> {
        *self.reg_mut::<Command>() = command;
        self.write::<Command>()?;
        self.wait_for_command()
    }

    /// Read a CSR, or any abstract register number
    pub fn read_csr(&mut self, addr: u16) -> Result<u32> {
        self.execute_command(Command::access_register(addr, false))?;
        let data0 = self.read_nth::<Data>(0)?;
        Ok(data0.data())
    }

    /// Write a CSR, or any abstract register number
    pub fn write_csr(&mut self, addr: u16, value: u32) -> Result<()> {
        if let Some(data0) = self.nth_mut::<Data>(0) {
            data0.reset();
            data0.set_data(value);
        }
        self.write_nth::<Data>(0)?;
        self.execute_command(Command::access_register(addr, true))
    }

    pub fn read_gpr(&mut self, regno: usize) -> Result<u32> {
        self.read_csr(abstract_regno(GPR_BASE, regno)?)
    }

    pub fn write_gpr(&mut self, regno: usize, value: u32) -> Result<()> {
        self.write_csr(abstract_regno(GPR_BASE, regno)?, value)
    }

    pub fn read_fpr(&mut self, regno: usize) -> Result<u32> {
        self.read_csr(abstract_regno(FPR_BASE, regno)?)
    }

    pub fn write_fpr(&mut self, regno: usize, value: u32) -> Result<()> {
        self.write_csr(abstract_regno(FPR_BASE, regno)?, value)
    }

    pub fn csr_name(&self, addr: u16) -> &'static str {
        csr::name(addr)
    }

    pub fn csr_type(&self, addr: u16) -> Option<CsrClass> {
        csr::class(addr)
    }

    pub fn csr_read_only(&self, addr: u16) -> bool {
        csr::is_read_only(addr)
    }

    /// Acknowledge `sbcs.sberror` and `sbcs.sbbusyerror`
    pub fn clear_sberror(&mut self) -> Result<()> {
        self.write_with::<Sbcs>(|sbcs| {
            sbcs.sberror_clear();
            sbcs.sbbusyerror_clear();
        })
    }

    fn wait_for_sysbus(&mut self) -> Result<()> {
        for _ in 0..self.config.sb_poll_limit {
            let sbcs = self.read::<Sbcs>()?;
            if sbcs.sbbusy() {
                continue;
            }
            if sbcs.sbbusyerror() {
                self.clear_sberror()?;
                return Err(Error::SystemBus(SbError::BusyError));
            }
            let sberror = sbcs.sberror();
            if sberror != 0 {
                log::debug!("sbcs: sberror {}", sbcs.sberror_name());
                self.clear_sberror()?;
            }
            return SbError::try_from_sberror(sberror);
        }
        Err(Error::SystemBusTimeout(self.config.sb_poll_limit))
    }

    fn setup_sysbus(
        &mut self,
        read_on_addr: bool,
        read_on_data: bool,
        autoincrement: bool,
    ) -> Result<()> {
        self.write_with::<Sbcs>(|sbcs| {
            sbcs.set_sbreadonaddr(read_on_addr);
            sbcs.set_sbaccess(AccessSize::Bits32);
            sbcs.set_sbautoincrement(autoincrement);
            sbcs.set_sbreadondata(read_on_data);
            sbcs.sberror_clear();
            sbcs.sbbusyerror_clear();
        })
    }

    fn write_sbaddress(&mut self, address: u32) -> Result<()> {
        if let Some(sbaddress0) = self.nth_mut::<Sbaddress>(0) {
            sbaddress0.reset();
            sbaddress0.set_address(address);
        }
        self.write_nth::<Sbaddress>(0)
    }

    /// Read `len` bytes starting at `addr` over the system bus.
    ///
    /// The bus is accessed in aligned 32-bit words, so bytes around a
    /// misaligned range are read as well.
    pub fn read_mem(&mut self, addr: u32, len: usize) -> Result<Vec<u8>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let (start, words) = word_span(addr, len);

        // sbaddress0 write starts the first read, reading sbdata0 the next
        self.setup_sysbus(true, words > 1, words > 1)?;
        self.write_sbaddress(start)?;

        let mut buf = Vec::with_capacity(words * 4);
        for i in 0..words {
            self.wait_for_sysbus()?;
            if words > 1 && i == words - 1 {
                // don't read past the end
                self.setup_sysbus(false, false, true)?;
            }
            let word = self.read_nth::<Sbdata>(0)?.data();
            buf.extend_from_slice(&word.to_le_bytes());
        }

        let offset = (addr - start) as usize;
        Ok(buf[offset..offset + len].to_vec())
    }

    /// Write `data` at `addr` over the system bus. Partially covered words at
    /// either end are read first and merged.
    pub fn write_mem(&mut self, addr: u32, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let (start, words) = word_span(addr, data.len());
        let offset = (addr - start) as usize;
        let mut buf = vec![0u8; words * 4];

        let head_covered = offset == 0 && data.len() >= 4;
        let tail_covered = (offset + data.len()) % 4 == 0;
        if !head_covered {
            let head = self.read_mem(start, 4)?;
            buf[..4].copy_from_slice(&head);
        }
        if !tail_covered && words > 1 {
            let last = start.wrapping_add(((words - 1) * 4) as u32);
            let tail = self.read_mem(last, 4)?;
            buf[(words - 1) * 4..].copy_from_slice(&tail);
        }
        buf[offset..offset + data.len()].copy_from_slice(data);

        self.setup_sysbus(false, false, words > 1)?;
        self.write_sbaddress(start)?;
        for chunk in buf.chunks_exact(4) {
            let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            if let Some(sbdata0) = self.nth_mut::<Sbdata>(0) {
                sbdata0.set_data(word);
            }
            self.write_nth::<Sbdata>(0)?;
            self.wait_for_sysbus()?;
        }
        Ok(())
    }
}

fn abstract_regno(base: u16, regno: usize) -> Result<u16> {
    if regno >= NUM_REGS {
        return Err(Error::InvalidRegisterNumber(regno));
    }
    Ok(base + regno as u16)
}

/// Aligned start address and number of 32-bit words covering `len` bytes at `addr`
fn word_span(addr: u32, len: usize) -> (u32, usize) {
    let start = addr & !3;
    let end = (addr as u64 + len as u64 + 3) & !3;
    (start, ((end - start as u64) / 4) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csr::{DCSR, DPC, MSTATUS};
    use crate::regs::{Dmstatus, Haltsum, Progbuf, HARTSEL_MAX};
    use crate::transport::mock::{Access, MockTransport};

    const DMCONTROL: u64 = 0x10;
    const ABSTRACTCS: u64 = 0x16;
    const COMMAND: u64 = 0x17;
    const DATA0: u64 = 0x04;
    const SBCS: u64 = 0x38;
    const SBADDRESS0: u64 = 0x39;
    const SBDATA0: u64 = 0x3c;

    fn dmi() -> Dmi<MockTransport> {
        Dmi::new(MockTransport::new())
    }

    fn mock(dmi: &mut Dmi<MockTransport>) -> &mut MockTransport {
        &mut dmi.transport
    }

    #[test]
    fn test_dtm_reset_failure_is_fatal() {
        let mut dmi = dmi();
        mock(&mut dmi).reset_fails = true;
        assert!(matches!(dmi.dtm_reset(), Err(Error::ResetIncomplete)));

        mock(&mut dmi).reset_fails = false;
        assert!(dmi.dtm_reset().is_ok());
    }

    #[test]
    fn test_field_access_does_not_scan() {
        let mut dmi = dmi();
        dmi.reg_mut::<Dmcontrol>().set_haltreq(true);
        dmi.reg_mut::<Dmcontrol>().set_hartsel(3);
        assert!(dmi.reg::<Dmcontrol>().haltreq());
        assert!(mock(&mut dmi).accesses.is_empty());

        dmi.write::<Dmcontrol>().unwrap();
        assert_eq!(mock(&mut dmi).accesses.len(), 1);
    }

    #[test]
    fn test_read_updates_shadow() {
        let mut dmi = dmi();
        mock(&mut dmi).regs.insert(0x11, 0x0000_0382);
        let dmstatus = dmi.read::<Dmstatus>().unwrap();
        assert!(dmstatus.halted());
        assert_eq!(dmi.reg::<Dmstatus>().value(), 0x382);
    }

    #[test]
    fn test_access_direction_is_enforced() {
        let mut dmi = dmi();
        dmi.read::<Command>().unwrap();
        dmi.write::<Dmstatus>().unwrap();
        dmi.write_nth::<Haltsum>(0).unwrap();
        assert!(mock(&mut dmi).accesses.is_empty());
    }

    #[test]
    fn test_array_index_out_of_range() {
        let mut dmi = dmi();
        assert_eq!(dmi.read_nth::<Data>(12).unwrap().value(), 0);
        dmi.write_nth::<Progbuf>(16).unwrap();
        assert!(dmi.nth::<Data>(12).is_none());
        assert!(mock(&mut dmi).accesses.is_empty());

        mock(&mut dmi).regs.insert(0x2f, 0x0010_0073);
        assert_eq!(dmi.read_nth::<Progbuf>(15).unwrap().data(), 0x0010_0073);
    }

    #[test]
    fn test_write_returns_live_value() {
        let mut dmi = dmi();
        // cmderr pending in the target
        mock(&mut dmi).regs.insert(ABSTRACTCS, 0x0000_0300);
        dmi.clear_cmderr().unwrap();
        assert_eq!(mock(&mut dmi).writes_to(ABSTRACTCS), vec![0x700]);
        assert_eq!(dmi.reg::<Abstractcs>().cmderr(), 0);
    }

    #[test]
    fn test_select_hart() {
        let mut dmi = dmi();
        dmi.reg_mut::<Dmcontrol>().set_ndmreset(true);
        dmi.select_hart(0x401).unwrap();
        // stale bits are not carried over
        assert_eq!(
            mock(&mut dmi).writes_to(DMCONTROL),
            vec![(0x001 << 16) | (0x001 << 6) | 1]
        );
    }

    #[test]
    fn test_hart_selection_survives_reset() {
        let mut dmi = dmi();
        dmi.select_hart(3).unwrap();
        dmi.write_with::<Dmcontrol>(|dmcontrol| {
            dmcontrol.set_ndmreset(true);
            dmcontrol.set_dmactive(true);
        })
        .unwrap();
        assert_eq!(
            mock(&mut dmi).writes_to(DMCONTROL),
            vec![0x0003_0001, 0x0003_0003]
        );
        assert_eq!(dmi.reg::<Dmcontrol>().hartsel(), 3);

        dmi.reg_mut::<Dmcontrol>().reset();
        assert_eq!(dmi.reg::<Dmcontrol>().hartsel(), 3);
        assert!(!dmi.reg::<Dmcontrol>().ndmreset());

        // a transport reset starts over from hart 0
        dmi.dtm_reset().unwrap();
        assert_eq!(dmi.reg::<Dmcontrol>().hartsel(), 0);
    }

    #[test]
    fn test_halt_and_resume_requests() {
        let mut dmi = dmi();
        dmi.halt_hart(2).unwrap();
        dmi.resume_hart(2).unwrap();
        assert_eq!(
            mock(&mut dmi).writes_to(DMCONTROL),
            vec![0x8002_0001, 0x4002_0001]
        );
    }

    #[test]
    fn test_hartsellen_reads_back() {
        let mut dmi = dmi();
        // plain storage keeps every bit
        assert_eq!(dmi.hartsellen().unwrap(), HARTSEL_MAX);
        assert_eq!(mock(&mut dmi).writes_to(DMCONTROL), vec![0x03ff_ffc1]);

        // only 4 select bits implemented
        mock(&mut dmi).queue_read(DMCONTROL, &[(0xf << 16) | 1]);
        assert_eq!(dmi.hartsellen().unwrap(), 0xf);
    }

    #[test]
    fn test_read_csr_scans() {
        let mut dmi = dmi();
        mock(&mut dmi).regs.insert(DATA0, 0x8000_0100);
        assert_eq!(dmi.read_csr(DPC).unwrap(), 0x8000_0100);

        let mock = mock(&mut dmi);
        assert_eq!(mock.writes_to(COMMAND), vec![0x0022_07b1]);
        assert!(mock.writes_to(DATA0).is_empty());
        assert_eq!(
            mock.accesses,
            vec![
                Access::Write(COMMAND, 0x0022_07b1),
                Access::Read(ABSTRACTCS),
                Access::Read(DATA0),
            ]
        );
    }

    #[test]
    fn test_write_csr_scans() {
        let mut dmi = dmi();
        dmi.write_csr(MSTATUS, 0x1888).unwrap();

        let mock = mock(&mut dmi);
        assert_eq!(mock.writes_to(DATA0), vec![0x1888]);
        assert_eq!(mock.writes_to(COMMAND), vec![0x0023_0300]);
        // data0 goes first
        assert_eq!(mock.accesses[0], Access::Write(DATA0, 0x1888));
        assert_eq!(mock.accesses[1], Access::Write(COMMAND, 0x0023_0300));
    }

    #[test]
    fn test_abstract_command_polls_busy() {
        let mut dmi = dmi();
        mock(&mut dmi).queue_read(ABSTRACTCS, &[0x1000, 0x1000, 0x0000]);
        mock(&mut dmi).regs.insert(DATA0, 7);
        assert_eq!(dmi.read_csr(DCSR).unwrap(), 7);
        assert_eq!(mock(&mut dmi).reads_of(ABSTRACTCS), 3);
    }

    #[test]
    fn test_abstract_command_busy_timeout() {
        let mut dmi = Dmi::with_config(
            MockTransport::new(),
            DmiConfig::default().with_busy_poll_limit(5),
        );
        mock(&mut dmi).regs.insert(ABSTRACTCS, 0x1000);
        assert!(matches!(
            dmi.read_csr(DPC),
            Err(Error::AbstractCommandTimeout(5))
        ));
        assert_eq!(mock(&mut dmi).reads_of(ABSTRACTCS), 5);
        // data0 was never trusted
        assert_eq!(mock(&mut dmi).reads_of(DATA0), 0);
    }

    #[test]
    fn test_cmderr_is_reported_and_cleared() {
        let mut dmi = dmi();
        mock(&mut dmi).regs.insert(ABSTRACTCS, 0x0000_0200);
        assert!(matches!(
            dmi.read_csr(0x123),
            Err(Error::AbstractCommand(AbstractcsCmdErr::NotSupported))
        ));
        assert_eq!(mock(&mut dmi).writes_to(ABSTRACTCS), vec![0x700]);
        assert_eq!(mock(&mut dmi).regs[&ABSTRACTCS], 0);
    }

    #[test]
    fn test_cmderr_left_pending_without_auto_clear() {
        let config = DmiConfig {
            auto_clear_cmderr: false,
            ..Default::default()
        };
        let mut dmi = Dmi::with_config(MockTransport::new(), config);
        mock(&mut dmi).regs.insert(ABSTRACTCS, 0x0000_0400);
        assert!(matches!(
            dmi.write_csr(DPC, 0),
            Err(Error::AbstractCommand(AbstractcsCmdErr::HaltOrResume))
        ));
        assert!(mock(&mut dmi).writes_to(ABSTRACTCS).is_empty());
        assert_eq!(dmi.reg::<Abstractcs>().cmderr(), 4);

        dmi.clear_cmderr().unwrap();
        assert_eq!(dmi.reg::<Abstractcs>().cmderr(), 0);
    }

    #[test]
    fn test_register_numbering() {
        let mut dmi = dmi();
        dmi.read_gpr(1).unwrap();
        dmi.write_gpr(31, 5).unwrap();
        dmi.read_fpr(0).unwrap();
        dmi.write_fpr(31, 5).unwrap();
        assert_eq!(
            mock(&mut dmi).writes_to(COMMAND),
            vec![0x0022_1001, 0x0023_101f, 0x0022_1020, 0x0023_103f]
        );

        assert!(matches!(
            dmi.read_gpr(32),
            Err(Error::InvalidRegisterNumber(32))
        ));
        assert!(matches!(
            dmi.write_fpr(40, 0),
            Err(Error::InvalidRegisterNumber(40))
        ));
    }

    #[test]
    fn test_csr_catalog_lookups() {
        let dmi = dmi();
        assert_eq!(dmi.csr_name(DPC), "dpc");
        assert_eq!(dmi.csr_type(0x001), Some(CsrClass::FloatingPoint));
        assert_eq!(dmi.csr_type(0x123), None);
        assert!(dmi.csr_read_only(0xf14));
        assert!(!dmi.csr_read_only(DPC));
    }

    #[test]
    fn test_read_mem_aligned() {
        let mut dmi = dmi();
        mock(&mut dmi).queue_read(SBDATA0, &[0x0302_0100, 0x0706_0504]);
        let bytes = dmi.read_mem(0x2000_0000, 8).unwrap();
        assert_eq!(bytes, vec![0, 1, 2, 3, 4, 5, 6, 7]);

        let mock = mock(&mut dmi);
        assert_eq!(mock.writes_to(SBADDRESS0), vec![0x2000_0000]);
        // read on address, read on data and autoincrement, then read ahead off
        assert_eq!(mock.writes_to(SBCS), vec![0x2015_f000 | 1 << 22, 0x2005_7000 | 1 << 22]);
        assert_eq!(mock.reads_of(SBDATA0), 2);
    }

    #[test]
    fn test_read_mem_misaligned() {
        let mut dmi = dmi();
        mock(&mut dmi).queue_read(SBDATA0, &[0x4433_2211, 0x8877_6655]);
        let bytes = dmi.read_mem(0x1002, 4).unwrap();
        assert_eq!(bytes, vec![0x33, 0x44, 0x55, 0x66]);
        assert_eq!(mock(&mut dmi).writes_to(SBADDRESS0), vec![0x1000]);
    }

    #[test]
    fn test_sysbus_error() {
        let mut dmi = dmi();
        // sbcs reports a bad address once the access is done
        mock(&mut dmi).queue_read(SBCS, &[0x2004_2000]);
        assert!(matches!(
            dmi.read_mem(0x0, 4),
            Err(Error::SystemBus(SbError::BadAddress))
        ));
        // acknowledged
        assert_eq!(mock(&mut dmi).regs[&SBCS] & 0x7000, 0);
    }

    #[test]
    fn test_write_mem_aligned() {
        let mut dmi = dmi();
        dmi.write_mem(0x100, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let mock = mock(&mut dmi);
        assert_eq!(mock.writes_to(SBDATA0), vec![0x0403_0201, 0x0807_0605]);
        assert_eq!(mock.writes_to(SBADDRESS0), vec![0x100]);
        // no read-modify-write needed
        assert_eq!(mock.reads_of(SBDATA0), 0);
    }

    #[test]
    fn test_write_mem_merges_partial_word() {
        let mut dmi = dmi();
        mock(&mut dmi).queue_read(SBDATA0, &[0xaabb_ccdd]);
        dmi.write_mem(0x101, &[0x11, 0x22]).unwrap();
        assert_eq!(mock(&mut dmi).writes_to(SBDATA0), vec![0xaa22_11dd]);
    }
}
