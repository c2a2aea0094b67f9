use thiserror::Error;

/// Alias for a `Result` with the error type `rvdmi::Error`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport reset did not complete, target terminated")]
    ResetIncomplete,
    #[error("Timeout while waiting for the DMI to leave the busy state")]
    Timeout,
    #[error("No RISC-V debug transport found, DTMCS reads as zero")]
    NoDebugTransport,
    #[error("JTAG error: {0}")]
    Jtag(String),
    #[error("DM Abstract comand error: {0:?}")]
    AbstractCommand(AbstractcsCmdErr),
    #[error("Abstract command still busy after {0} polls")]
    AbstractCommandTimeout(usize),
    #[error("System bus error: {0:?}")]
    SystemBus(SbError),
    #[error("System bus still busy after {0} polls")]
    SystemBusTimeout(usize),
    #[error("Invalid register number: {0}")]
    InvalidRegisterNumber(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractcsCmdErr {
    /// Write to the command, abstractcs and abstractauto registers, or read/write to the data
    /// and progbuf registers when the abstract command is executed.
    Busy = 1,
    /// The current abstract command is not supported
    NotSupported = 2,
    /// error occurs when the abstract command is executed.
    Exception = 3,
    /// the hart wasn’t in the required state (running/halted), or unavailable
    HaltOrResume = 4,
    /// bus error (e.g. alignment, access size, or timeout)
    Bus = 5,
    /// The command failed for another reason.
    Other = 7,
}

impl AbstractcsCmdErr {
    pub(crate) fn try_from_cmderr(value: u8) -> Result<()> {
        match value {
            0 => Ok(()),
            1 => Err(Error::AbstractCommand(AbstractcsCmdErr::Busy)),
            2 => Err(Error::AbstractCommand(AbstractcsCmdErr::NotSupported)),
            3 => Err(Error::AbstractCommand(AbstractcsCmdErr::Exception)),
            4 => Err(Error::AbstractCommand(AbstractcsCmdErr::HaltOrResume)),
            5 => Err(Error::AbstractCommand(AbstractcsCmdErr::Bus)),
            // 6 is reserved, report it together with "other"
            _ => Err(Error::AbstractCommand(AbstractcsCmdErr::Other)),
        }
    }
}

/// `sbcs.sberror` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbError {
    /// There was a timeout.
    Timeout = 1,
    /// A bad address was accessed.
    BadAddress = 2,
    /// There was an alignment error.
    Alignment = 3,
    /// An access of unsupported size was requested.
    BadSize = 4,
    /// Other error.
    Other = 7,
    /// An access was started while the previous one was still running
    /// (`sbbusyerror`).
    BusyError,
}

impl SbError {
    pub(crate) fn try_from_sberror(value: u8) -> Result<()> {
        match value {
            0 => Ok(()),
            1 => Err(Error::SystemBus(SbError::Timeout)),
            2 => Err(Error::SystemBus(SbError::BadAddress)),
            3 => Err(Error::SystemBus(SbError::Alignment)),
            4 => Err(Error::SystemBus(SbError::BadSize)),
            _ => Err(Error::SystemBus(SbError::Other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmderr_mapping() {
        assert!(AbstractcsCmdErr::try_from_cmderr(0).is_ok());
        assert!(matches!(
            AbstractcsCmdErr::try_from_cmderr(2),
            Err(Error::AbstractCommand(AbstractcsCmdErr::NotSupported))
        ));
        assert!(matches!(
            AbstractcsCmdErr::try_from_cmderr(6),
            Err(Error::AbstractCommand(AbstractcsCmdErr::Other))
        ));
    }

    #[test]
    fn test_sberror_mapping() {
        assert!(SbError::try_from_sberror(0).is_ok());
        assert!(matches!(
            SbError::try_from_sberror(3),
            Err(Error::SystemBus(SbError::Alignment))
        ));
    }
}
