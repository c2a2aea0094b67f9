//! Session tuning knobs

/// Bounds and policies of a DMI session.
///
/// Every polling loop of the session is bounded by one of these limits, an
/// unresponsive target ends up as an error instead of a hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmiConfig {
    /// Number of RETRY responses tolerated on a single DMI access.
    ///
    /// `Dmi` does not read this, RETRY is handled below it. Hand it to the
    /// transport, e.g. [`JtagDtm::with_retry_limit`](crate::jtag::JtagDtm::with_retry_limit).
    pub dmi_retry_limit: usize,
    /// Number of `abstractcs` reads while waiting for `busy` to clear
    pub busy_poll_limit: usize,
    /// Number of `sbcs` reads while waiting for `sbbusy` to clear
    pub sb_poll_limit: usize,
    /// Acknowledge `cmderr` before an abstract command error is returned
    pub auto_clear_cmderr: bool,
}

impl Default for DmiConfig {
    fn default() -> Self {
        Self {
            dmi_retry_limit: 100,
            busy_poll_limit: 100,
            sb_poll_limit: 100,
            auto_clear_cmderr: true,
        }
    }
}

impl DmiConfig {
    pub fn with_retry_limit(mut self, limit: usize) -> Self {
        self.dmi_retry_limit = limit;
        self
    }

    pub fn with_busy_poll_limit(mut self, limit: usize) -> Self {
        self.busy_poll_limit = limit;
        self
    }

    pub fn with_sb_poll_limit(mut self, limit: usize) -> Self {
        self.sb_poll_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_are_independent() {
        let config = DmiConfig::default().with_busy_poll_limit(7);
        assert_eq!(config.busy_poll_limit, 7);
        assert_eq!(config.sb_poll_limit, 100);
        assert_eq!(config.dmi_retry_limit, 100);

        let config = config.with_sb_poll_limit(3).with_retry_limit(5);
        assert_eq!(config.busy_poll_limit, 7);
        assert_eq!(config.sb_poll_limit, 3);
        assert_eq!(config.dmi_retry_limit, 5);
        assert!(config.auto_clear_cmderr);
    }
}
