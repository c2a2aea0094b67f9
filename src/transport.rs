//! Debug transport abstraction
//!
//! A transport carries raw DMI accesses to the Debug Module. The JTAG DTM in
//! [`crate::jtag`] is the one shipped here, anything that can reset itself and
//! move 32-bit words to and from a DMI address can stand in for it.

use crate::error::Result;

pub trait Transport {
    /// Reset the transport and negotiate its parameters.
    ///
    /// Returns `Ok(false)` when the target went away before the reset
    /// finished. Nothing can be done with the session after that.
    fn reset(&mut self) -> Result<bool>;

    /// Read the DMI register at `address`, retrying while the target is busy.
    fn dmi_read(&mut self, address: u64) -> Result<u32>;

    /// Write `data` to the DMI register at `address`. Returns the data the
    /// target answered with.
    fn dmi_write(&mut self, address: u64, data: u32) -> Result<u32>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn reset(&mut self) -> Result<bool> {
        (**self).reset()
    }

    fn dmi_read(&mut self, address: u64) -> Result<u32> {
        (**self).dmi_read(address)
    }

    fn dmi_write(&mut self, address: u64, data: u32) -> Result<u32> {
        (**self).dmi_write(address, data)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn reset(&mut self) -> Result<bool> {
        (**self).reset()
    }

    fn dmi_read(&mut self, address: u64) -> Result<u32> {
        (**self).dmi_read(address)
    }

    fn dmi_write(&mut self, address: u64, data: u32) -> Result<u32> {
        (**self).dmi_write(address, data)
    }
}

/// Scripted transport recording every access, for unit tests
#[cfg(test)]
pub(crate) mod mock {
    use std::collections::{HashMap, VecDeque};

    use super::Transport;
    use crate::error::Result;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Access {
        Read(u64),
        Write(u64, u32),
    }

    /// DMI registers modelled as plain storage. Reads of an address with
    /// queued values pop the queue first.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        pub regs: HashMap<u64, u32>,
        pub queued: HashMap<u64, VecDeque<u32>>,
        pub accesses: Vec<Access>,
        pub reset_fails: bool,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn queue_read(&mut self, address: u64, values: &[u32]) {
            self.queued
                .entry(address)
                .or_default()
                .extend(values.iter().copied());
        }

        pub fn writes_to(&self, address: u64) -> Vec<u32> {
            self.accesses
                .iter()
                .filter_map(|a| match a {
                    Access::Write(addr, data) if *addr == address => Some(*data),
                    _ => None,
                })
                .collect()
        }

        pub fn reads_of(&self, address: u64) -> usize {
            self.accesses
                .iter()
                .filter(|a| matches!(a, Access::Read(addr) if *addr == address))
                .count()
        }
    }

    impl Transport for MockTransport {
        fn reset(&mut self) -> Result<bool> {
            Ok(!self.reset_fails)
        }

        fn dmi_read(&mut self, address: u64) -> Result<u32> {
            self.accesses.push(Access::Read(address));
            if let Some(value) = self.queued.get_mut(&address).and_then(|q| q.pop_front()) {
                return Ok(value);
            }
            Ok(self.regs.get(&address).copied().unwrap_or(0))
        }

        fn dmi_write(&mut self, address: u64, data: u32) -> Result<u32> {
            self.accesses.push(Access::Write(address, data));
            let old = self.regs.get(&address).copied().unwrap_or(0);
            // abstractcs.cmderr, sbcs.sbbusyerror and sbcs.sberror are write-1-to-clear
            let w1c = match address {
                0x16 => 0x0000_0700,
                0x38 => 0x0040_7000,
                _ => 0,
            };
            let stored = (data & !w1c) | (old & w1c & !data);
            self.regs.insert(address, stored);
            Ok(stored)
        }
    }
}
