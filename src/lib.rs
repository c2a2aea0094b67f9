//! RISC-V External Debug client
//!
//! Talks to a RISC-V Debug Module through a Debug Transport Module: the
//! register layer in [`regs`], the JTAG DTM in [`jtag`], and abstract
//! command access to harts in [`dmi`].

pub mod config;
pub mod csr;
pub mod diag;
pub mod dmi;
pub mod error;
pub mod jtag;
pub mod regs;
pub mod sim;
pub mod transport;

#[cfg(test)]
mod test_logger;

pub use crate::config::DmiConfig;
pub use crate::dmi::Dmi;
pub use crate::error::{Error, Result};
pub use crate::transport::Transport;
