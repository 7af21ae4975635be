#![cfg_attr(not(any(test, feature = "mock")), no_std)]

//! Peripheral capability interfaces used by the bring-up sequence.
//!
//! The kernel never touches a register directly: every piece of hardware it drives
//! during bring-up is reached through one of the traits below, and the board crate
//! provides the concrete implementations. All interfaces are write-only and
//! infallible, as the bring-up sequence never checks a peripheral result.

mod errors;
mod interface_write;
mod uart_config;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use errors::*;
pub use interface_write::*;
pub use uart_config::*;
