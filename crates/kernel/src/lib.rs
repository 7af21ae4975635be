#![cfg_attr(not(test), no_std)]

//! Bring-up sequence and blink loop.
//!
//! The kernel owns no hardware: the board hands it one implementation of each
//! [`hal_interface`] trait and the kernel drives them in a fixed order before
//! spinning in the blink loop forever.

mod blink;
mod boot;
mod console_output;
mod ident;
mod types;

pub use blink::{BlinkLoop, K_BLINK_SHIFT, indicator_value};
pub use boot::{BootConfig, BootDevices, K_DEFAULT_LOG_LEVEL, K_GREETING, boot, bring_up};
pub use console_output::{ConsoleFormatting, ConsoleOutput};
pub use ident::{K_KERNEL_NAME, K_KERNEL_VERSION};
pub use types::*;
