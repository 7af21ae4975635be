//! This module defines the `HalError` and `HalErrorLevel` enumerations and their associated
//! functionality. It provides a structured way to represent hardware abstraction layer (HAL)
//! related errors with different severity levels and format them for display.

use crate::HalError::{InvalidBaudRate, PeripheralsAlreadyTaken};
use crate::HalErrorLevel::{Critical, Error, Fatal};
use heapless::{String, format};

pub type HalResult<T> = Result<T, HalError>;

/// Represents the severity levels of hardware abstraction layer (HAL) errors.
///
/// # Variants
///
/// - `Fatal`
///   The board cannot be brought up at all.
///
/// - `Critical`
///   A peripheral is unusable but the rest of the board may still run.
///
/// - `Error`
///   A recoverable problem, typically a configuration value that can be corrected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalErrorLevel {
    Fatal,
    Critical,
    Error,
}

impl HalErrorLevel {
    /// Converts the `HalErrorLevel` enum variant into a corresponding string slice representation.
    pub fn as_str(&self) -> &str {
        match self {
            Fatal => "HAL Fatal error : ",
            Critical => "HAL Critical error : ",
            Error => "HAL Error : ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalError {
    /// Device or core peripherals were already handed out.
    PeripheralsAlreadyTaken,
    /// The requested baud rate cannot be derived from the kernel clock (clock, baud).
    InvalidBaudRate(u32, u32),
}

impl HalError {
    /// Converts the error into a formatted message prefixed by its severity.
    ///
    /// # Returns
    /// A `String` of at most 256 characters. Text that does not fit is dropped.
    pub fn to_string(&self) -> String<256> {
        let mut l_msg = String::new();
        l_msg.push_str(self.severity().as_str()).unwrap_or(());
        match self {
            PeripheralsAlreadyTaken => {
                l_msg
                    .push_str("Peripherals already taken")
                    .unwrap_or(());
            }
            InvalidBaudRate(l_clock, l_baud) => {
                if let Ok(l_detail) = format!(
                    100;
                    "Baud rate {} cannot be derived from a {} Hz clock",
                    l_baud,
                    l_clock
                ) {
                    l_msg.push_str(l_detail.as_str()).unwrap_or(());
                }
            }
        }
        l_msg
    }

    /// Returns the severity level of the `HalError` instance.
    pub fn severity(&self) -> HalErrorLevel {
        match self {
            PeripheralsAlreadyTaken => Fatal,
            InvalidBaudRate(_, _) => Critical,
        }
    }
}
