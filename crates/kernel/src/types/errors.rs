use crate::KernelError::{EmptyGreeting, HalError, InvalidBlinkShift};
use crate::KernelErrorLevel::{Critical, Error, Fatal};
use hal_interface::{HalError as HalErrorDef, HalErrorLevel};
use heapless::{String, format};

pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq)]
pub enum KernelErrorLevel {
    Error,
    Critical,
    Fatal,
}

impl KernelErrorLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Fatal => "Fatal error : ",
            Critical => "Critical error : ",
            Error => "Error : ",
        }
    }
}

/// Errors raised before the bring-up sequence starts.
///
/// The sequence itself and the blink loop cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelError {
    HalError(HalErrorDef),
    /// The blink shift does not fit a 32-bit tick counter.
    InvalidBlinkShift(u32),
    EmptyGreeting,
}

impl KernelError {
    pub fn to_string(&self) -> String<256> {
        let mut l_msg = String::new();
        match self {
            HalError(l_e) => l_msg.push_str(l_e.to_string().as_str()).unwrap_or(()),
            InvalidBlinkShift(l_shift) => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                if let Ok(l_detail) = format!(
                    100;
                    "Blink shift {} exceeds the {}-bit tick counter",
                    l_shift,
                    u32::BITS
                ) {
                    l_msg.push_str(l_detail.as_str()).unwrap_or(());
                }
            }
            EmptyGreeting => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                l_msg.push_str("Greeting is empty").unwrap_or(());
            }
        }
        l_msg
    }

    /// Returns the severity level of the kernel error.
    ///
    /// HAL errors keep the level reported by the HAL.
    pub fn severity(&self) -> KernelErrorLevel {
        match self {
            HalError(l_err) => match l_err.severity() {
                HalErrorLevel::Fatal => Fatal,
                HalErrorLevel::Critical => Critical,
                HalErrorLevel::Error => Error,
            },
            InvalidBlinkShift(_) => Critical,
            EmptyGreeting => Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hal_error_keeps_hal_message_and_level() {
        let l_err = KernelError::HalError(HalErrorDef::PeripheralsAlreadyTaken);
        assert_eq!(l_err.severity(), Fatal);
        assert_eq!(
            l_err.to_string().as_str(),
            "HAL Fatal error : Peripherals already taken"
        );
    }

    #[test]
    fn test_invalid_shift_message() {
        let l_err = KernelError::InvalidBlinkShift(32);
        assert_eq!(l_err.severity(), Critical);
        assert_eq!(
            l_err.to_string().as_str(),
            "Critical error : Blink shift 32 exceeds the 32-bit tick counter"
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Fatal > Critical);
        assert!(Critical > Error);
        assert_eq!(KernelError::EmptyGreeting.severity(), Error);
    }
}
