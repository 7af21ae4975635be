use crate::{HalError, HalResult};

/// Smallest divisor accepted with 16x oversampling.
const K_MIN_DIVISOR: u32 = 16;

/// Serial line configuration.
///
/// Boards supply their own values; the clock is whatever feeds the UART peripheral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UartConfig {
    /// Frequency of the clock feeding the UART, in Hz.
    pub kernel_clock_hz: u32,
    /// Line speed, in bits per second.
    pub baud_rate: u32,
}

impl UartConfig {
    /// Computes the baud rate divisor (16x oversampling), rounded to the nearest integer.
    ///
    /// # Returns
    /// - The value to program into the baud rate register.
    ///
    /// # Errors
    /// Returns [`HalError::InvalidBaudRate`] if the baud rate is zero or if the divisor
    /// falls outside `16..=0xFFFF`.
    pub fn divisor(&self) -> HalResult<u16> {
        let l_err = HalError::InvalidBaudRate(self.kernel_clock_hz, self.baud_rate);
        if self.baud_rate == 0 {
            return Err(l_err);
        }

        let l_divisor = (u64::from(self.kernel_clock_hz) + u64::from(self.baud_rate) / 2)
            / u64::from(self.baud_rate);
        if l_divisor < u64::from(K_MIN_DIVISOR) {
            return Err(l_err);
        }
        u16::try_from(l_divisor).map_err(|_| l_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_divisor() {
        // 16 MHz / 115200 = 138.9
        let l_config = UartConfig {
            kernel_clock_hz: 16_000_000,
            baud_rate: 115_200,
        };
        assert_eq!(l_config.divisor(), Ok(139));
    }

    #[test]
    fn test_exact_divisor() {
        let l_config = UartConfig {
            kernel_clock_hz: 16_000_000,
            baud_rate: 250_000,
        };
        assert_eq!(l_config.divisor(), Ok(64));
    }

    #[test]
    fn test_divisor_rounds_to_nearest() {
        // 1666.67 rounds up, 1666.4 rounds down
        let l_up = UartConfig {
            kernel_clock_hz: 16_000_000,
            baud_rate: 9_600,
        };
        assert_eq!(l_up.divisor(), Ok(1667));

        let l_down = UartConfig {
            kernel_clock_hz: 15_997_440,
            baud_rate: 9_600,
        };
        assert_eq!(l_down.divisor(), Ok(1666));
    }

    #[test]
    fn test_rejected_baud_rates() {
        for l_baud in [0, 2_000_000] {
            let l_config = UartConfig {
                kernel_clock_hz: 16_000_000,
                baud_rate: l_baud,
            };
            assert_eq!(
                l_config.divisor(),
                Err(HalError::InvalidBaudRate(16_000_000, l_baud))
            );
        }

        let l_slow = UartConfig {
            kernel_clock_hz: 216_000_000,
            baud_rate: 300,
        };
        assert_eq!(
            l_slow.divisor(),
            Err(HalError::InvalidBaudRate(216_000_000, 300))
        );
    }
}
