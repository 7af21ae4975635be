//! STM32F769I-DISCO peripherals behind the kernel's capability interfaces.
//!
//! - Interrupt controller: NVIC lines plus the core PRIMASK flag.
//! - Serial transport: USART1 on PA9 (TX) / PA10 (RX), wired to the ST-LINK virtual COM port.
//! - Indicator register: user LEDs LD1 (PJ13, bit 0) and LD2 (PJ5, bit 1).
//!
//! The core runs from the 16 MHz HSI reset clock; no PLL is configured.

use cortex_m::peripheral::NVIC;
use hal_interface::{
    HalError, HalResult, IndicatorRegister, InterruptController, SerialTransport, UartConfig,
};
use kernel::BootDevices;
use stm32f7::stm32f769::{GPIOA, GPIOJ, Peripherals, RCC, USART1};

/// HSI reset clock, feeding the core and USART1, in Hz.
pub const K_HSI_CLOCK_HZ: u32 = 16_000_000;

/// Baud rate of the ST-LINK virtual COM port console.
pub const K_CONSOLE_BAUD_RATE: u32 = 115_200;

/// USART1 configuration used for the console.
pub const K_CONSOLE_UART_CONFIG: UartConfig = UartConfig {
    kernel_clock_hz: K_HSI_CLOCK_HZ,
    baud_rate: K_CONSOLE_BAUD_RATE,
};

/// NVIC enable/clear registers backing the 110 device interrupt lines.
const K_NVIC_IRQ_REGISTERS: usize = 4;

/// PA9 and PA10 mode fields in GPIOA_MODER, set to alternate function.
const K_USART1_PINS_MODE_MASK: u32 = (0b11 << 18) | (0b11 << 20);
const K_USART1_PINS_MODE_AF: u32 = (0b10 << 18) | (0b10 << 20);

/// PA9 and PA10 fields in GPIOA_AFRH, set to AF7 (USART1).
const K_USART1_PINS_AF_MASK: u32 = (0xF << 4) | (0xF << 8);
const K_USART1_PINS_AF7: u32 = (7 << 4) | (7 << 8);

/// GPIOJ pins driven by the indicator bits, bit 0 first.
const K_LED_PINS: [u32; 2] = [13, 5];

/// Every peripheral the firmware uses, taken once at reset.
pub struct Board {
    pub irq: Nvic,
    pub serial: Usart1,
    pub leds: LedBank,
}

impl Board {
    /// Takes ownership of the device and core peripherals.
    ///
    /// The LED pins are configured as outputs here, so that the indicator register
    /// is a plain output register once the kernel starts. The USART is left untouched
    /// until the kernel initializes it.
    ///
    /// # Parameters
    /// - `p_uart_config`: clock and baud rate used to program USART1.
    ///
    /// # Returns
    /// - `Board` owning every peripheral the firmware drives.
    ///
    /// # Errors
    /// - [`HalError::InvalidBaudRate`] if `p_uart_config` cannot be programmed.
    /// - [`HalError::PeripheralsAlreadyTaken`] if called more than once.
    pub fn take(p_uart_config: UartConfig) -> HalResult<Self> {
        let l_divisor = p_uart_config.divisor()?;
        let l_dp = Peripherals::take().ok_or(HalError::PeripheralsAlreadyTaken)?;
        let l_cp = cortex_m::Peripherals::take().ok_or(HalError::PeripheralsAlreadyTaken)?;

        let l_leds = LedBank::new(&l_dp.RCC, l_dp.GPIOJ);

        Ok(Board {
            irq: Nvic { nvic: l_cp.NVIC },
            serial: Usart1 {
                rcc: l_dp.RCC,
                gpioa: l_dp.GPIOA,
                usart: l_dp.USART1,
                divisor: l_divisor,
            },
            leds: l_leds,
        })
    }

    /// Hands the peripherals over to the kernel.
    ///
    /// # Returns
    /// - [`BootDevices`] with the NVIC, USART1 and the LED bank.
    pub fn into_boot_devices(self) -> BootDevices<Nvic, Usart1, LedBank> {
        BootDevices {
            irq: self.irq,
            serial: self.serial,
            indicator: self.leds,
        }
    }
}

/// NVIC lines and the PRIMASK flag.
///
/// Lines 0..31 follow the mask bits, higher lines stay masked.
pub struct Nvic {
    nvic: NVIC,
}

impl InterruptController for Nvic {
    /// Disables the lines whose bit is clear, then enables those whose bit is set.
    fn set_mask(&mut self, p_mask: u32) {
        unsafe {
            self.nvic.icer[0].write(!p_mask);
            self.nvic.iser[0].write(p_mask);
            for l_icer in self.nvic.icer[1..K_NVIC_IRQ_REGISTERS].iter() {
                l_icer.write(u32::MAX);
            }
        }
    }

    /// Clears (`true`) or sets (`false`) PRIMASK.
    fn set_enable(&mut self, p_enable: bool) {
        if p_enable {
            // No device handler is registered: every line is masked at this point.
            unsafe { cortex_m::interrupt::enable() }
        } else {
            cortex_m::interrupt::disable()
        }
    }
}

/// USART1 in 8N1, polled transmit.
pub struct Usart1 {
    rcc: RCC,
    gpioa: GPIOA,
    usart: USART1,
    divisor: u16,
}

impl SerialTransport for Usart1 {
    /// Enables the GPIOA and USART1 clocks, routes PA9/PA10 to AF7 and starts
    /// the USART with transmitter and receiver on.
    fn init(&mut self) {
        self.rcc.ahb1enr().modify(|_, w| w.gpioaen().set_bit());
        self.rcc.apb2enr().modify(|_, w| w.usart1en().set_bit());

        self.gpioa.afrh().modify(|r, w| unsafe {
            w.bits((r.bits() & !K_USART1_PINS_AF_MASK) | K_USART1_PINS_AF7)
        });
        self.gpioa.moder().modify(|r, w| unsafe {
            w.bits((r.bits() & !K_USART1_PINS_MODE_MASK) | K_USART1_PINS_MODE_AF)
        });

        // BRR can only be written while the USART is disabled
        self.usart.cr1().write(|w| unsafe { w.bits(0) });
        self.usart
            .brr()
            .write(|w| unsafe { w.bits(u32::from(self.divisor)) });
        self.usart
            .cr1()
            .write(|w| w.ue().set_bit().te().set_bit().re().set_bit());
    }

    /// Busy-waits for an empty transmit register, then queues `p_byte`.
    fn write_byte(&mut self, p_byte: u8) {
        while self.usart.isr().read().txe().bit_is_clear() {}
        self.usart
            .tdr()
            .write(|w| unsafe { w.bits(u32::from(p_byte)) });
    }
}

/// Two-LED indicator bank; bit `i` of the written value drives LED `i`.
pub struct LedBank {
    gpioj: GPIOJ,
}

impl LedBank {
    /// Enables the GPIOJ clock and sets every LED pin to push-pull output.
    ///
    /// # Parameters
    /// - `p_rcc`: reset and clock control, borrowed for the clock enable.
    /// - `p_gpioj`: port carrying the LEDs.
    fn new(p_rcc: &RCC, p_gpioj: GPIOJ) -> Self {
        p_rcc.ahb1enr().modify(|_, w| w.gpiojen().set_bit());

        let (l_mask, l_output) = K_LED_PINS
            .iter()
            .fold((0u32, 0u32), |(l_mask, l_output), l_pin| {
                (l_mask | (0b11 << (l_pin * 2)), l_output | (0b01 << (l_pin * 2)))
            });
        p_gpioj
            .moder()
            .modify(|r, w| unsafe { w.bits((r.bits() & !l_mask) | l_output) });

        LedBank { gpioj: p_gpioj }
    }
}

impl IndicatorRegister for LedBank {
    const WIDTH: u32 = K_LED_PINS.len() as u32;

    fn write(&mut self, p_value: u32) {
        // BSRR: low half sets pins, high half resets them, in a single store.
        let l_bsrr = K_LED_PINS
            .iter()
            .enumerate()
            .fold(0u32, |l_acc, (l_bit, l_pin)| {
                if p_value & (1 << l_bit) != 0 {
                    l_acc | (1 << l_pin)
                } else {
                    l_acc | (1 << (l_pin + 16))
                }
            });
        self.gpioj.bsrr().write(|w| unsafe { w.bits(l_bsrr) });
    }
}
