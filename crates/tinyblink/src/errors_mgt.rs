//! Fault and panic handling.
//!
//! A failure before boot (bad configuration, peripherals already taken) ends in a panic.
//! Reports go through the `log` facade, so they only reach a debugger console when the
//! `semihosting` feature is enabled.

use crate::board::K_HSI_CLOCK_HZ;
use core::panic::PanicInfo;
use cortex_m_rt::{ExceptionFrame, exception};
use kernel::K_KERNEL_NAME;
use log::error;

/// Delay before reset after a panic, in core cycles (5 s at the 16 MHz HSI clock).
const K_PANIC_RESET_DELAY_CYCLES: u32 = K_HSI_CLOCK_HZ * 5;

/// Cortex-M HardFault exception handler.
///
/// Reports the exception frame and parks the core.
#[exception]
unsafe fn HardFault(ef: &ExceptionFrame) -> ! {
    error!("HardFault: {:#?}", ef);

    #[allow(clippy::empty_loop)]
    loop {}
}

/// Firmware panic handler.
///
/// Reports the panic, waits, then resets the MCU.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    error!("{} has panicked !!!!!", K_KERNEL_NAME);
    error!("{}", info);
    error!("System will reboot in 5 seconds...");

    cortex_m::asm::delay(K_PANIC_RESET_DELAY_CYCLES);

    cortex_m::peripheral::SCB::sys_reset();
}
