#![no_std]
#![no_main]

//! TinyBlink application entry point.
//!
//! Takes the board peripherals and hands them to the kernel, which greets on the
//! serial console and blinks the user LEDs forever.

mod board;
mod errors_mgt;
mod logger;

use board::{Board, K_CONSOLE_UART_CONFIG};
use cortex_m_rt::entry;
use kernel::{BootConfig, KernelError};

#[entry]
fn main() -> ! {
    let l_config = BootConfig::default();
    if logger::init(l_config.log_level).is_err() {
        panic!("logger already installed");
    }

    if let Err(l_err) = l_config.validate() {
        panic!("{}", l_err.to_string());
    }

    let l_board = match Board::take(K_CONSOLE_UART_CONFIG) {
        Ok(l_board) => l_board,
        Err(l_err) => panic!("{}", KernelError::HalError(l_err).to_string()),
    };

    kernel::boot(l_board.into_boot_devices(), l_config)
}
