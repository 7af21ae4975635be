use crate::blink::{BlinkLoop, K_BLINK_SHIFT};
use crate::console_output::ConsoleOutput;
use crate::ident::{K_KERNEL_NAME, K_KERNEL_VERSION};
use crate::{KernelError, KernelResult, SystemState};
use hal_interface::{
    IndicatorRegister, InterruptController, K_IRQ_MASK_ALL_MASKED, SerialTransport,
};
use log::{LevelFilter, debug, info};

/// Greeting sent once over the serial transport.
///
/// The embedded line feed plus the terminator added by
/// [`ConsoleOutput::write_line`] leave a blank line after the text.
pub const K_GREETING: &str = "Hello World\n";

/// Kernel log level applied by [`bring_up`] unless configured otherwise.
pub const K_DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Configuration parameters for the boot process.
#[derive(Debug, Clone, Copy)]
pub struct BootConfig {
    /// Text written once on the serial transport before the blink loop starts.
    pub greeting: &'static str,
    /// Number of tick-counter bits hidden from the indicator.
    pub blink_shift: u32,
    /// Interrupt mask applied first thing during bring-up, one bit per line.
    pub irq_mask: u32,
    /// Most verbose kernel log level emitted.
    pub log_level: LevelFilter,
}

impl Default for BootConfig {
    fn default() -> Self {
        BootConfig {
            greeting: K_GREETING,
            blink_shift: K_BLINK_SHIFT,
            irq_mask: K_IRQ_MASK_ALL_MASKED,
            log_level: K_DEFAULT_LOG_LEVEL,
        }
    }
}

impl BootConfig {
    /// Replaces the greeting.
    ///
    /// # Parameters
    /// - `p_greeting`: text passed to [`ConsoleOutput::write_line`] during bring-up.
    pub fn with_greeting(mut self, p_greeting: &'static str) -> Self {
        self.greeting = p_greeting;
        self
    }

    /// Replaces the blink shift.
    ///
    /// # Parameters
    /// - `p_shift`: number of low tick-counter bits to drop, below 32.
    pub fn with_blink_shift(mut self, p_shift: u32) -> Self {
        self.blink_shift = p_shift;
        self
    }

    /// Replaces the interrupt mask.
    ///
    /// # Parameters
    /// - `p_mask`: mask handed to [`InterruptController::set_mask`]; a set bit enables the line.
    pub fn with_irq_mask(mut self, p_mask: u32) -> Self {
        self.irq_mask = p_mask;
        self
    }

    /// Replaces the kernel log level.
    ///
    /// # Parameters
    /// - `p_level`: most verbose level the kernel emits once bring-up has started.
    pub fn with_log_level(mut self, p_level: LevelFilter) -> Self {
        self.log_level = p_level;
        self
    }

    /// Checks the configuration before any peripheral is touched.
    ///
    /// # Returns
    /// - `Ok(())` if the configuration can be booted.
    ///
    /// # Errors
    /// - [`KernelError::InvalidBlinkShift`] if the shift hides the whole tick counter.
    /// - [`KernelError::EmptyGreeting`] if there is nothing to greet with.
    pub fn validate(&self) -> KernelResult<()> {
        if self.blink_shift >= u32::BITS {
            return Err(KernelError::InvalidBlinkShift(self.blink_shift));
        }
        if self.greeting.is_empty() {
            return Err(KernelError::EmptyGreeting);
        }
        Ok(())
    }
}

/// Peripherals handed to the kernel by the board.
pub struct BootDevices<I, S, L> {
    pub irq: I,
    pub serial: S,
    pub indicator: L,
}

/// Runs the one-time bring-up sequence and returns the blink loop, ready to run.
///
/// The steps run unconditionally, in this order:
/// 1. Apply the configured interrupt mask (every line masked by default).
/// 2. Set the global interrupt-enable flag. No interrupt handler is installed.
/// 3. Initialize the serial transport.
/// 4. Write the greeting, once.
/// 5. Build the blink loop with its tick counter at zero.
///
/// Nothing is checked along the way: if the serial transport did not come up,
/// the greeting is lost and the blink loop is built all the same.
///
/// # Parameters
/// - `p_devices`: peripherals provided by the board.
/// - `p_config`: boot configuration, expected to have passed [`BootConfig::validate`].
///
/// # Returns
/// - The [`BlinkLoop`] owning the indicator register.
pub fn bring_up<I, S, L>(p_devices: BootDevices<I, S, L>, p_config: &BootConfig) -> BlinkLoop<L>
where
    I: InterruptController,
    S: SerialTransport,
    L: IndicatorRegister,
{
    let BootDevices {
        irq: mut l_irq,
        serial: mut l_serial,
        indicator: l_indicator,
    } = p_devices;

    log::set_max_level(p_config.log_level);
    info!("{} version {}", K_KERNEL_NAME, K_KERNEL_VERSION);
    info!("state: {}", SystemState::Initializing.as_str());

    ///////////////////////////
    // Interrupt controller
    ///////////////////////////
    l_irq.set_mask(p_config.irq_mask);
    debug!("irq mask set to {:#010x}", p_config.irq_mask);
    l_irq.set_enable(true);
    debug!("global irq enabled");

    ///////////////////////////
    // Serial transport
    ///////////////////////////
    l_serial.init();
    debug!("serial transport initialized");

    ConsoleOutput::new(&mut l_serial).write_line(p_config.greeting);
    debug!("greeting sent");

    debug!(
        "indicator is {} bits wide, blink shift {}",
        L::WIDTH,
        p_config.blink_shift
    );
    BlinkLoop::new(l_indicator, p_config.blink_shift)
}

/// Brings the board up and blinks forever.
///
/// # Parameters
/// - `p_devices`: peripherals provided by the board.
/// - `p_config`: boot configuration, expected to have passed [`BootConfig::validate`].
///
/// # Returns
/// - Never.
pub fn boot<I, S, L>(p_devices: BootDevices<I, S, L>, p_config: BootConfig) -> !
where
    I: InterruptController,
    S: SerialTransport,
    L: IndicatorRegister,
{
    bring_up(p_devices, &p_config).run()
}
