use crate::SystemState;
use hal_interface::IndicatorRegister;
use log::info;

/// Number of low tick-counter bits hidden from the indicator.
///
/// The indicator value changes once every `2^17` (131072) loop iterations, which
/// turns the free-running loop into a blink rate a human can follow.
pub const K_BLINK_SHIFT: u32 = 17;

/// Maps a tick counter to the value written to the indicator register.
///
/// # Parameters
/// - `p_counter`: current tick counter.
/// - `p_shift`: number of low counter bits to drop.
///
/// # Returns
/// - `p_counter >> p_shift`, or `0` when the shift is as wide as the counter or wider.
pub const fn indicator_value(p_counter: u32, p_shift: u32) -> u32 {
    match p_counter.checked_shr(p_shift) {
        Some(l_value) => l_value,
        None => 0,
    }
}

/// Steady-state loop driving the indicator from a software tick counter.
///
/// The loop owns the tick counter: it starts at zero and is incremented by one
/// (wrapping) after each indicator write, so write `k` always shows
/// `indicator_value(k, shift)`.
pub struct BlinkLoop<L: IndicatorRegister> {
    indicator: L,
    tick_counter: u32,
    shift: u32,
}

impl<L: IndicatorRegister> BlinkLoop<L> {
    /// Creates the loop with a zeroed tick counter.
    ///
    /// # Parameters
    /// - `p_indicator`: register receiving the derived value on every step.
    /// - `p_shift`: blink shift passed to [`indicator_value`].
    ///
    /// # Returns
    /// - `BlinkLoop`, not started yet.
    pub fn new(p_indicator: L, p_shift: u32) -> Self {
        BlinkLoop {
            indicator: p_indicator,
            tick_counter: 0,
            shift: p_shift,
        }
    }

    /// Value the next [`BlinkLoop::step`] will derive its output from.
    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Blink shift applied to the tick counter.
    pub fn shift(&self) -> u32 {
        self.shift
    }

    /// Borrows the indicator register driven by the loop.
    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    /// Runs one loop iteration: writes the indicator, then advances the counter.
    #[inline(always)]
    pub fn step(&mut self) {
        self.indicator
            .write(indicator_value(self.tick_counter, self.shift));
        self.tick_counter = self.tick_counter.wrapping_add(1);
    }

    /// Runs the loop forever.
    ///
    /// There is no exit condition and no yield point; only a reset stops it.
    ///
    /// # Returns
    /// - Never.
    pub fn run(mut self) -> ! {
        info!("state: {}", SystemState::Running.as_str());

        loop {
            self.step();
        }
    }
}
