//! Recording peripherals for host tests.
//!
//! Every mock shares a [`BusRecorder`], so a test can check the relative order of
//! writes that went to different peripherals.

use crate::{IndicatorRegister, InterruptController, SerialTransport};
use std::cell::RefCell;
use std::rc::Rc;

/// One observable peripheral access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    IrqMask(u32),
    IrqEnable(bool),
    SerialInit,
    SerialByte(u8),
    Indicator(u32),
}

/// Shared, ordered log of peripheral accesses.
#[derive(Debug, Clone, Default)]
pub struct BusRecorder {
    events: Rc<RefCell<Vec<BusEvent>>>,
}

impl BusRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, p_event: BusEvent) {
        self.events.borrow_mut().push(p_event);
    }

    /// Returns a copy of every recorded access, oldest first.
    pub fn events(&self) -> Vec<BusEvent> {
        self.events.borrow().clone()
    }

    /// Returns the index of the first recorded access matching `p_pred`.
    pub fn position(&self, p_pred: impl Fn(&BusEvent) -> bool) -> Option<usize> {
        self.events.borrow().iter().position(p_pred)
    }

    /// Returns the bytes that actually went out on the serial line.
    pub fn serial_output(&self) -> Vec<u8> {
        self.events
            .borrow()
            .iter()
            .filter_map(|l_event| match l_event {
                BusEvent::SerialByte(l_byte) => Some(*l_byte),
                _ => None,
            })
            .collect()
    }

    /// Returns the values written to the indicator register, oldest first.
    pub fn indicator_writes(&self) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|l_event| match l_event {
                BusEvent::Indicator(l_value) => Some(*l_value),
                _ => None,
            })
            .collect()
    }

    /// Forgets every access recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Interrupt controller that remembers its last configuration.
#[derive(Debug)]
pub struct MockInterruptController {
    bus: BusRecorder,
    mask: Option<u32>,
    enabled: bool,
}

impl MockInterruptController {
    pub fn new(p_bus: &BusRecorder) -> Self {
        Self {
            bus: p_bus.clone(),
            mask: None,
            enabled: false,
        }
    }

    pub fn mask(&self) -> Option<u32> {
        self.mask
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl InterruptController for MockInterruptController {
    fn set_mask(&mut self, p_mask: u32) {
        self.mask = Some(p_mask);
        self.bus.record(BusEvent::IrqMask(p_mask));
    }

    fn set_enable(&mut self, p_enable: bool) {
        self.enabled = p_enable;
        self.bus.record(BusEvent::IrqEnable(p_enable));
    }
}

/// Serial transport that only transmits once initialized.
///
/// A disconnected transport accepts `init` but never puts a byte on the line,
/// which is what a transport that silently failed to come up looks like.
#[derive(Debug)]
pub struct MockSerial {
    bus: BusRecorder,
    initialized: bool,
    connected: bool,
}

impl MockSerial {
    pub fn new(p_bus: &BusRecorder) -> Self {
        Self {
            bus: p_bus.clone(),
            initialized: false,
            connected: true,
        }
    }

    pub fn disconnected(p_bus: &BusRecorder) -> Self {
        Self {
            connected: false,
            ..Self::new(p_bus)
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl SerialTransport for MockSerial {
    fn init(&mut self) {
        self.initialized = true;
        self.bus.record(BusEvent::SerialInit);
    }

    fn write_byte(&mut self, p_byte: u8) {
        if self.initialized && self.connected {
            self.bus.record(BusEvent::SerialByte(p_byte));
        }
    }
}

/// Indicator register of `W` bits.
///
/// With [`MockIndicator::panicking_after`] the register panics on the write that
/// follows the given count, which is the only way a test gets out of the blink loop.
#[derive(Debug)]
pub struct MockIndicator<const W: u32> {
    bus: BusRecorder,
    value: u32,
    writes: usize,
    panic_after: Option<usize>,
}

impl<const W: u32> MockIndicator<W> {
    pub fn new(p_bus: &BusRecorder) -> Self {
        Self {
            bus: p_bus.clone(),
            value: 0,
            writes: 0,
            panic_after: None,
        }
    }

    pub fn panicking_after(p_bus: &BusRecorder, p_writes: usize) -> Self {
        Self {
            panic_after: Some(p_writes),
            ..Self::new(p_bus)
        }
    }

    /// Current register content.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Number of writes accepted so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl<const W: u32> IndicatorRegister for MockIndicator<W> {
    const WIDTH: u32 = W;

    fn write(&mut self, p_value: u32) {
        if let Some(l_limit) = self.panic_after {
            if self.writes >= l_limit {
                panic!("indicator write limit of {} reached", l_limit);
            }
        }
        self.value = Self::representable(p_value);
        self.writes += 1;
        self.bus.record(BusEvent::Indicator(self.value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_drops_bytes_before_init() {
        let l_bus = BusRecorder::new();
        let mut l_serial = MockSerial::new(&l_bus);

        l_serial.write_byte(b'x');
        l_serial.init();
        l_serial.write_byte(b'y');

        assert_eq!(l_bus.serial_output(), b"y");
        assert_eq!(
            l_bus.events(),
            vec![BusEvent::SerialInit, BusEvent::SerialByte(b'y')]
        );
    }

    #[test]
    fn test_disconnected_serial_stays_silent() {
        let l_bus = BusRecorder::new();
        let mut l_serial = MockSerial::disconnected(&l_bus);

        l_serial.init();
        l_serial.write_bytes(b"lost");

        assert!(l_serial.is_initialized());
        assert!(l_bus.serial_output().is_empty());
    }

    #[test]
    fn test_indicator_masks_to_width() {
        let l_bus = BusRecorder::new();
        let mut l_led = MockIndicator::<2>::new(&l_bus);

        l_led.write(0b111);
        assert_eq!(l_led.value(), 0b11);
        l_led.write(4);
        assert_eq!(l_led.value(), 0);
        assert_eq!(l_bus.indicator_writes(), vec![0b11, 0]);
        assert_eq!(l_led.writes(), 2);
    }

    #[test]
    #[should_panic(expected = "indicator write limit of 1 reached")]
    fn test_indicator_panics_past_limit() {
        let l_bus = BusRecorder::new();
        let mut l_led = MockIndicator::<8>::panicking_after(&l_bus, 1);

        l_led.write(1);
        l_led.write(2);
    }

    #[test]
    fn test_interrupt_controller_remembers_config() {
        let l_bus = BusRecorder::new();
        let mut l_irq = MockInterruptController::new(&l_bus);

        assert_eq!(l_irq.mask(), None);
        l_irq.set_mask(0);
        l_irq.set_enable(true);

        assert_eq!(l_irq.mask(), Some(0));
        assert!(l_irq.is_enabled());
        assert_eq!(
            l_bus.events(),
            vec![BusEvent::IrqMask(0), BusEvent::IrqEnable(true)]
        );
    }
}
