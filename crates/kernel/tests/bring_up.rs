use std::panic::{AssertUnwindSafe, catch_unwind};

use hal_interface::mock::{
    BusEvent, BusRecorder, MockIndicator, MockInterruptController, MockSerial,
};
use kernel::{BootConfig, BootDevices, K_BLINK_SHIFT, boot, bring_up};

const K_PERIOD: u32 = 1 << K_BLINK_SHIFT;

fn is_greeting_byte(p_event: &BusEvent) -> bool {
    matches!(p_event, BusEvent::SerialByte(_))
}

#[test]
fn test_bring_up_order() {
    let l_bus = BusRecorder::new();
    let mut l_irq = MockInterruptController::new(&l_bus);
    let mut l_serial = MockSerial::new(&l_bus);
    let l_devices = BootDevices {
        irq: &mut l_irq,
        serial: &mut l_serial,
        indicator: MockIndicator::<8>::new(&l_bus),
    };

    let mut l_loop = bring_up(l_devices, &BootConfig::default());
    l_loop.step();

    let l_mask = l_bus.position(|e| matches!(e, BusEvent::IrqMask(_))).unwrap();
    let l_enable = l_bus.position(|e| matches!(e, BusEvent::IrqEnable(_))).unwrap();
    let l_init = l_bus.position(|e| *e == BusEvent::SerialInit).unwrap();
    let l_greeting = l_bus.position(is_greeting_byte).unwrap();
    let l_first_write = l_bus
        .position(|e| matches!(e, BusEvent::Indicator(_)))
        .unwrap();

    assert!(l_mask < l_enable);
    assert!(l_enable < l_init);
    assert!(l_init < l_greeting);
    assert!(l_greeting < l_first_write);

    assert_eq!(l_irq.mask(), Some(0));
    assert!(l_irq.is_enabled());
    assert!(l_serial.is_initialized());
}

#[test]
fn test_nothing_written_to_indicator_during_bring_up() {
    let l_bus = BusRecorder::new();
    let l_devices = BootDevices {
        irq: MockInterruptController::new(&l_bus),
        serial: MockSerial::new(&l_bus),
        indicator: MockIndicator::<8>::new(&l_bus),
    };

    let l_loop = bring_up(l_devices, &BootConfig::default());

    assert!(l_bus.indicator_writes().is_empty());
    assert_eq!(l_loop.tick_counter(), 0);
    assert_eq!(l_loop.indicator().writes(), 0);
}

#[test]
fn test_greeting_is_written_once_before_the_loop() {
    let l_bus = BusRecorder::new();
    let l_devices = BootDevices {
        irq: MockInterruptController::new(&l_bus),
        serial: MockSerial::new(&l_bus),
        indicator: MockIndicator::<8>::new(&l_bus),
    };

    let mut l_loop = bring_up(l_devices, &BootConfig::default());
    for _ in 0..1000 {
        l_loop.step();
    }

    assert_eq!(l_bus.serial_output(), b"Hello World\r\n\r\n");

    let l_events = l_bus.events();
    let l_last_serial = l_events.iter().rposition(is_greeting_byte).unwrap();
    let l_first_write = l_events
        .iter()
        .position(|e| matches!(e, BusEvent::Indicator(_)))
        .unwrap();
    assert!(l_last_serial < l_first_write);
}

#[test]
fn test_indicator_transitions_of_8_bit_bank() {
    let l_bus = BusRecorder::new();
    let l_devices = BootDevices {
        irq: MockInterruptController::new(&l_bus),
        serial: MockSerial::new(&l_bus),
        indicator: MockIndicator::<8>::new(&l_bus),
    };
    let mut l_loop = bring_up(l_devices, &BootConfig::default());

    for _ in 0..(2 * K_PERIOD + 1) {
        l_loop.step();
    }

    let l_writes = l_bus.indicator_writes();
    assert_eq!(l_writes.len(), (2 * K_PERIOD + 1) as usize);

    // Write k shows floor(k / 131072).
    for (l_k, l_value) in l_writes.iter().enumerate() {
        assert_eq!(*l_value, l_k as u32 / K_PERIOD, "iteration {}", l_k);
    }
    assert_eq!(l_writes[(K_PERIOD - 1) as usize], 0);
    assert_eq!(l_writes[K_PERIOD as usize], 1);
    assert_eq!(l_writes[(2 * K_PERIOD - 1) as usize], 1);
    assert_eq!(l_writes[(2 * K_PERIOD) as usize], 2);
    assert_eq!(l_loop.tick_counter(), 2 * K_PERIOD + 1);
}

#[test]
fn test_consecutive_writes_use_consecutive_counters() {
    let l_bus = BusRecorder::new();
    let l_devices = BootDevices {
        irq: MockInterruptController::new(&l_bus),
        serial: MockSerial::new(&l_bus),
        indicator: MockIndicator::<32>::new(&l_bus),
    };
    let mut l_loop = bring_up(l_devices, &BootConfig::default().with_blink_shift(0));

    for _ in 0..500 {
        l_loop.step();
    }

    let l_writes = l_bus.indicator_writes();
    for l_pair in l_writes.windows(2) {
        assert_eq!(l_pair[1], l_pair[0].wrapping_add(1));
    }
    assert_eq!(l_writes[0], 0);
}

#[test]
fn test_loop_runs_when_serial_is_dead() {
    let l_bus = BusRecorder::new();
    let l_devices = BootDevices {
        irq: MockInterruptController::new(&l_bus),
        serial: MockSerial::disconnected(&l_bus),
        indicator: MockIndicator::<8>::new(&l_bus),
    };
    let mut l_loop = bring_up(l_devices, &BootConfig::default());

    for _ in 0..(K_PERIOD + 1) {
        l_loop.step();
    }

    assert!(l_bus.serial_output().is_empty());
    assert_eq!(l_bus.indicator_writes().last(), Some(&1));
}

#[test]
fn test_boot_never_returns() {
    const K_LIMIT: usize = 300_000;
    let l_bus = BusRecorder::new();
    let l_devices = BootDevices {
        irq: MockInterruptController::new(&l_bus),
        serial: MockSerial::new(&l_bus),
        indicator: MockIndicator::<8>::panicking_after(&l_bus, K_LIMIT),
    };

    // `boot` returns `!`: the only way out is the mock refusing a write.
    let l_result = catch_unwind(AssertUnwindSafe(|| {
        boot(l_devices, BootConfig::default());
    }));

    assert!(l_result.is_err());
    assert_eq!(l_bus.indicator_writes().len(), K_LIMIT);
    assert_eq!(l_bus.serial_output(), b"Hello World\r\n\r\n");
    assert_eq!(
        l_bus.indicator_writes().last(),
        Some(&((K_LIMIT as u32 - 1) >> K_BLINK_SHIFT))
    );
}

#[test]
fn test_custom_config_reaches_peripherals() {
    let l_bus = BusRecorder::new();
    let l_devices = BootDevices {
        irq: MockInterruptController::new(&l_bus),
        serial: MockSerial::new(&l_bus),
        indicator: MockIndicator::<8>::new(&l_bus),
    };
    let l_config = BootConfig::default()
        .with_greeting("x")
        .with_blink_shift(1)
        .with_irq_mask(0x0000_0500);

    let mut l_loop = bring_up(l_devices, &l_config);
    for _ in 0..3 {
        l_loop.step();
    }

    assert_eq!(
        &l_bus.events()[..2],
        &[BusEvent::IrqMask(0x0000_0500), BusEvent::IrqEnable(true)]
    );
    assert_eq!(l_bus.serial_output(), b"x\r\n");
    assert_eq!(l_bus.indicator_writes(), vec![0, 0, 1]);
    assert_eq!(l_loop.shift(), 1);
}
