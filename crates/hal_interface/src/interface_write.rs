/// Interrupt mask value with every interrupt line masked.
pub const K_IRQ_MASK_ALL_MASKED: u32 = 0;

/// Interrupt controller configuration points.
///
/// Both operations are plain register writes: they are set once at startup and
/// never read back.
pub trait InterruptController {
    /// Writes the per-line interrupt mask.
    ///
    /// # Parameters
    /// - `p_mask`: One bit per interrupt line, `1` meaning the line is delivered.
    ///   [`K_IRQ_MASK_ALL_MASKED`] masks every line.
    fn set_mask(&mut self, p_mask: u32);

    /// Writes the global interrupt-enable flag.
    ///
    /// # Parameters
    /// - `p_enable`: `true` lets unmasked interrupts reach the core.
    fn set_enable(&mut self, p_enable: bool);
}

/// Write-only serial byte stream.
pub trait SerialTransport {
    /// Configures clocks, pins and baud rate so that the transport accepts bytes.
    ///
    /// No result is reported. A transport that fails to come up silently drops
    /// what is written to it afterwards.
    fn init(&mut self);

    /// Transmits a single byte.
    fn write_byte(&mut self, p_byte: u8);

    /// Transmits every byte of `p_bytes` in order.
    fn write_bytes(&mut self, p_bytes: &[u8]) {
        for l_byte in p_bytes {
            self.write_byte(*l_byte);
        }
    }
}

/// Write-only register driving a visible indicator (an LED bank).
pub trait IndicatorRegister {
    /// Number of meaningful bits in the register.
    ///
    /// Values written are reduced modulo `2^WIDTH` by the hardware.
    const WIDTH: u32;

    /// Writes a value to the register. Bits above [`IndicatorRegister::WIDTH`] are ignored.
    fn write(&mut self, p_value: u32);

    /// Returns the part of `p_value` the register can represent.
    fn representable(p_value: u32) -> u32 {
        if Self::WIDTH >= u32::BITS {
            p_value
        } else {
            p_value & ((1 << Self::WIDTH) - 1)
        }
    }
}

impl<T: InterruptController + ?Sized> InterruptController for &mut T {
    fn set_mask(&mut self, p_mask: u32) {
        T::set_mask(self, p_mask)
    }

    fn set_enable(&mut self, p_enable: bool) {
        T::set_enable(self, p_enable)
    }
}

impl<T: SerialTransport + ?Sized> SerialTransport for &mut T {
    fn init(&mut self) {
        T::init(self)
    }

    fn write_byte(&mut self, p_byte: u8) {
        T::write_byte(self, p_byte)
    }
}

impl<T: IndicatorRegister> IndicatorRegister for &mut T {
    const WIDTH: u32 = T::WIDTH;

    fn write(&mut self, p_value: u32) {
        T::write(self, p_value)
    }
}
