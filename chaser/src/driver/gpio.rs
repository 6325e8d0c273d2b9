use embedded_hal::digital::OutputPin;

use super::OutputBank;

/// The gpio driver is a wrapper for the embedded-hal digital output pin trait.
/// It wraps the low-active and high-active pins, and provides a way to set the pin state
pub struct OutputController<P: OutputPin> {
    pin: P,
    low_active: bool,
}

impl<P: OutputPin> OutputController<P> {
    /// Create a new OutputController instance
    pub fn new(pin: P, low_active: bool) -> Self {
        Self { pin, low_active }
    }

    /// Drive the pin to its active or inactive level
    pub fn set_active(&mut self, active: bool) {
        let result = if active != self.low_active {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            warn!("Failed to set output pin");
        }
    }

    /// Release the wrapped pin
    pub fn free(self) -> P {
        self.pin
    }
}

/// A bank of `N` LEDs, each on its own output pin.
///
/// Pin `i` is lit when bit `i` of the pattern is set. Bits at or above `N` are ignored.
pub struct LedBank<P: OutputPin, const N: usize> {
    leds: [OutputController<P>; N],
}

impl<P: OutputPin, const N: usize> LedBank<P, N> {
    pub fn new(pins: [P; N], low_active: bool) -> Self {
        Self {
            leds: pins.map(|pin| OutputController::new(pin, low_active)),
        }
    }

    /// Release the wrapped pins
    pub fn free(self) -> [P; N] {
        self.leds.map(OutputController::free)
    }
}

impl<P: OutputPin, const N: usize> OutputBank for LedBank<P, N> {
    fn set_pattern(&mut self, pattern: u32) {
        for (i, led) in self.leds.iter_mut().enumerate() {
            led.set_active(i < 32 && pattern & (1 << i) != 0);
        }
    }
}
