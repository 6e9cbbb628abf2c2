//! GPIO actuator output
//!
//! Switches a vibration motor or buzzer through a GPIO pin (directly or via
//! a transistor/MOSFET stage).

use embedded_hal::digital::OutputPin;
use tactus_core::traits::Actuator;

/// GPIO actuator
///
/// Drives the actuator via a GPIO pin. The pin can be configured as
/// active-high (default) or active-low.
pub struct GpioActuator<P> {
    pin: P,
    /// If true, actuator ON = pin LOW
    inverted: bool,
    /// Current logical state (true = actuator on)
    on: bool,
    /// Set once a pin write has failed
    fault: bool,
}

impl<P: OutputPin> GpioActuator<P> {
    /// Create a new GPIO actuator
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, actuator is ON when pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut actuator = Self {
            pin,
            inverted,
            on: false,
            fault: false,
        };
        // Ensure actuator starts off
        actuator.set_active(false);
        actuator
    }

    /// Create a new GPIO actuator with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO actuator with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Returns true if any pin write has failed
    pub fn has_fault(&self) -> bool {
        self.fault
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Actuator for GpioActuator<P> {
    fn set_active(&mut self, active: bool) {
        self.on = active;

        // Normal: on=true, inverted=false → high
        // Inverted: on=true, inverted=true → low
        let result = if active != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            self.fault = true;
        }
    }

    fn is_active(&self) -> bool {
        self.on
    }
}
