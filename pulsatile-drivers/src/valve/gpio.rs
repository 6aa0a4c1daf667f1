//! GPIO solenoid valve
//!
//! Drives a valve coil through a GPIO pin (via a MOSFET or driver board).

use embedded_hal::digital::OutputPin;
use pulsatile_core::traits::{PeriphError, SolenoidValve};

/// Solenoid valve on a GPIO output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioSolenoid<P> {
    pin: P,
    /// If true, valve active = pin LOW
    active_low: bool,
    /// Last successfully written logical state
    active: bool,
}

impl<P: OutputPin> GpioSolenoid<P> {
    /// Create a new solenoid and drive it inactive
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `active_low`: If true, the valve is energized when the pin is LOW
    pub fn new(pin: P, active_low: bool) -> Result<Self, PeriphError> {
        let mut valve = Self {
            pin,
            active_low,
            active: false,
        };
        valve.drive(false)?;
        Ok(valve)
    }

    /// Create a new solenoid with active-high output
    pub fn new_active_high(pin: P) -> Result<Self, PeriphError> {
        Self::new(pin, false)
    }

    /// Create a new solenoid with active-low output
    pub fn new_active_low(pin: P) -> Result<Self, PeriphError> {
        Self::new(pin, true)
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, active: bool) -> Result<(), PeriphError> {
        let result = if active != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| PeriphError::Hal)?;
        self.active = active;
        Ok(())
    }
}

impl<P: OutputPin> SolenoidValve for GpioSolenoid<P> {
    fn activate(&mut self) -> Result<(), PeriphError> {
        self.drive(true)
    }

    fn deactivate(&mut self) -> Result<(), PeriphError> {
        self.drive(false)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
