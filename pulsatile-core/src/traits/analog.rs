//! Analog input and output channels
//!
//! Implemented by chip-specific adapters (DAC, filtered PWM, ADC). Voltages
//! are the real-world values at the connector, after any divider or amplifier.

use super::PeriphError;

/// Analog output (setpoint voltage)
pub trait AnalogOutput {
    /// Drive the output to `voltage` volts
    fn set_voltage(&mut self, voltage: f32) -> Result<(), PeriphError>;
}

/// Analog input (feedback voltage)
pub trait AnalogInput {
    /// Read the current input voltage
    ///
    /// Takes `&mut self` because ADC conversions require mutable access.
    fn read_voltage(&mut self) -> Result<f32, PeriphError>;
}
