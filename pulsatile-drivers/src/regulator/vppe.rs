//! Proportional pressure regulator with analog setpoint and feedback
//!
//! Works with any regulator that takes its setpoint as a voltage and
//! reports the measured pressure as a voltage on the same linear scale
//! (Festo VPPE and similar). The setpoint goes through an [`AnalogOutput`],
//! the feedback comes back through an [`AnalogInput`].
//!
//! # Usage
//!
//! ```ignore
//! let mut regulator = RegulatorDriver::new(dac, adc, CalibrationBounds::VPPE_0_2_BAR);
//! regulator.set_target_pressure(1.2)?;
//! let bar = regulator.actual_pressure()?;
//! ```

use pulsatile_core::config::CalibrationBounds;
use pulsatile_core::traits::{AnalogInput, AnalogOutput, PeriphError, PressureRegulator};

/// Calibrated regulator driver
pub struct RegulatorDriver<O, I> {
    output: O,
    input: I,
    bounds: CalibrationBounds,
    /// Last accepted setpoint (bar)
    target_bar: f32,
    /// Outcome of the most recent hardware write
    last_write: Result<(), PeriphError>,
}

impl<O: AnalogOutput, I: AnalogInput> RegulatorDriver<O, I> {
    /// Create a driver and command 0 bar
    ///
    /// Construction never fails; the result of the initial write is kept in
    /// [`last_write_status`](Self::last_write_status).
    pub fn new(output: O, input: I, bounds: CalibrationBounds) -> Self {
        let mut driver = Self {
            output,
            input,
            bounds,
            target_bar: 0.0,
            last_write: Ok(()),
        };
        // Outcome lands in last_write
        let _ = driver.set_target_pressure(0.0);
        driver
    }

    /// Last accepted target pressure (bar)
    pub fn target_bar(&self) -> f32 {
        self.target_bar
    }

    /// Calibration of this regulator
    pub fn bounds(&self) -> &CalibrationBounds {
        &self.bounds
    }

    /// Result of the most recent write to the setpoint output
    ///
    /// Rejected requests never reach the output and do not change this.
    pub fn last_write_status(&self) -> Result<(), PeriphError> {
        self.last_write
    }

    /// Get mutable access to the setpoint output
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Get mutable access to the feedback input
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Release the underlying channels
    pub fn release(self) -> (O, I) {
        (self.output, self.input)
    }
}

impl<O: AnalogOutput, I: AnalogInput> PressureRegulator for RegulatorDriver<O, I> {
    fn set_target_pressure(&mut self, bar: f32) -> Result<(), PeriphError> {
        if bar < 0.0 || !self.bounds.is_safe(bar) {
            return Err(PeriphError::OutOfRange);
        }

        let voltage = self.bounds.bar_to_voltage(bar).max(0.0);
        self.last_write = self.output.set_voltage(voltage);
        if self.last_write.is_ok() {
            self.target_bar = bar;
        }
        self.last_write
    }

    fn actual_pressure(&mut self) -> Result<f32, PeriphError> {
        let voltage = self.input.read_voltage()?;
        // f32::max returns the other operand for NaN, so garbage reads give 0
        Ok(self.bounds.voltage_to_bar(voltage).max(0.0))
    }
}
