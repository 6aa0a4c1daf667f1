//! RP2040 analog front-end
//!
//! The chip has no DAC: the regulator setpoint is a filtered PWM output
//! amplified to 0-10 V. Feedback comes in through a resistor divider on an
//! ADC pin.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use pulsatile_core::traits::{AnalogInput, AnalogOutput, PeriphError};

/// Filtered PWM acting as a setpoint DAC
pub struct PwmDac {
    pwm: Pwm<'static>,
    config: PwmConfig,
    full_scale_volts: f32,
}

impl PwmDac {
    /// Configure `pwm` with the given counter top, starting at 0 V
    pub fn new(mut pwm: Pwm<'static>, top: u16, full_scale_volts: f32) -> Self {
        let mut config = PwmConfig::default();
        config.top = top;
        config.compare_a = 0;
        pwm.set_config(&config);

        Self {
            pwm,
            config,
            full_scale_volts,
        }
    }
}

impl AnalogOutput for PwmDac {
    fn set_voltage(&mut self, voltage: f32) -> Result<(), PeriphError> {
        // OutOfRange belongs to setpoint rejection; a voltage the output
        // stage cannot produce is a front-end fault
        if !(0.0..=self.full_scale_volts).contains(&voltage) {
            return Err(PeriphError::InvalidState);
        }

        let counts = voltage / self.full_scale_volts * (self.config.top as f32 + 1.0);
        self.config.compare_a = (counts + 0.5).min(self.config.top as f32 + 1.0) as u16;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}

/// ADC channel scaled back to connector volts
pub struct AdcInput {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
    volts_per_count: f32,
}

impl AdcInput {
    /// Create an input reading `channel`
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>, volts_per_count: f32) -> Self {
        Self {
            adc,
            channel,
            volts_per_count,
        }
    }
}

impl AnalogInput for AdcInput {
    fn read_voltage(&mut self) -> Result<f32, PeriphError> {
        let raw = self
            .adc
            .blocking_read(&mut self.channel)
            .map_err(|_| PeriphError::Hal)?;
        Ok(raw as f32 * self.volts_per_count)
    }
}
