//! Physiological pressure sensor trait

use super::PeriphError;

/// Calibrated pressure sensor reporting mmHg
pub trait PressureSensor {
    /// Read the current pressure in mmHg
    ///
    /// The value is only meaningful when `Ok` is returned.
    fn read_mmhg(&mut self) -> Result<f32, PeriphError>;
}
