//! Solenoid valve trait

use super::PeriphError;

/// On/off pneumatic valve
///
/// For a normally-closed valve, `activate` opens the flow path and
/// `deactivate` closes it.
pub trait SolenoidValve {
    /// Energize the coil
    fn activate(&mut self) -> Result<(), PeriphError>;

    /// De-energize the coil
    fn deactivate(&mut self) -> Result<(), PeriphError>;

    /// Check if the valve is currently commanded active
    fn is_active(&self) -> bool;
}
