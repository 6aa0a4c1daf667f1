//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic
//! and hardware-specific implementations.

pub mod analog;
pub mod periph;
pub mod regulator;
pub mod sensor;
pub mod valve;

pub use analog::{AnalogInput, AnalogOutput};
pub use periph::PeriphError;
pub use regulator::{PressureRegulator, SharedRegulator};
pub use sensor::PressureSensor;
pub use valve::SolenoidValve;
