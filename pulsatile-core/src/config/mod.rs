//! Configuration types
//!
//! Setpoints, timing and calibration consumed by the control units.
//! The core never stores configuration; it is handed in as value snapshots.

pub mod calibration;
pub mod shared;
pub mod types;

pub use calibration::CalibrationBounds;
pub use shared::SharedConfig;
pub use types::*;
