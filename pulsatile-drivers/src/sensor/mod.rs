//! Pressure sensor drivers

pub mod analog;

pub use analog::AnalogPressureSensor;
