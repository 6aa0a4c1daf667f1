//! Pressure regulator drivers

pub mod vppe;

pub use vppe::RegulatorDriver;
