//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pulsatile-core:
//!
//! - Pressure regulator (calibrated analog setpoint and feedback)
//! - Solenoid valves on GPIO outputs
//! - Analog pressure sensors

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod regulator;
pub mod sensor;
pub mod valve;
