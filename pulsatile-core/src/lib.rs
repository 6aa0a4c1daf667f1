//! Board-agnostic control core for the pulsatile pressure generator
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware capability traits (regulator, solenoid valve, pressure sensor)
//! - Configuration types and the shared configuration accessor
//! - Cardiac cycle generation (pacemaker) and actuator sequencing
//! - Telemetry sampling with phase detection and synthetic waveforms

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod cycle;
pub mod telemetry;
pub mod traits;
