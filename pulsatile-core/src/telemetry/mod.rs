//! Telemetry sampling
//!
//! A fixed-rate sampler reads regulator feedback, classifies the cardiac
//! phase the hardware is actually in, derives aortic/pulmonary pressures
//! and hands one [`SensorSample`] per period to the logging channel.

pub mod phase;
pub mod sample;
pub mod sampler;
pub mod waveform;

pub use phase::PhaseTracker;
pub use sample::SensorSample;
pub use sampler::{SampleReport, Sampler};
pub use waveform::{HemodynamicSource, Hemodynamics, SensorPair, SyntheticWaveform};
