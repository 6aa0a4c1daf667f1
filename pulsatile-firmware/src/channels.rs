//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Both channels are single producer, single consumer, and both producers
//! send with `try_send`, so a full channel drops instead of stalling.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use pulsatile_core::config::{SharedConfig, SystemConfig};
use pulsatile_core::cycle::PhaseCommand;
use pulsatile_core::telemetry::SensorSample;

/// Channel capacity for phase commands
pub const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for telemetry samples (320 ms at 100 Hz)
pub const SAMPLE_CHANNEL_SIZE: usize = 32;

/// Phase commands from the pacemaker to the actuator sequencer
pub static COMMAND_CHANNEL: Channel<
    CriticalSectionRawMutex,
    PhaseCommand,
    COMMAND_CHANNEL_SIZE,
> = Channel::new();

/// Telemetry samples from the sampler to the logger
pub static SAMPLE_CHANNEL: Channel<CriticalSectionRawMutex, SensorSample, SAMPLE_CHANNEL_SIZE> =
    Channel::new();

/// Live setpoints and phase durations
pub static CONFIG: SharedConfig<CriticalSectionRawMutex> = SharedConfig::new(SystemConfig::DEFAULT);
