//! Phase commands and cardiac phases

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two halves of a simulated heartbeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CardiacPhase {
    /// Low-pressure / vacuum phase
    #[default]
    Diastole,
    /// High-pressure phase
    Systole,
}

/// Command sent from the pacemaker to the actuator sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PhaseCommand {
    /// Pressurize: regulator to systole setpoint, pressure valve open
    SystoleStart,
    /// Vent: regulator to diastole setpoint, vacuum valve open
    DiastoleStart,
}

impl PhaseCommand {
    /// The command that follows this one in the rhythm
    pub fn next(self) -> Self {
        match self {
            PhaseCommand::SystoleStart => PhaseCommand::DiastoleStart,
            PhaseCommand::DiastoleStart => PhaseCommand::SystoleStart,
        }
    }

    /// The phase this command starts
    pub fn phase(self) -> CardiacPhase {
        match self {
            PhaseCommand::SystoleStart => CardiacPhase::Systole,
            PhaseCommand::DiastoleStart => CardiacPhase::Diastole,
        }
    }
}
