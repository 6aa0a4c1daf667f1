//! Cardiac cycle generation and actuation
//!
//! The pacemaker emits phase commands on a fixed rhythm; the actuator
//! sequencer turns each command into an interlocked valve sequence.

pub mod command;
pub mod outbox;
pub mod pacemaker;
pub mod sequencer;

pub use command::{CardiacPhase, PhaseCommand};
pub use outbox::{Delivery, Outbox};
pub use pacemaker::{Beat, Pacemaker};
pub use sequencer::{
    ActuatorSequencer, Actuation, SafeStateCause, SafeStateEntry, SequencerState,
};
