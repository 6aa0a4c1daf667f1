//! Pacemaker (command generator)
//!
//! Open-loop rhythm source. Each beat emits one phase command and tells the
//! caller how long to hold before the next beat. The caller owns the clock;
//! this type owns only the rhythm.
//!
//! Durations are latched once per cardiac cycle, when `SystoleStart` is
//! emitted, so a configuration change never produces a half-old,
//! half-new cycle.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

use super::{Delivery, Outbox, PhaseCommand};
use crate::config::SystemConfig;

/// One emitted beat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Beat {
    /// Command that was offered to the sequencer
    pub command: PhaseCommand,
    /// Whether the command reached the channel
    pub delivery: Delivery,
    /// Time to hold before the next beat (ms)
    pub hold_ms: u32,
}

/// Alternating systole/diastole command generator
pub struct Pacemaker<'ch, M: RawMutex, const N: usize> {
    outbox: Outbox<'ch, M, PhaseCommand, N>,
    next: PhaseCommand,
    cycle: SystemConfig,
    beats: u32,
}

impl<'ch, M: RawMutex, const N: usize> Pacemaker<'ch, M, N> {
    /// Create a pacemaker that starts with `SystoleStart`
    pub fn new(sender: Sender<'ch, M, PhaseCommand, N>) -> Self {
        Self {
            outbox: Outbox::new(sender),
            next: PhaseCommand::SystoleStart,
            cycle: SystemConfig::DEFAULT,
            beats: 0,
        }
    }

    /// Emit the next command
    ///
    /// `latest` is the current configuration; it is only adopted at the
    /// start of a cycle. Never blocks: if the command channel is full the
    /// command is dropped and the rhythm continues.
    pub fn beat(&mut self, latest: &SystemConfig) -> Beat {
        let command = self.next;
        if command == PhaseCommand::SystoleStart {
            self.cycle = *latest;
        }

        let delivery = self.outbox.offer(command);
        let hold_ms = match command {
            PhaseCommand::SystoleStart => self.cycle.systole_duration_ms,
            PhaseCommand::DiastoleStart => self.cycle.diastole_duration_ms,
        };

        self.next = command.next();
        self.beats = self.beats.wrapping_add(1);

        Beat {
            command,
            delivery,
            hold_ms,
        }
    }

    /// Command the next beat will emit
    pub fn next_command(&self) -> PhaseCommand {
        self.next
    }

    /// Configuration latched for the current cycle
    pub fn cycle_config(&self) -> &SystemConfig {
        &self.cycle
    }

    /// Total beats emitted (including dropped ones)
    pub fn beats(&self) -> u32 {
        self.beats
    }

    /// Commands dropped because the channel was full
    pub fn dropped(&self) -> u32 {
        self.outbox.dropped()
    }
}
