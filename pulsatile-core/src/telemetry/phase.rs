//! Phase detection from regulator feedback
//!
//! The sampler does not listen to the commands sent to the actuators. It
//! classifies the phase from what the regulator reports, so it acts as an
//! independent cross-check of the pneumatic state.

use crate::config::SamplerConfig;
use crate::cycle::CardiacPhase;

/// Tracks the observed phase and how long it has lasted
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseTracker {
    phase: CardiacPhase,
    ticks_in_phase: u32,
    threshold_bar: f32,
}

impl PhaseTracker {
    /// Start in diastole with `threshold_bar` as the systole boundary
    pub const fn new(threshold_bar: f32) -> Self {
        Self {
            phase: CardiacPhase::Diastole,
            ticks_in_phase: 0,
            threshold_bar,
        }
    }

    /// Classify a feedback reading
    pub fn classify(&self, regulator_bar: f32) -> CardiacPhase {
        if regulator_bar > self.threshold_bar {
            CardiacPhase::Systole
        } else {
            CardiacPhase::Diastole
        }
    }

    /// Advance one sampling period with a new feedback reading
    ///
    /// Returns the new phase when a transition happened. The tick counter
    /// restarts at zero on every transition.
    pub fn advance(&mut self, regulator_bar: f32) -> Option<CardiacPhase> {
        self.ticks_in_phase = self.ticks_in_phase.saturating_add(1);

        let observed = self.classify(regulator_bar);
        if observed == self.phase {
            return None;
        }

        self.phase = observed;
        self.ticks_in_phase = 0;
        Some(observed)
    }

    /// Fraction of the nominal phase length elapsed, clamped to [0, 1]
    pub fn progress(&self, config: &SamplerConfig) -> f32 {
        let nominal = match self.phase {
            CardiacPhase::Systole => config.systole_ticks(),
            CardiacPhase::Diastole => config.diastole_ticks(),
        };
        if nominal <= 0.0 {
            return 1.0;
        }
        (self.ticks_in_phase as f32 / nominal).clamp(0.0, 1.0)
    }

    /// Current phase
    pub fn phase(&self) -> CardiacPhase {
        self.phase
    }

    /// Ticks since the current phase was entered
    pub fn ticks_in_phase(&self) -> u32 {
        self.ticks_in_phase
    }
}
