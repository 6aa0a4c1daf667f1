//! Periodic telemetry sampler
//!
//! The caller drives [`Sampler::tick`] once per period from an
//! absolute-deadline timer; the sampler owns the per-phase tick counter
//! and the lossy telemetry outbox.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

use super::{HemodynamicSource, PhaseTracker, SensorSample};
use crate::config::SamplerConfig;
use crate::cycle::{CardiacPhase, Delivery, Outbox};
use crate::traits::{PeriphError, PressureRegulator};

/// Everything that happened during one sampling period
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReport {
    /// The published sample
    pub sample: SensorSample,
    /// Phase observed after this sample
    pub phase: CardiacPhase,
    /// Set when this sample started a new phase
    pub transition: Option<CardiacPhase>,
    /// Set when the regulator feedback could not be read
    pub feedback_fault: Option<PeriphError>,
    /// Whether the sample reached the logging channel
    pub delivery: Delivery,
}

/// Fixed-rate pressure sampler
pub struct Sampler<'ch, M: RawMutex, R, H, const N: usize> {
    regulator: R,
    source: H,
    config: SamplerConfig,
    tracker: PhaseTracker,
    outbox: Outbox<'ch, M, SensorSample, N>,
    last_feedback_bar: f32,
    feedback_faults: u32,
}

impl<'ch, M, R, H, const N: usize> Sampler<'ch, M, R, H, N>
where
    M: RawMutex,
    R: PressureRegulator,
    H: HemodynamicSource,
{
    /// Create a sampler publishing into `sender`
    ///
    /// `config` must pass [`SamplerConfig::validate`]; debug builds assert it.
    pub fn new(
        regulator: R,
        source: H,
        config: SamplerConfig,
        sender: Sender<'ch, M, SensorSample, N>,
    ) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid sampler config");
        Self {
            regulator,
            source,
            config,
            tracker: PhaseTracker::new(config.systole_threshold_bar),
            outbox: Outbox::new(sender),
            last_feedback_bar: 0.0,
            feedback_faults: 0,
        }
    }

    /// Take one sample stamped with `timestamp_ms` and publish it
    ///
    /// A failed feedback read reuses the last good reading for this period;
    /// the next period's read is the retry. Never blocks on the channel.
    pub fn tick(&mut self, timestamp_ms: u32) -> SampleReport {
        let feedback_fault = match self.regulator.actual_pressure() {
            Ok(bar) => {
                self.last_feedback_bar = bar;
                None
            }
            Err(e) => {
                self.feedback_faults = self.feedback_faults.saturating_add(1);
                Some(e)
            }
        };
        let regulator_bar = self.last_feedback_bar;

        let transition = self.tracker.advance(regulator_bar);
        let phase = self.tracker.phase();
        let progress = self.tracker.progress(&self.config);
        let pressures = self.source.read(phase, progress);

        let sample = SensorSample {
            timestamp_ms,
            aortic_mmhg: pressures.aortic_mmhg,
            pulmonary_mmhg: pressures.pulmonary_mmhg,
            regulator_bar,
        };
        let delivery = self.outbox.offer(sample);

        SampleReport {
            sample,
            phase,
            transition,
            feedback_fault,
            delivery,
        }
    }

    /// Sampling configuration
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Current phase tracker state
    pub fn tracker(&self) -> &PhaseTracker {
        &self.tracker
    }

    /// Get mutable access to the regulator handle
    pub fn regulator_mut(&mut self) -> &mut R {
        &mut self.regulator
    }

    /// Number of failed feedback reads
    pub fn feedback_faults(&self) -> u32 {
        self.feedback_faults
    }

    /// Samples dropped because the logging channel was full
    pub fn dropped(&self) -> u32 {
        self.outbox.dropped()
    }
}
