//! Aortic and pulmonary pressure sources
//!
//! Without physical sensors wired, a synthetic waveform stands in: a
//! quarter-sine rise through systole and a quarter-cosine decay through
//! diastole, plus a small random jitter.

use core::f32::consts::FRAC_PI_2;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::cycle::CardiacPhase;
use crate::traits::PressureSensor;

/// Aortic pressure at the end of diastole (mmHg)
pub const AORTIC_DIASTOLIC_MMHG: f32 = 80.0;

/// Aortic pressure at the peak of systole (mmHg)
pub const AORTIC_SYSTOLIC_MMHG: f32 = 120.0;

/// Pulmonary pressure at the end of diastole (mmHg)
pub const PULMONARY_DIASTOLIC_MMHG: f32 = 10.0;

/// Pulmonary pressure at the peak of systole (mmHg)
pub const PULMONARY_SYSTOLIC_MMHG: f32 = 25.0;

/// Aortic and pulmonary pressures for one sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hemodynamics {
    /// Aortic pressure (mmHg)
    pub aortic_mmhg: f32,
    /// Pulmonary pressure (mmHg)
    pub pulmonary_mmhg: f32,
}

/// Source of physiological pressures
pub trait HemodynamicSource {
    /// Produce pressures for the given phase and phase progress (0..=1)
    fn read(&mut self, phase: CardiacPhase, progress: f32) -> Hemodynamics;
}

/// Normalized pressure level (0 = diastolic, 1 = systolic)
///
/// Systole rises 0 -> 1 along sin(p * pi/2); diastole decays 1 -> 0 along
/// cos(p * pi/2). Progress outside [0, 1] is clamped.
pub fn envelope(phase: CardiacPhase, progress: f32) -> f32 {
    let angle = progress.clamp(0.0, 1.0) * FRAC_PI_2;
    match phase {
        CardiacPhase::Systole => libm::sinf(angle),
        CardiacPhase::Diastole => libm::cosf(angle),
    }
}

/// Map an envelope level onto both vessels, with a shared offset
pub fn hemodynamics_at(level: f32, jitter_mmhg: f32) -> Hemodynamics {
    Hemodynamics {
        aortic_mmhg: AORTIC_DIASTOLIC_MMHG
            + (AORTIC_SYSTOLIC_MMHG - AORTIC_DIASTOLIC_MMHG) * level
            + jitter_mmhg,
        pulmonary_mmhg: PULMONARY_DIASTOLIC_MMHG
            + (PULMONARY_SYSTOLIC_MMHG - PULMONARY_DIASTOLIC_MMHG) * level
            + jitter_mmhg,
    }
}

/// Synthetic waveform generator
pub struct SyntheticWaveform<G> {
    rng: G,
    jitter_mmhg: f32,
}

impl<G: RngCore> SyntheticWaveform<G> {
    /// Create a generator drawing jitter in `[-jitter_mmhg, jitter_mmhg]`
    pub fn new(rng: G, jitter_mmhg: f32) -> Self {
        Self { rng, jitter_mmhg }
    }

    fn jitter(&mut self) -> f32 {
        if self.jitter_mmhg > 0.0 {
            self.rng.gen_range(-self.jitter_mmhg..=self.jitter_mmhg)
        } else {
            0.0
        }
    }
}

impl SyntheticWaveform<SmallRng> {
    /// Create a generator with a small PRNG seeded from `seed`
    pub fn seeded(seed: u64, jitter_mmhg: f32) -> Self {
        Self::new(SmallRng::seed_from_u64(seed), jitter_mmhg)
    }
}

impl<G: RngCore> HemodynamicSource for SyntheticWaveform<G> {
    fn read(&mut self, phase: CardiacPhase, progress: f32) -> Hemodynamics {
        let jitter = self.jitter();
        hemodynamics_at(envelope(phase, progress), jitter)
    }
}

/// Physical aortic and pulmonary sensors
///
/// A failed read keeps that channel's last good value; telemetry gaps are
/// not safety relevant.
pub struct SensorPair<A, P> {
    aortic: A,
    pulmonary: P,
    last: Hemodynamics,
    read_failures: u32,
}

impl<A: PressureSensor, P: PressureSensor> SensorPair<A, P> {
    /// Wrap two sensors; values start at the diastolic baseline
    pub fn new(aortic: A, pulmonary: P) -> Self {
        Self {
            aortic,
            pulmonary,
            last: hemodynamics_at(0.0, 0.0),
            read_failures: 0,
        }
    }

    /// Number of individual sensor reads that failed
    pub fn read_failures(&self) -> u32 {
        self.read_failures
    }
}

impl<A: PressureSensor, P: PressureSensor> HemodynamicSource for SensorPair<A, P> {
    fn read(&mut self, _phase: CardiacPhase, _progress: f32) -> Hemodynamics {
        match self.aortic.read_mmhg() {
            Ok(v) => self.last.aortic_mmhg = v,
            Err(_) => self.read_failures = self.read_failures.saturating_add(1),
        }
        match self.pulmonary.read_mmhg() {
            Ok(v) => self.last.pulmonary_mmhg = v,
            Err(_) => self.read_failures = self.read_failures.saturating_add(1),
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PeriphError;
    use proptest::prelude::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_envelope_endpoints() {
        assert!(close(envelope(CardiacPhase::Systole, 0.0), 0.0));
        assert!(close(envelope(CardiacPhase::Systole, 1.0), 1.0));
        assert!(close(envelope(CardiacPhase::Diastole, 0.0), 1.0));
        assert!(close(envelope(CardiacPhase::Diastole, 1.0), 0.0));
    }

    #[test]
    fn test_envelope_clamps_progress() {
        assert!(close(envelope(CardiacPhase::Systole, 3.0), 1.0));
        assert!(close(envelope(CardiacPhase::Systole, -1.0), 0.0));
    }

    #[test]
    fn test_pressure_ranges() {
        let low = hemodynamics_at(0.0, 0.0);
        let high = hemodynamics_at(1.0, 0.0);
        assert!(close(low.aortic_mmhg, 80.0));
        assert!(close(high.aortic_mmhg, 120.0));
        assert!(close(low.pulmonary_mmhg, 10.0));
        assert!(close(high.pulmonary_mmhg, 25.0));
    }

    #[test]
    fn test_jitter_bounded() {
        let mut wave = SyntheticWaveform::seeded(42, 0.5);
        for _ in 0..1000 {
            let h = wave.read(CardiacPhase::Diastole, 1.0);
            assert!(h.aortic_mmhg >= 79.49 && h.aortic_mmhg <= 80.51);
            // Both vessels share the same offset
            assert!(close(h.aortic_mmhg - 80.0, h.pulmonary_mmhg - 10.0));
        }
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let mut wave = SyntheticWaveform::seeded(7, 0.0);
        assert_eq!(
            wave.read(CardiacPhase::Systole, 1.0),
            hemodynamics_at(1.0, 0.0)
        );
    }

    struct Flaky {
        value: f32,
        fail: bool,
    }

    impl PressureSensor for Flaky {
        fn read_mmhg(&mut self) -> Result<f32, PeriphError> {
            if self.fail {
                Err(PeriphError::Timeout)
            } else {
                Ok(self.value)
            }
        }
    }

    #[test]
    fn test_sensor_pair_holds_last_good_value() {
        let mut pair = SensorPair::new(
            Flaky {
                value: 95.0,
                fail: false,
            },
            Flaky {
                value: 18.0,
                fail: false,
            },
        );

        let first = pair.read(CardiacPhase::Systole, 0.5);
        assert_eq!(first.aortic_mmhg, 95.0);
        assert_eq!(first.pulmonary_mmhg, 18.0);

        pair.aortic.fail = true;
        pair.pulmonary.value = 20.0;
        let second = pair.read(CardiacPhase::Systole, 0.6);
        assert_eq!(second.aortic_mmhg, 95.0);
        assert_eq!(second.pulmonary_mmhg, 20.0);
        assert_eq!(pair.read_failures(), 1);
    }

    proptest! {
        #[test]
        fn prop_systole_rises_diastole_falls(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(envelope(CardiacPhase::Systole, lo) <= envelope(CardiacPhase::Systole, hi));
            prop_assert!(envelope(CardiacPhase::Diastole, lo) >= envelope(CardiacPhase::Diastole, hi));
        }
    }
}
