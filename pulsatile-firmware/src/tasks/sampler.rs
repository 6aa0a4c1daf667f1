//! Sampler task
//!
//! Samples regulator feedback at a fixed rate. `Ticker` schedules on
//! absolute deadlines, so execution jitter does not accumulate as drift.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Instant, Ticker};
use rand::rngs::SmallRng;

use pulsatile_core::cycle::Delivery;
use pulsatile_core::telemetry::{Sampler, SyntheticWaveform};

use super::RegulatorHandle;
use crate::channels::SAMPLE_CHANNEL_SIZE;

/// Sampler over the shared regulator with a synthetic waveform
pub type FwSampler = Sampler<
    'static,
    CriticalSectionRawMutex,
    RegulatorHandle,
    SyntheticWaveform<SmallRng>,
    SAMPLE_CHANNEL_SIZE,
>;

/// Sampler task - one sample per period, forever
#[embassy_executor::task]
pub async fn sampler_task(mut sampler: FwSampler) {
    let period_ms = sampler.config().period_ms;
    info!("Sampler task started ({} ms period)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis() as u32;
        let report = sampler.tick(now_ms);

        if let Some(phase) = report.transition {
            debug!(
                "Observed {:?} at {} bar",
                phase, report.sample.regulator_bar
            );
        }

        if let Some(e) = report.feedback_fault {
            warn!("Regulator feedback read failed: {:?}", e);
        }

        if report.delivery == Delivery::Dropped {
            let dropped = sampler.dropped();
            // First drop, then every 100th
            if dropped == 1 || dropped % 100 == 0 {
                warn!("Sample channel full, {} samples dropped", dropped);
            }
        }
    }
}
