//! Telemetry logger task
//!
//! Drains the sample channel. Every sample goes out at trace level; once
//! per second a summary of the window goes out at info level.

use defmt::*;

use pulsatile_core::telemetry::SensorSample;

use crate::channels::SAMPLE_CHANNEL;

/// Summary window length
const SUMMARY_INTERVAL_MS: u32 = 1000;

/// Min/max tracker over one summary window
struct Window {
    start_ms: u32,
    count: u32,
    aortic_min: f32,
    aortic_max: f32,
    pulmonary_min: f32,
    pulmonary_max: f32,
    regulator_max: f32,
}

impl Window {
    fn new(start_ms: u32) -> Self {
        Self {
            start_ms,
            count: 0,
            aortic_min: f32::MAX,
            aortic_max: f32::MIN,
            pulmonary_min: f32::MAX,
            pulmonary_max: f32::MIN,
            regulator_max: 0.0,
        }
    }

    fn add(&mut self, sample: &SensorSample) {
        self.count += 1;
        self.aortic_min = self.aortic_min.min(sample.aortic_mmhg);
        self.aortic_max = self.aortic_max.max(sample.aortic_mmhg);
        self.pulmonary_min = self.pulmonary_min.min(sample.pulmonary_mmhg);
        self.pulmonary_max = self.pulmonary_max.max(sample.pulmonary_mmhg);
        self.regulator_max = self.regulator_max.max(sample.regulator_bar);
    }

    fn is_complete(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.start_ms) >= SUMMARY_INTERVAL_MS
    }
}

/// Logger task - external consumer of the telemetry stream
#[embassy_executor::task]
pub async fn logger_task() {
    info!("Logger task started");

    let mut window: Option<Window> = None;

    loop {
        let sample = SAMPLE_CHANNEL.receive().await;
        trace!("{:?}", sample);

        let current = window.get_or_insert_with(|| Window::new(sample.timestamp_ms));
        current.add(&sample);

        if current.is_complete(sample.timestamp_ms) {
            info!(
                "{} samples: aortic {}-{} mmHg, pulmonary {}-{} mmHg, regulator peak {} bar",
                current.count,
                current.aortic_min,
                current.aortic_max,
                current.pulmonary_min,
                current.pulmonary_max,
                current.regulator_max
            );
            window = None;
        }
    }
}
