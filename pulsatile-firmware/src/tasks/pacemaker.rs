//! Pacemaker task
//!
//! Emits alternating phase commands and sleeps for each phase duration.

use defmt::*;
use embassy_time::Timer;

use pulsatile_core::cycle::{Delivery, Pacemaker};

use crate::channels::{COMMAND_CHANNEL, CONFIG};

/// Pacemaker task - open-loop rhythm source
#[embassy_executor::task]
pub async fn pacemaker_task() {
    info!("Pacemaker task started");

    let mut pacemaker = Pacemaker::new(COMMAND_CHANNEL.sender());

    loop {
        let beat = pacemaker.beat(&CONFIG.snapshot());

        match beat.delivery {
            Delivery::Sent => trace!("{:?}, hold {} ms", beat.command, beat.hold_ms),
            Delivery::Dropped => warn!(
                "Command channel full, dropped {:?} ({} total)",
                beat.command,
                pacemaker.dropped()
            ),
        }

        Timer::after_millis(beat.hold_ms as u64).await;
    }
}
