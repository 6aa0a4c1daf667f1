//! Actuator task
//!
//! Waits for phase commands and drives the regulator and valves. The wait
//! is unbounded; the hardware holds its last (safe) configuration meanwhile.

use defmt::*;

use pulsatile_core::cycle::{ActuatorSequencer, Actuation};

use super::{RegulatorHandle, Valve};
use crate::channels::{COMMAND_CHANNEL, CONFIG};

/// Sequencer over the board's regulator and valves
pub type Sequencer = ActuatorSequencer<RegulatorHandle, Valve, Valve>;

/// Actuator task - applies each received command
#[embassy_executor::task]
pub async fn actuator_task(mut sequencer: Sequencer) {
    info!("Actuator task started");

    loop {
        let command = COMMAND_CHANNEL.receive().await;
        let config = CONFIG.snapshot();

        match sequencer.apply(command, &config) {
            Actuation::Systole => {
                debug!("Systole: {} bar", config.systole_pressure_bar);
            }
            Actuation::Diastole => {
                debug!("Diastole: {} bar", config.diastole_pressure_bar);
            }
            Actuation::SafeState(entry) => {
                error!(
                    "Safe state on {:?}: {:?}, valves {:?} (entry #{})",
                    command,
                    entry.cause,
                    entry.valves,
                    sequencer.safe_state_entries()
                );
            }
        }
    }
}
