//! Pulsatile - Mock Circulatory Loop Firmware
//!
//! Main firmware binary for RP2040-based pulsatile pressure generators.
//! Drives a proportional pressure regulator and two solenoid valves
//! through an alternating systole/diastole cycle while sampling the
//! regulator feedback into a telemetry stream.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pulsatile_core::config::SamplerConfig;
use pulsatile_core::cycle::{ActuatorSequencer, Actuation};
use pulsatile_core::telemetry::{Sampler, SyntheticWaveform};
use pulsatile_core::traits::SharedRegulator;
use pulsatile_drivers::regulator::RegulatorDriver;
use pulsatile_drivers::valve::GpioSolenoid;

use crate::analog::{AdcInput, PwmDac};
use crate::tasks::{RegulatorCell, Valve};

mod analog;
mod board;
mod channels;
mod tasks;

// Shared regulator (must live forever for task references)
static REGULATOR: StaticCell<RegulatorCell> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pulsatile firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let bounds = board::REGULATOR_BOUNDS;
    if let Err(e) = channels::CONFIG.snapshot().validate(&bounds) {
        error!("Default configuration outside regulator range: {:?}", e);
    }

    // Refuse to start with pins untouched; a zero period would spin the ticker
    let sampler_config = SamplerConfig::DEFAULT;
    if let Err(e) = sampler_config.validate() {
        error!("Sampler configuration invalid: {:?}", e);
        return;
    }

    // Regulator: PWM setpoint on GPIO0, feedback on ADC0 (GPIO26)
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, PwmConfig::default());
    let dac = PwmDac::new(pwm, board::PWM_TOP, board::DAC_FULL_SCALE_VOLTS);
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let feedback = Channel::new_pin(p.PIN_26, Pull::None);
    let feedback = AdcInput::new(adc, feedback, board::FEEDBACK_VOLTS_PER_COUNT);

    let driver = RegulatorDriver::new(dac, feedback, bounds);
    if let Err(e) = driver.last_write_status() {
        error!("Regulator zero setpoint failed: {:?}", e);
    }
    let regulator = REGULATOR.init(Mutex::new(RefCell::new(driver)));
    info!("Regulator initialized (ceiling {} bar)", bounds.safe_max_pressure_bar);

    // Valves start de-energized
    let inactive = if board::VALVE_ACTIVE_LOW {
        Level::High
    } else {
        Level::Low
    };
    let systole_valve: Valve =
        GpioSolenoid::new(Output::new(p.PIN_14, inactive), board::VALVE_ACTIVE_LOW).unwrap();
    let diastole_valve: Valve =
        GpioSolenoid::new(Output::new(p.PIN_15, inactive), board::VALVE_ACTIVE_LOW).unwrap();

    let mut sequencer = ActuatorSequencer::new(
        SharedRegulator::new(regulator),
        systole_valve,
        diastole_valve,
    );

    // Vent before the first command arrives
    if let Actuation::SafeState(entry) = sequencer.safe_state() {
        match entry.valves {
            Ok(()) => info!("Boot safe state: pressure closed, exhaust open"),
            Err(e) => error!("Boot safe state incomplete: {:?}", e),
        }
    }

    let sampler = Sampler::new(
        SharedRegulator::new(regulator),
        SyntheticWaveform::seeded(board::WAVEFORM_SEED, sampler_config.jitter_mmhg),
        sampler_config,
        channels::SAMPLE_CHANNEL.sender(),
    );

    // Consumers first, so the first command and sample find a listener
    spawner.spawn(tasks::logger_task()).unwrap();
    spawner.spawn(tasks::sampler_task(sampler)).unwrap();
    spawner.spawn(tasks::actuator_task(sequencer)).unwrap();
    spawner.spawn(tasks::pacemaker_task()).unwrap();

    info!("All tasks spawned, firmware running");
}
