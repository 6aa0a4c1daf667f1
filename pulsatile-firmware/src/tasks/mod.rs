//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod actuator;
pub mod logger;
pub mod pacemaker;
pub mod sampler;

pub use actuator::{actuator_task, Sequencer};
pub use logger::logger_task;
pub use pacemaker::pacemaker_task;
pub use sampler::{sampler_task, FwSampler};

use core::cell::RefCell;

use embassy_rp::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use pulsatile_core::traits::SharedRegulator;
use pulsatile_drivers::regulator::RegulatorDriver;
use pulsatile_drivers::valve::GpioSolenoid;

use crate::analog::{AdcInput, PwmDac};

/// Regulator driver on the board's analog front-end
pub type Regulator = RegulatorDriver<PwmDac, AdcInput>;

/// Regulator shared by the actuator and sampler tasks
pub type RegulatorCell = Mutex<CriticalSectionRawMutex, RefCell<Regulator>>;

/// Handle to the shared regulator
pub type RegulatorHandle = SharedRegulator<'static, CriticalSectionRawMutex, Regulator>;

/// Solenoid valve on a GPIO output
pub type Valve = GpioSolenoid<Output<'static>>;
