//! Board definition
//!
//! Pin map and analog front-end constants for the RP2040 controller board.
//!
//! | Function            | GPIO | Peripheral        |
//! |---------------------|------|-------------------|
//! | Regulator setpoint  | 0    | PWM slice 0, A    |
//! | Systole valve       | 14   | GPIO output       |
//! | Diastole valve      | 15   | GPIO output       |
//! | Regulator feedback  | 26   | ADC0              |

use pulsatile_core::config::CalibrationBounds;

/// Regulator fitted to this board
pub const REGULATOR_BOUNDS: CalibrationBounds = CalibrationBounds::VPPE_0_2_BAR;

/// PWM counter top for the setpoint DAC (125 MHz / 4096 = 30.5 kHz carrier)
pub const PWM_TOP: u16 = 4095;

/// Setpoint voltage at 100% duty after the RC filter and x3.03 amplifier
pub const DAC_FULL_SCALE_VOLTS: f32 = 10.0;

/// ADC reference voltage
pub const ADC_VREF: f32 = 3.3;

/// 12-bit ADC
pub const ADC_COUNTS: f32 = 4096.0;

/// Feedback divider (22k over 10k), 10 V in -> 3.125 V at the pin
pub const FEEDBACK_DIVIDER: f32 = 3.2;

/// Feedback volts per ADC count, at the regulator connector
pub const FEEDBACK_VOLTS_PER_COUNT: f32 = ADC_VREF / ADC_COUNTS * FEEDBACK_DIVIDER;

/// Valve drivers energize on a high output
pub const VALVE_ACTIVE_LOW: bool = false;

/// Seed for the synthetic waveform jitter
pub const WAVEFORM_SEED: u64 = 0x5EED_CAFE;
