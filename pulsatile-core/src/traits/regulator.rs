//! Pressure regulator trait
//!
//! The regulator is an analog proportional valve: it is commanded with a
//! target pressure and reports the pressure it actually achieves.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::PeriphError;

/// Trait for closed-loop pressure regulators
pub trait PressureRegulator {
    /// Command a new target pressure in bar
    ///
    /// Implementations must report every hardware failure on this path;
    /// the actuator sequencer relies on it to enter the safe state.
    fn set_target_pressure(&mut self, bar: f32) -> Result<(), PeriphError>;

    /// Read the pressure currently measured by the regulator, in bar
    ///
    /// Never negative when `Ok`. Takes `&mut self` because the feedback
    /// read goes through an ADC.
    fn actual_pressure(&mut self) -> Result<f32, PeriphError>;
}

impl<T: PressureRegulator + ?Sized> PressureRegulator for &mut T {
    fn set_target_pressure(&mut self, bar: f32) -> Result<(), PeriphError> {
        (**self).set_target_pressure(bar)
    }

    fn actual_pressure(&mut self) -> Result<f32, PeriphError> {
        (**self).actual_pressure()
    }
}

/// Regulator handle shared between execution units
///
/// The actuator sequencer writes setpoints and the sampler reads feedback
/// from the same physical regulator. Each call holds the mutex only for the
/// duration of that single call.
pub struct SharedRegulator<'a, M: RawMutex, R> {
    inner: &'a Mutex<M, RefCell<R>>,
}

impl<'a, M: RawMutex, R> SharedRegulator<'a, M, R> {
    /// Wrap a mutex-guarded regulator
    pub const fn new(inner: &'a Mutex<M, RefCell<R>>) -> Self {
        Self { inner }
    }
}

impl<M: RawMutex, R> Clone for SharedRegulator<'_, M, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, R> Copy for SharedRegulator<'_, M, R> {}

impl<M: RawMutex, R: PressureRegulator> PressureRegulator for SharedRegulator<'_, M, R> {
    fn set_target_pressure(&mut self, bar: f32) -> Result<(), PeriphError> {
        self.inner
            .lock(|cell| cell.borrow_mut().set_target_pressure(bar))
    }

    fn actual_pressure(&mut self) -> Result<f32, PeriphError> {
        self.inner.lock(|cell| cell.borrow_mut().actual_pressure())
    }
}
