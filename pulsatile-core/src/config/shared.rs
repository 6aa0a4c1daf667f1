//! Shared configuration accessor
//!
//! One writer (outside the control core) and several readers. Readers only
//! ever receive value copies, so a concurrent update can never tear a
//! setpoint pair a unit is in the middle of applying.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::{CalibrationBounds, ConfigError, SystemConfig};

/// Mutex-guarded live [`SystemConfig`]
pub struct SharedConfig<M: RawMutex> {
    inner: Mutex<M, Cell<SystemConfig>>,
}

impl<M: RawMutex> SharedConfig<M> {
    /// Create an accessor holding `config`
    ///
    /// The initial value is trusted; validate it first if it did not come
    /// from [`SystemConfig::DEFAULT`].
    pub const fn new(config: SystemConfig) -> Self {
        Self {
            inner: Mutex::const_new(M::INIT, Cell::new(config)),
        }
    }

    /// Take a value copy of the current configuration
    pub fn snapshot(&self) -> SystemConfig {
        self.inner.lock(|cell| cell.get())
    }

    /// Replace the configuration after validating it against `bounds`
    ///
    /// On error the previous configuration stays in effect.
    pub fn update(
        &self,
        config: SystemConfig,
        bounds: &CalibrationBounds,
    ) -> Result<(), ConfigError> {
        config.validate(bounds)?;
        self.inner.lock(|cell| cell.set(config));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_snapshot_is_a_copy() {
        let shared: SharedConfig<NoopRawMutex> = SharedConfig::new(SystemConfig::DEFAULT);
        let before = shared.snapshot();

        let faster = SystemConfig {
            systole_duration_ms: 200,
            diastole_duration_ms: 400,
            ..SystemConfig::DEFAULT
        };
        shared
            .update(faster, &CalibrationBounds::VPPE_0_2_BAR)
            .unwrap();

        assert_eq!(before, SystemConfig::DEFAULT);
        assert_eq!(shared.snapshot(), faster);
    }

    #[test]
    fn test_invalid_update_keeps_previous() {
        let shared: SharedConfig<NoopRawMutex> = SharedConfig::new(SystemConfig::DEFAULT);

        let unsafe_config = SystemConfig {
            systole_pressure_bar: 3.0,
            ..SystemConfig::DEFAULT
        };
        assert_eq!(
            shared.update(unsafe_config, &CalibrationBounds::VPPE_0_2_BAR),
            Err(ConfigError::PressureAboveCeiling)
        );
        assert_eq!(shared.snapshot(), SystemConfig::DEFAULT);
    }
}
