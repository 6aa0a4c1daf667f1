//! Peripheral status codes shared by every hardware seam

/// Failure reported by a peripheral or driver
///
/// Success is `Ok(())`; these are the non-success outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriphError {
    /// Generic HAL error from the underlying peripheral
    Hal,
    /// The operation timed out
    Timeout,
    /// The peripheral handle was missing or uninitialized
    NullHandle,
    /// The peripheral is not in a state that allows the operation
    InvalidState,
    /// The requested value is outside the allowed range
    ///
    /// Setpoint and reading validation only, never hardware faults.
    OutOfRange,
}
