//! Non-blocking, drop-on-full channel sender
//!
//! Real-time producers must never stall on a slow consumer. A full channel
//! drops the message and bumps a counter; there is no retry and no extra
//! buffering beyond the channel depth.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Sender, TrySendError};

/// Result of offering a message to an [`Outbox`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// Message queued
    Sent,
    /// Channel full, message discarded
    Dropped,
}

/// Lossy sending half of a bounded channel
pub struct Outbox<'ch, M: RawMutex, T, const N: usize> {
    sender: Sender<'ch, M, T, N>,
    dropped: u32,
}

impl<'ch, M: RawMutex, T, const N: usize> Outbox<'ch, M, T, N> {
    /// Wrap the sending half of a channel
    pub fn new(sender: Sender<'ch, M, T, N>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Try to queue `value` without waiting
    pub fn offer(&mut self, value: T) -> Delivery {
        match self.sender.try_send(value) {
            Ok(()) => Delivery::Sent,
            Err(TrySendError::Full(_)) => {
                self.dropped = self.dropped.saturating_add(1);
                Delivery::Dropped
            }
        }
    }

    /// Number of messages dropped since creation
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
