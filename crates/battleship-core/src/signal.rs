//! Single-slot turn notification.
//!
//! Each player owns one [`TurnSignal`]. Raising it never blocks: a raise
//! while a previous one is still pending simply coalesces into it. The
//! player's event stream waits on it without holding the game lock and
//! consumes the pending raise when it wakes.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct TurnSignal {
    pending: AtomicBool,
    notify: Notify,
}

impl TurnSignal {
    pub fn new() -> Self {
        TurnSignal::default()
    }

    /// Mark a refresh as pending and wake the waiter, if any.
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
        self.notify.notify_one();
    }

    /// `true` if a raise has not been consumed yet.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Wait until a raise is pending, then consume it.
    ///
    /// Returns immediately if one is already pending. Cancel-safe: dropping
    /// the future leaves any pending raise in place.
    pub async fn wait(&self) {
        loop {
            if self.pending.swap(false, Ordering::AcqRel) {
                return;
            }
            self.notify.notified().await;
        }
    }
}
