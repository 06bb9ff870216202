// File: src/timer.rs
// Purpose: Cancellable one-shot timer for hiding the success indicator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifies one scheduling of the success-hide timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Tracks the single pending success-hide timer.
///
/// Only the most recently scheduled token is live. Scheduling again or
/// cancelling retires the previous token, and a retired token firing later
/// is ignored.
#[derive(Debug, Clone)]
pub struct SuccessTimer {
    delay: Duration,
    next_id: u64,
    pending: Option<TimerToken>,
}

impl SuccessTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_id: 1,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pending(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Starts a new countdown. Returns the token the host must report back
    /// when the delay has elapsed.
    ///
    /// Call [`cancel`](Self::cancel) first to learn which token is retired.
    pub fn schedule(&mut self) -> TimerToken {
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.pending = Some(token);
        token
    }

    /// Retires the pending token, if any, and returns it
    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.pending.take()
    }

    /// Reports that `token`'s delay elapsed. True when it was the live one.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
