//! Resend-code cooldown gate.
//!
//! A resend is allowed only when no request is in flight and the cooldown
//! started by the last successful resend has elapsed. Times are milliseconds
//! from an injected clock (`js_sys::Date::now` in the browser).

#[cfg(test)]
#[path = "cooldown_test.rs"]
mod cooldown_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResendGate {
    cooldown_ms: u64,
    ready_at_ms: Option<u64>,
    in_flight: bool,
}

impl ResendGate {
    #[must_use]
    pub fn new(cooldown_secs: u64) -> Self {
        Self { cooldown_ms: cooldown_secs.saturating_mul(1000), ready_at_ms: None, in_flight: false }
    }

    /// Claim the gate. `false` means the request must be dropped.
    pub fn try_begin(&mut self, now_ms: u64) -> bool {
        if self.in_flight || self.remaining_secs(now_ms) > 0 {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Release the gate; a successful send starts the cooldown.
    pub fn finish(&mut self, now_ms: u64, sent: bool) {
        self.in_flight = false;
        if sent {
            self.ready_at_ms = Some(now_ms.saturating_add(self.cooldown_ms));
        }
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whole seconds left on the countdown, rounded up.
    #[must_use]
    pub fn remaining_secs(&self, now_ms: u64) -> u64 {
        self.ready_at_ms
            .map_or(0, |ready| ready.saturating_sub(now_ms).div_ceil(1000))
    }
}
