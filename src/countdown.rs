//! Remaining-time arithmetic for the countdown display.
//!
//! The countdown is recomputed from the wall clock on every tick; nothing is
//! accumulated between ticks, so a throttled background tab catches up on the
//! next tick instead of drifting.

use crate::trigger::CelebrationLatch;
use std::fmt;

pub const MS_PER_DAY: u64 = 86_400_000;
pub const MS_PER_HOUR: u64 = 3_600_000;
pub const MS_PER_MINUTE: u64 = 60_000;
pub const MS_PER_SECOND: u64 = 1_000;

/// Source of wall-clock time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Browser clock (`Date.now()`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// The instant the celebration starts. Fixed for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInstant(f64);

impl TargetInstant {
    pub const fn from_epoch_ms(ms: f64) -> Self {
        TargetInstant(ms)
    }

    pub fn epoch_ms(&self) -> f64 {
        self.0
    }

    /// Milliseconds left until the target; zero or negative once reached.
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        self.0 - now_ms
    }
}

/// Whole days/hours/minutes/seconds of a positive remaining duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownFields {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownFields {
    /// Decompose a remaining duration. Returns `None` when it is not positive.
    ///
    /// Fractional milliseconds are truncated, each stage working on the
    /// remainder of the previous one.
    pub fn from_remaining_ms(remaining: f64) -> Option<Self> {
        if remaining.is_nan() || remaining <= 0.0 {
            return None;
        }
        let ms = remaining as u64;
        Some(CountdownFields {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        })
    }

    pub fn days_text(&self) -> String {
        pad2(self.days)
    }

    pub fn hours_text(&self) -> String {
        pad2(self.hours)
    }

    pub fn minutes_text(&self) -> String {
        pad2(self.minutes)
    }

    pub fn seconds_text(&self) -> String {
        pad2(self.seconds)
    }
}

impl fmt::Display for CountdownFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Zero-pad to at least two digits; larger values keep all their digits.
fn pad2(value: u64) -> String {
    format!("{:02}", value)
}

/// Result of evaluating the countdown once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    Running(CountdownFields),
    Expired,
}

impl CountdownPhase {
    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownPhase::Expired)
    }
}

/// Countdown towards a fixed target, read from a [`Clock`].
#[derive(Debug, Clone)]
pub struct Countdown<C: Clock = SystemClock> {
    target: TargetInstant,
    clock: C,
}

impl<C: Clock> Countdown<C> {
    pub fn new(target: TargetInstant, clock: C) -> Self {
        Countdown { target, clock }
    }

    pub fn tick(&self) -> CountdownPhase {
        let remaining = self.target.remaining_ms(self.clock.now_ms());
        match CountdownFields::from_remaining_ms(remaining) {
            Some(fields) => CountdownPhase::Running(fields),
            None => CountdownPhase::Expired,
        }
    }

    /// Page-load evaluation: fires `latch` straight away when the target has
    /// already passed, without waiting for the first interval.
    pub fn check_startup(&self, latch: &mut CelebrationLatch, celebrate: impl FnOnce()) -> CountdownPhase {
        let phase = self.tick();
        if phase.is_expired() {
            latch.fire(celebrate);
        }
        phase
    }
}
