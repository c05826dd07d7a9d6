//! Index-derived animation delays for list content

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Delay schedule: item `n` waits `offset + n * step`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stagger {
    step_ms: u64,
    offset_ms: u64,
}

impl Stagger {
    pub const fn new(step_ms: u64) -> Self {
        Self { step_ms, offset_ms: 0 }
    }

    /// Shift every delay, e.g. for a category that starts later
    pub const fn with_offset(self, offset_ms: u64) -> Self {
        Self { offset_ms, ..self }
    }

    pub fn delay(&self, index: usize) -> Duration {
        let index = u64::try_from(index).unwrap_or(u64::MAX);
        let ms = self.step_ms.saturating_mul(index).saturating_add(self.offset_ms);
        Duration::from_millis(ms)
    }

    /// Delays for the first `len` items
    pub fn delays(&self, len: usize) -> Vec<Duration> {
        (0..len).map(|i| self.delay(i)).collect()
    }

    /// CSS time value for item `index` (`0s`, `0.2s`, ...)
    pub fn css(&self, index: usize) -> String {
        css_seconds(self.delay(index))
    }
}

/// Format a duration as CSS seconds without trailing zeros
pub fn css_seconds(delay: Duration) -> String {
    let ms = delay.as_millis();
    let whole = ms / 1000;
    let frac = ms % 1000;
    if frac == 0 {
        return format!("{}s", whole);
    }
    let frac = format!("{:03}", frac);
    format!("{}.{}s", whole, frac.trim_end_matches('0'))
}
