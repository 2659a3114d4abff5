//! Interactive redraw timer
//!
//! The timer only runs while the face is visible and interactive. Each tick
//! is scheduled against the wall clock so that ticks land on multiples of
//! the update period instead of drifting by the handler's own latency.

use fugit::MillisDurationU64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTimer {
    period_ms: u64,
}

impl FrameTimer {
    /// `period_ms` must be non-zero; `FaceConfig::validate` guarantees it.
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms as u64,
        }
    }

    /// Whether ticks should be scheduled at all.
    pub const fn should_run(visible: bool, ambient: bool) -> bool {
        visible && !ambient
    }

    /// Time from `now_ms` to the next period boundary.
    ///
    /// Always in `(0, period]`: a tick landing exactly on a boundary waits a
    /// full period instead of firing again at once.
    pub fn delay_until_next(&self, now_ms: u64) -> MillisDurationU64 {
        let p = self.period_ms.max(1);
        MillisDurationU64::from_ticks(p - now_ms % p)
    }
}
