//! Virtual playback clock.
//!
//! The engine exposes no position readout, so the current position is
//! simulated: a base offset accumulates the estimated durations of
//! completed chunks, and wall-clock time since the active chunk started is
//! added on top, scaled by the speed multiplier. Every position read in the
//! crate goes through this one component.
//!
//! Uses the tokio clock so paused-time tests advance it deterministically.

use tokio::time::Instant;

/// Simulated continuous playback position.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    total_ms: u64,
    base_offset_ms: u64,
    /// Wall-clock start and estimated duration of the chunk currently being
    /// spoken; `None` between chunks, while seeking, and after completion.
    active_chunk: Option<(Instant, u64)>,
    speed: f32,
}

impl VirtualClock {
    /// Create a clock for a playback of `total_ms` estimated length.
    #[must_use]
    pub fn new(total_ms: u64, speed: f32) -> Self {
        Self {
            total_ms,
            base_offset_ms: 0,
            active_chunk: None,
            speed,
        }
    }

    /// Record that a chunk with estimated duration `est_ms` just started.
    pub fn begin_chunk(&mut self, est_ms: u64) {
        self.active_chunk = Some((Instant::now(), est_ms));
    }

    /// Record that the active chunk finished (or was skipped after an
    /// error): its full estimated duration is folded into the base offset
    /// so per-chunk rounding never accumulates.
    pub fn complete_chunk(&mut self, est_ms: u64) {
        self.base_offset_ms = (self.base_offset_ms + est_ms).min(self.total_ms);
        self.active_chunk = None;
    }

    /// Re-anchor the clock at `target_ms` (seek). No chunk is active until
    /// the next [`Self::begin_chunk`].
    pub fn anchor(&mut self, target_ms: u64) {
        self.base_offset_ms = target_ms.min(self.total_ms);
        self.active_chunk = None;
    }

    /// Current estimated position in milliseconds, clamped to
    /// `[0, total_ms]`. Progress within the active chunk is additionally
    /// capped at the chunk's own estimate so an engine stall cannot run the
    /// position past content that has not been spoken.
    #[must_use]
    pub fn position_ms(&self) -> u64 {
        let within_chunk = self.active_chunk.map_or(0, |(started_at, est_ms)| {
            let elapsed = started_at.elapsed().as_millis() as f64 * f64::from(self.speed);
            (elapsed as u64).min(est_ms)
        });
        (self.base_offset_ms + within_chunk).min(self.total_ms)
    }

    /// Change the speed multiplier without a jump in the position stream:
    /// the position is captured at the old rate, folded into the base
    /// offset, and the chunk timer restarts at the new rate.
    pub fn set_speed(&mut self, speed: f32) {
        if let Some((_, est_ms)) = self.active_chunk {
            let position = self.position_ms();
            let consumed = position - self.base_offset_ms;
            self.base_offset_ms = position;
            self.active_chunk = Some((Instant::now(), est_ms.saturating_sub(consumed)));
        }
        self.speed = speed;
    }

    /// Current speed multiplier.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Total estimated duration in milliseconds.
    #[must_use]
    pub const fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Whether a chunk is currently timed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.active_chunk.is_some()
    }
}
