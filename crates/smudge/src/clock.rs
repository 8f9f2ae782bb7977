//! Frame pacing.

use std::time::{Duration, Instant};

/// Deltas above this are clamped, so a stalled frame (debugger, window drag)
/// does not hand tick handlers a huge step.
pub const MAX_TICK_DELTA: Duration = Duration::from_millis(100);

/// Caps the frame rate by sleeping off whatever is left of the frame budget.
#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Option<Duration>,
    frame_start: Instant,
    last_delta: Duration,
}

impl FramePacer {
    /// Creates a pacer for `target_fps`. `0` disables pacing.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let budget = (target_fps > 0).then(|| Duration::from_secs(1) / target_fps);
        Self {
            budget,
            frame_start: Instant::now(),
            last_delta: Duration::ZERO,
        }
    }

    /// Per-frame budget, if paced.
    #[must_use]
    pub const fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Length of the previous frame, clamped to [`MAX_TICK_DELTA`].
    #[must_use]
    pub const fn last_delta(&self) -> Duration {
        self.last_delta
    }

    /// Time spent in the current frame so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.frame_start.elapsed()
    }

    /// Ends the current frame: sleeps until the budget is used up, then
    /// starts timing the next one.
    ///
    /// Returns the frame's full length, sleep included.
    pub fn end_frame(&mut self) -> Duration {
        if let Some(budget) = self.budget {
            let spent = self.frame_start.elapsed();
            if let Some(rest) = budget.checked_sub(spent) {
                std::thread::sleep(rest);
            } else {
                tracing::trace!(?spent, ?budget, "frame over budget");
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(self.frame_start);
        self.frame_start = now;
        self.last_delta = delta.min(MAX_TICK_DELTA);
        delta
    }
}
