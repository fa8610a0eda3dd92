use chrono::Duration;
use std::fmt;

/// Integer percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Progress(u8);

impl Progress {
    pub const ZERO: Progress = Progress(0);
    pub const COMPLETE: Progress = Progress(100);

    /// Builds a progress value, clamping anything above 100.
    #[must_use]
    pub fn clamped(value: u32) -> Self {
        // min(100) keeps the cast lossless.
        #[allow(clippy::cast_possible_truncation)]
        Self(value.min(100) as u8)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 == 100
    }

    #[must_use]
    pub fn saturating_add(self, delta: u32) -> Self {
        Self::clamped(u32::from(self.0).saturating_add(delta))
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Step size and cadence of a simulated progress track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRate {
    step: u8,
    interval_ms: i64,
}

impl TrackRate {
    /// Feature engineering: +5% every 150ms.
    pub const FEATURES: TrackRate = TrackRate {
        step: 5,
        interval_ms: 150,
    };
    /// Model inference: +10% every 250ms.
    pub const INFERENCE: TrackRate = TrackRate {
        step: 10,
        interval_ms: 250,
    };

    #[must_use]
    pub fn step(self) -> u8 {
        self.step
    }

    #[must_use]
    pub fn interval(self) -> Duration {
        Duration::milliseconds(self.interval_ms)
    }

    /// Virtual time a run needs to go from 0 to 100.
    #[must_use]
    pub fn full_run(self) -> Duration {
        let steps = 100_u32.div_ceil(u32::from(self.step));
        Duration::milliseconds(self.interval_ms * i64::from(steps))
    }
}

/// Lifecycle of one progress counter.
///
/// Running-ness is a state, not a flag: a track cannot be both idle and at
/// 40%, or completed and still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Track {
    #[default]
    Idle,
    Running {
        progress: Progress,
        /// Elapsed time, in microseconds, not yet converted into whole steps.
        carry_us: i64,
    },
    Completed,
}

impl Track {
    #[must_use]
    pub fn progress(&self) -> Progress {
        match self {
            Track::Idle => Progress::ZERO,
            Track::Running { progress, .. } => *progress,
            Track::Completed => Progress::COMPLETE,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Track::Running { .. })
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Track::Completed)
    }

    pub(crate) fn start(&mut self) {
        *self = Track::Running {
            progress: Progress::ZERO,
            carry_us: 0,
        };
    }

    /// Feeds elapsed time into a running track. Returns `true` on the tick
    /// that completes it.
    pub(crate) fn advance(&mut self, rate: TrackRate, elapsed: Duration) -> bool {
        let Track::Running { progress, carry_us } = *self else {
            return false;
        };

        let elapsed_us = elapsed.num_microseconds().unwrap_or(i64::MAX).max(0);
        let interval_us = rate.interval_ms.saturating_mul(1_000);
        let carry = carry_us.saturating_add(elapsed_us);
        let steps = carry / interval_us;
        let carry_us = carry % interval_us;
        let delta = u32::try_from(steps)
            .unwrap_or(u32::MAX)
            .saturating_mul(u32::from(rate.step));
        let progress = progress.saturating_add(delta);

        if progress.is_complete() {
            *self = Track::Completed;
            true
        } else {
            *self = Track::Running { progress, carry_us };
            false
        }
    }
}
