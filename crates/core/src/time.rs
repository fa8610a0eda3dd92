use chrono::{DateTime, Duration, Utc};

/// Time source for the wizard runner and the simulated assessor.
///
/// `Fixed` doubles as a virtual clock: tests move it forward with
/// [`Clock::advance`] and the runner observes the elapsed time on its next pump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that follows the wall clock.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a virtual clock starting at the given instant.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Moves a virtual clock forward. Has no effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Time elapsed since `earlier`, floored at zero so a clock that steps
    /// backwards never rewinds progress.
    #[must_use]
    pub fn since(&self, earlier: DateTime<Utc>) -> Duration {
        let delta = self.now() - earlier;
        if delta < Duration::zero() {
            Duration::zero()
        } else {
            delta
        }
    }

    #[must_use]
    pub fn is_virtual(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a virtual `Clock` at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_clock_advances_and_reports_elapsed() {
        let start = fixed_now();
        let mut clock = Clock::fixed(start);
        clock.advance(Duration::milliseconds(400));
        assert_eq!(clock.since(start), Duration::milliseconds(400));
        assert!(clock.is_virtual());
    }

    #[test]
    fn since_never_goes_negative() {
        let clock = fixed_clock();
        let later = fixed_now() + Duration::seconds(5);
        assert_eq!(clock.since(later), Duration::zero());
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::system();
        clock.advance(Duration::days(365));
        assert!(!clock.is_virtual());
        assert!(clock.now() < Utc::now() + Duration::days(1));
    }
}
