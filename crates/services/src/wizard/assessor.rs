use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use graphguard_core::model::{Algorithm, Confidence, RiskAssessment, SubjectId};
use graphguard_core::wizard::Assessor;

/// Stand-in for model inference: always reports a medium risk with a
/// confidence drawn uniformly from `[85.0%, 95.0%)`.
pub struct SimulatedAssessor<R = StdRng> {
    rng: R,
}

impl SimulatedAssessor<StdRng> {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible assessor for tests and demos.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> SimulatedAssessor<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Assessor for SimulatedAssessor<R> {
    fn assess(
        &mut self,
        subject: SubjectId,
        algorithm: Algorithm,
        at: DateTime<Utc>,
    ) -> RiskAssessment {
        let tenths = self
            .rng
            .random_range(Confidence::MIN_TENTHS..Confidence::MAX_TENTHS);
        RiskAssessment::simulated(subject, algorithm, Confidence::saturating(tenths), at)
    }
}
