use std::time::Duration;

use graphguard_core::Clock;

use crate::settings_service::SettingsService;
use crate::wizard::{DEFAULT_TICK_PERIOD, SimulatedAssessor, WizardRunner};

/// Assembles app-facing services.
#[derive(Clone, Debug)]
pub struct AppServices {
    clock: Clock,
    settings: SettingsService,
    default_subject: Option<String>,
    assessor_seed: Option<u64>,
    tick_period: Duration,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            settings: SettingsService::new(clock),
            default_subject: None,
            assessor_seed: None,
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }

    /// Prefill the subject field of every new wizard.
    #[must_use]
    pub fn with_default_subject(mut self, subject: Option<String>) -> Self {
        self.default_subject = subject.filter(|value| !value.trim().is_empty());
        self
    }

    /// Make simulated confidences reproducible.
    #[must_use]
    pub fn with_assessor_seed(mut self, seed: Option<u64>) -> Self {
        self.assessor_seed = seed;
        self
    }

    /// How often a mounted wizard view pumps its runner.
    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    #[must_use]
    pub fn settings(&self) -> SettingsService {
        self.settings
    }

    #[must_use]
    pub fn default_subject(&self) -> Option<&str> {
        self.default_subject.as_deref()
    }

    /// Fresh wizard for one mounted analysis view.
    #[must_use]
    pub fn new_wizard(&self) -> WizardRunner {
        let runner = match self.assessor_seed {
            Some(seed) => WizardRunner::new(self.clock, Box::new(SimulatedAssessor::seeded(seed))),
            None => WizardRunner::simulated(self.clock),
        };
        match &self.default_subject {
            Some(subject) => runner.with_subject(subject.clone()),
            None => runner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphguard_core::time::fixed_clock;

    #[test]
    fn blank_default_subject_is_ignored() {
        let services = AppServices::new(fixed_clock()).with_default_subject(Some("  ".into()));
        assert_eq!(services.default_subject(), None);
        assert_eq!(services.new_wizard().session().subject_input(), "");
    }

    #[test]
    fn wizards_start_with_the_default_subject() {
        let services =
            AppServices::new(fixed_clock()).with_default_subject(Some("USER_001".into()));
        assert_eq!(services.new_wizard().session().subject_input(), "USER_001");
    }

    #[test]
    fn tick_period_defaults_to_runner_default() {
        let services = AppServices::new(fixed_clock());
        assert_eq!(services.tick_period(), DEFAULT_TICK_PERIOD);
        let services = services.with_tick_period(Duration::from_millis(200));
        assert_eq!(services.tick_period(), Duration::from_millis(200));
    }
}
