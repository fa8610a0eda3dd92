use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use graphguard_core::Clock;
use graphguard_core::model::RiskAssessment;
use graphguard_core::wizard::{
    Assessor, StartOutcome, Tick, TickEvent, Transition, WizardError, WizardIntent, WizardSession,
};

use super::assessor::SimulatedAssessor;

/// Default period between UI pumps.
pub const DEFAULT_TICK_PERIOD: std::time::Duration = std::time::Duration::from_millis(50);

/// Drives one wizard session from a single tick source.
///
/// The runner turns clock readings into [`Tick`]s for the pure reducer in
/// `graphguard_core::wizard`. With a fixed clock, time only moves when a caller
/// advances it.
pub struct WizardRunner {
    clock: Clock,
    session: WizardSession,
    assessor: Box<dyn Assessor>,
    last_tick: DateTime<Utc>,
}

impl WizardRunner {
    #[must_use]
    pub fn new(clock: Clock, assessor: Box<dyn Assessor>) -> Self {
        Self {
            clock,
            session: WizardSession::new(),
            assessor,
            last_tick: clock.now(),
        }
    }

    /// Runner with a randomized assessor, for the live UI.
    #[must_use]
    pub fn simulated(clock: Clock) -> Self {
        Self::new(clock, Box::new(SimulatedAssessor::from_entropy()))
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.session = WizardSession::with_subject(subject);
        self
    }

    #[must_use]
    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Moves a fixed clock forward. The elapsed time is applied on the next
    /// [`WizardRunner::pump`].
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// Feeds the time elapsed since the previous pump into the session.
    pub fn pump(&mut self) -> Vec<TickEvent> {
        let at = self.clock.now();
        let elapsed = self.clock.since(self.last_tick);
        self.last_tick = at;

        if !self.session.has_pending_work() {
            return Vec::new();
        }

        let events = self
            .session
            .tick(Tick::new(at, elapsed), self.assessor.as_mut());
        for event in &events {
            match event {
                TickEvent::FeaturesCompleted => {
                    info!(subject = %self.session.subject_input().trim(), "feature engineering completed");
                }
                TickEvent::InferenceCompleted => {
                    if let Some(result) = self.session.result() {
                        info!(
                            subject = %result.subject(),
                            algorithm = %result.algorithm(),
                            confidence = %result.confidence(),
                            "inference completed"
                        );
                    }
                }
            }
        }
        events
    }

    /// Applies a user intent.
    ///
    /// Time that passed before the intent is credited to the tracks that were
    /// already running, so a run started here begins from a clean carry.
    ///
    /// # Errors
    ///
    /// Returns the `WizardError` raised by the session; the session is left
    /// unchanged in that case.
    pub fn dispatch(&mut self, intent: WizardIntent) -> Result<Transition, WizardError> {
        self.pump();

        let label = intent_label(&intent);
        match self.session.apply(intent) {
            Ok(transition) => {
                log_transition(label, &transition);
                Ok(transition)
            }
            Err(err) => {
                warn!(intent = label, error = %err, "wizard intent rejected");
                Err(err)
            }
        }
    }

    /// Pumps until both tracks settle or `limit` of virtual time has passed.
    /// Only meaningful with a fixed clock.
    pub fn run_until_idle(&mut self, step: Duration, limit: Duration) -> Vec<TickEvent> {
        let mut events = Vec::new();
        let mut waited = Duration::zero();
        while self.session.has_pending_work() && waited < limit {
            self.advance_clock(step);
            waited += step;
            events.extend(self.pump());
        }
        events
    }
}

fn intent_label(intent: &WizardIntent) -> &'static str {
    match intent {
        WizardIntent::SetSubject(_) => "set_subject",
        WizardIntent::StartFeatures => "start_features",
        WizardIntent::SelectAlgorithm(_) => "select_algorithm",
        WizardIntent::RunInference => "run_inference",
        WizardIntent::Advance => "advance",
        WizardIntent::Back => "back",
        WizardIntent::SubmitAndRestart => "submit_and_restart",
    }
}

fn log_transition(label: &'static str, transition: &Transition) {
    match transition {
        Transition::Updated | Transition::Unchanged => debug!(intent = label, "wizard updated"),
        Transition::Start(StartOutcome::Started) => info!(intent = label, "run started"),
        Transition::Start(outcome) => debug!(intent = label, ?outcome, "start ignored"),
        Transition::Moved { from, to } => info!(?from, ?to, "stage changed"),
        Transition::Archived(record) => log_archived(record),
    }
}

fn log_archived(record: &RiskAssessment) {
    match serde_json::to_string(record) {
        Ok(json) => info!(record = %json, "assessment archived"),
        Err(err) => warn!(error = %err, subject = %record.subject(), "assessment archived without record"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphguard_core::time::fixed_clock;
    use graphguard_core::wizard::Stage;

    fn runner() -> WizardRunner {
        WizardRunner::new(fixed_clock(), Box::new(SimulatedAssessor::seeded(3)))
    }

    #[test]
    fn idle_time_is_not_credited_to_a_new_run() {
        let mut runner = runner().with_subject("USER_001");
        runner.advance_clock(Duration::seconds(30));
        runner.dispatch(WizardIntent::StartFeatures).unwrap();

        runner.pump();
        assert_eq!(runner.session().feature_progress().value(), 0);

        runner.advance_clock(Duration::milliseconds(300));
        runner.pump();
        assert_eq!(runner.session().feature_progress().value(), 10);
    }

    #[test]
    fn sub_millisecond_pumps_are_not_dropped() {
        let mut runner = runner().with_subject("USER_001");
        runner.dispatch(WizardIntent::StartFeatures).unwrap();

        for _ in 0..300 {
            runner.advance_clock(Duration::microseconds(500));
            runner.pump();
        }
        assert_eq!(runner.session().feature_progress().value(), 5);
    }

    #[test]
    fn pump_without_work_is_a_no_op() {
        let mut runner = runner();
        runner.advance_clock(Duration::seconds(5));
        assert!(runner.pump().is_empty());
        assert_eq!(runner.session(), &WizardSession::new());
    }

    #[test]
    fn rejected_intents_leave_the_session_alone() {
        let mut runner = runner();
        let before = runner.session().clone();
        assert_eq!(
            runner.dispatch(WizardIntent::StartFeatures),
            Err(WizardError::EmptySubject)
        );
        assert_eq!(runner.session(), &before);
    }

    #[test]
    fn run_until_idle_settles_the_feature_track() {
        let mut runner = runner().with_subject("USER_001");
        runner.dispatch(WizardIntent::StartFeatures).unwrap();
        let events = runner.run_until_idle(Duration::milliseconds(50), Duration::seconds(10));
        assert_eq!(events, vec![TickEvent::FeaturesCompleted]);
        assert_eq!(runner.session().stage(), Stage::FeatureEngineering);
        assert!(runner.session().can_advance());
    }
}
