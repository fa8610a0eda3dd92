use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::model::{Algorithm, RiskAssessment, SubjectId};

use super::phase::PipelinePhase;
use super::progress::{Progress, Track, TrackRate};

/// Wizard stages, in the only order they can be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    #[default]
    FeatureEngineering,
    ModelInference,
    Visualization,
}

impl Stage {
    pub const ALL: [Stage; 3] = [
        Stage::FeatureEngineering,
        Stage::ModelInference,
        Stage::Visualization,
    ];

    /// One-based position shown in the step indicator.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Stage::FeatureEngineering => 1,
            Stage::ModelInference => 2,
            Stage::Visualization => 3,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Stage::FeatureEngineering => "特征工程",
            Stage::ModelInference => "模型研判",
            Stage::Visualization => "反欺诈识别",
        }
    }

    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            Stage::FeatureEngineering => "自动化预处理与维度构建",
            Stage::ModelInference => "深度算法预测与风险评分",
            Stage::Visualization => "关联图谱可视化呈现",
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::FeatureEngineering => Some(Stage::ModelInference),
            Stage::ModelInference => Some(Stage::Visualization),
            Stage::Visualization => None,
        }
    }

    #[must_use]
    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::FeatureEngineering => None,
            Stage::ModelInference => Some(Stage::FeatureEngineering),
            Stage::Visualization => Some(Stage::ModelInference),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum WizardError {
    #[error("subject id is required")]
    EmptySubject,
    #[error("subject id is locked once feature engineering has started")]
    SubjectLocked,
    #[error("an algorithm must be selected before running inference")]
    NoAlgorithm,
    #[error("algorithm cannot change while inference is running")]
    InferenceRunning,
    #[error("feature engineering has not completed")]
    FeaturesIncomplete,
    #[error("no inference result available")]
    ResultMissing,
    #[error("operation is not available in stage {0:?}")]
    WrongStage(Stage),
}

/// Produces the assessment when an inference run completes.
pub trait Assessor {
    fn assess(
        &mut self,
        subject: SubjectId,
        algorithm: Algorithm,
        at: DateTime<Utc>,
    ) -> RiskAssessment;
}

/// One delivery from the tick source: the current instant and the virtual
/// time elapsed since the previous delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl Tick {
    #[must_use]
    pub fn new(at: DateTime<Utc>, elapsed: Duration) -> Self {
        Self { at, elapsed }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    AlreadyComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    FeaturesCompleted,
    InferenceCompleted,
}

/// User intents forwarded by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardIntent {
    SetSubject(String),
    StartFeatures,
    SelectAlgorithm(Algorithm),
    RunInference,
    Advance,
    Back,
    SubmitAndRestart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Updated,
    Unchanged,
    Start(StartOutcome),
    Moved { from: Stage, to: Stage },
    Archived(Box<RiskAssessment>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InferenceJob {
    subject: SubjectId,
    algorithm: Algorithm,
}

/// State of one analysis wizard.
///
/// All mutation goes through the intent methods and [`WizardSession::tick`];
/// rejected intents leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardSession {
    stage: Stage,
    subject: String,
    features: Track,
    inference: Track,
    algorithm: Option<Algorithm>,
    job: Option<InferenceJob>,
    result: Option<RiskAssessment>,
}

impl WizardSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with the subject field prefilled.
    #[must_use]
    pub fn with_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Raw subject input, as typed.
    #[must_use]
    pub fn subject_input(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn subject(&self) -> Option<SubjectId> {
        SubjectId::parse(&self.subject).ok()
    }

    #[must_use]
    pub fn features(&self) -> Track {
        self.features
    }

    #[must_use]
    pub fn inference(&self) -> Track {
        self.inference
    }

    #[must_use]
    pub fn feature_progress(&self) -> Progress {
        self.features.progress()
    }

    #[must_use]
    pub fn model_progress(&self) -> Progress {
        self.inference.progress()
    }

    #[must_use]
    pub fn is_processing_features(&self) -> bool {
        self.features.is_running()
    }

    #[must_use]
    pub fn is_model_running(&self) -> bool {
        self.inference.is_running()
    }

    #[must_use]
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    #[must_use]
    pub fn result(&self) -> Option<&RiskAssessment> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn current_phase(&self) -> Option<PipelinePhase> {
        PipelinePhase::for_progress(self.feature_progress())
    }

    #[must_use]
    pub fn subject_editable(&self) -> bool {
        matches!(self.features, Track::Idle)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.stage {
            Stage::FeatureEngineering => self.features.is_completed(),
            Stage::ModelInference => self.result.is_some(),
            Stage::Visualization => false,
        }
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.stage.previous().is_some()
    }

    /// Any track still waiting for ticks.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.features.is_running() || self.inference.is_running()
    }

    /// # Errors
    ///
    /// Returns `WizardError::SubjectLocked` once feature engineering has started.
    pub fn set_subject(&mut self, raw: impl Into<String>) -> Result<(), WizardError> {
        if !self.subject_editable() {
            return Err(WizardError::SubjectLocked);
        }
        self.subject = raw.into();
        Ok(())
    }

    /// Starts the feature-engineering run. Repeated calls while running or
    /// after completion are no-ops.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::WrongStage` outside the first stage and
    /// `WizardError::EmptySubject` when the subject is blank.
    pub fn start_features(&mut self) -> Result<StartOutcome, WizardError> {
        if self.stage != Stage::FeatureEngineering {
            return Err(WizardError::WrongStage(self.stage));
        }
        if self.subject().is_none() {
            return Err(WizardError::EmptySubject);
        }
        match self.features {
            Track::Completed => Ok(StartOutcome::AlreadyComplete),
            Track::Running { .. } => Ok(StartOutcome::AlreadyRunning),
            Track::Idle => {
                self.features.start();
                Ok(StartOutcome::Started)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `WizardError::InferenceRunning` while a run is in flight.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) -> Result<(), WizardError> {
        if self.inference.is_running() {
            return Err(WizardError::InferenceRunning);
        }
        self.algorithm = Some(algorithm);
        Ok(())
    }

    /// Starts an inference run, discarding any previous result.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::WrongStage` outside the inference stage,
    /// `WizardError::NoAlgorithm` when nothing is selected and
    /// `WizardError::EmptySubject` when the subject is blank.
    pub fn run_inference(&mut self) -> Result<StartOutcome, WizardError> {
        if self.stage != Stage::ModelInference {
            return Err(WizardError::WrongStage(self.stage));
        }
        let algorithm = self.algorithm.ok_or(WizardError::NoAlgorithm)?;
        let subject = self.subject().ok_or(WizardError::EmptySubject)?;
        if self.inference.is_running() {
            return Ok(StartOutcome::AlreadyRunning);
        }

        self.result = None;
        self.job = Some(InferenceJob { subject, algorithm });
        self.inference.start();
        Ok(StartOutcome::Started)
    }

    /// # Errors
    ///
    /// Returns `WizardError::FeaturesIncomplete` or `WizardError::ResultMissing`
    /// when the current stage's guard does not hold, and
    /// `WizardError::WrongStage` from the last stage.
    pub fn advance(&mut self) -> Result<Stage, WizardError> {
        let next = self
            .stage
            .next()
            .ok_or(WizardError::WrongStage(self.stage))?;
        match self.stage {
            Stage::FeatureEngineering if !self.features.is_completed() => {
                return Err(WizardError::FeaturesIncomplete);
            }
            Stage::ModelInference if self.result.is_none() => {
                return Err(WizardError::ResultMissing);
            }
            _ => {}
        }
        self.stage = next;
        Ok(next)
    }

    /// Steps back one stage. Returns `None` from the first stage.
    pub fn back(&mut self) -> Option<Stage> {
        let previous = self.stage.previous()?;
        self.stage = previous;
        Some(previous)
    }

    /// Archives the current result and resets the session to its defaults.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::WrongStage` before the visualization stage and
    /// `WizardError::ResultMissing` if there is nothing to archive.
    pub fn submit_and_restart(&mut self) -> Result<RiskAssessment, WizardError> {
        if self.stage != Stage::Visualization {
            return Err(WizardError::WrongStage(self.stage));
        }
        let archived = self.result.take().ok_or(WizardError::ResultMissing)?;
        *self = Self::default();
        Ok(archived)
    }

    /// Feeds one tick into both tracks.
    pub fn tick(&mut self, tick: Tick, assessor: &mut dyn Assessor) -> Vec<TickEvent> {
        let mut events = Vec::new();
        if self.features.advance(TrackRate::FEATURES, tick.elapsed) {
            events.push(TickEvent::FeaturesCompleted);
        }
        if self.inference.advance(TrackRate::INFERENCE, tick.elapsed) {
            if let Some(job) = self.job.take() {
                self.result = Some(assessor.assess(job.subject, job.algorithm, tick.at));
            }
            events.push(TickEvent::InferenceCompleted);
        }
        events
    }

    /// Single entry point for the rendering layer.
    ///
    /// # Errors
    ///
    /// Propagates the `WizardError` of the underlying operation.
    pub fn apply(&mut self, intent: WizardIntent) -> Result<Transition, WizardError> {
        match intent {
            WizardIntent::SetSubject(raw) => {
                self.set_subject(raw)?;
                Ok(Transition::Updated)
            }
            WizardIntent::StartFeatures => self.start_features().map(Transition::Start),
            WizardIntent::SelectAlgorithm(algorithm) => {
                self.select_algorithm(algorithm)?;
                Ok(Transition::Updated)
            }
            WizardIntent::RunInference => self.run_inference().map(Transition::Start),
            WizardIntent::Advance => {
                let from = self.stage;
                let to = self.advance()?;
                Ok(Transition::Moved { from, to })
            }
            WizardIntent::Back => {
                let from = self.stage;
                Ok(self
                    .back()
                    .map_or(Transition::Unchanged, |to| Transition::Moved { from, to }))
            }
            WizardIntent::SubmitAndRestart => self
                .submit_and_restart()
                .map(|archived| Transition::Archived(Box::new(archived))),
        }
    }
}
