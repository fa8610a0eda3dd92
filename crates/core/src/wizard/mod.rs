//! Analysis wizard: a three-stage state machine whose simulated progress is
//! driven by a single external tick source.

mod phase;
mod progress;
mod session;

pub use phase::PipelinePhase;
pub use progress::{Progress, Track, TrackRate};
pub use session::{
    Assessor, Stage, StartOutcome, Tick, TickEvent, Transition, WizardError, WizardIntent,
    WizardSession,
};
