mod assessor;
mod runner;

pub use assessor::SimulatedAssessor;
pub use runner::{DEFAULT_TICK_PERIOD, WizardRunner};
