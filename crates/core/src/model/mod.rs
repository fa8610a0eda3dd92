mod algorithm;
mod assessment;
mod ids;
mod settings;

pub use algorithm::{Algorithm, UnknownAlgorithm};
pub use assessment::{AssessmentError, Confidence, RiskAssessment, RiskLevel};
pub use ids::{SubjectId, SubjectIdError};
pub use settings::{SettingsError, SystemSettings, SystemSettingsDraft, TrainingFrequency};
