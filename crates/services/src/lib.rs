#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard;
pub mod error;
pub mod settings_service;
pub mod wizard;

pub use graphguard_core::Clock;

pub use app_services::AppServices;
pub use error::{DashboardError, SettingsServiceError};
pub use dashboard::{
    Capability, GraphScene, MetricCard, Trend, capabilities, knowledge_scene, metric_cards,
    subject_scene,
};
pub use settings_service::{
    MonitorRow, MonitoringSnapshot, REFRESHED_NOTICE, SAVED_NOTICE, SavedSettings,
    SettingsService,
};
pub use wizard::{DEFAULT_TICK_PERIOD, SimulatedAssessor, WizardRunner};
