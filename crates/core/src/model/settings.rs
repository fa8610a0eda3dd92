use std::fmt;

use thiserror::Error;
use url::Url;

const GRAPH_SCHEMES: [&str; 4] = ["bolt", "bolt+s", "neo4j", "neo4j+s"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrainingFrequency {
    HourlyIncremental,
    DailyFull,
    WeeklyOffline,
}

impl TrainingFrequency {
    pub const ALL: [TrainingFrequency; 3] = [
        TrainingFrequency::HourlyIncremental,
        TrainingFrequency::DailyFull,
        TrainingFrequency::WeeklyOffline,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            TrainingFrequency::HourlyIncremental => "hourly",
            TrainingFrequency::DailyFull => "daily",
            TrainingFrequency::WeeklyOffline => "weekly",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TrainingFrequency::HourlyIncremental => "每小时实时增量",
            TrainingFrequency::DailyFull => "每日凌晨全量",
            TrainingFrequency::WeeklyOffline => "每周离线重训",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.key() == key)
    }
}

/// Validated system settings shown on the settings page.
#[derive(Clone, PartialEq)]
pub struct SystemSettings {
    graph_uri: String,
    username: String,
    password: String,
    node_threshold: u64,
    score_threshold: f64,
    training_frequency: TrainingFrequency,
}

/// Raw form values, as typed by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemSettingsDraft {
    pub graph_uri: String,
    pub username: String,
    pub password: String,
    pub node_threshold: String,
    pub score_threshold: f64,
    pub training_frequency: TrainingFrequency,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid graph database URI")]
    InvalidGraphUri,
    #[error("unsupported graph database scheme: {0}")]
    UnsupportedScheme(String),
    #[error("username is required")]
    MissingUsername,
    #[error("node threshold must be a positive integer")]
    InvalidNodeThreshold,
    #[error("score threshold {0} is outside [0, 1]")]
    ScoreThresholdOutOfRange(f64),
}

impl Default for SystemSettingsDraft {
    fn default() -> Self {
        Self {
            graph_uri: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: "admin123".to_string(),
            node_threshold: "5000000".to_string(),
            score_threshold: 0.75,
            training_frequency: TrainingFrequency::WeeklyOffline,
        }
    }
}

impl SystemSettingsDraft {
    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns the first `SettingsError` found, checking fields in form order.
    pub fn validate(&self) -> Result<SystemSettings, SettingsError> {
        let graph_uri =
            Url::parse(self.graph_uri.trim()).map_err(|_| SettingsError::InvalidGraphUri)?;
        if !GRAPH_SCHEMES.contains(&graph_uri.scheme()) {
            return Err(SettingsError::UnsupportedScheme(graph_uri.scheme().to_string()));
        }

        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(SettingsError::MissingUsername);
        }

        let node_threshold = self
            .node_threshold
            .trim()
            .replace(',', "")
            .parse::<u64>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or(SettingsError::InvalidNodeThreshold)?;

        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(SettingsError::ScoreThresholdOutOfRange(self.score_threshold));
        }

        Ok(SystemSettings {
            graph_uri: graph_uri.to_string(),
            username,
            password: self.password.clone(),
            node_threshold,
            score_threshold: self.score_threshold,
            training_frequency: self.training_frequency,
        })
    }
}

impl SystemSettings {
    #[must_use]
    pub fn graph_uri(&self) -> &str {
        &self.graph_uri
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub fn node_threshold(&self) -> u64 {
        self.node_threshold
    }

    #[must_use]
    pub fn score_threshold(&self) -> f64 {
        self.score_threshold
    }

    #[must_use]
    pub fn training_frequency(&self) -> TrainingFrequency {
        self.training_frequency
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            graph_uri: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: "admin123".to_string(),
            node_threshold: 5_000_000,
            score_threshold: 0.75,
            training_frequency: TrainingFrequency::WeeklyOffline,
        }
    }
}

impl fmt::Debug for SystemSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemSettings")
            .field("graph_uri", &self.graph_uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("node_threshold", &self.node_threshold)
            .field("score_threshold", &self.score_threshold)
            .field("training_frequency", &self.training_frequency)
            .finish()
    }
}
