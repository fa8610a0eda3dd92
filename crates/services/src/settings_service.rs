use chrono::{DateTime, Utc};
use tracing::info;

use graphguard_core::Clock;
use graphguard_core::model::{SystemSettings, SystemSettingsDraft};

use crate::error::SettingsServiceError;

/// Shown after a successful save.
pub const SAVED_NOTICE: &str = "配置保存成功！部分核心变更需重启系统生效。";
/// Shown after the monitoring table is refreshed.
pub const REFRESHED_NOTICE: &str = "系统健康状态已刷新。";

#[derive(Debug, Clone, PartialEq)]
pub struct SavedSettings {
    pub settings: SystemSettings,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRow {
    pub name: &'static str,
    pub value: &'static str,
    pub safe_range: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringSnapshot {
    pub rows: Vec<MonitorRow>,
    pub refreshed_at: DateTime<Utc>,
}

/// Validates settings-page input. Nothing is persisted.
#[derive(Clone, Copy, Debug)]
pub struct SettingsService {
    clock: Clock,
}

impl SettingsService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Defaults the form starts from.
    #[must_use]
    pub fn defaults(&self) -> SystemSettingsDraft {
        SystemSettingsDraft::default()
    }

    /// Validate a draft.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError::Invalid` if any field fails validation.
    pub fn save(&self, draft: &SystemSettingsDraft) -> Result<SavedSettings, SettingsServiceError> {
        let settings = draft.validate()?;
        info!(?settings, "settings accepted");
        Ok(SavedSettings {
            settings,
            saved_at: self.clock.now(),
        })
    }

    #[must_use]
    pub fn refresh_status(&self) -> MonitoringSnapshot {
        MonitoringSnapshot {
            rows: monitor_rows(),
            refreshed_at: self.clock.now(),
        }
    }
}

fn monitor_rows() -> Vec<MonitorRow> {
    vec![
        MonitorRow {
            name: "CPU 负载",
            value: "32%",
            safe_range: "0-70%",
            status: "正常",
        },
        MonitorRow {
            name: "内存占用",
            value: "12.4 GB",
            safe_range: "0-32GB",
            status: "正常",
        },
        MonitorRow {
            name: "Neo4j 连接数",
            value: "45",
            safe_range: "0-200",
            status: "健康",
        },
        MonitorRow {
            name: "查询响应(ms)",
            value: "12ms",
            safe_range: "<50ms",
            status: "优秀",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphguard_core::model::SettingsError;
    use graphguard_core::time::{fixed_clock, fixed_now};

    #[test]
    fn save_stamps_clock_time() {
        let service = SettingsService::new(fixed_clock());
        let saved = service.save(&service.defaults()).unwrap();
        assert_eq!(saved.saved_at, fixed_now());
        assert_eq!(saved.settings.username(), "neo4j");
    }

    #[test]
    fn save_surfaces_validation_errors() {
        let service = SettingsService::new(fixed_clock());
        let draft = SystemSettingsDraft {
            graph_uri: "not a uri".to_string(),
            ..service.defaults()
        };
        let err = service.save(&draft).unwrap_err();
        assert!(matches!(
            err,
            SettingsServiceError::Invalid(SettingsError::InvalidGraphUri)
        ));
    }

    #[test]
    fn refresh_returns_all_rows() {
        let snapshot = SettingsService::new(fixed_clock()).refresh_status();
        assert_eq!(snapshot.rows.len(), 4);
        assert_eq!(snapshot.refreshed_at, fixed_now());
    }
}
