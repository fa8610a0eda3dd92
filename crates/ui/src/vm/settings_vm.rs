use graphguard_core::model::{SystemSettingsDraft, TrainingFrequency};
use services::{
    MonitoringSnapshot, REFRESHED_NOTICE, SAVED_NOTICE, SettingsService, SettingsServiceError,
};

use crate::views::ViewError;

use super::notice::Notice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    GraphUri,
    Username,
    Password,
    NodeThreshold,
    ScoreThreshold,
    TrainingFrequency,
}

/// Form state for the settings page. Nothing here outlives the view.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsVm {
    draft: SystemSettingsDraft,
    monitoring: MonitoringSnapshot,
    notice: Option<Notice>,
}

impl SettingsVm {
    #[must_use]
    pub fn new(service: &SettingsService) -> Self {
        Self {
            draft: service.defaults(),
            monitoring: service.refresh_status(),
            notice: None,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &SystemSettingsDraft {
        &self.draft
    }

    #[must_use]
    pub fn monitoring(&self) -> &MonitoringSnapshot {
        &self.monitoring
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn set_field(&mut self, field: SettingsField, value: String) {
        match field {
            SettingsField::GraphUri => self.draft.graph_uri = value,
            SettingsField::Username => self.draft.username = value,
            SettingsField::Password => self.draft.password = value,
            SettingsField::NodeThreshold => self.draft.node_threshold = value,
            // Unparseable input is kept as NaN so validation rejects it on save.
            SettingsField::ScoreThreshold => {
                self.draft.score_threshold = value.trim().parse().unwrap_or(f64::NAN);
            }
            SettingsField::TrainingFrequency => {
                if let Some(frequency) = TrainingFrequency::from_key(&value) {
                    self.draft.training_frequency = frequency;
                }
            }
        }
    }

    pub fn save(&mut self, service: &SettingsService) {
        self.notice = Some(match service.save(&self.draft) {
            Ok(_) => Notice::success(SAVED_NOTICE),
            Err(SettingsServiceError::Invalid(err)) => {
                Notice::error(ViewError::Settings(err).message())
            }
            Err(_) => Notice::error(ViewError::Unknown.message()),
        });
    }

    pub fn reset(&mut self, service: &SettingsService) {
        self.draft = service.defaults();
        self.notice = None;
    }

    pub fn refresh(&mut self, service: &SettingsService) {
        self.monitoring = service.refresh_status();
        self.notice = Some(Notice::success(REFRESHED_NOTICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphguard_core::time::fixed_clock;

    fn service() -> SettingsService {
        SettingsService::new(fixed_clock())
    }

    #[test]
    fn defaults_save_cleanly() {
        let service = service();
        let mut vm = SettingsVm::new(&service);
        vm.save(&service);
        assert_eq!(vm.notice(), Some(&Notice::success(SAVED_NOTICE)));
    }

    #[test]
    fn invalid_scheme_is_reported() {
        let service = service();
        let mut vm = SettingsVm::new(&service);
        vm.set_field(SettingsField::GraphUri, "http://localhost:7474".into());
        vm.save(&service);
        assert_eq!(
            vm.notice(),
            Some(&Notice::error("图数据库协议仅支持 bolt / neo4j"))
        );
    }

    #[test]
    fn garbage_score_threshold_fails_validation() {
        let service = service();
        let mut vm = SettingsVm::new(&service);
        vm.set_field(SettingsField::ScoreThreshold, "abc".into());
        vm.save(&service);
        assert_eq!(
            vm.notice(),
            Some(&Notice::error("风险评分阈值必须位于 0 到 1 之间"))
        );
    }

    #[test]
    fn unknown_frequency_key_is_ignored() {
        let service = service();
        let mut vm = SettingsVm::new(&service);
        vm.set_field(SettingsField::TrainingFrequency, "monthly".into());
        assert_eq!(
            vm.draft().training_frequency,
            TrainingFrequency::WeeklyOffline
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let service = service();
        let mut vm = SettingsVm::new(&service);
        vm.set_field(SettingsField::Username, String::new());
        vm.reset(&service);
        assert_eq!(vm.draft(), &service.defaults());
    }
}
