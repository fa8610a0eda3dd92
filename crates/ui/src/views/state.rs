use graphguard_core::model::SettingsError;
use graphguard_core::wizard::WizardError;
use services::DashboardError;

/// Errors surfaced to the user as a notice or overlay.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewError {
    Wizard(WizardError),
    Settings(SettingsError),
    GraphUnavailable,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ViewError::Wizard(err) => wizard_message(*err),
            ViewError::Settings(err) => settings_message(err),
            ViewError::GraphUnavailable => "图表初始化异常",
            ViewError::Unknown => "操作失败，请稍后重试。",
        }
    }
}

fn wizard_message(err: WizardError) -> &'static str {
    match err {
        WizardError::EmptySubject => "请先输入待研判的用户ID",
        WizardError::SubjectLocked => "特征工程已启动，用户ID不可修改",
        WizardError::NoAlgorithm => "请先选择算法模型",
        WizardError::InferenceRunning => "模型推理进行中，请稍候",
        WizardError::FeaturesIncomplete => "请等待特征工程完成",
        WizardError::ResultMissing => "请等待模型推理完成",
        _ => "当前步骤不支持该操作",
    }
}

fn settings_message(err: &SettingsError) -> &'static str {
    match err {
        SettingsError::InvalidGraphUri => "图数据库地址格式无效",
        SettingsError::UnsupportedScheme(_) => "图数据库协议仅支持 bolt / neo4j",
        SettingsError::MissingUsername => "用户名不能为空",
        SettingsError::InvalidNodeThreshold => "节点数阈值必须为正整数",
        SettingsError::ScoreThresholdOutOfRange(_) => "风险评分阈值必须位于 0 到 1 之间",
        _ => "配置校验失败",
    }
}

impl From<WizardError> for ViewError {
    fn from(err: WizardError) -> Self {
        ViewError::Wizard(err)
    }
}

impl From<DashboardError> for ViewError {
    fn from(_: DashboardError) -> Self {
        ViewError::GraphUnavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_errors_map_to_notices() {
        assert_eq!(
            ViewError::from(WizardError::EmptySubject).message(),
            "请先输入待研判的用户ID"
        );
        assert_eq!(
            ViewError::from(WizardError::NoAlgorithm).message(),
            "请先选择算法模型"
        );
    }

    #[test]
    fn settings_errors_map_to_notices() {
        let err = ViewError::Settings(SettingsError::ScoreThresholdOutOfRange(1.5));
        assert_eq!(err.message(), "风险评分阈值必须位于 0 到 1 之间");
    }
}
