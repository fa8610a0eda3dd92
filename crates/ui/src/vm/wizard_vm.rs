use graphguard_core::model::{RiskAssessment, SubjectId};
use graphguard_core::wizard::{
    PipelinePhase, Stage, TickEvent, Transition, WizardIntent, WizardSession,
};
use services::WizardRunner;

use crate::views::ViewError;

use super::notice::Notice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepState {
    Done,
    Active,
    Pending,
}

impl StepState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            StepState::Done => "step step--done",
            StepState::Active => "step step--active",
            StepState::Pending => "step",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepItem {
    pub stage: Stage,
    pub state: StepState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseRow {
    pub phase: PipelinePhase,
    pub state: StepState,
}

/// Wizard state plus the notice banner for one analysis view.
pub struct WizardVm {
    runner: WizardRunner,
    notice: Option<Notice>,
}

impl WizardVm {
    #[must_use]
    pub fn new(runner: WizardRunner) -> Self {
        Self {
            runner,
            notice: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &WizardSession {
        self.runner.session()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.runner.session().has_pending_work()
    }

    pub fn pump(&mut self) -> Vec<TickEvent> {
        self.runner.pump()
    }

    /// Forwards an intent and updates the banner.
    ///
    /// Editing the subject field never touches the banner so a rejection stays
    /// visible while the user types.
    pub fn dispatch(&mut self, intent: WizardIntent) {
        let typing = matches!(intent, WizardIntent::SetSubject(_));
        match self.runner.dispatch(intent) {
            Ok(Transition::Archived(record)) => {
                self.notice = Some(Notice::success(format!(
                    "研判报告已提交归档：{}（{}）",
                    record.subject(),
                    record.level()
                )));
            }
            Ok(_) if typing => {}
            Ok(_) => self.notice = None,
            Err(err) => self.notice = Some(Notice::error(ViewError::from(err).message())),
        }
    }

    #[must_use]
    pub fn steps(&self) -> Vec<StepItem> {
        let current = self.session().stage();
        Stage::ALL
            .into_iter()
            .map(|stage| StepItem {
                stage,
                state: if stage < current {
                    StepState::Done
                } else if stage == current {
                    StepState::Active
                } else {
                    StepState::Pending
                },
            })
            .collect()
    }

    #[must_use]
    pub fn phase_rows(&self) -> Vec<PhaseRow> {
        let session = self.session();
        let complete = session.features().is_completed();
        let current = session.current_phase().map(PipelinePhase::index);
        PipelinePhase::ALL
            .into_iter()
            .map(|phase| {
                let state = match current {
                    _ if complete => StepState::Done,
                    Some(index) if phase.index() < index => StepState::Done,
                    Some(index) if phase.index() == index => StepState::Active,
                    _ => StepState::Pending,
                };
                PhaseRow { phase, state }
            })
            .collect()
    }

    #[must_use]
    pub fn feature_status(&self) -> &'static str {
        let session = self.session();
        if session.features().is_completed() {
            "特征工程已完成，可进入模型推理"
        } else if let Some(phase) = session.current_phase() {
            phase.running_title()
        } else if session.is_processing_features() {
            "正在准备特征工程任务..."
        } else {
            "等待启动特征工程"
        }
    }

    #[must_use]
    pub fn inference_status(&self) -> &'static str {
        let session = self.session();
        if session.is_model_running() {
            "模型推理中..."
        } else if session.result().is_some() {
            "推理完成，可查看可视化研判结果"
        } else {
            "请选择算法模型并运行推理"
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&RiskAssessment> {
        self.session().result()
    }

    /// Subject shown on the report; falls back to a sample account.
    #[must_use]
    pub fn report_subject(&self) -> SubjectId {
        self.result()
            .map(|result| result.subject().clone())
            .or_else(|| self.session().subject())
            .unwrap_or_else(SubjectId::placeholder)
    }

    /// Finding shown over the subject graph on the report.
    #[must_use]
    pub fn ring_callout(&self) -> String {
        format!(
            "发现该用户 {} 位于一个由32个强关联节点构成的闭合交易环中，呈现典型的信贷工厂代办特征。",
            self.report_subject()
        )
    }
}
