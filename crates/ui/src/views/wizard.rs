use dioxus::prelude::*;

use graphguard_core::model::Algorithm;
use graphguard_core::wizard::{Stage, WizardIntent};
use services::subject_scene;

use crate::context::AppContext;
use crate::views::{GraphCanvas, ViewError};
use crate::vm::{WizardVm, format_datetime};

#[component]
pub fn WizardView() -> Element {
    let ctx = use_context::<AppContext>();
    let tick_period = ctx.tick_period();
    let mut vm = use_signal(|| WizardVm::new(ctx.new_wizard()));

    // The only tick source for this view. It is dropped with the component.
    use_future(move || async move {
        loop {
            tokio::time::sleep(tick_period).await;
            if vm.peek().has_pending_work() {
                vm.write().pump();
            }
        }
    });

    rsx! { WizardBody { vm } }
}

/// Stepper, current stage and navigation for a wizard owned elsewhere.
#[component]
pub(super) fn WizardBody(vm: Signal<WizardVm>) -> Element {
    let mut vm = vm;
    let scene = use_memo(move || {
        let vm = vm.read();
        let session = vm.session();
        (session.stage() == Stage::Visualization)
            .then(|| subject_scene(&vm.report_subject()).map_err(ViewError::from))
    });

    let state = vm.read();
    let session = state.session();
    let stage = session.stage();
    let notice = state.notice().cloned();
    let can_go_back = session.can_go_back();
    let can_advance = session.can_advance();

    rsx! {
        div { class: "page wizard-page",
            h2 { "风险识别研判" }
            ol { class: "steps",
                for item in state.steps() {
                    li { class: item.state.class(),
                        span { class: "step-number", "{item.stage.number()}" }
                        div {
                            p { class: "step-title", "{item.stage.title()}" }
                            p { class: "step-caption", "{item.stage.caption()}" }
                        }
                    }
                }
            }
            if let Some(notice) = notice {
                div { class: notice.class(), role: "status",
                    span { "{notice.text}" }
                    button {
                        class: "notice-close",
                        r#type: "button",
                        onclick: move |_| vm.write().dismiss_notice(),
                        "×"
                    }
                }
            }
            match stage {
                Stage::FeatureEngineering => rsx! { FeatureStage { vm } },
                Stage::ModelInference => rsx! { InferenceStage { vm } },
                Stage::Visualization => rsx! { ResultStage { vm, scene } },
            }
            div { class: "wizard-nav",
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: !can_go_back,
                    onclick: move |_| vm.write().dispatch(WizardIntent::Back),
                    "上一步"
                }
                if stage == Stage::Visualization {
                    button {
                        id: "wizard-submit",
                        class: "btn btn--primary",
                        r#type: "button",
                        onclick: move |_| vm.write().dispatch(WizardIntent::SubmitAndRestart),
                        "提交研判报告"
                    }
                } else {
                    button {
                        id: "wizard-next",
                        class: "btn btn--primary",
                        r#type: "button",
                        disabled: !can_advance,
                        onclick: move |_| vm.write().dispatch(WizardIntent::Advance),
                        "下一步"
                    }
                }
            }
        }
    }
}

#[component]
fn ProgressBar(value: u8, label: String) -> Element {
    rsx! {
        div { class: "progress",
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {value}%" }
            }
            span { class: "progress-label", "{label}" }
        }
    }
}

#[component]
fn FeatureStage(vm: Signal<WizardVm>) -> Element {
    let mut vm = vm;
    let state = vm.read();
    let session = state.session();
    let subject = session.subject_input().to_string();
    let editable = session.subject_editable();
    let running = session.is_processing_features();
    let progress = session.feature_progress();
    let status = state.feature_status();
    let rows = state.phase_rows();

    rsx! {
        section { class: "stage-card",
            div { class: "subject-row",
                label { r#for: "subject-input", "待研判用户ID" }
                input {
                    id: "subject-input",
                    r#type: "text",
                    placeholder: "例如 USER_001",
                    value: "{subject}",
                    disabled: !editable,
                    oninput: move |evt: FormEvent| {
                        vm.write().dispatch(WizardIntent::SetSubject(evt.value()));
                    },
                }
                button {
                    id: "start-features",
                    class: "btn btn--primary",
                    r#type: "button",
                    disabled: running,
                    onclick: move |_| vm.write().dispatch(WizardIntent::StartFeatures),
                    if running { "特征工程进行中..." } else { "启动特征工程" }
                }
            }
            ProgressBar { value: progress.value(), label: progress.to_string() }
            p { class: "stage-status", "{status}" }
            ul { class: "phase-list",
                for row in rows {
                    li { class: row.state.class(),
                        div { class: "phase-head",
                            strong { "{row.phase.short_name()}" }
                            span { class: "phase-subtitle", "{row.phase.subtitle()}" }
                        }
                        p { class: "phase-description", "{row.phase.description()}" }
                    }
                }
            }
        }
    }
}

#[component]
fn InferenceStage(vm: Signal<WizardVm>) -> Element {
    let mut vm = vm;
    let state = vm.read();
    let session = state.session();
    let selected = session.algorithm();
    let running = session.is_model_running();
    let progress = session.model_progress();
    let status = state.inference_status();

    rsx! {
        section { class: "stage-card",
            div { class: "algorithm-grid",
                for algorithm in Algorithm::ALL {
                    button {
                        id: "algorithm-{algorithm.id()}",
                        class: if selected == Some(algorithm) { "algorithm algorithm--selected" } else { "algorithm" },
                        r#type: "button",
                        disabled: running,
                        onclick: move |_| vm.write().dispatch(WizardIntent::SelectAlgorithm(algorithm)),
                        h4 { "{algorithm.display_name()}" }
                        p { "{algorithm.description()}" }
                    }
                }
            }
            button {
                id: "run-inference",
                class: "btn btn--primary",
                r#type: "button",
                disabled: running,
                onclick: move |_| vm.write().dispatch(WizardIntent::RunInference),
                if running { "推理中..." } else { "运行模型推理" }
            }
            ProgressBar { value: progress.value(), label: progress.to_string() }
            p { class: "stage-status", "{status}" }
        }
    }
}

#[component]
fn ResultStage(
    vm: Signal<WizardVm>,
    scene: Memo<Option<Result<services::GraphScene, ViewError>>>,
) -> Element {
    let state = vm.read();
    let subject = state.report_subject();
    let callout = state.ring_callout();
    let result = state.result().cloned();
    let scene = scene.read().clone();

    rsx! {
        section { class: "stage-card result-card",
            match result {
                Some(result) => {
                    let assessed_at = format_datetime(result.assessed_at());
                    rsx! {
                        div { class: "result-summary",
                            div { class: "result-field",
                                span { "研判对象" }
                                strong { "{subject}" }
                            }
                            div { class: "result-field",
                                span { "识别模型" }
                                strong { "{result.algorithm().display_name()}" }
                            }
                            div { class: "result-field",
                                span { "风险等级" }
                                strong { class: "risk risk--medium", "{result.level()}" }
                            }
                            div { class: "result-field",
                                span { "置信度" }
                                strong { "{result.confidence()}" }
                            }
                            div { class: "result-field",
                                span { "研判时间" }
                                strong { "{assessed_at}" }
                            }
                        }
                        p { class: "result-narrative", "{result.narrative()}" }
                    }
                }
                None => rsx! {
                    p { class: "stage-status", "暂无推理结果：{subject}" }
                },
            }
            if let Some(scene) = scene {
                p { class: "result-callout", role: "note", "{callout}" }
                GraphCanvas { scene, heading: "用户关联关系图谱" }
            }
        }
    }
}
