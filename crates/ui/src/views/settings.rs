use dioxus::prelude::*;

use graphguard_core::model::TrainingFrequency;

use crate::context::AppContext;
use crate::vm::{SettingsField, SettingsVm, format_datetime};

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    value: String,
    field: SettingsField,
    #[props(default = "text")] kind: &'static str,
    vm: Signal<SettingsVm>,
) -> Element {
    let mut vm = vm;
    rsx! {
        div { class: "form-row",
            label { r#for: id, "{label}" }
            input {
                id,
                r#type: kind,
                value: "{value}",
                oninput: move |evt: FormEvent| vm.write().set_field(field, evt.value()),
            }
        }
    }
}

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.settings();
    let mut vm = use_signal(|| SettingsVm::new(&service));

    let state = vm.read();
    let draft = state.draft().clone();
    let notice = state.notice().cloned();
    let monitoring = state.monitoring().clone();
    let refreshed_at = format_datetime(monitoring.refreshed_at);
    let score = if draft.score_threshold.is_finite() {
        format!("{:.2}", draft.score_threshold)
    } else {
        "无效".to_string()
    };

    rsx! {
        div { class: "page settings-page",
            h2 { "系统设置" }
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
            section { class: "settings-card",
                h3 { "图数据库连接" }
                TextField {
                    id: "graph-uri",
                    label: "连接地址",
                    value: draft.graph_uri.clone(),
                    field: SettingsField::GraphUri,
                    vm,
                }
                TextField {
                    id: "graph-username",
                    label: "用户名",
                    value: draft.username.clone(),
                    field: SettingsField::Username,
                    vm,
                }
                TextField {
                    id: "graph-password",
                    label: "密码",
                    value: draft.password.clone(),
                    field: SettingsField::Password,
                    kind: "password",
                    vm,
                }
                TextField {
                    id: "node-threshold",
                    label: "图谱节点数阈值",
                    value: draft.node_threshold.clone(),
                    field: SettingsField::NodeThreshold,
                    vm,
                }
            }
            section { class: "settings-card",
                h3 { "模型参数" }
                div { class: "form-row",
                    label { r#for: "score-threshold", "风险评分阈值" }
                    input {
                        id: "score-threshold",
                        r#type: "range",
                        min: "0",
                        max: "1",
                        step: "0.05",
                        value: "{draft.score_threshold}",
                        oninput: move |evt: FormEvent| {
                            vm.write().set_field(SettingsField::ScoreThreshold, evt.value());
                        },
                    }
                    span { class: "range-value", "{score}" }
                }
                div { class: "form-row",
                    label { r#for: "training-frequency", "模型训练频率" }
                    select {
                        id: "training-frequency",
                        value: draft.training_frequency.key(),
                        onchange: move |evt: FormEvent| {
                            vm.write().set_field(SettingsField::TrainingFrequency, evt.value());
                        },
                        for frequency in TrainingFrequency::ALL {
                            option {
                                value: frequency.key(),
                                selected: frequency == draft.training_frequency,
                                "{frequency.label()}"
                            }
                        }
                    }
                }
            }
            div { class: "settings-actions",
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| vm.write().reset(&service),
                    "恢复默认"
                }
                button {
                    id: "settings-save",
                    class: "btn btn--primary",
                    r#type: "button",
                    onclick: move |_| vm.write().save(&service),
                    "保存配置"
                }
            }
            section { class: "settings-card",
                div { class: "monitor-header",
                    h3 { "服务器运行状态" }
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| vm.write().refresh(&service),
                        "刷新状态"
                    }
                }
                table { class: "monitor-table",
                    thead {
                        tr {
                            th { "监控项" }
                            th { "当前值" }
                            th { "安全范围" }
                            th { "状态" }
                        }
                    }
                    tbody {
                        for row in monitoring.rows {
                            tr {
                                td { "{row.name}" }
                                td { "{row.value}" }
                                td { "{row.safe_range}" }
                                td { class: "status-ok", "{row.status}" }
                            }
                        }
                    }
                }
                p { class: "monitor-footnote", "最近刷新：{refreshed_at}" }
            }
        }
    }
}
