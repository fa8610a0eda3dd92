use chrono::Duration;
use dioxus::prelude::*;
use graphguard_core::model::Algorithm;
use graphguard_core::time::fixed_clock;
use graphguard_core::wizard::{Stage, WizardIntent};
use regex::Regex;
use services::{SimulatedAssessor, WizardRunner};

use super::test_harness::{ViewKind, drive_dom, setup_view_harness, test_services};
use super::wizard::WizardBody;
use crate::views::{GraphCanvas, ViewError};
use crate::vm::WizardVm;

/// Fixed-clock runner for USER_001, walked forward until it sits on `stage`.
fn wizard_at(stage: Stage) -> WizardRunner {
    let (step, limit) = (Duration::milliseconds(50), Duration::seconds(10));
    let mut runner = WizardRunner::new(fixed_clock(), Box::new(SimulatedAssessor::seeded(7)))
        .with_subject("USER_001");
    runner.dispatch(WizardIntent::StartFeatures).unwrap();
    runner.run_until_idle(step, limit);
    runner.dispatch(WizardIntent::Advance).unwrap();
    if stage == Stage::Visualization {
        runner
            .dispatch(WizardIntent::SelectAlgorithm(Algorithm::GraphSage))
            .unwrap();
        runner.dispatch(WizardIntent::RunInference).unwrap();
        runner.run_until_idle(step, limit);
        runner.dispatch(WizardIntent::Advance).unwrap();
    }
    assert_eq!(runner.session().stage(), stage);
    runner
}

fn render_static(root: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(root);
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    dioxus_ssr::render(&dom)
}

#[component]
fn InferenceWizard() -> Element {
    let vm = use_signal(|| WizardVm::new(wizard_at(Stage::ModelInference)));
    rsx! { WizardBody { vm } }
}

#[component]
fn ReportWizard() -> Element {
    let vm = use_signal(|| WizardVm::new(wizard_at(Stage::Visualization)));
    rsx! { WizardBody { vm } }
}

#[tokio::test(flavor = "current_thread")]
async fn overview_smoke_renders_metrics_and_graph() {
    let mut harness = setup_view_harness(ViewKind::Overview, test_services(None));
    harness.rebuild();
    let html = harness.render();
    for expected in ["图谱总节点数", "3,728,541", "信贷反欺诈知识图谱", "平台核心能力"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert_eq!(html.matches("<line").count(), 10, "edge count in {html}");
    assert!(html.contains("欺诈者A"), "missing node label in {html}");
    for tooltip in ["欺诈者A: 逾期未还且失联", "关系: 可疑关联 关联强度: 8.5"] {
        assert!(html.contains(tooltip), "missing tooltip {tooltip} in {html}");
    }
    assert!(html.contains("欺诈模式"), "missing pattern toggle in {html}");
    assert!(!html.contains("图表初始化异常"));
}

#[tokio::test(flavor = "current_thread")]
async fn wizard_smoke_renders_first_stage() {
    let mut harness = setup_view_harness(ViewKind::Wizard, test_services(Some("USER_001")));
    harness.rebuild();
    let html = harness.render();
    for expected in [
        "特征工程",
        "模型研判",
        "反欺诈识别",
        "启动特征工程",
        "等待启动特征工程",
        "USER_001",
        "0%",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("数据清洗"), "missing phase list in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn wizard_smoke_renders_inference_stage() {
    let html = render_static(InferenceWizard);
    for expected in ["GraphSAGE 算法", "GAT (图注意力网络)", "GSA 结构异常检测", "运行模型推理"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("请选择算法模型并运行推理"), "missing status in {html}");
    assert!(!html.contains("<svg"), "graph rendered before the report: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn wizard_smoke_renders_report_with_subject_graph() {
    let confidence = wizard_at(Stage::Visualization)
        .session()
        .result()
        .unwrap()
        .confidence()
        .to_string();
    assert!(Regex::new(r"^\d{2}\.\d%$").unwrap().is_match(&confidence), "{confidence}");

    let html = render_static(ReportWizard);
    for expected in [
        "中等风险",
        confidence.as_str(),
        "账户 USER_001 在图谱中表现出明显的“中心放射型”关联",
        "发现该用户 USER_001 位于一个由32个强关联节点构成的闭合交易环中",
        "用户关联关系图谱",
        "用户: USER_001",
        "关系: 关联 关联强度: 1",
        "提交研判报告",
        "<svg",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("欺诈模式"), "pattern toggle on subject graph: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_smoke_renders_defaults_and_monitoring() {
    let mut harness = setup_view_harness(ViewKind::Settings, test_services(None));
    harness.rebuild();
    let html = harness.render();
    for expected in [
        "bolt://localhost:7687",
        "neo4j",
        "5000000",
        "0.75",
        "每周离线重训",
        "CPU 负载",
        "最近刷新：2023-11-14 22:13:20 UTC",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[component]
fn BrokenGraph() -> Element {
    rsx! {
        GraphCanvas { scene: Err(ViewError::GraphUnavailable), heading: "关联图谱" }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn graph_failure_renders_overlay() {
    let html = render_static(BrokenGraph);
    assert!(html.contains("图表初始化异常"), "missing overlay in {html}");
    assert!(!html.contains("<svg"), "canvas rendered despite failure: {html}");
}
