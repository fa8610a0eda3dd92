use dioxus::prelude::*;

use graphguard_core::graph::{EdgeCategory, GraphCommand, GraphView, NodeCategory};
use services::GraphScene;

use crate::views::ViewError;

const TOOLBAR: [(GraphCommand, &str); 5] = [
    (GraphCommand::ZoomIn, "放大"),
    (GraphCommand::ZoomOut, "缩小"),
    (GraphCommand::ToggleRiskHighlight, "高亮风险节点"),
    (GraphCommand::ToggleFraudPatterns, "欺诈模式"),
    (GraphCommand::Reset, "重置视图"),
];

/// Zoom is applied around the viewport centre.
fn zoom_transform(width: f64, height: f64, zoom: f64) -> String {
    let (cx, cy) = (width / 2.0, height / 2.0);
    format!("translate({cx:.1} {cy:.1}) scale({zoom:.3}) translate({:.1} {:.1})", -cx, -cy)
}

fn is_toggled(view: &GraphView, command: GraphCommand) -> bool {
    match command {
        GraphCommand::ToggleRiskHighlight => view.highlight_risk(),
        GraphCommand::ToggleFraudPatterns => view.show_patterns(),
        _ => false,
    }
}

fn node_legend(scene: &GraphScene) -> Vec<NodeCategory> {
    let mut seen = Vec::new();
    for node in scene.graph.nodes() {
        if !seen.contains(&node.category) {
            seen.push(node.category);
        }
    }
    seen
}

fn edge_legend(scene: &GraphScene) -> Vec<EdgeCategory> {
    let mut seen = Vec::new();
    for edge in scene.graph.edges() {
        if !seen.contains(&edge.category) {
            seen.push(edge.category);
        }
    }
    seen
}

/// Toolbar entries that have something to act on in this scene.
fn toolbar(scene: &GraphScene) -> Vec<(GraphCommand, &'static str)> {
    TOOLBAR
        .into_iter()
        .filter(|(command, _)| command.applies_to(&scene.graph))
        .collect()
}

/// Renders a laid-out graph, or a blocking overlay when the scene failed.
/// Nodes and edges carry hover tooltips.
#[component]
pub fn GraphCanvas(scene: Result<GraphScene, ViewError>, heading: &'static str) -> Element {
    let mut view = use_signal(GraphView::default);

    let scene = match scene {
        Ok(scene) => scene,
        Err(err) => {
            return rsx! {
                div { class: "graph-card",
                    h3 { "{heading}" }
                    div { class: "graph-overlay", role: "alert",
                        strong { "{err.message()}" }
                        p { "图谱引擎未就绪，请检查图数据库配置后刷新页面。" }
                    }
                }
            };
        }
    };

    let current = *view.read();
    let layout = &scene.layout;
    let transform = zoom_transform(layout.width, layout.height, current.zoom());
    let zoom_label = format!("{:.0}%", current.zoom() * 100.0);
    let commands = toolbar(&scene);

    rsx! {
        div { class: "graph-card",
            div { class: "graph-header",
                h3 { "{heading}" }
                div { class: "graph-toolbar",
                    for (command, label) in commands {
                        button {
                            class: if is_toggled(&current, command) { "tool tool--on" } else { "tool" },
                            r#type: "button",
                            onclick: move |_| view.write().apply(command),
                            "{label}"
                        }
                    }
                    span { class: "graph-zoom", "{zoom_label}" }
                }
            }
            svg {
                class: "graph-canvas",
                view_box: "0 0 {layout.width} {layout.height}",
                g { transform: "{transform}",
                    for (index, (source, target)) in scene.graph.endpoints().iter().copied().enumerate() {
                        {
                            let edge = &scene.graph.edges()[index];
                            let style = current.edge_style(edge);
                            let (from, to) = (layout.positions[source], layout.positions[target]);
                            let tip = edge.tooltip();
                            rsx! {
                                line {
                                    key: "edge-{index}",
                                    x1: "{from.x:.1}",
                                    y1: "{from.y:.1}",
                                    x2: "{to.x:.1}",
                                    y2: "{to.y:.1}",
                                    stroke: style.stroke,
                                    stroke_width: "{style.width}",
                                    stroke_opacity: "{style.opacity}",
                                    stroke_dasharray: if style.dashed { "6 4" } else { "none" },
                                    title { "{tip}" }
                                }
                            }
                        }
                    }
                    for (node, point) in scene.graph.nodes().iter().zip(layout.positions.iter()) {
                        {
                            let style = current.node_style(node);
                            let radius = node.size / 2.0;
                            let glow_radius = radius + style.glow / 4.0;
                            let label_y = point.y + radius + 14.0;
                            let tip = node.tooltip();
                            rsx! {
                                g { key: "{node.id}", class: "graph-node",
                                    title { "{tip}" }
                                    if style.glow > 0.0 {
                                        circle {
                                            cx: "{point.x:.1}",
                                            cy: "{point.y:.1}",
                                            r: "{glow_radius:.1}",
                                            fill: style.glow_color,
                                            fill_opacity: "0.35",
                                        }
                                    }
                                    circle {
                                        cx: "{point.x:.1}",
                                        cy: "{point.y:.1}",
                                        r: "{radius:.1}",
                                        fill: style.fill,
                                    }
                                    text {
                                        x: "{point.x:.1}",
                                        y: "{label_y:.1}",
                                        text_anchor: "middle",
                                        "{node.name}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
            div { class: "graph-legend",
                for category in node_legend(&scene) {
                    span { class: "legend-item",
                        span { class: "legend-dot", style: "background: {category.color()}" }
                        "{category.label()}"
                    }
                }
                for category in edge_legend(&scene) {
                    span { class: "legend-item",
                        span { class: "legend-line", style: "border-color: {category.color()}" }
                        "{category.label()}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphguard_core::model::SubjectId;
    use services::{knowledge_scene, subject_scene};

    #[test]
    fn zoom_transform_scales_around_centre() {
        assert_eq!(
            zoom_transform(900.0, 500.0, 1.2),
            "translate(450.0 250.0) scale(1.200) translate(-450.0 -250.0)"
        );
    }

    #[test]
    fn subject_scene_hides_the_fraud_pattern_toggle() {
        let labels = |scene: &GraphScene| -> Vec<&str> {
            toolbar(scene).into_iter().map(|(_, label)| label).collect()
        };
        let overview = knowledge_scene().unwrap();
        let subject = subject_scene(&SubjectId::parse("USER_001").unwrap()).unwrap();

        assert_eq!(
            labels(&overview),
            vec!["放大", "缩小", "高亮风险节点", "欺诈模式", "重置视图"]
        );
        assert_eq!(labels(&subject), vec!["放大", "缩小", "高亮风险节点", "重置视图"]);
    }

    #[test]
    fn toggles_reflect_view_state() {
        let mut view = GraphView::default();
        assert!(!is_toggled(&view, GraphCommand::ToggleFraudPatterns));
        view.apply(GraphCommand::ToggleFraudPatterns);
        assert!(is_toggled(&view, GraphCommand::ToggleFraudPatterns));
        assert!(!is_toggled(&view, GraphCommand::ZoomIn));
    }
}
