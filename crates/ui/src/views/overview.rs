use dioxus::prelude::*;

use services::{Trend, capabilities, knowledge_scene, metric_cards};

use crate::views::{GraphCanvas, ViewError};

fn trend_class(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "trend trend--up",
        Trend::Down => "trend trend--down",
        Trend::Flat => "trend",
    }
}

#[component]
pub fn OverviewView() -> Element {
    let scene = use_hook(|| knowledge_scene().map_err(ViewError::from));

    rsx! {
        div { class: "page overview-page",
            h2 { "系统概览" }
            div { class: "metric-grid",
                for card in metric_cards() {
                    div { class: "metric-card",
                        p { class: "metric-title", "{card.title}" }
                        p { class: "metric-value", "{card.value}" }
                        span { class: trend_class(card.trend), "{card.trend_label}" }
                    }
                }
            }
            GraphCanvas { scene, heading: "信贷反欺诈知识图谱" }
            section { class: "capabilities",
                h3 { "平台核心能力" }
                ul {
                    for item in capabilities() {
                        li {
                            strong { "{item.headline}" }
                            span { "：{item.detail}" }
                        }
                    }
                }
            }
        }
    }
}
