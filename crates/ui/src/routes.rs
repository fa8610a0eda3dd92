use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{OverviewView, SettingsView, WizardView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", OverviewView)] Overview {},
        #[route("/analysis", WizardView)] Analysis {},
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                header { class: "topbar",
                    span { class: "topbar-title", "信贷反欺诈知识图谱平台" }
                    span { class: "topbar-status", "系统运行正常" }
                }
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            div { class: "brand",
                h1 { "GraphGuard" }
                p { "风险识别研判系统" }
            }
            ul {
                li { Link { to: Route::Overview {}, active_class: "active", "系统概览" } }
                li { Link { to: Route::Analysis {}, active_class: "active", "风险识别研判" } }
                li { Link { to: Route::Settings {}, active_class: "active", "系统设置" } }
            }
        }
    }
}
