use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "GraphGuard 风险识别研判系统" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| {
                    tracing::error!(?errors, "render failed");
                    rsx! {
                        div { class: "fatal",
                            h1 { "系统异常" }
                            p { "页面渲染失败，请重启应用。" }
                            pre { "{errors:?}" }
                        }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
