use std::sync::Arc;
use std::time::Duration;

use services::{AppServices, SettingsService, WizardRunner};

pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;
}

#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> SettingsService {
        self.services.settings()
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.services.tick_period()
    }

    /// Each mounted analysis view owns its own runner.
    #[must_use]
    pub fn new_wizard(&self) -> WizardRunner {
        self.services.new_wizard()
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
