mod graph;
mod overview;
mod settings;
mod state;
mod wizard;

pub use graph::GraphCanvas;
pub use overview::OverviewView;
pub use settings::SettingsView;
pub use state::ViewError;
pub use wizard::WizardView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
