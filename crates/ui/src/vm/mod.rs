mod notice;
mod settings_vm;
mod time_fmt;
mod wizard_vm;

pub use notice::{Notice, NoticeKind};
pub use settings_vm::{SettingsField, SettingsVm};
pub use time_fmt::format_datetime;
pub use wizard_vm::{PhaseRow, StepItem, StepState, WizardVm};
