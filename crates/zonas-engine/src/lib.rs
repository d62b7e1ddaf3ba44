pub mod desktop_tracker;
pub mod device;
pub mod editor_process;
pub mod engine;
pub mod history;
pub mod platform;
pub mod service;
pub mod work_area;
mod worker;

pub use engine::{DisplayChangeKind, EditorExitKind, Engine, HookKey};
pub use history::{FileHistory, ZoneHistory, history_path};
pub use platform::{MonitorInfo, Platform};
pub use service::{EngineMsg, SharedEngine};
pub use work_area::{CycleDirection, WorkArea};

#[cfg(test)]
pub(crate) mod test_support;
