pub mod error;
pub mod ids;
pub mod log;
pub mod rect;
pub mod settings;
pub mod zone;

pub use error::EngineResult;
pub use ids::{DesktopId, MonitorHandle, WindowHandle};
pub use rect::{Point, Rect};
pub use settings::Settings;
pub use zone::{Zone, ZoneLayout};
