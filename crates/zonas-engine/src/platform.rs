//! Capability traits for the OS seam.
//!
//! The engine never talks to the window system directly; a platform
//! backend implements these traits and the engine is generic over the
//! aggregate [`Platform`]. Tests drive the engine with an in-memory fake.
//!
//! Every method is a best-effort query: backends return `None`/empty on
//! OS failures and the engine degrades to a no-op.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use zonas_core::{DesktopId, EngineResult, MonitorHandle, Point, Rect, WindowHandle};

use crate::device::InventoryRecord;

/// A physical monitor as reported by one enumeration pass.
#[derive(Debug, Clone)]
pub struct MonitorInfo {
    pub handle: MonitorHandle,
    /// Full monitor rectangle in virtual-screen coordinates.
    pub rect: Rect,
    /// Taskbar-adjusted work area.
    pub work_area: Rect,
    /// Raw OS device identifier, when one could be read.
    pub raw_device_id: Option<String>,
    /// Set for mirroring/virtual driver monitors, which are skipped.
    pub mirroring: bool,
}

/// Monitor discovery and geometry queries.
pub trait MonitorSource {
    fn monitors(&self) -> Vec<MonitorInfo>;

    /// Whether this is a remote-desktop session. Remote sessions cannot
    /// rely on hardware identity, so device ids become synthetic.
    fn is_remote_session(&self) -> bool;

    /// Hardware inventory records for attached monitors. May be empty
    /// when the inventory service is unavailable.
    fn monitor_inventory(&self) -> Vec<InventoryRecord>;

    fn monitor_at(&self, pt: Point) -> Option<MonitorHandle>;

    fn cursor_position(&self) -> Point;

    /// Monitor and work-area rectangles measured without DPI scaling.
    /// Called from the dedicated geometry worker thread only.
    fn unscaled_monitor_rects(&self, monitor: MonitorHandle) -> Option<(Rect, Rect)>;
}

/// Current pressed state of the mouse buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
    pub x1: bool,
    pub x2: bool,
}

/// Live keyboard/mouse state, read inside hook callbacks.
pub trait InputState {
    fn shift_held(&self) -> bool;
    fn win_held(&self) -> bool;
    fn mouse_buttons(&self) -> MouseButtons;
    /// Whether the user swapped the primary and secondary mouse buttons.
    fn buttons_swapped(&self) -> bool;
}

/// Window queries and placement.
pub trait WindowControl {
    fn top_level_windows(&self) -> Vec<WindowHandle>;
    fn foreground_window(&self) -> Option<WindowHandle>;
    fn window_rect(&self, window: WindowHandle) -> Option<Rect>;
    fn place_window(&self, window: WindowHandle, rect: Rect);
    fn monitor_of(&self, window: WindowHandle) -> Option<MonitorHandle>;

    /// Whether the window is a real, zonable top-level application
    /// window (visible, not a tool window, not the shell, ...).
    fn is_zonable(&self, window: WindowHandle) -> bool;

    fn process_path(&self, window: WindowHandle) -> Option<String>;
    fn is_window_elevated(&self, window: WindowHandle) -> bool;
    fn is_process_elevated(&self) -> bool;

    /// Reads the per-window zone stamp: a 1-based index into the active
    /// layout, or `None` when the window was never snapped.
    fn zone_stamp(&self, window: WindowHandle) -> Option<usize>;
    fn set_zone_stamp(&self, window: WindowHandle, index: Option<usize>);

    fn set_window_transparent(&self, window: WindowHandle, transparent: bool);
}

/// Persisted virtual-desktop identifiers.
pub trait DesktopRegistry {
    /// The active desktop id. Fails until the first desktop switch of
    /// the session has been persisted by the shell.
    fn current_desktop(&self) -> EngineResult<DesktopId>;

    /// All known desktop ids.
    fn desktops(&self) -> EngineResult<Vec<DesktopId>>;

    /// Blocks until the persisted desktop set changes or `stop` is set.
    /// Returns `false` when the watcher should shut down.
    fn wait_desktop_change(&self, stop: &AtomicBool) -> bool;
}

/// User-facing notifications (toasts). Rendering is a collaborator.
pub trait Notifier {
    /// One-shot warning that an elevated window cannot be dragged into
    /// zones by an unelevated engine.
    fn elevated_drag_warning(&self);
}

/// Launches the external layout-editor executable.
pub trait EditorHost {
    fn launch_editor(&self, program: &str, args: &[String])
    -> EngineResult<Arc<dyn EditorProcess>>;
}

/// A running editor instance, waitable from a detached watcher thread.
pub trait EditorProcess: Send + Sync {
    /// Blocks until the editor exits.
    fn wait(&self);

    /// Requests termination; `wait` returns shortly after.
    fn terminate(&self);
}

/// The full OS seam the engine is generic over.
pub trait Platform:
    MonitorSource
    + WindowControl
    + InputState
    + DesktopRegistry
    + Notifier
    + EditorHost
    + Send
    + Sync
    + 'static
{
}

impl<T> Platform for T where
    T: MonitorSource
        + WindowControl
        + InputState
        + DesktopRegistry
        + Notifier
        + EditorHost
        + Send
        + Sync
        + 'static
{
}
