//! The drag/snap engine.
//!
//! Single authoritative owner of the monitor → [`WorkArea`] map and of
//! the move/size state machine. Everything that mutates that state runs
//! on the service loop under the engine's write lock; hook callbacks
//! that only need a yes/no answer go through read-mode queries on
//! [`crate::service::SharedEngine`].

mod display;
mod drag;
mod editor;
mod hotkeys;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::mpsc;

use zonas_core::{DesktopId, MonitorHandle, Settings, WindowHandle, ZoneLayout, log_info};

use crate::device;
use crate::history::ZoneHistory;
use crate::platform::Platform;
use crate::service::EngineMsg;
use crate::work_area::WorkArea;
use crate::worker::Worker;

pub use editor::EditorSession;
pub use hotkeys::HookKey;

/// Why the monitor map is being rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayChangeKind {
    /// The OS work area changed (taskbar moved/resized).
    WorkArea,
    /// Display topology or resolution changed.
    DisplayChange,
    /// The active virtual desktop changed.
    VirtualDesktop,
    /// The layout editor finished and may have changed layouts.
    Editor,
    /// First pass at startup.
    Initialization,
}

/// Did the editor exit on its own or did we terminate it?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorExitKind {
    Exit,
    Terminate,
}

/// The move/size state machine.
///
/// `in_move_size == false` implies no target window and no active work
/// area; `active`, when set, always names a key currently present in
/// the work-area map.
#[derive(Debug, Default)]
struct DragState {
    window: Option<WindowHandle>,
    active: Option<MonitorHandle>,
    in_move_size: bool,
    drag_enabled: bool,
}

pub struct Engine<P: Platform> {
    platform: Arc<P>,
    settings: Settings,
    history: Box<dyn ZoneHistory>,
    tx: mpsc::Sender<EngineMsg>,
    /// Dedicated thread for DPI-unaware geometry queries.
    geometry: Worker,
    work_areas: BTreeMap<MonitorHandle, WorkArea>,
    /// Unset until the first observed virtual-desktop switch.
    current_desktop: Option<DesktopId>,
    /// Monitors already seen per desktop; detects work areas that
    /// should flash on first appearance and desktops to garbage-collect.
    processed_work_areas: HashMap<DesktopId, Vec<MonitorHandle>>,
    drag: DragState,
    /// Present while an editor instance is running.
    editor: Option<EditorSession>,
    elevated_warning_shown: bool,
}

impl<P: Platform> Engine<P> {
    pub fn new(
        platform: Arc<P>,
        settings: Settings,
        history: Box<dyn ZoneHistory>,
        tx: mpsc::Sender<EngineMsg>,
    ) -> Self {
        Self {
            platform,
            settings,
            history,
            tx,
            geometry: Worker::new("zonas-geometry"),
            work_areas: BTreeMap::new(),
            current_desktop: None,
            processed_work_areas: HashMap::new(),
            drag: DragState::default(),
            editor: None,
            elevated_warning_shown: false,
        }
    }

    /// Whether a move/size operation is currently tracked.
    pub fn in_move_size(&self) -> bool {
        self.drag.in_move_size
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag.drag_enabled
    }

    pub fn active_work_area(&self) -> Option<MonitorHandle> {
        self.drag.active
    }

    pub fn target_window(&self) -> Option<WindowHandle> {
        self.drag.window
    }

    pub fn current_desktop(&self) -> Option<DesktopId> {
        self.current_desktop
    }

    pub fn work_areas(&self) -> &BTreeMap<MonitorHandle, WorkArea> {
        &self.work_areas
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings snapshot. The next operation sees the new
    /// values; hotkey re-registration is the backend's concern.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Destroys and rebuilds the whole monitor → work-area map from a
    /// fresh enumeration pass. Never patches the map in place.
    pub(super) fn rebuild_work_areas(&mut self) {
        let platform = self.platform.clone();
        let monitors = platform.monitors();
        let inventory = platform.monitor_inventory();
        let ids =
            device::resolve_device_ids(&monitors, platform.is_remote_session(), &inventory);

        self.work_areas.clear();
        let desktop = self.current_desktop.unwrap_or(DesktopId::NIL);
        let mut registered = false;

        for (handle, device_id) in ids {
            let Some(info) = monitors.iter().find(|m| m.handle == handle) else {
                continue;
            };
            let is_new = self.is_new_work_area(desktop, handle);
            let flash = self.settings.flash_new_zones && is_new;

            let unique_id = WorkArea::compose_unique_id(&device_id, info.work_area, desktop);
            let layout = self
                .history
                .layout_for(&unique_id)
                .unwrap_or_else(|| default_layout(info.work_area));

            let work_area = WorkArea::new(handle, device_id, desktop, info.work_area, layout, flash);
            self.history
                .register_work_area(&unique_id, desktop, work_area.layout());
            if is_new {
                self.register_new_work_area(desktop, handle);
                registered = true;
            }
            self.work_areas.insert(handle, work_area);
        }

        if registered && let Err(e) = self.history.save() {
            zonas_core::log_warn!("failed to persist zone history: {e}");
        }

        // A topology change mid-drag invalidates the active reference;
        // break drag continuity instead of leaving it dangling.
        if let Some(active) = self.drag.active
            && !self.work_areas.contains_key(&active)
        {
            self.drag.active = None;
        }

        log_info!(
            "rebuilt {} work area(s) on desktop {}",
            self.work_areas.len(),
            desktop
        );
    }

    fn is_new_work_area(&self, desktop: DesktopId, monitor: MonitorHandle) -> bool {
        match self.processed_work_areas.get(&desktop) {
            Some(monitors) => !monitors.contains(&monitor),
            None => true,
        }
    }

    fn register_new_work_area(&mut self, desktop: DesktopId, monitor: MonitorHandle) {
        self.processed_work_areas
            .entry(desktop)
            .or_default()
            .push(monitor);
    }

    pub(super) fn hide_all_work_areas(&mut self) {
        for work_area in self.work_areas.values_mut() {
            work_area.hide();
        }
    }
}

/// Fallback layout for work areas with no persisted assignment: three
/// equal columns.
fn default_layout(work_area: zonas_core::Rect) -> ZoneLayout {
    ZoneLayout::columns("default-columns", work_area, 3)
}
