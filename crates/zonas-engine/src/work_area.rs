//! Per-monitor zone state.
//!
//! A [`WorkArea`] owns one monitor's active zone layout and its transient
//! highlight state for one virtual desktop. It holds no lock of its own:
//! the engine owns every `WorkArea` exclusively and serialises all calls,
//! mutating ones under its write lock and queries under its read lock.

use zonas_core::{DesktopId, MonitorHandle, Point, Rect, WindowHandle, ZoneLayout};

use crate::platform::WindowControl;

/// Direction for index-based zone cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    /// Towards lower zone indices (win+left).
    Backward,
    /// Towards higher zone indices (win+right).
    Forward,
}

/// One monitor's active layout and highlight state on one virtual desktop.
pub struct WorkArea {
    monitor: MonitorHandle,
    device_id: String,
    desktop: DesktopId,
    work_area: Rect,
    layout: ZoneLayout,
    visible: bool,
    highlight: Option<usize>,
    drag_window: Option<WindowHandle>,
    transparency_applied: bool,
}

impl WorkArea {
    pub fn new(
        monitor: MonitorHandle,
        device_id: impl Into<String>,
        desktop: DesktopId,
        work_area: Rect,
        layout: ZoneLayout,
        flash: bool,
    ) -> Self {
        Self {
            monitor,
            device_id: device_id.into(),
            desktop,
            work_area,
            layout,
            // A freshly discovered work area may flash its zones once so
            // the user sees that the monitor is now managed.
            visible: flash,
            highlight: None,
            drag_window: None,
            transparency_applied: false,
        }
    }

    pub fn monitor(&self) -> MonitorHandle {
        self.monitor
    }

    /// Stable identity string used to key persisted layout assignments:
    /// device id, work-area extent, and virtual-desktop id.
    pub fn unique_id(&self) -> String {
        Self::compose_unique_id(&self.device_id, self.work_area, self.desktop)
    }

    /// Builds the identity string without constructing a `WorkArea`.
    pub fn compose_unique_id(device_id: &str, work_area: Rect, desktop: DesktopId) -> String {
        format!(
            "{}_{}_{}_{}",
            device_id, work_area.width, work_area.height, desktop
        )
    }

    /// Stable per-monitor key handed to the external editor.
    pub fn work_area_key(&self) -> &str {
        &self.device_id
    }

    pub fn layout(&self) -> &ZoneLayout {
        &self.layout
    }

    pub fn rect(&self) -> Rect {
        self.work_area
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn highlighted_zone(&self) -> Option<usize> {
        self.highlight
    }

    /// Begins zone hinting for a drag over this monitor.
    pub fn move_size_enter(
        &mut self,
        window: WindowHandle,
        transparent: bool,
        win: &dyn WindowControl,
    ) {
        self.drag_window = Some(window);
        self.visible = true;
        self.highlight = None;
        if transparent {
            win.set_window_transparent(window, true);
            self.transparency_applied = true;
        }
    }

    /// Refreshes the highlight for a new cursor position.
    pub fn move_size_update(&mut self, pt: Point, drag_enabled: bool) {
        self.highlight = if drag_enabled {
            self.layout.zone_at(pt)
        } else {
            None
        };
    }

    /// Finishes a drag over this monitor.
    ///
    /// Resolves the zone under the final cursor position, applies the
    /// placement and stamps the window. Returns the chosen zone index,
    /// or `None` when the drop landed outside every zone.
    pub fn move_size_end(
        &mut self,
        window: WindowHandle,
        pt: Point,
        win: &dyn WindowControl,
    ) -> Option<usize> {
        self.restore_transparency(win);
        let zone = self.layout.zone_at(pt);
        match zone {
            Some(index) => {
                if let Some(z) = self.layout.zone(index) {
                    win.place_window(window, z.rect);
                }
                win.set_zone_stamp(window, Some(index + 1));
            }
            None => win.set_zone_stamp(window, None),
        }
        self.drag_window = None;
        self.hide();
        zone
    }

    /// Places the window into the zone at `index` and stamps it.
    /// Out-of-range indices (stale stamps) are ignored.
    pub fn move_window_into_zone_by_index(
        &self,
        window: WindowHandle,
        index: usize,
        win: &dyn WindowControl,
    ) -> bool {
        let Some(zone) = self.layout.zone(index) else {
            return false;
        };
        win.place_window(window, zone.rect);
        win.set_zone_stamp(window, Some(index + 1));
        true
    }

    /// Moves the window one zone backward/forward from `current`.
    ///
    /// `current` is the window's position in this layout, or `None` when
    /// the window is entering from another monitor (it then lands on the
    /// first or last zone depending on direction). Returns `false` when
    /// the edge is reached and `cycle` is off, so the caller can overflow
    /// to the neighbouring monitor.
    pub fn move_window_into_zone_by_direction(
        &self,
        window: WindowHandle,
        current: Option<usize>,
        direction: CycleDirection,
        cycle: bool,
        win: &dyn WindowControl,
    ) -> bool {
        let len = self.layout.len();
        if len == 0 {
            return false;
        }
        let next = match direction {
            CycleDirection::Forward => match current {
                None => 0,
                Some(i) if i + 1 < len => i + 1,
                Some(_) if cycle => 0,
                Some(_) => return false,
            },
            CycleDirection::Backward => match current {
                None => len - 1,
                Some(i) if i > 0 => i - 1,
                Some(_) if cycle => len - 1,
                Some(_) => return false,
            },
        };
        self.move_window_into_zone_by_index(window, next, win)
    }

    /// Shows zone hints without tracking a drag (other monitors during
    /// show-zones-on-all-monitors).
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides zone hints and clears the highlight.
    pub fn hide(&mut self) {
        self.visible = false;
        self.highlight = None;
    }

    /// Undoes dragged-window transparency, if it was applied.
    pub fn restore_transparency(&mut self, win: &dyn WindowControl) {
        if self.transparency_applied
            && let Some(window) = self.drag_window
        {
            win.set_window_transparent(window, false);
        }
        self.transparency_applied = false;
    }
}
