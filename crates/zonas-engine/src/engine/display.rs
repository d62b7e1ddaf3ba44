//! Display, desktop and layout change handling.

use zonas_core::{DesktopId, WindowHandle, log_info, log_warn};

use crate::platform::Platform;

use super::{DisplayChangeKind, Engine};

impl<P: Platform> Engine<P> {
    /// Reacts to a change in the display or desktop environment.
    ///
    /// Every kind refreshes the current virtual desktop first, then
    /// rebuilds the work-area map. Whether stamped windows are re-snapped
    /// afterwards depends on the kind and the matching setting.
    pub fn on_display_change(&mut self, kind: DisplayChangeKind) {
        log_info!("display change: {kind:?}");

        if matches!(
            kind,
            DisplayChangeKind::VirtualDesktop | DisplayChangeKind::Initialization
        ) {
            match self.platform.current_desktop() {
                Ok(desktop) => self.current_desktop = Some(desktop),
                Err(e) => {
                    // Keep the previous id; a transient registry failure
                    // must not reshuffle every persisted layout key.
                    log_warn!("current desktop unresolved, keeping previous: {e}");
                }
            }
        }

        self.rebuild_work_areas();

        let resnap = match kind {
            DisplayChangeKind::DisplayChange | DisplayChangeKind::WorkArea => {
                self.settings.move_windows_on_display_change
            }
            DisplayChangeKind::VirtualDesktop => self.settings.move_windows_on_desktop_change,
            DisplayChangeKind::Editor | DisplayChangeKind::Initialization => false,
        };
        if resnap {
            self.resnap_stamped_windows();
        }
    }

    /// Re-places every stamped top-level window into its stamped zone
    /// under the current layouts. Stale stamps are dropped by the work
    /// area's range check.
    pub(super) fn resnap_stamped_windows(&mut self) {
        let platform = self.platform.clone();
        for window in platform.top_level_windows() {
            // A window mid-drag belongs to the user until the drag ends.
            if Some(window) == self.drag.window {
                continue;
            }
            let Some(stamp) = platform.zone_stamp(window) else {
                continue;
            };
            let Some(index) = stamp.checked_sub(1) else {
                continue;
            };
            if !self.is_interesting_window(window) {
                continue;
            }
            let Some(monitor) = platform.monitor_of(window) else {
                continue;
            };
            if let Some(work_area) = self.work_areas.get(&monitor) {
                work_area.move_window_into_zone_by_index(window, index, platform.as_ref());
            }
        }
    }

    /// A new top-level window appeared. When app-last-zone tracking is
    /// on and the app was previously snapped in the current layout of
    /// its monitor, it snaps straight back into that zone.
    pub fn window_created(&mut self, window: WindowHandle) {
        if !self.settings.move_new_windows_to_last_zone {
            return;
        }
        let platform = self.platform.clone();
        if !self.is_interesting_window(window) {
            return;
        }
        let Some(monitor) = platform.monitor_of(window) else {
            return;
        };
        let Some(path) = platform.process_path(window) else {
            return;
        };
        let Some(work_area) = self.work_areas.get(&monitor) else {
            return;
        };
        if let Some(index) =
            self.history
                .app_last_zone(&path, &work_area.unique_id(), &work_area.layout().id)
        {
            work_area.move_window_into_zone_by_index(window, index, platform.as_ref());
        }
    }

    /// Places `window` into the zone at `index` on its current monitor.
    pub fn move_window_into_zone_by_index(&mut self, window: WindowHandle, index: usize) -> bool {
        if Some(window) == self.drag.window {
            return false;
        }
        let platform = self.platform.clone();
        let Some(monitor) = platform.monitor_of(window) else {
            return false;
        };
        let Some(work_area) = self.work_areas.get(&monitor) else {
            return false;
        };
        work_area.move_window_into_zone_by_index(window, index, platform.as_ref())
    }

    /// The persisted layout assignment for some work area changed
    /// (editor output was applied). Rebuilds and, when configured,
    /// re-snaps stamped windows into the new geometry.
    pub fn on_zone_layout_changed(&mut self) {
        self.rebuild_work_areas();
        if self.settings.move_windows_on_layout_change {
            self.resnap_stamped_windows();
        }
    }

    /// Reconciles persisted per-desktop state against the live set of
    /// virtual desktops, dropping records for desktops that no longer
    /// exist.
    pub fn on_desktops_changed(&mut self, live: Vec<DesktopId>) {
        let dead: Vec<DesktopId> = self
            .processed_work_areas
            .keys()
            .copied()
            .filter(|d| *d != DesktopId::NIL && !live.contains(d))
            .collect();
        if dead.is_empty() {
            return;
        }
        for desktop in &dead {
            log_info!("virtual desktop {desktop} removed, dropping its records");
            self.processed_work_areas.remove(desktop);
            self.history.remove_desktop_devices(desktop);
        }
        if let Err(e) = self.history.save() {
            log_warn!("failed to persist zone history: {e}");
        }
    }
}
