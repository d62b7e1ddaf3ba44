//! The move/size drag cycle.
//!
//! Entry points mirror the window-manager callbacks: start, update,
//! end. All three are non-throwing; anything unexpected collapses into
//! "leave the machine where it was".

use zonas_core::{MonitorHandle, Point, WindowHandle, log_warn};

use crate::platform::Platform;

use super::Engine;

// A cursor this close to the window edge is a resize grip, not a drag;
// resize must never trigger zone hinting.
const DRAG_PADDING_X: i32 = 8;
const DRAG_PADDING_Y: i32 = 6;

impl<P: Platform> Engine<P> {
    /// Window-manager callback: a move/size loop began for `window`.
    pub fn move_size_start(&mut self, window: WindowHandle, monitor: MonitorHandle, pt: Point) {
        if !self.is_interesting_window(window) {
            return;
        }
        self.move_size_start_inner(window, monitor, pt);
    }

    fn move_size_start_inner(&mut self, window: WindowHandle, monitor: MonitorHandle, pt: Point) {
        let platform = self.platform.clone();
        let Some(rect) = platform.window_rect(window) else {
            return;
        };
        // Resize-by-edge: the cursor sits on the border, outside the
        // padded rect.
        if !rect.shrunk(DRAG_PADDING_X, DRAG_PADDING_Y).contains(pt) {
            return;
        }

        self.drag.in_move_size = true;

        if !self.work_areas.contains_key(&monitor) {
            return;
        }
        self.drag.window = Some(window);
        self.update_drag_state(Some(window));

        if self.drag.drag_enabled {
            self.drag.active = Some(monitor);
            let transparent = self.settings.make_dragged_window_transparent;
            if let Some(work_area) = self.work_areas.get_mut(&monitor) {
                work_area.move_size_enter(window, transparent, platform.as_ref());
            }
            if self.settings.show_zones_on_all_monitors {
                for (handle, work_area) in self.work_areas.iter_mut() {
                    if *handle != monitor {
                        work_area.show();
                    }
                }
            }
        } else if let Some(previous) = self.drag.active.take() {
            // Drag no longer qualifies; drop the hint state entirely.
            if let Some(work_area) = self.work_areas.get_mut(&previous) {
                work_area.restore_transparency(platform.as_ref());
            }
            self.hide_all_work_areas();
        }
    }

    /// Window-manager callback: the cursor moved during a move/size loop.
    pub fn move_size_update(&mut self, monitor: MonitorHandle, pt: Point) {
        if !self.drag.in_move_size {
            return;
        }
        let platform = self.platform.clone();
        self.update_drag_state(self.drag.window);

        if let Some(active) = self.drag.active {
            if !self.drag.drag_enabled {
                // Drag got disabled mid-gesture (modifier released).
                self.drag.active = None;
                for work_area in self.work_areas.values_mut() {
                    work_area.restore_transparency(platform.as_ref());
                    work_area.hide();
                }
                return;
            }

            let mut target = active;
            if monitor != active && self.work_areas.contains_key(&monitor) {
                // The drag crossed onto a different monitor.
                if let Some(old) = self.work_areas.get_mut(&active) {
                    old.restore_transparency(platform.as_ref());
                    if !self.settings.show_zones_on_all_monitors {
                        old.hide();
                    }
                }
                self.drag.active = Some(monitor);
                target = monitor;
                if let Some(window) = self.drag.window
                    && let Some(new) = self.work_areas.get_mut(&monitor)
                {
                    let transparent = self.settings.make_dragged_window_transparent;
                    new.move_size_enter(window, transparent, platform.as_ref());
                }
            }
            if let Some(work_area) = self.work_areas.get_mut(&target) {
                work_area.move_size_update(pt, self.drag.drag_enabled);
            }
        } else if self.drag.drag_enabled
            && let Some(window) = self.drag.window
        {
            // Dragging re-enabled mid-gesture; re-enter through the
            // start transition with the current position.
            self.move_size_start_inner(window, monitor, pt);
            if self.drag.active.is_some() {
                self.move_size_update(monitor, pt);
            }
        }
    }

    /// Window-manager callback: the move/size loop ended.
    pub fn move_size_end(&mut self, window: WindowHandle, pt: Point) {
        if Some(window) != self.drag.window && !self.is_interesting_window(window) {
            return;
        }
        let platform = self.platform.clone();

        self.drag.in_move_size = false;
        self.drag.drag_enabled = false;
        self.drag.window = None;

        let mut history_dirty = false;
        if let Some(active) = self.drag.active.take() {
            if let Some(work_area) = self.work_areas.get_mut(&active) {
                let unique_id = work_area.unique_id();
                let layout_id = work_area.layout().id.clone();
                let zone = work_area.move_size_end(window, pt, platform.as_ref());
                if let Some(path) = platform.process_path(window) {
                    match zone {
                        Some(index) => {
                            self.history
                                .set_app_last_zone(&path, &unique_id, &layout_id, index);
                            history_dirty = true;
                        }
                        None => {
                            history_dirty |=
                                self.history.remove_app_last_zone(&path, &unique_id, &layout_id);
                        }
                    }
                }
            }
        } else {
            // The drag never qualified: drop any stale zone stamp and
            // invalidate the per-app record for this work area.
            platform.set_zone_stamp(window, None);
            if let Some(monitor) = platform.monitor_of(window)
                && let Some(work_area) = self.work_areas.get(&monitor)
                && let Some(path) = platform.process_path(window)
            {
                history_dirty |= self.history.remove_app_last_zone(
                    &path,
                    &work_area.unique_id(),
                    &work_area.layout().id,
                );
            }
        }

        if history_dirty && let Err(e) = self.history.save() {
            log_warn!("failed to persist zone history: {e}");
        }

        // Hide everything regardless of outcome.
        self.hide_all_work_areas();
    }

    /// Recomputes `drag_enabled` from live modifier and mouse state.
    pub(super) fn update_drag_state(&mut self, window: Option<WindowHandle>) {
        let platform = self.platform.clone();
        let shift = platform.shift_held();
        let buttons = platform.mouse_buttons();

        // Middle and the X buttons always count as the alternate
        // trigger; left/right depends on the user's button mapping.
        let mut mouse = buttons.middle | buttons.x1 | buttons.x2;
        mouse |= if platform.buttons_swapped() {
            buttons.left
        } else {
            buttons.right
        };

        self.drag.drag_enabled = if self.settings.shift_drag {
            shift | mouse
        } else {
            !(shift | mouse)
        };

        if let Some(window) = window
            && platform.is_window_elevated(window)
            && !platform.is_process_elevated()
        {
            // An unelevated process cannot reposition elevated windows.
            self.drag.drag_enabled = false;
            if !self.elevated_warning_shown && !self.settings.elevated_warning_disabled {
                platform.elevated_drag_warning();
                self.elevated_warning_shown = true;
            }
        }
    }

    /// The zonable filter: real top-level application windows that the
    /// user has not excluded by executable path.
    pub(super) fn is_interesting_window(&self, window: WindowHandle) -> bool {
        if !self.platform.is_zonable(window) {
            return false;
        }
        let Some(path) = self.platform.process_path(window) else {
            return true;
        };
        let upper = path.to_uppercase();
        !self
            .settings
            .excluded_apps
            .iter()
            .any(|app| !app.is_empty() && upper.contains(&app.to_uppercase()))
    }
}
