//! Keyboard snapping.
//!
//! Win+arrow moves the foreground window through the zones of its
//! monitor, overflowing onto the neighbouring monitor when the edge is
//! reached and more monitors exist.

use zonas_core::{MonitorHandle, log_debug};

use crate::platform::Platform;
use crate::work_area::CycleDirection;

use super::Engine;

/// A key event as seen by the low-level keyboard hook, reduced to what
/// the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKey {
    Left,
    Right,
    Other,
}

impl<P: Platform> Engine<P> {
    /// Low-level keyboard hook callback. Returns `true` when the event
    /// was consumed and must not reach the focused application.
    pub fn on_key_down(&mut self, key: HookKey, win_held: bool) -> bool {
        // While a hinted drag is live with the modifier still down, every
        // keystroke is swallowed so it cannot disturb the dragged window.
        if self.drag.in_move_size && self.drag.drag_enabled && self.platform.shift_held() {
            return true;
        }
        if !self.settings.override_snap_hotkeys || !win_held {
            return false;
        }
        let direction = match key {
            HookKey::Left => CycleDirection::Backward,
            HookKey::Right => CycleDirection::Forward,
            HookKey::Other => return false,
        };
        self.on_snap_hotkey(direction)
    }

    /// Moves the foreground window one zone in `direction`.
    pub fn on_snap_hotkey(&mut self, direction: CycleDirection) -> bool {
        let platform = self.platform.clone();
        let Some(window) = platform.foreground_window() else {
            return false;
        };
        if !self.is_interesting_window(window) {
            return false;
        }
        let Some(monitor) = platform.monitor_of(window) else {
            return false;
        };
        if !self.work_areas.contains_key(&monitor) {
            return false;
        }

        let order = self.monitors_sorted();
        let many = order.len() > 1;
        // With a neighbouring monitor available, the edge hands off to
        // it instead of cycling in place.
        let cycle = !many;

        let current = self.stamped_zone_on(window, monitor);
        if self.move_on_monitor(window, monitor, current, direction, cycle) {
            return true;
        }

        // Edge reached: walk the remaining monitors in screen order
        // until one accepts the window.
        let pos = order.iter().position(|m| *m == monitor).unwrap_or(0);
        let len = order.len();
        for step in 1..len {
            let next = match direction {
                CycleDirection::Forward => order[(pos + step) % len],
                CycleDirection::Backward => order[(pos + len - step) % len],
            };
            log_debug!("snap overflow {monitor:?} -> {next:?}");
            // Entering from outside: no current zone on the target.
            if self.move_on_monitor(window, next, None, direction, true) {
                return true;
            }
        }

        false
    }

    fn move_on_monitor(
        &mut self,
        window: zonas_core::WindowHandle,
        monitor: MonitorHandle,
        current: Option<usize>,
        direction: CycleDirection,
        cycle: bool,
    ) -> bool {
        let platform = self.platform.clone();
        let Some(work_area) = self.work_areas.get(&monitor) else {
            return false;
        };
        work_area.move_window_into_zone_by_direction(
            window,
            current,
            direction,
            cycle,
            platform.as_ref(),
        )
    }

    /// The window's zone index on `monitor`, derived from its stamp.
    /// A stamp only counts when the window actually sits on that monitor.
    fn stamped_zone_on(
        &self,
        window: zonas_core::WindowHandle,
        monitor: MonitorHandle,
    ) -> Option<usize> {
        if self.platform.monitor_of(window) != Some(monitor) {
            return None;
        }
        let stamp = self.platform.zone_stamp(window)?;
        let index = stamp.checked_sub(1)?;
        let len = self.work_areas.get(&monitor)?.layout().len();
        (index < len).then_some(index)
    }

    /// Monitors in left-to-right, top-to-bottom screen order.
    fn monitors_sorted(&self) -> Vec<MonitorHandle> {
        let mut monitors = self.platform.monitors();
        monitors.retain(|m| self.work_areas.contains_key(&m.handle));
        monitors.sort_by_key(|m| (m.rect.x, m.rect.y, m.handle));
        monitors.into_iter().map(|m| m.handle).collect()
    }
}
