//! In-memory platform fake driving the engine in tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use zonas_core::{DesktopId, EngineResult, MonitorHandle, Point, Rect, WindowHandle};

use crate::device::InventoryRecord;
use crate::platform::{
    DesktopRegistry, EditorHost, EditorProcess, InputState, MonitorInfo, MonitorSource,
    MouseButtons, Notifier, WindowControl,
};

#[derive(Debug, Clone, Default)]
pub struct FakeWindow {
    pub rect: Rect,
    pub monitor: Option<MonitorHandle>,
    pub zonable: bool,
    pub path: Option<String>,
    pub elevated: bool,
    pub stamp: Option<usize>,
    pub transparent: bool,
    pub placements: Vec<Rect>,
}

#[derive(Default)]
pub struct FakeState {
    pub monitors: Vec<MonitorInfo>,
    pub inventory: Vec<InventoryRecord>,
    pub remote_session: bool,
    pub windows: BTreeMap<WindowHandle, FakeWindow>,
    pub foreground: Option<WindowHandle>,
    pub cursor: Point,
    pub shift: bool,
    pub win: bool,
    pub buttons: MouseButtons,
    pub buttons_swapped: bool,
    pub process_elevated: bool,
    pub current_desktop: Option<DesktopId>,
    pub desktops: Vec<DesktopId>,
    /// Scripted outcomes for `wait_desktop_change`, consumed in order.
    pub desktop_waits: VecDeque<bool>,
    pub launches: Vec<(String, Vec<String>)>,
    pub editors: Vec<Arc<FakeEditorProcess>>,
    pub warnings: usize,
}

pub struct FakePlatform {
    pub state: Mutex<FakeState>,
}

impl FakePlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState::default()),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Adds a monitor whose work area equals its full rect.
    pub fn add_monitor(&self, handle: usize, rect: Rect) {
        self.lock().monitors.push(MonitorInfo {
            handle: MonitorHandle(handle),
            rect,
            work_area: rect,
            raw_device_id: Some(format!(
                "\\\\?\\DISPLAY#HW{handle}#INST{handle}#{{guid-{handle}}}"
            )),
            mirroring: false,
        });
    }

    pub fn remove_monitor(&self, handle: usize) {
        self.lock()
            .monitors
            .retain(|m| m.handle != MonitorHandle(handle));
    }

    pub fn add_window(&self, handle: usize, window: FakeWindow) {
        self.lock().windows.insert(WindowHandle(handle), window);
    }

    pub fn window(&self, handle: usize) -> FakeWindow {
        self.lock().windows[&WindowHandle(handle)].clone()
    }

    pub fn set_cursor(&self, pt: Point) {
        self.lock().cursor = pt;
    }

    pub fn set_shift(&self, held: bool) {
        self.lock().shift = held;
    }

    pub fn warnings(&self) -> usize {
        self.lock().warnings
    }

    pub fn launches(&self) -> Vec<(String, Vec<String>)> {
        self.lock().launches.clone()
    }

    pub fn last_editor(&self) -> Option<Arc<FakeEditorProcess>> {
        self.lock().editors.last().cloned()
    }
}

impl MonitorSource for FakePlatform {
    fn monitors(&self) -> Vec<MonitorInfo> {
        self.lock().monitors.clone()
    }

    fn is_remote_session(&self) -> bool {
        self.lock().remote_session
    }

    fn monitor_inventory(&self) -> Vec<InventoryRecord> {
        self.lock().inventory.clone()
    }

    fn monitor_at(&self, pt: Point) -> Option<MonitorHandle> {
        self.lock()
            .monitors
            .iter()
            .find(|m| m.rect.contains(pt))
            .map(|m| m.handle)
    }

    fn cursor_position(&self) -> Point {
        self.lock().cursor
    }

    fn unscaled_monitor_rects(&self, monitor: MonitorHandle) -> Option<(Rect, Rect)> {
        self.lock()
            .monitors
            .iter()
            .find(|m| m.handle == monitor)
            .map(|m| (m.rect, m.work_area))
    }
}

impl InputState for FakePlatform {
    fn shift_held(&self) -> bool {
        self.lock().shift
    }

    fn win_held(&self) -> bool {
        self.lock().win
    }

    fn mouse_buttons(&self) -> MouseButtons {
        self.lock().buttons
    }

    fn buttons_swapped(&self) -> bool {
        self.lock().buttons_swapped
    }
}

impl WindowControl for FakePlatform {
    fn top_level_windows(&self) -> Vec<WindowHandle> {
        self.lock().windows.keys().copied().collect()
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        self.lock().foreground
    }

    fn window_rect(&self, window: WindowHandle) -> Option<Rect> {
        self.lock().windows.get(&window).map(|w| w.rect)
    }

    fn place_window(&self, window: WindowHandle, rect: Rect) {
        if let Some(w) = self.lock().windows.get_mut(&window) {
            w.rect = rect;
            w.placements.push(rect);
        }
    }

    fn monitor_of(&self, window: WindowHandle) -> Option<MonitorHandle> {
        self.lock().windows.get(&window).and_then(|w| w.monitor)
    }

    fn is_zonable(&self, window: WindowHandle) -> bool {
        self.lock().windows.get(&window).is_some_and(|w| w.zonable)
    }

    fn process_path(&self, window: WindowHandle) -> Option<String> {
        self.lock().windows.get(&window).and_then(|w| w.path.clone())
    }

    fn is_window_elevated(&self, window: WindowHandle) -> bool {
        self.lock().windows.get(&window).is_some_and(|w| w.elevated)
    }

    fn is_process_elevated(&self) -> bool {
        self.lock().process_elevated
    }

    fn zone_stamp(&self, window: WindowHandle) -> Option<usize> {
        self.lock().windows.get(&window).and_then(|w| w.stamp)
    }

    fn set_zone_stamp(&self, window: WindowHandle, index: Option<usize>) {
        if let Some(w) = self.lock().windows.get_mut(&window) {
            w.stamp = index;
        }
    }

    fn set_window_transparent(&self, window: WindowHandle, transparent: bool) {
        if let Some(w) = self.lock().windows.get_mut(&window) {
            w.transparent = transparent;
        }
    }
}

impl DesktopRegistry for FakePlatform {
    fn current_desktop(&self) -> EngineResult<DesktopId> {
        self.lock()
            .current_desktop
            .ok_or_else(|| "desktop id not yet persisted".into())
    }

    fn desktops(&self) -> EngineResult<Vec<DesktopId>> {
        Ok(self.lock().desktops.clone())
    }

    fn wait_desktop_change(&self, _stop: &AtomicBool) -> bool {
        self.lock().desktop_waits.pop_front().unwrap_or(false)
    }
}

impl Notifier for FakePlatform {
    fn elevated_drag_warning(&self) {
        self.lock().warnings += 1;
    }
}

impl EditorHost for FakePlatform {
    fn launch_editor(
        &self,
        program: &str,
        args: &[String],
    ) -> EngineResult<Arc<dyn EditorProcess>> {
        let mut state = self.lock();
        state.launches.push((program.to_string(), args.to_vec()));
        let editor = Arc::new(FakeEditorProcess::default());
        state.editors.push(editor.clone());
        Ok(editor)
    }
}

/// Scriptable editor process: tests call `exit_now` to unblock waiters;
/// `terminate` does the same and records that it was asked to.
#[derive(Default)]
pub struct FakeEditorProcess {
    done: Mutex<bool>,
    exited: Condvar,
    terminated: AtomicBool,
}

impl FakeEditorProcess {
    pub fn exit_now(&self) {
        let mut done = self.done.lock().unwrap();
        *done = true;
        self.exited.notify_all();
    }

    pub fn was_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }
}

impl EditorProcess for FakeEditorProcess {
    fn wait(&self) {
        let mut done = self.done.lock().unwrap();
        while !*done {
            done = self.exited.wait(done).unwrap();
        }
    }

    fn terminate(&self) {
        self.terminated.store(true, Ordering::SeqCst);
        self.exit_now();
    }
}
