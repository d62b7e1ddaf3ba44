//! The engine service loop.
//!
//! One mpsc channel funnels every event source (window hooks, the
//! desktop watcher, the editor watcher, settings reloads) into a single
//! consumer that holds the engine write lock while it processes each
//! message. Hook callbacks that need a synchronous answer (key
//! swallowing, move/size gating) go through the shared handle directly.

use std::sync::mpsc;
use std::sync::{Arc, RwLock};

use zonas_core::{DesktopId, MonitorHandle, Point, Settings, WindowHandle, log_error, log_info};

use crate::engine::{DisplayChangeKind, EditorExitKind, Engine};
use crate::platform::Platform;

/// Events consumed by the service loop.
#[derive(Debug)]
pub enum EngineMsg {
    MoveSizeStart {
        window: WindowHandle,
        monitor: MonitorHandle,
        pt: Point,
    },
    MoveSizeUpdate {
        monitor: MonitorHandle,
        pt: Point,
    },
    MoveSizeEnd {
        window: WindowHandle,
        pt: Point,
    },
    WindowCreated(WindowHandle),
    DisplayChange(DisplayChangeKind),
    DesktopsChanged(Vec<DesktopId>),
    ToggleEditor,
    EditorExited(EditorExitKind),
    /// Some work area's active layout changed outside the editor flow.
    ZoneLayoutChanged,
    SettingsChanged(Box<Settings>),
    Stop,
}

/// The engine handle shared between the service loop and hook callbacks.
pub type SharedEngine<P> = Arc<RwLock<Engine<P>>>;

pub fn shared<P: Platform>(engine: Engine<P>) -> SharedEngine<P> {
    Arc::new(RwLock::new(engine))
}

/// Read-mode query for hook callbacks: is a move/size loop tracked?
pub fn in_move_size<P: Platform>(engine: &SharedEngine<P>) -> bool {
    engine.read().map(|e| e.in_move_size()).unwrap_or(false)
}

/// Runs the service loop until [`EngineMsg::Stop`] arrives or every
/// sender is gone. The first thing it does is seed the initial
/// enumeration pass.
pub fn run<P: Platform>(engine: &SharedEngine<P>, rx: &mpsc::Receiver<EngineMsg>) {
    {
        let Ok(mut engine) = engine.write() else {
            log_error!("engine lock poisoned before startup");
            return;
        };
        zonas_core::log::init(&engine.settings().logging);
        engine.on_display_change(DisplayChangeKind::Initialization);
    }

    for msg in rx.iter() {
        if matches!(msg, EngineMsg::Stop) {
            break;
        }
        let Ok(mut engine) = engine.write() else {
            log_error!("engine lock poisoned, stopping service loop");
            return;
        };
        match msg {
            EngineMsg::MoveSizeStart {
                window,
                monitor,
                pt,
            } => engine.move_size_start(window, monitor, pt),
            EngineMsg::MoveSizeUpdate { monitor, pt } => engine.move_size_update(monitor, pt),
            EngineMsg::MoveSizeEnd { window, pt } => engine.move_size_end(window, pt),
            EngineMsg::WindowCreated(window) => engine.window_created(window),
            EngineMsg::DisplayChange(kind) => engine.on_display_change(kind),
            EngineMsg::DesktopsChanged(ids) => engine.on_desktops_changed(ids),
            EngineMsg::ToggleEditor => engine.toggle_editor(),
            EngineMsg::EditorExited(kind) => engine.on_editor_exit(kind),
            EngineMsg::ZoneLayoutChanged => engine.on_zone_layout_changed(),
            EngineMsg::SettingsChanged(settings) => engine.apply_settings(*settings),
            EngineMsg::Stop => unreachable!(),
        }
    }
    log_info!("engine service loop stopped");
}

#[cfg(test)]
mod tests {
    use std::thread;

    use zonas_core::Rect;

    use super::*;
    use crate::history::FileHistory;
    use crate::test_support::FakePlatform;

    #[test]
    fn the_loop_seeds_enumeration_and_stops_on_request() {
        let platform = FakePlatform::new();
        platform.add_monitor(1, Rect::new(0, 0, 900, 600));
        let (tx, rx) = mpsc::channel();
        let engine = shared(Engine::new(
            platform.clone(),
            Settings::default(),
            Box::new(FileHistory::in_memory()),
            tx.clone(),
        ));

        let loop_engine = engine.clone();
        let handle = thread::spawn(move || run(&loop_engine, &rx));

        tx.send(EngineMsg::SettingsChanged(Box::new(Settings {
            shift_drag: false,
            ..Settings::default()
        })))
        .unwrap();
        tx.send(EngineMsg::Stop).unwrap();
        handle.join().unwrap();

        let engine = engine.read().unwrap();
        assert_eq!(engine.work_areas().len(), 1);
        assert!(!engine.settings().shift_drag);
    }

    #[test]
    fn in_move_size_reads_through_the_shared_handle() {
        let platform = FakePlatform::new();
        let (tx, _rx) = mpsc::channel();
        let engine = shared(Engine::new(
            platform,
            Settings::default(),
            Box::new(FileHistory::in_memory()),
            tx,
        ));
        assert!(!in_move_size(&engine));
    }
}
