//! Launching and supervising the external layout editor.
//!
//! The editor runs as a separate process and communicates through temp
//! files: the engine exports the targeted work area's device record,
//! the editor writes back the applied layout and any deleted layout
//! ids. A detached watcher thread waits on the process and reports the
//! exit back through the service channel.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use zonas_core::{EngineResult, log_info, log_warn};

use crate::platform::{EditorProcess, Platform};
use crate::service::EngineMsg;

use super::{DisplayChangeKind, EditorExitKind, Engine};

/// A running editor instance and its exchange files.
pub struct EditorSession {
    process: Arc<dyn EditorProcess>,
    terminate_requested: Arc<AtomicBool>,
    device_info: PathBuf,
    applied: PathBuf,
    deleted: PathBuf,
}

impl<P: Platform> Engine<P> {
    pub fn editor_running(&self) -> bool {
        self.editor.is_some()
    }

    /// Editor hotkey handler. First press launches the editor for the
    /// work area under the cursor; pressing it again while the editor
    /// runs terminates it instead of stacking instances.
    pub fn toggle_editor(&mut self) {
        if let Some(session) = &self.editor {
            log_info!("editor already running, terminating it");
            session.terminate_requested.store(true, Ordering::SeqCst);
            session.process.terminate();
            return;
        }
        if let Err(e) = self.launch_editor() {
            log_warn!("failed to launch editor: {e}");
        }
    }

    fn launch_editor(&mut self) -> EngineResult<()> {
        let platform = self.platform.clone();
        let monitor = if self.settings.use_cursor_pos_for_editor {
            platform.monitor_at(platform.cursor_position())
        } else {
            platform
                .foreground_window()
                .and_then(|w| platform.monitor_of(w))
        }
        .or_else(|| self.work_areas.keys().next().copied())
        .ok_or("no monitor to edit")?;
        let work_area = self
            .work_areas
            .get(&monitor)
            .ok_or("no work area under the cursor")?;

        // The editor positions itself from unscaled coordinates; read
        // them on the geometry worker, whose thread carries the right
        // DPI context.
        let geometry_platform = platform.clone();
        let (monitor_rect, work_rect) = self
            .geometry
            .submit_and_wait(move || geometry_platform.unscaled_monitor_rects(monitor))
            .flatten()
            .ok_or("monitor geometry unavailable")?;

        // Unique per launch so a stale editor cannot clobber the files
        // of a newer one.
        static LAUNCH_SEQ: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);
        let seq = LAUNCH_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = env::temp_dir();
        let device_info = tmp.join(format!("zonas-editor-device-{}-{seq}.json", std::process::id()));
        let applied = tmp.join(format!("zonas-editor-applied-{}-{seq}.json", std::process::id()));
        let deleted = tmp.join(format!("zonas-editor-deleted-{}-{seq}.json", std::process::id()));
        self.history
            .export_device_info(&work_area.unique_id(), &device_info)?;

        let args = vec![
            monitor.0.to_string(),
            // Monitor origin plus the usable extent; the editor lays its
            // canvas over the work area, not the full monitor.
            format!(
                "{}_{}_{}_{}",
                monitor_rect.x, monitor_rect.y, work_rect.width, work_rect.height
            ),
            work_area.work_area_key().to_string(),
            device_info.display().to_string(),
            applied.display().to_string(),
            deleted.display().to_string(),
        ];

        let program = self.settings.editor_executable.clone();
        log_info!("launching editor: {program} {}", args.join(" "));
        let process = platform.launch_editor(&program, &args)?;

        let terminate_requested = Arc::new(AtomicBool::new(false));
        let watcher_process = process.clone();
        let watcher_flag = terminate_requested.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            watcher_process.wait();
            let kind = if watcher_flag.load(Ordering::SeqCst) {
                EditorExitKind::Terminate
            } else {
                EditorExitKind::Exit
            };
            let _ = tx.send(EngineMsg::EditorExited(kind));
        });

        self.editor = Some(EditorSession {
            process,
            terminate_requested,
            device_info,
            applied,
            deleted,
        });
        Ok(())
    }

    /// Service-loop handler for the watcher's exit report.
    pub fn on_editor_exit(&mut self, kind: EditorExitKind) {
        let Some(session) = self.editor.take() else {
            return;
        };
        log_info!("editor exited: {kind:?}");
        if kind == EditorExitKind::Exit {
            if let Err(e) = self.history.import_editor_output(
                &session.device_info,
                &session.applied,
                &session.deleted,
            ) {
                log_warn!("editor output rejected: {e}");
            }
            if let Err(e) = self.history.save() {
                log_warn!("failed to persist zone history: {e}");
            }
            self.on_display_change(DisplayChangeKind::Editor);
            if self.settings.move_windows_on_layout_change {
                self.resnap_stamped_windows();
            }
        }
        for path in [&session.device_info, &session.applied, &session.deleted] {
            let _ = std::fs::remove_file(path);
        }
    }
}
