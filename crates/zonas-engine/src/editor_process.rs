//! Default [`EditorProcess`] implementation over `std::process`.
//!
//! Platform backends hand one of these back from `launch_editor`. An
//! internal reaper thread owns the `Child` and turns its exit into a
//! condvar broadcast, so any number of watchers can block in `wait`
//! while `terminate` stays callable from another thread.

use std::process::Command;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use zonas_core::EngineResult;

use crate::platform::EditorProcess;

pub struct ProcessEditor {
    pid: u32,
    done: Mutex<bool>,
    exited: Condvar,
}

impl ProcessEditor {
    /// Spawns the editor executable with the given arguments.
    pub fn spawn(program: &str, args: &[String]) -> EngineResult<Arc<Self>> {
        let mut child = Command::new(program).args(args).spawn()?;
        let pid = child.id();
        let editor = Arc::new(Self {
            pid,
            done: Mutex::new(false),
            exited: Condvar::new(),
        });

        let reaper = editor.clone();
        thread::spawn(move || {
            let _ = child.wait();
            if let Ok(mut done) = reaper.done.lock() {
                *done = true;
                reaper.exited.notify_all();
            }
        });

        Ok(editor)
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }
}

impl EditorProcess for ProcessEditor {
    fn wait(&self) {
        let Ok(mut done) = self.done.lock() else {
            return;
        };
        while !*done {
            match self.exited.wait(done) {
                Ok(guard) => done = guard,
                Err(_) => return,
            }
        }
    }

    fn terminate(&self) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{Signal, kill};
            use nix::unistd::Pid;
            let _ = kill(Pid::from_raw(self.pid as i32), Signal::SIGTERM);
        }
        #[cfg(not(unix))]
        zonas_core::log_warn!("cannot terminate editor process {} on this platform", self.pid);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn wait_returns_after_a_clean_exit() {
        let editor = ProcessEditor::spawn("true", &[]).unwrap();
        editor.wait();
        editor.wait(); // idempotent after exit
    }

    #[test]
    fn terminate_unblocks_wait() {
        let editor = ProcessEditor::spawn("sleep", &["30".to_string()]).unwrap();
        editor.terminate();
        editor.wait();
    }
}
