//! Background watcher for virtual-desktop changes.
//!
//! The shell persists the set of virtual-desktop ids; the platform
//! exposes a blocking wait on that store. Each wakeup forwards the live
//! desktop set to the engine's service loop; reconciliation always runs
//! there, never on this thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use zonas_core::log_warn;

use crate::platform::Platform;
use crate::service::EngineMsg;

/// Spawns the desktop watcher thread.
///
/// The thread exits when `stop` is set (and the platform wait observes
/// it) or when the engine side of the channel is gone.
pub fn spawn<P: Platform>(
    platform: Arc<P>,
    stop: Arc<AtomicBool>,
    tx: mpsc::Sender<EngineMsg>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while platform.wait_desktop_change(&stop) {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            match platform.desktops() {
                Ok(ids) => {
                    if tx.send(EngineMsg::DesktopsChanged(ids)).is_err() {
                        break;
                    }
                }
                Err(e) => log_warn!("desktop registry read failed: {e}"),
            }
        }
    })
}
