//! Persisted zone associations.
//!
//! Two record families survive restarts: device records (which layout is
//! active on which work area, per virtual desktop) and app-last-zone
//! records (which zone a given executable was last snapped into on a
//! given work area + layout). The engine only ever goes through the
//! [`ZoneHistory`] trait; the JSON file behind [`FileHistory`] is the
//! default collaborator.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zonas_core::{DesktopId, EngineResult, ZoneLayout};

/// Persistence seam for zone associations.
pub trait ZoneHistory: Send + Sync {
    /// Active layout recorded for a work area, if any.
    fn layout_for(&self, unique_id: &str) -> Option<ZoneLayout>;

    /// Records a work area and its active layout, and marks it as the
    /// most recently seen device. Existing layout assignments win.
    fn register_work_area(&mut self, unique_id: &str, desktop: DesktopId, layout: &ZoneLayout);

    fn app_last_zone(&self, process_path: &str, unique_id: &str, layout_id: &str) -> Option<usize>;

    fn set_app_last_zone(
        &mut self,
        process_path: &str,
        unique_id: &str,
        layout_id: &str,
        zone: usize,
    );

    /// Removes a last-zone record. Returns whether one existed.
    fn remove_app_last_zone(&mut self, process_path: &str, unique_id: &str, layout_id: &str)
    -> bool;

    /// Drops device records belonging to a deleted virtual desktop.
    /// Returns whether anything was removed.
    fn remove_desktop_devices(&mut self, desktop: &DesktopId) -> bool;

    /// Writes one work area's device record to a temp file for the editor.
    fn export_device_info(&self, unique_id: &str, path: &Path) -> EngineResult<()>;

    /// Re-imports the editor's output files. Files the editor did not
    /// write are skipped.
    fn import_editor_output(
        &mut self,
        device_info: &Path,
        applied: &Path,
        deleted: &Path,
    ) -> EngineResult<()>;

    fn save(&self) -> EngineResult<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeviceRecord {
    desktop: DesktopId,
    layout: ZoneLayout,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct HistoryData {
    /// Most recently registered work area.
    active_device: Option<String>,
    /// Work-area unique id -> device record.
    devices: BTreeMap<String, DeviceRecord>,
    /// "process|unique-id|layout-id" -> zone index.
    app_zones: BTreeMap<String, usize>,
}

/// The temp-file payload exchanged with the external editor.
#[derive(Debug, Serialize, Deserialize)]
struct DeviceInfoFile {
    unique_id: String,
    desktop: DesktopId,
    layout: ZoneLayout,
}

/// One persisted device record, for inspection tooling.
#[derive(Debug, Clone)]
pub struct DeviceSummary {
    pub unique_id: String,
    pub desktop: DesktopId,
    pub layout_id: String,
    pub zone_count: usize,
}

/// Zone history backed by a JSON file, or purely in-memory for tests
/// and dry runs.
pub struct FileHistory {
    path: Option<PathBuf>,
    data: HistoryData,
}

/// Returns the history file path: `~/.config/zonas/zones.json`.
pub fn history_path() -> Option<PathBuf> {
    zonas_core::settings::config_dir().map(|d| d.join("zones.json"))
}

impl FileHistory {
    /// Loads history from `path`, starting empty when the file is
    /// missing or unreadable.
    pub fn load(path: PathBuf) -> Self {
        let data = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self {
            path: Some(path),
            data,
        }
    }

    /// An in-memory history; `save` is a no-op.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: HistoryData::default(),
        }
    }

    fn app_key(process_path: &str, unique_id: &str, layout_id: &str) -> String {
        format!("{}|{unique_id}|{layout_id}", process_path.to_uppercase())
    }

    /// Every persisted device record, in key order.
    pub fn device_summaries(&self) -> Vec<DeviceSummary> {
        self.data
            .devices
            .iter()
            .map(|(unique_id, record)| DeviceSummary {
                unique_id: unique_id.clone(),
                desktop: record.desktop,
                layout_id: record.layout.id.clone(),
                zone_count: record.layout.len(),
            })
            .collect()
    }

    /// Number of per-app last-zone records.
    pub fn app_zone_count(&self) -> usize {
        self.data.app_zones.len()
    }
}

impl ZoneHistory for FileHistory {
    fn layout_for(&self, unique_id: &str) -> Option<ZoneLayout> {
        self.data.devices.get(unique_id).map(|r| r.layout.clone())
    }

    fn register_work_area(&mut self, unique_id: &str, desktop: DesktopId, layout: &ZoneLayout) {
        self.data
            .devices
            .entry(unique_id.to_string())
            .or_insert_with(|| DeviceRecord {
                desktop,
                layout: layout.clone(),
            });
        self.data.active_device = Some(unique_id.to_string());
    }

    fn app_last_zone(&self, process_path: &str, unique_id: &str, layout_id: &str) -> Option<usize> {
        self.data
            .app_zones
            .get(&Self::app_key(process_path, unique_id, layout_id))
            .copied()
    }

    fn set_app_last_zone(
        &mut self,
        process_path: &str,
        unique_id: &str,
        layout_id: &str,
        zone: usize,
    ) {
        self.data
            .app_zones
            .insert(Self::app_key(process_path, unique_id, layout_id), zone);
    }

    fn remove_app_last_zone(
        &mut self,
        process_path: &str,
        unique_id: &str,
        layout_id: &str,
    ) -> bool {
        self.data
            .app_zones
            .remove(&Self::app_key(process_path, unique_id, layout_id))
            .is_some()
    }

    fn remove_desktop_devices(&mut self, desktop: &DesktopId) -> bool {
        let before = self.data.devices.len();
        self.data.devices.retain(|_, r| r.desktop != *desktop);
        self.data.devices.len() != before
    }

    fn export_device_info(&self, unique_id: &str, path: &Path) -> EngineResult<()> {
        let record = self
            .data
            .devices
            .get(unique_id)
            .ok_or_else(|| format!("no device record for {unique_id}"))?;
        let payload = DeviceInfoFile {
            unique_id: unique_id.to_string(),
            desktop: record.desktop,
            layout: record.layout.clone(),
        };
        fs::write(path, serde_json::to_string_pretty(&payload)?)?;
        Ok(())
    }

    fn import_editor_output(
        &mut self,
        device_info: &Path,
        applied: &Path,
        deleted: &Path,
    ) -> EngineResult<()> {
        // The editor rewrites the device-info file with the layout the
        // user applied. Either file alone is enough to pick up changes.
        for path in [device_info, applied] {
            let Ok(text) = fs::read_to_string(path) else {
                continue;
            };
            let file: DeviceInfoFile = serde_json::from_str(&text)?;
            self.data.devices.insert(
                file.unique_id,
                DeviceRecord {
                    desktop: file.desktop,
                    layout: file.layout,
                },
            );
        }

        // Layout ids the user deleted in the editor; their last-zone
        // records are stale now.
        if let Ok(text) = fs::read_to_string(deleted) {
            let gone: Vec<String> = serde_json::from_str(&text)?;
            self.data
                .app_zones
                .retain(|key, _| !gone.iter().any(|id| key.ends_with(&format!("|{id}"))));
        }
        Ok(())
    }

    fn save(&self) -> EngineResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.data)?)?;
        Ok(())
    }
}
