use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// User settings consumed by the engine.
///
/// Loaded from `~/.config/zonas/settings.toml`. Missing fields fall back
/// to defaults thanks to `#[serde(default)]`, and a missing or unreadable
/// file yields the full default set silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hotkey that toggles the layout editor.
    pub editor_hotkey: Hotkey,
    /// Path or name of the external layout-editor executable.
    pub editor_executable: String,
    /// Zone fill color as a `#RRGGBB` hex string.
    pub zone_color: String,
    /// Zone border color as a `#RRGGBB` hex string.
    pub zone_border_color: String,
    /// Highlight color for the hovered zone as a `#RRGGBB` hex string.
    pub zone_highlight_color: String,
    /// Highlight opacity, 0–100.
    pub zone_highlight_opacity: u8,
    /// Re-snap stamped windows after a resolution or monitor change.
    pub move_windows_on_display_change: bool,
    /// Re-snap stamped windows after a virtual-desktop switch.
    pub move_windows_on_desktop_change: bool,
    /// Re-snap stamped windows after the active layout changes.
    pub move_windows_on_layout_change: bool,
    /// Snap newly created windows to their last recorded zone.
    pub move_new_windows_to_last_zone: bool,
    /// Briefly show zones on work areas seen for the first time.
    pub flash_new_zones: bool,
    /// When true, holding the drag modifier enables zone hints; when
    /// false, hints are on by default and the modifier disables them.
    pub shift_drag: bool,
    /// Let win+arrow cycle zones instead of the OS snap behaviour.
    pub override_snap_hotkeys: bool,
    /// Show every monitor's zones during a drag, not just the hovered one.
    pub show_zones_on_all_monitors: bool,
    /// Make the dragged window translucent while zone hints are shown.
    pub make_dragged_window_transparent: bool,
    /// Open the editor on the monitor under the cursor instead of the
    /// one hosting the foreground window.
    pub use_cursor_pos_for_editor: bool,
    /// Executable-path substrings (case-insensitive) excluded from zoning.
    pub excluded_apps: Vec<String>,
    /// Permanently suppress the elevated-window drag warning.
    pub elevated_warning_disabled: bool,
    /// Minutes to snooze the elevated-window drag warning after showing it.
    pub elevated_warning_snooze_minutes: u64,
    /// File logging configuration.
    pub logging: LogConfig,
}

/// A modifier+key combination, e.g. win+grave for the editor toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotkey {
    /// Key name (e.g. "Grave", "E", "F11").
    pub key: String,
    /// Modifier keys (e.g. ["win"]).
    pub modifiers: Vec<Modifier>,
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

/// An RGB color decoded from a `#RRGGBB` settings string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Parses a `#RRGGBB` hex string.
    pub fn parse(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Color {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor_hotkey: Hotkey {
                key: "Grave".into(),
                modifiers: vec![Modifier::Win],
            },
            editor_executable: "zonas-editor".into(),
            zone_color: "#F5FCFF".into(),
            zone_border_color: "#FFFFFF".into(),
            zone_highlight_color: "#008CFF".into(),
            zone_highlight_opacity: 50,
            move_windows_on_display_change: true,
            move_windows_on_desktop_change: true,
            move_windows_on_layout_change: true,
            move_new_windows_to_last_zone: false,
            flash_new_zones: false,
            shift_drag: true,
            override_snap_hotkeys: false,
            show_zones_on_all_monitors: false,
            make_dragged_window_transparent: false,
            use_cursor_pos_for_editor: true,
            excluded_apps: Vec::new(),
            elevated_warning_disabled: false,
            elevated_warning_snooze_minutes: 1440,
            logging: LogConfig::default(),
        }
    }
}

impl Settings {
    /// Zone fill color; falls back to the default on a malformed string.
    pub fn zone_fill(&self) -> Color {
        Color::parse(&self.zone_color).unwrap_or(Color {
            r: 0xf5,
            g: 0xfc,
            b: 0xff,
        })
    }

    /// Highlight color; falls back to the default on a malformed string.
    pub fn zone_highlight(&self) -> Color {
        Color::parse(&self.zone_highlight_color).unwrap_or(Color {
            r: 0x00,
            g: 0x8c,
            b: 0xff,
        })
    }
}

/// Returns the config directory: `~/.config/zonas/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("zonas"))
}

/// Returns the settings file path: `~/.config/zonas/settings.toml`.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("settings.toml"))
}

/// Loads settings from disk, falling back to defaults.
///
/// A missing file is silent; a file that exists but fails to parse is
/// reported on stderr and replaced by defaults.
pub fn load() -> Settings {
    let Some(path) = settings_path() else {
        return Settings::default();
    };
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Settings::default(),
    };
    match toml::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: failed to parse {}: {e}", path.display());
            Settings::default()
        }
    }
}

/// Loads settings, surfacing parse errors instead of defaulting.
pub fn try_load() -> Result<Settings, String> {
    let Some(path) = settings_path() else {
        return Err("could not determine home directory".into());
    };
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
    toml::from_str(&content).map_err(|e| e.to_string())
}
