use zonas_core::settings;
use zonas_engine::history_path;

/// ANSI escape helpers for doctor output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";
const FIXED: &str = "\x1b[36m[fixed]\x1b[0m";

pub fn execute() {
    println!();
    check_config_dir();
    check_settings_file();
    check_colors();
    check_history_file();
    check_editor_executable();
    println!();
}

fn check_config_dir() {
    match settings::config_dir() {
        Some(dir) if dir.is_dir() => {
            println!("  {OK} Config directory exists ({})", dir.display());
        }
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                println!("  {FIXED} Created config directory ({})", dir.display());
            }
            Err(e) => {
                println!("  {FAIL} Config directory missing and could not create it: {e}");
            }
        },
        None => {
            println!("  {FAIL} Could not determine home directory");
        }
    }
}

fn check_settings_file() {
    let Some(path) = settings::settings_path() else {
        println!("  {FAIL} Could not determine settings path");
        return;
    };
    if !path.exists() {
        println!("  {WARN} settings.toml not found (using defaults)");
        return;
    }
    match settings::try_load() {
        Ok(_) => println!("  {OK} settings.toml is valid"),
        Err(e) => println!("  {FAIL} settings.toml: {e}"),
    }
}

fn check_colors() {
    let s = settings::load();
    let mut bad: Vec<&str> = Vec::new();
    for (name, value) in [
        ("zone_color", &s.zone_color),
        ("zone_border_color", &s.zone_border_color),
        ("zone_highlight_color", &s.zone_highlight_color),
    ] {
        if zonas_core::settings::Color::parse(value).is_none() {
            bad.push(name);
        }
    }
    if bad.is_empty() {
        println!("  {OK} All zone colors parse as #RRGGBB");
    } else {
        println!(
            "  {WARN} {} color setting(s) malformed (falling back to defaults): {}",
            bad.len(),
            bad.join(", ")
        );
    }
}

fn check_history_file() {
    let Some(path) = history_path() else {
        println!("  {FAIL} Could not determine zone history path");
        return;
    };
    if !path.exists() {
        println!("  {WARN} zones.json not found (no layouts persisted yet)");
        return;
    }
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            println!("  {FAIL} zones.json unreadable: {e}");
            return;
        }
    };
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(_) => println!("  {OK} zones.json is valid JSON"),
        Err(e) => println!("  {FAIL} zones.json: {e}"),
    }
}

fn check_editor_executable() {
    let s = settings::load();
    if s.editor_executable.is_empty() {
        println!("  {FAIL} editor_executable is empty; the layout editor cannot be launched");
        return;
    }
    let path = std::path::Path::new(&s.editor_executable);
    if path.is_absolute() && !path.exists() {
        println!(
            "  {WARN} editor executable not found at {}",
            path.display()
        );
    } else {
        println!("  {OK} Editor configured as '{}'", s.editor_executable);
    }
}
