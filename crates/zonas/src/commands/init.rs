use zonas_core::settings;

/// Creates the default configuration file at `~/.config/zonas/`.
///
/// Generates `settings.toml` with every option set to its default.
/// An existing file is not overwritten.
pub fn execute() {
    let Some(dir) = settings::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    write_if_missing(&dir.join("settings.toml"), &default_settings_toml());

    println!("\nEdit settings.toml to customize drag behaviour, snap hotkeys, and the editor.");
    println!("Zone layouts themselves are stored in zones.json and managed by the layout editor.");
}

fn default_settings_toml() -> String {
    let body = toml::to_string_pretty(&zonas_core::Settings::default())
        .unwrap_or_default();
    format!("# zonas settings. Remove a line to fall back to its default.\n\n{body}")
}

/// Writes content to a file only if it doesn't already exist.
fn write_if_missing(path: &std::path::Path, content: &str) {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(path, content) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => eprintln!("Error: could not write {}: {e}", path.display()),
    }
}
