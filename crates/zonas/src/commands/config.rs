use zonas_core::settings;

/// Prints the settings file location and the effective settings, with
/// file values and defaults already merged.
pub fn execute() {
    match settings::settings_path() {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not present, showing defaults)", path.display()),
        None => println!("# could not determine settings path, showing defaults"),
    }

    let effective = settings::load();
    match toml::to_string_pretty(&effective) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: could not render settings: {e}");
            std::process::exit(1);
        }
    }
}
