use zonas_engine::{FileHistory, history_path};

/// Lists every persisted work area with its active layout.
pub fn execute() {
    let Some(path) = history_path() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };
    if !path.exists() {
        println!("No zone history yet ({}).", path.display());
        return;
    }

    let history = FileHistory::load(path);
    let devices = history.device_summaries();
    if devices.is_empty() {
        println!("No work areas recorded.");
        return;
    }

    for device in &devices {
        println!(
            "{}\n    desktop {}  layout '{}' ({} zone(s))",
            device.unique_id, device.desktop, device.layout_id, device.zone_count
        );
    }
    println!(
        "\n{} work area(s), {} app placement record(s).",
        devices.len(),
        history.app_zone_count()
    );
}
