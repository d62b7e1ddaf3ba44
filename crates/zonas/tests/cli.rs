use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zonas"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute zonas");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("window snapping"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zonas"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute zonas");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("zonas"));
}

#[test]
fn unknown_subcommand_fails() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zonas"));
    cmd.arg("no-such-command");

    // Act
    let output = cmd.output().expect("failed to execute zonas");

    // Assert
    assert!(!output.status.success());
}

#[test]
fn config_prints_effective_settings() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zonas"));
    cmd.arg("config");

    // Act
    let output = cmd.output().expect("failed to execute zonas");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("shift_drag"));
    assert!(stdout.contains("editor_executable"));
}
