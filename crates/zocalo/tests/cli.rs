use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zocalo"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute zocalo");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("taskbar shell"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zocalo"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute zocalo");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("zocalo"));
}

#[test]
fn unknown_subcommand_fails() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zocalo"));
    cmd.arg("frobnicate");

    // Act
    let output = cmd.output().expect("failed to execute zocalo");

    // Assert
    assert!(!output.status.success());
}
