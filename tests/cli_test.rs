use std::path::Path;
use std::process::{Command, Output};

const INVALID_CONFIG: &str = "[camera]\ncrop_ratio = 0.0\n";

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_avatarfit-cli"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn test_help_ignores_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("avatarfit.toml"), INVALID_CONFIG).unwrap();

    let output = run_cli(dir.path(), &["help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage: avatarfit-cli"));
}

#[test]
fn test_config_init_replaces_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("bad.toml");
    std::fs::write(&config_path, INVALID_CONFIG).unwrap();
    let config_arg = config_path.to_string_lossy().into_owned();

    let shown = run_cli(dir.path(), &["config", "--config", &config_arg]);
    assert!(!shown.status.success());

    let init = run_cli(dir.path(), &["config", "--init", "--config", &config_arg]);
    assert!(init.status.success(), "{}", String::from_utf8_lossy(&init.stderr));

    let config = avatarfit::AvatarFitConfig::load_from_file(&config_path).unwrap();
    assert!(config.validate().is_ok());

    let shown = run_cli(dir.path(), &["config", "--config", &config_arg]);
    assert!(shown.status.success());
}

#[test]
fn test_garment_offset_needs_no_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("avatarfit.toml"), INVALID_CONFIG).unwrap();

    let output = run_cli(dir.path(), &["garment-offset", "dress"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "40");
}
