use issues_server::config::{Cli, FileConfig, LogFormat, ServerConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_resolve_reads_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("issues.toml");
    fs::write(
        &path,
        r#"
[server]
bind = "127.0.0.1:3100"

[logging]
format = "json"
"#,
    )
    .unwrap();

    let cli = Cli {
        config: Some(path),
        ..Default::default()
    };
    let config = ServerConfig::resolve(&cli).unwrap();

    assert_eq!(config.bind.to_string(), "127.0.0.1:3100");
    assert_eq!(config.log_format, LogFormat::Json);
    assert!(config.cors);
}

#[test]
fn test_missing_config_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let cli = Cli {
        config: Some(temp_dir.path().join("absent.toml")),
        ..Default::default()
    };

    let err = ServerConfig::resolve(&cli).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_malformed_config_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("issues.toml");
    fs::write(&path, "[server\nbind = ").unwrap();

    let err = FileConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_no_config_uses_defaults() {
    let config = ServerConfig::resolve(&Cli::default()).unwrap();
    assert_eq!(config, ServerConfig::default());
}
