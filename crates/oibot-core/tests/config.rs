use oibot_core::config::DriverConfig;
use oibot_core::protocol::{Driver, Error, TransportError};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("robot.json");
    fs::write(
        &path,
        r#"{
            "port_name": "/dev/ttyUSB0",
            "baud_rate": 19200,
            "read_timeout_ms": 250,
            "init_baud": true
        }"#,
    )
    .unwrap();

    let config = DriverConfig::from_file(&path).expect("valid file");
    assert_eq!(config.port_name, "/dev/ttyUSB0");
    assert_eq!(config.baud_rate, 19200);
    assert_eq!(config.read_timeout(), Some(Duration::from_millis(250)));
    assert!(config.init_baud);
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("robot.json");

    let config = DriverConfig {
        read_timeout_ms: None,
        ..DriverConfig::new("COM4")
    };
    fs::write(&path, config.to_json().unwrap()).unwrap();

    let loaded = DriverConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.read_timeout(), None);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = DriverConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Config(msg) if msg.contains("absent.json")));
}

#[test]
fn test_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("robot.json");
    fs::write(&path, "{ port_name: ").unwrap();

    assert!(matches!(DriverConfig::from_file(&path), Err(Error::Config(_))));
}

#[test]
fn test_open_rejects_bad_config_before_touching_port() {
    let config = DriverConfig {
        baud_rate: 1234,
        ..DriverConfig::new("/dev/does-not-exist")
    };
    assert!(matches!(Driver::open(&config), Err(e) if e.is_validation()));
}

#[test]
fn test_open_missing_port() {
    let config = DriverConfig::new("/dev/oibot-missing-port");
    assert!(matches!(
        Driver::open(&config),
        Err(Error::Transport(TransportError::Open { .. }))
    ));
}
