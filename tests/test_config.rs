use clap::Parser;
use httpfs::config::Config;
use std::path::PathBuf;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.root, PathBuf::from("."));
    assert!(!cfg.verbose);
}

#[test]
fn test_config_parse_without_flags() {
    let cfg = Config::try_parse_from(["httpfs"]).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.root, PathBuf::from("."));
    assert!(!cfg.verbose);
}

#[test]
fn test_config_long_flags() {
    let cfg =
        Config::try_parse_from(["httpfs", "--port", "3000", "--dir", "files", "--verbose"]).unwrap();
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.root, PathBuf::from("files"));
    assert!(cfg.verbose);
}

#[test]
fn test_config_localhost_binding() {
    let cfg = Config::try_parse_from(["httpfs", "--host", "127.0.0.1", "-p", "8000"]).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:8000");
}

#[test]
fn test_config_rejects_bad_port() {
    assert!(Config::try_parse_from(["httpfs", "-p", "not-a-port"]).is_err());
    assert!(Config::try_parse_from(["httpfs", "-p", "70000"]).is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.address(), cfg2.address());
}
