//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use envrisk_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var("ENVRISK_DEMOGRAPHIC_VULNERABILITY");
    env::remove_var("ENVRISK_OUTPUT_DIR");
    env::remove_var("ENVRISK_REPORT_TOP");
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", content).unwrap();
    file
}

#[test]
#[serial]
fn test_partial_file_configuration() {
    clear_env();
    let file = config_file("report_top = 7\n# Only override report_top");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.report_top.value, 7);
    assert_eq!(config.report_top.source, ConfigSource::File);
    assert_eq!(config.demographic_vulnerability.value, 0.5);
    assert_eq!(config.demographic_vulnerability.source, ConfigSource::Default);
    assert_eq!(config.output_dir.source, ConfigSource::Default);
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let file = config_file("demographic_vulnerability = 0.2\noutput_dir = \"from-file\"");

    env::set_var("ENVRISK_DEMOGRAPHIC_VULNERABILITY", "0.6");
    env::set_var("ENVRISK_OUTPUT_DIR", "from-env");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.demographic_vulnerability.value, 0.6);
    assert_eq!(config.demographic_vulnerability.source, ConfigSource::Environment);
    assert_eq!(config.output_dir.value, PathBuf::from("from-env"));

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    env::set_var("ENVRISK_DEMOGRAPHIC_VULNERABILITY", "2.5");
    env::set_var("ENVRISK_REPORT_TOP", "many");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.demographic_vulnerability.value, 0.5);
    assert_eq!(config.demographic_vulnerability.source, ConfigSource::Default);
    assert_eq!(config.report_top.value, 3);

    clear_env();
}

#[test]
#[serial]
fn test_full_precedence_chain() {
    clear_env();
    let file = config_file("report_top = 4");
    env::set_var("ENVRISK_REPORT_TOP", "5");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    assert_eq!(config.report_top.value, 5);

    config.update_from_cli(CliConfigOverrides {
        report_top: Some(6),
        ..Default::default()
    });
    assert_eq!(config.report_top.value, 6);
    assert_eq!(config.report_top.source, ConfigSource::Cli);

    clear_env();
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/envrisk.toml");
    assert!(result.is_err());
}

#[test]
fn test_malformed_toml_is_an_error() {
    let file = config_file("report_top = [not valid");
    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}
