//! Integration tests for the `batch` command.
use seedrate::cli::{BatchOpts, handle_batch_command};
use seedrate::log::is_logger_initialised;
use seedrate::settings::Settings;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Get the path to the example scenario set.
fn get_scenario_dir() -> PathBuf {
    PathBuf::from("scenarios/australia")
}

/// An integration test for the `batch` command.
#[test]
fn test_handle_batch_command() {
    unsafe { std::env::set_var("SEEDRATE_LOG_LEVEL", "off") };

    assert!(!is_logger_initialised());

    let tempdir = tempdir().unwrap();
    {
        // Save results to non-existent directory to check that directory creation works
        let output_dir = tempdir.path().join("results");
        let opts = BatchOpts {
            output_dir: Some(output_dir.clone()),
            ..BatchOpts::default()
        };
        handle_batch_command(&get_scenario_dir(), &opts, Some(Settings::default())).unwrap();

        for file_name in [
            "results.csv",
            "metadata.toml",
            "seedrate_info.log",
            "seedrate_error.log",
        ] {
            assert!(output_dir.join(file_name).is_file(), "{file_name} missing");
        }
        assert!(!output_dir.join("debug_factors.csv").exists());

        // The failed scenario is reported in the error log
        let error_log = fs::read_to_string(output_dir.join("seedrate_error.log")).unwrap();
        assert!(error_log.contains("soybean_test"));
    }

    assert!(is_logger_initialised());

    // Second time will fail because the logging is already initialised
    let opts = BatchOpts {
        output_dir: Some(tempdir.path().join("results2")),
        ..BatchOpts::default()
    };
    assert_eq!(
        handle_batch_command(&get_scenario_dir(), &opts, Some(Settings::default()))
            .unwrap_err()
            .chain()
            .next()
            .unwrap()
            .to_string(),
        "Failed to initialise logging."
    );
}
