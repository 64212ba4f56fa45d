// tests/config_loading.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;

use runlist::config::{load_from_path, load_from_str};
use runlist::errors::RunlistError;
use runlist::logs::DEFAULT_LINE_CAPACITY;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn empty_config_uses_defaults() -> TestResult {
    init_tracing();

    let config = load_from_str("")?;
    assert_eq!(config.runner.log_capacity, 0);
    assert!(config.runner.halt_on_failure);

    let options = config.runner_options();
    assert_eq!(options.log_capacity, 0);
    assert!(options.halt_on_failure);

    Ok(())
}

#[test]
fn runner_section_overrides_defaults() -> TestResult {
    init_tracing();

    let config = load_from_str(
        r#"
[runner]
log_capacity = 250
halt_on_failure = false
"#,
    )?;

    assert_eq!(config.runner.log_capacity, 250);
    assert!(!config.runner.halt_on_failure);

    // A zero capacity is only resolved at sink construction time; the
    // documented default is part of the logs module, not the config.
    assert_eq!(DEFAULT_LINE_CAPACITY, 100);

    Ok(())
}

#[test]
fn invalid_toml_is_a_parse_error() {
    init_tracing();

    let err = load_from_str("[runner\nlog_capacity = nope").unwrap_err();
    assert!(matches!(err, RunlistError::TomlError(_)));
}

#[test]
fn load_from_path_reads_a_file() -> TestResult {
    init_tracing();

    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "[runner]")?;
    writeln!(file, "log_capacity = 42")?;

    let config = load_from_path(file.path())?;
    assert_eq!(config.runner.log_capacity, 42);
    assert!(config.runner.halt_on_failure);

    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    init_tracing();

    let err = load_from_path("definitely/not/here/Runlist.toml").unwrap_err();
    assert!(matches!(err, RunlistError::IoError(_)));
}
