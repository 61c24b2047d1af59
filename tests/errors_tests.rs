use std::error::Error;

use vecwise_metrics::errors::{ExporterError, Result};

#[test]
fn test_bind_error() {
    let error = ExporterError::bind("address in use");

    assert!(matches!(error, ExporterError::Bind(_)));
    assert_eq!(error.code(), "E001");
    assert!(error.to_string().contains("Bind Error"));
    assert!(error.to_string().contains("address in use"));
    assert!(error.is_init_error());
}

#[test]
fn test_registration_errors_are_init_errors() {
    assert!(ExporterError::registration("dup").is_init_error());
    assert!(ExporterError::already_registered("twice").is_init_error());
    assert!(!ExporterError::encoding("bad utf8").is_init_error());
    assert!(!ExporterError::config("empty").is_init_error());
}

#[test]
fn test_error_codes_are_distinct() {
    let errors = [
        ExporterError::bind("x"),
        ExporterError::registration("x"),
        ExporterError::already_registered("x"),
        ExporterError::encoding("x"),
        ExporterError::config("x"),
    ];
    let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_format_simple_and_message() {
    let error = ExporterError::config("metrics.bind_address must not be empty");
    assert_eq!(error.message(), "metrics.bind_address must not be empty");
    assert_eq!(
        error.format_simple(),
        "Configuration Error: metrics.bind_address must not be empty"
    );
    assert!(error.format_colored().contains("E005"));
}

#[test]
fn test_from_io_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
    let error: ExporterError = io_error.into();
    assert!(matches!(error, ExporterError::Bind(_)));
    assert!(error.message().contains("port taken"));
}

#[test]
fn test_from_prometheus_error() {
    // A duplicate instrument is a catalog problem, not a second init
    let error: ExporterError = prometheus::Error::AlreadyReg.into();
    assert!(matches!(error, ExporterError::Registration(_)));
    assert!(error.is_init_error());

    let error: ExporterError = prometheus::Error::Msg("bad name".to_string()).into();
    assert!(matches!(error, ExporterError::Registration(_)));
}

#[test]
fn test_result_alias_with_question_mark() {
    fn fails() -> Result<()> {
        Err(ExporterError::encoding("boom"))
    }
    fn propagates() -> Result<u32> {
        fails()?;
        Ok(1)
    }

    let err = propagates().unwrap_err();
    assert!(err.source().is_none());
    assert_eq!(err.code(), "E004");
}
