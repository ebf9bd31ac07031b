use std::fs;

use firpass::config::PassConfig;
use firpass::diagnostics::TransformError;

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passes.toml");
    fs::write(
        &path,
        r#"
[promote]
patterns = ["Rec", "Vec"]

[rename]
prefix = "sig"
canonical = "dsp"
"#,
    )
    .unwrap();

    let config = PassConfig::from_file(&path).unwrap();
    assert_eq!(config.promote.patterns, vec!["Rec".to_string(), "Vec".to_string()]);
    assert_eq!(config.rename.canonical, "dsp");
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = PassConfig::from_file(&path).unwrap_err();
    match err {
        TransformError::Config { msg, path: Some(p) } => {
            assert!(msg.contains("could not read file"));
            assert_eq!(p, path);
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_invalid_syntax_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passes.toml");
    fs::write(&path, "[promote\npatterns = 3").unwrap();

    let err = PassConfig::from_file(&path).unwrap_err();
    match err {
        TransformError::Config { msg, path: Some(p) } => {
            assert!(msg.starts_with("invalid syntax"));
            assert_eq!(p, path);
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_validation_error_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passes.toml");
    fs::write(&path, "[rename]\nprefix = \"\"\n").unwrap();

    let err = PassConfig::from_file(&path).unwrap_err();
    assert_eq!(err.to_string(), "Config error: rename.prefix must not be empty");
    assert!(matches!(err, TransformError::Config { path: Some(_), .. }));
}

#[test]
fn test_wrong_value_type_rejected() {
    let err = PassConfig::from_toml_str("[promote]\npatterns = \"Rec\"\n").unwrap_err();
    assert!(matches!(err, TransformError::Config { path: None, .. }));
}
