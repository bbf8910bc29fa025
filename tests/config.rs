// tests/config.rs
use std::io::Write;

use figment::Jail;
use fracflood::config_loader::{load_config, DEFAULT_PREDICTION_API_URL};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file should be created");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn explicit_config_path_is_used() {
    let file = write_config(
        r#"
        prediction_api_url = "https://ml.example.com"
        host = "127.0.0.1"
        port = 8088
        default_test_limit = 250
        "#,
    );

    Jail::expect_with(|jail| {
        jail.clear_env();
        let cfg = load_config(Some(file.path()))?;
        assert_eq!(cfg.prediction_api_url, "https://ml.example.com");
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8088");
        assert_eq!(cfg.default_test_limit, 250);
        Ok(())
    });
}

#[test]
fn config_path_from_environment() {
    let file = write_config(r#"port = 4000"#);

    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("FRACFLOOD_CONFIG", file.path().display());
        let cfg = load_config(None)?;
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.prediction_api_url, DEFAULT_PREDICTION_API_URL);
        Ok(())
    });
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let cfg = load_config(Some(std::path::Path::new("does-not-exist.toml")))?;
        assert_eq!(cfg.prediction_api_url, DEFAULT_PREDICTION_API_URL);
        Ok(())
    });
}

#[test]
fn empty_base_url_fails_fast() {
    let file = write_config(r#"prediction_api_url = "   ""#);

    Jail::expect_with(|jail| {
        jail.clear_env();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("prediction_api_url must be set"));
        Ok(())
    });
}

#[test]
fn zero_timeout_is_rejected() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("FRACFLOOD_REQUEST_TIMEOUT_SECS", "0");
        assert!(load_config(None).is_err());
        Ok(())
    });
}
