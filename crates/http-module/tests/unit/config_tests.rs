//! Unit tests for configuration loading and validation
//!
//! Environment-dependent tests run inside `figment::Jail` so variables never
//! leak between tests.

use http_module::client::ClientRequestConfig;
use http_module::config::loader::validate_module_config;
use http_module::config::{ConfigLoader, ModuleConfig};
use http_module::constants::DEFAULT_CONFIG_FILENAME;
use http_module::error::Error;
use std::time::Duration;
use tempfile::TempDir;

const CLIENTS_TOML: &str = r#"
[logging]
level = "debug"

[clients.github]
base_url = "https://api.github.com"
enable_logging = true
timeout_ms = 5000

[clients.github.headers]
accept = "application/vnd.github+json"

[clients.internal]
base_url = "http://localhost:8080"
"#;

#[test]
fn test_defaults_without_sources() {
    figment::Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(config.clients.is_empty());
        Ok(())
    });
}

#[test]
fn test_default_file_in_working_directory() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(DEFAULT_CONFIG_FILENAME, CLIENTS_TOML)?;

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.clients.len(), 2);
        let github = &config.clients["github"];
        assert_eq!(github.base_url.as_deref(), Some("https://api.github.com"));
        assert!(github.enable_logging);
        assert_eq!(github.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(
            github.headers.get("accept").map(String::as_str),
            Some("application/vnd.github+json")
        );
        assert!(!config.clients["internal"].enable_logging);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("clients.toml", CLIENTS_TOML)?;
        jail.set_env("HTTP_MODULE__CLIENTS__GITHUB__TIMEOUT_MS", "9000");
        jail.set_env("HTTP_MODULE__CLIENTS__INTERNAL__ENABLE_LOGGING", "true");
        jail.set_env("HTTP_MODULE__LOGGING__LEVEL", "warn");

        let config = ConfigLoader::new()
            .with_config_path("clients.toml")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.clients["github"].timeout_ms, Some(9000));
        assert!(config.clients["internal"].enable_logging);
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("MYAPP__CLIENTS__BILLING__BASE_URL", "http://billing.local");
        jail.set_env("HTTP_MODULE__CLIENTS__IGNORED__BASE_URL", "http://ignored.local");

        let config = ConfigLoader::new()
            .with_env_prefix("MYAPP")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(
            config.clients["billing"].base_url.as_deref(),
            Some("http://billing.local")
        );
        assert!(!config.clients.contains_key("ignored"));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    figment::Jail::expect_with(|_jail| {
        let loader = ConfigLoader::new().with_config_path("does-not-exist.toml");
        assert!(loader.config_path().is_some());

        let config = loader.load().map_err(|e| e.to_string())?;
        assert!(config.clients.is_empty());
        Ok(())
    });
}

#[test]
fn test_invalid_values_fail_to_load() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            DEFAULT_CONFIG_FILENAME,
            r#"
            [clients.broken]
            base_url = "::not a url::"
            "#,
        )?;

        let result = ConfigLoader::new().load();
        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });

    figment::Jail::expect_with(|jail| {
        jail.create_file(
            DEFAULT_CONFIG_FILENAME,
            r#"
            [logging]
            level = "loud"
            "#,
        )?;

        let result = ConfigLoader::new().load();
        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_save_and_reload() {
    figment::Jail::expect_with(|_jail| {
        let dir = TempDir::new().map_err(|e| e.to_string())?;
        let path = dir.path().join("saved.toml");

        let mut config = ModuleConfig::default();
        config.clients.insert(
            "payments".to_string(),
            ClientRequestConfig::new()
                .with_base_url("https://payments.example.com")
                .with_timeout(Duration::from_secs(2))
                .with_logging(true),
        );

        let loader = ConfigLoader::new();
        loader
            .save_to_file(&config, &path)
            .map_err(|e| e.to_string())?;

        let reloaded = ConfigLoader::new()
            .with_config_path(&path)
            .load()
            .map_err(|e| e.to_string())?;

        let payments = &reloaded.clients["payments"];
        assert_eq!(
            payments.base_url.as_deref(),
            Some("https://payments.example.com")
        );
        assert_eq!(payments.timeout_ms, Some(2000));
        assert!(payments.enable_logging);
        Ok(())
    });
}

#[test]
fn test_validate_rejects_zero_timeouts() {
    let mut config = ModuleConfig::default();
    config.clients.insert(
        "slow".to_string(),
        ClientRequestConfig {
            timeout_ms: Some(0),
            ..ClientRequestConfig::default()
        },
    );
    assert!(validate_module_config(&config).is_err());

    let mut config = ModuleConfig::default();
    config.clients.insert(
        "slow".to_string(),
        ClientRequestConfig {
            connect_timeout_ms: Some(0),
            ..ClientRequestConfig::default()
        },
    );
    assert!(validate_module_config(&config).is_err());
}

#[test]
fn test_validate_rejects_blank_names() {
    let mut config = ModuleConfig::default();
    config
        .clients
        .insert("  ".to_string(), ClientRequestConfig::default());

    let err = validate_module_config(&config).expect_err("blank name");
    assert!(err.to_string().contains("Client name cannot be empty"));
}

#[test]
fn test_into_options_names_each_client() {
    let mut config = ModuleConfig::default();
    config
        .clients
        .insert("github".to_string(), ClientRequestConfig::default());

    let options = config.into_options();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].provider_name(), "github");
}

#[test]
fn test_save_to_missing_directory_names_the_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("missing").join("saved.toml");

    let err = ConfigLoader::new()
        .save_to_file(&ModuleConfig::default(), &path)
        .expect_err("parent directory does not exist");

    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}
