//! Startup orchestration.
//!
//! # Responsibilities
//! - Locate and load the configuration file (if any)
//! - Apply environment overrides and validate
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last, after config is known to be good

use std::path::{Path, PathBuf};

use tokio::net::TcpListener;

use crate::config::{
    apply_env_overrides, load_config, validate_config, ConfigError, ListenerConfig, RelayConfig,
};

/// Points at the config file to load.
pub const ENV_CONFIG_PATH: &str = "NEWS_RELAY_CONFIG";

/// Loaded from the working directory when `NEWS_RELAY_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "news-relay.toml";

/// Build the validated process configuration.
///
/// Returns the config and the file it came from, if any. An explicitly named
/// file that cannot be read is an error; a missing default file is not.
pub fn resolve_config<F>(lookup: F) -> Result<(RelayConfig, Option<PathBuf>), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_config_from(lookup, Path::new(DEFAULT_CONFIG_FILE))
}

/// Like [`resolve_config`], with `default` standing in for `./news-relay.toml`.
pub fn resolve_config_from<F>(
    lookup: F,
    default: &Path,
) -> Result<(RelayConfig, Option<PathBuf>), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = config_path(&lookup, default);

    let mut config = match &path {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, &lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok((config, path))
}

fn config_path<F>(lookup: &F, default: &Path) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ENV_CONFIG_PATH).filter(|p| !p.trim().is_empty()) {
        Some(explicit) => Some(PathBuf::from(explicit)),
        None => default.exists().then(|| default.to_path_buf()),
    }
}

/// Bind the configured address. Failure (e.g. port in use) is fatal.
pub async fn bind_listener(config: &ListenerConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listener bound");
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use std::collections::HashMap;
    use std::fs;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| env.get(k).cloned()
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = resolve_config(lookup_from(&[(ENV_CONFIG_PATH, "/nonexistent/news-relay.toml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let result = resolve_config_from(
            lookup_from(&[(ENV_CONFIG_PATH, "")]),
            Path::new("/nonexistent/news-relay.toml"),
        );
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.contains(&ValidationError::MissingApiKey))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_key_alone_is_enough() {
        let (config, source) = resolve_config_from(
            lookup_from(&[("NEWS_API_KEY", "env-key")]),
            Path::new("/nonexistent/news-relay.toml"),
        )
        .unwrap();
        assert_eq!(source, None);
        assert_eq!(config.upstream.api_key, "env-key");
    }

    #[test]
    fn test_file_then_env_override() {
        let path = std::env::temp_dir().join(format!("news-relay-startup-{}.toml", std::process::id()));
        fs::write(
            &path,
            "[upstream]\napi_key = \"file-key\"\n\n[listener]\nbind_address = \"127.0.0.1:0\"\n",
        )
        .unwrap();

        let path_str = path.to_string_lossy().into_owned();
        let result = resolve_config(lookup_from(&[
            (ENV_CONFIG_PATH, path_str.as_str()),
            ("NEWS_API_BASE_URL", "http://127.0.0.1:5555"),
        ]));
        fs::remove_file(&path).unwrap();

        let (config, source) = result.unwrap();
        assert_eq!(source.as_deref(), Some(path.as_path()));
        assert_eq!(config.upstream.api_key, "file-key");
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:5555");
        assert_eq!(config.listener.bind_address, "127.0.0.1:0");
    }

    #[test]
    fn test_config_path_prefers_env() {
        let lookup = lookup_from(&[(ENV_CONFIG_PATH, "custom.toml")]);
        assert_eq!(
            config_path(&lookup, Path::new("/nonexistent/default.toml")),
            Some(PathBuf::from("custom.toml"))
        );

        let lookup = lookup_from(&[]);
        assert_eq!(config_path(&lookup, Path::new("/nonexistent/default.toml")), None);
    }

    #[tokio::test]
    async fn test_bind_listener_port_in_use() {
        let first = bind_listener(&ListenerConfig {
            bind_address: "127.0.0.1:0".to_string(),
        })
        .await
        .unwrap();
        let taken = first.local_addr().unwrap().to_string();

        let second = bind_listener(&ListenerConfig { bind_address: taken }).await;
        assert!(second.is_err());
    }
}
