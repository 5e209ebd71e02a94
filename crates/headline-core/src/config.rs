use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Texts per `/embed` request when `HEADLINE_EMBED_BATCH_SIZE` is unset.
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 64;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests can
/// drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("HEADLINE_ENV", "development"))?;

    let bind_addr = or_default("HEADLINE_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("HEADLINE_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("HEADLINE_LOG_LEVEL", "info");

    let embedding_url = or_default("HEADLINE_EMBEDDING_URL", "http://localhost:8080");
    if !embedding_url.starts_with("http://") && !embedding_url.starts_with("https://") {
        return Err(invalid(
            "HEADLINE_EMBEDDING_URL",
            format!("expected an http(s) URL, got '{embedding_url}'"),
        ));
    }

    let embedding_model = or_default("HEADLINE_EMBEDDING_MODEL", "all-MiniLM-L6-v2");
    if embedding_model.trim().is_empty() {
        return Err(invalid("HEADLINE_EMBEDDING_MODEL", "must not be empty".into()));
    }

    let embed_batch_size = match lookup("HEADLINE_EMBED_BATCH_SIZE") {
        Ok(raw) => raw
            .parse::<usize>()
            .map_err(|e| invalid("HEADLINE_EMBED_BATCH_SIZE", e.to_string()))?,
        Err(_) => DEFAULT_EMBED_BATCH_SIZE,
    };
    if embed_batch_size == 0 {
        return Err(invalid(
            "HEADLINE_EMBED_BATCH_SIZE",
            "must be greater than zero".into(),
        ));
    }

    let classifier_path = PathBuf::from(or_default("HEADLINE_CLASSIFIER_PATH", "svm.json"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        embedding_url: embedding_url.trim_end_matches('/').to_string(),
        embedding_model,
        embed_batch_size,
        classifier_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HEADLINE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
