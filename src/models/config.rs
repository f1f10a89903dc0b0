use serde::Deserialize;

/// Configuration options for the web application.
///
/// Loaded from the process environment (with `.env` support via dotenvy),
/// matching the deployment contract: `SERVER_ENDPOINT` is the remote API
/// base URL, `APP_URL` the canonical site URL used in metadata and links.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the catalog/inquiry REST API.
    pub server_endpoint: String,
    /// Canonical public URL of this site.
    pub app_url: String,
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Staleness window for cached API reads, in seconds.
    #[serde(default = "default_cache_stale_secs")]
    pub cache_stale_secs: u64,
    /// Key used to sign flash-message cookies. A random key is generated
    /// when unset, which invalidates pending flashes across restarts.
    pub secret_key: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_cache_stale_secs() -> u64 {
    300
}

/// Minimum length for the flash-cookie signing key, in bytes.
/// `actix_web::cookie::Key::from` panics below this.
const MIN_SECRET_KEY_BYTES: usize = 64;

impl ServerConfig {
    /// Builds the configuration from environment variables.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()?;
        config.validated()
    }

    fn validated(self) -> Result<Self, config::ConfigError> {
        if let Some(secret) = &self.secret_key {
            if secret.len() < MIN_SECRET_KEY_BYTES {
                return Err(config::ConfigError::Message(format!(
                    "SECRET_KEY must be at least {MIN_SECRET_KEY_BYTES} bytes, got {}",
                    secret.len()
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: Option<&str>) -> ServerConfig {
        ServerConfig {
            server_endpoint: "http://localhost:5000/api".to_string(),
            app_url: "http://localhost:8080".to_string(),
            bind_address: default_bind_address(),
            cache_stale_secs: default_cache_stale_secs(),
            secret_key: secret.map(str::to_string),
        }
    }

    #[test]
    fn short_secret_key_is_rejected() {
        let err = config_with_secret(Some("too-short")).validated().unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn long_secret_key_and_absent_key_pass() {
        let long = "x".repeat(64);
        assert!(config_with_secret(Some(&long)).validated().is_ok());
        assert!(config_with_secret(None).validated().is_ok());
    }
}
