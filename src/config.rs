use std::{env, time::Duration};

use url::Url;

pub const DEFAULT_API_URL: &str = "https://storied-bubblegum-a94e6a.netlify.app";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            name,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub port: u16,
    /// Host launch data; its presence means the app runs embedded.
    pub init_data: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("HABITS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url =
            Url::parse(&raw_url).map_err(|err| ConfigError::invalid("HABITS_API_URL", err))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid("HABITS_API_URL", "scheme must be http or https"));
        }

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|err| ConfigError::invalid("PORT", err))?,
            None => DEFAULT_PORT,
        };

        let init_data = lookup("MINIAPP_INIT_DATA").filter(|value| !value.trim().is_empty());

        let request_timeout = match lookup("HABITS_REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .parse::<u64>()
                    .map_err(|err| ConfigError::invalid("HABITS_REQUEST_TIMEOUT_SECS", err))?;
                if secs == 0 {
                    return Err(ConfigError::invalid(
                        "HABITS_REQUEST_TIMEOUT_SECS",
                        "must be greater than zero",
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url,
            port,
            init_data,
            request_timeout,
        })
    }

    /// Base URL without the trailing slash `Url` always adds to bare hosts.
    pub fn api_base(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }
}
