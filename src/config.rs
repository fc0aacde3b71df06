use crate::models::DatePreset;
use dotenv::dotenv;
use std::env;
use thiserror::Error;
use url::Url;

#[derive(Debug)]
pub struct Config {
    /// Supplied per run; the engine never embeds a token constant.
    pub access_token: String,
    pub date_preset: DatePreset,
    /// Optional Graph base-URL override, mainly for pointing at a stub.
    pub base_url: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    MissingEnv(String),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Invalid date preset: {0}")]
    InvalidDatePreset(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let access_token = env::var("FB_ACCESS_TOKEN")
            .map_err(|_| ConfigError::MissingEnv("FB_ACCESS_TOKEN".to_string()))?;

        let date_preset = match env::var("DATE_PRESET") {
            Ok(raw) => raw.parse().map_err(ConfigError::InvalidDatePreset)?,
            Err(_) => DatePreset::default(),
        };

        let base_url = match env::var("FB_BASE_URL") {
            Ok(raw) => {
                Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;
                Some(raw)
            }
            Err(_) => None,
        };

        Ok(Self {
            access_token,
            date_preset,
            base_url,
        })
    }
}
