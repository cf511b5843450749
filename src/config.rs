use std::time::Duration;

use crate::errors::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const API_BASE_URL_VAR: &str = "DOC_CHAT_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "DOC_CHAT_REQUEST_TIMEOUT_SECS";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub api_base_url: String,
    /// `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_string(), request_timeout: None }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Result<Self, AppError> {
        Ok(Self { api_base_url: normalize_base_url(api_base_url)?, request_timeout: None })
    }

    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_base_url = match lookup(API_BASE_URL_VAR) {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_timeout(&raw)?),
            _ => None,
        };

        Ok(Self { api_base_url, request_timeout })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(AppError::invalid_config(
            API_BASE_URL_VAR,
            format!("expected an http(s) URL, got '{raw}'"),
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(AppError::invalid_config(
            REQUEST_TIMEOUT_VAR,
            format!("expected a positive number of seconds, got '{raw}'"),
        )),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}
