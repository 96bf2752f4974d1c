use std::path::PathBuf;
use std::{env, fmt, time::Duration};

use crate::domain::graph::{
    DEFAULT_DIALOG_URL, DEFAULT_GRAPH_URL, DEFAULT_GRAPH_VERSION, DEFAULT_REDIRECT_URI, GraphApi,
};

// Runtime settings read from the environment (and `.env` when present).

pub fn app_id() -> Option<String> {
    env::var("SIGNIN_APP_ID")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn graph_url() -> String {
    env::var("SIGNIN_GRAPH_URL").unwrap_or_else(|_| DEFAULT_GRAPH_URL.to_string())
}

pub fn dialog_url() -> String {
    env::var("SIGNIN_DIALOG_URL").unwrap_or_else(|_| DEFAULT_DIALOG_URL.to_string())
}

pub fn graph_version() -> String {
    env::var("SIGNIN_GRAPH_VERSION").unwrap_or_else(|_| DEFAULT_GRAPH_VERSION.to_string())
}

pub fn redirect_uri() -> String {
    env::var("SIGNIN_REDIRECT_URI").unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string())
}

pub fn scopes() -> Vec<String> {
    parse_scopes(&env::var("SIGNIN_SCOPES").unwrap_or_else(|_| "public_profile".to_string()))
}

pub fn preferences_path() -> PathBuf {
    env::var("SIGNIN_PREFERENCES_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".social-signin-session.toml"))
}

pub fn request_timeout() -> Duration {
    parse_timeout(env::var("SIGNIN_REQUEST_TIMEOUT_MS").ok().as_deref())
}

// GUI login is on unless explicitly disabled (headless hosts, CI).
pub fn gui_enabled() -> bool {
    parse_flag(env::var("SIGNIN_GUI").ok().as_deref(), true)
}

#[derive(Debug)]
pub enum ConfigError {
    MissingAppId,
    InvalidUrl {
        variable: &'static str,
        source: url::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingAppId => write!(f, "SIGNIN_APP_ID must be set"),
            ConfigError::InvalidUrl { variable, source } => {
                write!(f, "{variable} is not a valid url: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn graph_api() -> Result<GraphApi, ConfigError> {
    let app_id = app_id().ok_or(ConfigError::MissingAppId)?;

    Ok(GraphApi::new(app_id)
        .map_err(invalid_url("default endpoints"))?
        .with_version(graph_version())
        .with_graph_base(&graph_url())
        .map_err(invalid_url("SIGNIN_GRAPH_URL"))?
        .with_dialog_base(&dialog_url())
        .map_err(invalid_url("SIGNIN_DIALOG_URL"))?
        .with_redirect_uri(&redirect_uri())
        .map_err(invalid_url("SIGNIN_REDIRECT_URI"))?
        .with_scopes(scopes()))
}

fn invalid_url(variable: &'static str) -> impl Fn(url::ParseError) -> ConfigError {
    move |source| ConfigError::InvalidUrl { variable, source }
}

fn parse_scopes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|scope| !scope.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_timeout(value: Option<&str>) -> Duration {
    let millis = value
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(10_000);
    Duration::from_millis(millis)
}

fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|value| value.trim().to_ascii_lowercase()) {
        Some(value) if matches!(value.as_str(), "0" | "false" | "off" | "no") => false,
        Some(value) if matches!(value.as_str(), "1" | "true" | "on" | "yes") => true,
        _ => default,
    }
}
