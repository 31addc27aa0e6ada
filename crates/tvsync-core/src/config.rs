//! Run configuration.
//!
//! Tunables (output path, retry bound, backoff unit, timeout, request headers)
//! come from an optional `config.toml`; the source URL and proxy come from the
//! environment so they can be injected as job-runner secrets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::fetch::FetchRequest;
use crate::retry::RetryPolicy;

/// Required: URL of the playlist to mirror.
pub const SOURCE_URL_VAR: &str = "TV_SOURCE_URL";
/// Optional: proxy used for both HTTP and HTTPS.
pub const PROXY_VAR: &str = "DOMESTIC_PROXY";

pub const DEFAULT_OUTPUT_PATH: &str = "tv/pllive.txt";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT: &str = "text/plain, */*";

/// Characters of the proxy URL shown in logs before masking.
const PROXY_VISIBLE_CHARS: usize = 10;

/// File-loadable tunables. Every field has a default, so a partial
/// `config.toml` only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the validated playlist is written (fully overwritten each run).
    pub output_path: PathBuf,
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Backoff unit in seconds; the wait after attempt `n` is `n * unit`.
    pub backoff_unit_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_attempts: 3,
            backoff_unit_secs: 5,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff_unit: Duration::from_secs(self.backoff_unit_secs),
        }
    }
}

/// Fatal configuration problems. These short-circuit a sync before any request is made.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("invalid source URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("source URL {0:?} has no host")]
    NoHost(String),
}

/// Fully resolved configuration for one sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub source_url: String,
    /// `scheme://host[:port]/` of the source URL, sent as `Referer`.
    pub referer: String,
    pub proxy: Option<String>,
    pub settings: Settings,
}

impl SyncConfig {
    /// Resolve from the process environment.
    pub fn from_env(settings: Settings) -> Result<Self, ConfigError> {
        Self::from_lookup(settings, |name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(settings: Settings, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_url = non_empty(lookup(SOURCE_URL_VAR))
            .ok_or(ConfigError::MissingVar(SOURCE_URL_VAR))?;
        let referer = derive_referer(&source_url)?;
        let proxy = non_empty(lookup(PROXY_VAR));
        Ok(Self {
            source_url,
            referer,
            proxy,
            settings,
        })
    }

    /// Request headers in the order they are sent.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), self.settings.user_agent.clone()),
            ("Accept".to_string(), self.settings.accept.clone()),
            ("Referer".to_string(), self.referer.clone()),
        ]
    }

    pub fn request(&self) -> FetchRequest {
        FetchRequest {
            url: self.source_url.clone(),
            headers: self.headers(),
            proxy: self.proxy.clone(),
            timeout: self.settings.timeout(),
        }
    }

    /// Proxy URL safe for logging: first few characters, rest replaced by `***`.
    pub fn masked_proxy(&self) -> Option<String> {
        self.proxy.as_deref().map(|p| {
            let visible: String = p.chars().take(PROXY_VISIBLE_CHARS).collect();
            format!("{}***", visible)
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `scheme://host[:port]/` for `source_url`. Default ports are omitted.
pub fn derive_referer(source_url: &str) -> Result<String, ConfigError> {
    let url = Url::parse(source_url).map_err(|source| ConfigError::InvalidUrl {
        url: source_url.to_string(),
        source,
    })?;
    let host = url
        .host_str()
        .ok_or_else(|| ConfigError::NoHost(source_url.to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}/", url.scheme(), host, port),
        None => format!("{}://{}/", url.scheme(), host),
    })
}

/// Default settings file: `~/.config/tvsync/config.toml`, if it exists.
pub fn default_config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tvsync")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

pub fn parse_settings(data: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(data).context("invalid settings TOML")?;
    Ok(settings)
}

/// Load settings from `path`, or from the default location when `path` is None.
/// A missing default file (or no usable home directory) yields built-in defaults;
/// a missing explicit file is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Ok(Some(p)) => p,
            Ok(None) => return Ok(Settings::default()),
            Err(e) => {
                tracing::debug!("no XDG config dir ({:#}), using built-in settings", e);
                return Ok(Settings::default());
            }
        },
    };
    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings = parse_settings(&data)?;
    tracing::debug!("loaded settings from {}", path.display());
    Ok(settings)
}
