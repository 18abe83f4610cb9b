//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

mod cli;

pub use cli::*;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "mealdesk";
const ENV_PREFIX: &str = "MEALDESK";
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1/";
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_FILE: &str = ".mealdesk/session.json";
const DEFAULT_CACHE_KEEP_UNUSED_SECS: u64 = 60;
const DEFAULT_CACHE_GC_INTERVAL_SECS: u64 = 30;
/// Cash denominations in minor units, largest first.
pub(crate) const DEFAULT_DENOMINATIONS: [i64; 12] =
    [10_000, 5_000, 2_000, 1_000, 500, 200, 100, 50, 25, 10, 5, 1];

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
    pub cache: CacheSettings,
    pub pos: PosSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Where the signed-in session is mirrored; `None` keeps it in memory.
    pub session_file: Option<PathBuf>,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub keep_unused: Option<Duration>,
    pub gc_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct PosSettings {
    pub denominations: Vec<i64>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("pos.denominations")
            .try_parsing(true),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    auth: RawAuthSettings,
    logging: RawLoggingSettings,
    cache: RawCacheSettings,
    pos: RawPosSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAuthSettings {
    session_file: Option<PathBuf>,
    token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    keep_unused_seconds: Option<u64>,
    gc_interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPosSettings {
    denominations: Option<Vec<i64>>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.api_base_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.api_timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        if let Some(path) = overrides.session_file.as_ref() {
            self.auth.session_file = Some(path.clone());
        }
        if let Some(token) = overrides.token.as_ref() {
            self.auth.token = Some(token.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(seconds) = overrides.cache_keep_unused_seconds {
            self.cache.keep_unused_seconds = Some(seconds);
        }
        if let Some(seconds) = overrides.cache_gc_interval_seconds {
            self.cache.gc_interval_seconds = Some(seconds);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            auth,
            logging,
            cache,
            pos,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            auth: build_auth_settings(auth),
            logging: build_logging_settings(logging)?,
            cache: build_cache_settings(cache)?,
            pos: build_pos_settings(pos)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            "scheme must be http or https",
        ));
    }

    let timeout_secs = api.timeout_seconds.unwrap_or(DEFAULT_API_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "api.timeout_seconds",
            "must be greater than zero",
        ));
    }

    let user_agent = api
        .user_agent
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| concat!("mealdesk/", env!("CARGO_PKG_VERSION")).to_string());

    Ok(ApiSettings {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        user_agent,
    })
}

fn build_auth_settings(auth: RawAuthSettings) -> AuthSettings {
    // An explicitly empty path disables persistence.
    let session_file = match auth.session_file {
        Some(path) if path.as_os_str().is_empty() => None,
        Some(path) => Some(path),
        None => Some(PathBuf::from(DEFAULT_SESSION_FILE)),
    };
    let token = auth.token.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    AuthSettings {
        session_file,
        token,
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let keep_unused_secs = cache
        .keep_unused_seconds
        .unwrap_or(DEFAULT_CACHE_KEEP_UNUSED_SECS);
    let keep_unused = (keep_unused_secs > 0).then(|| Duration::from_secs(keep_unused_secs));

    let gc_interval_secs = cache
        .gc_interval_seconds
        .unwrap_or(DEFAULT_CACHE_GC_INTERVAL_SECS);
    if gc_interval_secs == 0 {
        return Err(LoadError::invalid(
            "cache.gc_interval_seconds",
            "must be greater than zero",
        ));
    }

    Ok(CacheSettings {
        keep_unused,
        gc_interval: Duration::from_secs(gc_interval_secs),
    })
}

fn build_pos_settings(pos: RawPosSettings) -> Result<PosSettings, LoadError> {
    let mut denominations = pos
        .denominations
        .unwrap_or_else(|| DEFAULT_DENOMINATIONS.to_vec());
    if denominations.is_empty() {
        return Err(LoadError::invalid(
            "pos.denominations",
            "at least one denomination is required",
        ));
    }
    if let Some(bad) = denominations.iter().find(|value| **value <= 0) {
        return Err(LoadError::invalid(
            "pos.denominations",
            format!("denomination {bad} must be greater than zero"),
        ));
    }
    denominations.sort_unstable_by(|a, b| b.cmp(a));
    denominations.dedup();

    Ok(PosSettings { denominations })
}
