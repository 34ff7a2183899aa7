use serde::Deserialize;
use std::{
    env, fmt,
    path::{Path, PathBuf},
};

// Runtime configuration: environment first, then the optional TOML file, then defaults.

pub const DEFAULT_CONFIG_FILE: &str = "brand_dashboard.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_base_url: Option<String>,
    pub session_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // Prefix for relative API paths; only required by commands that hit the API.
    pub api_base_url: Option<String>,
    pub session_file: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingApiBase,
    InvalidApiBase { value: String, reason: String },
    ReadFile { path: PathBuf, reason: String },
    ParseFile { path: PathBuf, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiBase => {
                write!(f, "BRAND_API_BASE must be set (or api_base_url in {DEFAULT_CONFIG_FILE})")
            }
            ConfigError::InvalidApiBase { value, reason } => {
                write!(f, "invalid API base URL {value:?}: {reason}")
            }
            ConfigError::ReadFile { path, reason } => {
                write!(f, "failed to read config {}: {reason}", path.display())
            }
            ConfigError::ParseFile { path, reason } => {
                write!(f, "failed to parse config {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    pub fn require_api_base(&self) -> Result<&str, ConfigError> {
        self.api_base_url
            .as_deref()
            .ok_or(ConfigError::MissingApiBase)
    }
}

pub fn load() -> Result<Settings, ConfigError> {
    let lookup = |key: &str| env::var(key).ok();
    let file = match lookup("BRAND_DASHBOARD_CONFIG") {
        Some(path) if !path.is_empty() => load_file(Path::new(&path), true)?,
        _ => load_file(Path::new(DEFAULT_CONFIG_FILE), false)?,
    };
    resolve(file, lookup)
}

// A missing default file is fine; a missing explicitly named file is not.
pub fn load_file(path: &Path, required: bool) -> Result<FileConfig, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FileConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::ReadFile {
                path: path.to_path_buf(),
                reason: err.to_string(),
            });
        }
    };

    toml::from_str(&raw).map_err(|err| ConfigError::ParseFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

pub fn resolve(
    file: FileConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let api_base_url = match non_empty(lookup("BRAND_API_BASE")).or(non_empty(file.api_base_url)) {
        Some(value) => Some(validate_api_base(&value)?),
        None => None,
    };

    let session_file = non_empty(lookup("BRAND_SESSION_FILE"))
        .map(PathBuf::from)
        .or(file.session_file)
        .unwrap_or_else(default_session_file);

    Ok(Settings {
        api_base_url,
        session_file,
    })
}

fn validate_api_base(value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    let parsed = url::Url::parse(value).map_err(|err| ConfigError::InvalidApiBase {
        value: value.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiBase {
            value: value.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }

    // Paths are appended verbatim, so a trailing slash would double up.
    Ok(value.trim_end_matches('/').to_string())
}

pub fn default_session_file() -> PathBuf {
    directories::ProjectDirs::from("", "", "brand_dashboard")
        .map(|dirs| dirs.data_local_dir().join("session.json"))
        .unwrap_or_else(|| PathBuf::from(".brand_dashboard").join("session.json"))
}
