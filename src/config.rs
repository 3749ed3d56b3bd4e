// Configuration loading and parsing (concierge.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::protocol::Coordinates;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub studio: StudioConfig,
    pub gateway: GatewayConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// concierge.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire concierge.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConciergeFile {
    studio: StudioConfig,
    gateway: GatewayConfig,
}

/// Brand identity fed into the persona prompt and the reviews lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct StudioConfig {
    pub name: String,
    /// Name used for the maps-grounded review search. Defaults to `name`
    /// when omitted (they differ only if the maps listing is registered
    /// under a different trading name).
    #[serde(default)]
    pub business_name: Option<String>,
    /// Optional retrieval bias for the maps search tool.
    #[serde(default)]
    pub location: Option<Coordinates>,
}

impl StudioConfig {
    /// The name to search the maps listing under.
    pub fn listing_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or(&self.name)
    }
}

/// Upstream endpoint settings: model identifiers and sampling parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the generative endpoint. Overridable so tests can point
    /// the gateway at a local stub.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub text_model: String,
    pub image_model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub aspect_ratio: String,
}

fn default_endpoint() -> String {
    crate::gateway::client::DEFAULT_ENDPOINT.to_string()
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub gemini_api_key: Option<String>,
}

/// Environment variable that overrides the credentials file.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Resolve the effective API key: the environment wins over the file, and
/// blank values count as absent.
fn resolve_api_key(file_key: Option<String>, env_key: Option<String>) -> Option<String> {
    env_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| file_key.filter(|k| !k.trim().is_empty()))
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/concierge.toml` and
/// (optionally) `config/credentials.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- concierge.toml (required) ---
    let concierge_path = config_dir.join("concierge.toml");
    let concierge_text = read_file(&concierge_path)?;
    let concierge_file: ConciergeFile =
        toml::from_str(&concierge_text).map_err(|e| ConfigError::ParseError {
            path: concierge_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let mut credentials: CredentialsConfig = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    credentials.gemini_api_key = resolve_api_key(
        credentials.gemini_api_key.take(),
        std::env::var(API_KEY_ENV).ok(),
    );

    let config = Config {
        studio: concierge_file.studio,
        gateway: concierge_file.gateway,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/` from `defaults/`: every file missing from `config/` is
/// copied over, `.example` templates are never copied, and files the
/// operator already edited are left untouched. Returns the copied paths.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    let copy_err = |message: String| ConfigError::DefaultsCopyError { message };

    if !defaults_dir.exists() {
        // An already-seeded config/ can live without defaults/; having
        // neither means we are not in a project checkout at all.
        if !config_dir.exists() {
            return Err(copy_err(format!(
                "found neither defaults/ nor config/ under {}; \
                 run the concierge from the project root",
                base_dir.display()
            )));
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_err(format!("failed to create config directory: {e}")))?;

    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_err(format!("failed to read defaults directory: {e}")))?;

    let mut copied = Vec::new();

    for entry in entries {
        let entry =
            entry.map_err(|e| copy_err(format!("failed to read defaults entry: {e}")))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // Templates (credentials.toml.example) are copied by hand, not here.
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        // create_new keeps this copy race-free: whoever creates the file
        // first wins, everyone else sees AlreadyExists and moves on.
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path)
                    .map_err(|e| copy_err(format!("failed to read {}: {e}", path.display())))?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    copy_err(format!("failed to write {}: {e}", target.display()))
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(copy_err(format!(
                    "failed to create {}: {e}",
                    target.display()
                )));
            }
        }
    }

    Ok(copied)
}

/// Load config relative to the current working directory, seeding missing
/// files from `defaults/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.studio.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "studio.name".into(),
            message: "must not be empty".into(),
        });
    }

    let gateway = &config.gateway;

    let model_fields: &[(&str, &str)] = &[
        ("gateway.endpoint", &gateway.endpoint),
        ("gateway.text_model", &gateway.text_model),
        ("gateway.image_model", &gateway.image_model),
        ("gateway.aspect_ratio", &gateway.aspect_ratio),
    ];
    for (name, val) in model_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let temp = gateway.temperature;
    if !(0.0..=2.0).contains(&temp) {
        return Err(ConfigError::ValidationError {
            field: "gateway.temperature".into(),
            message: format!("must be between 0.0 and 2.0 inclusive, got {temp}"),
        });
    }

    let top_p = gateway.top_p;
    if !(0.0..=1.0).contains(&top_p) {
        return Err(ConfigError::ValidationError {
            field: "gateway.top_p".into(),
            message: format!("must be between 0.0 and 1.0 inclusive, got {top_p}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
