//! Configuration loading
//!
//! Settings are resolved per key with the following priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the service logs a warning and starts
//! with defaults. A TOML file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "IDEA_CHECKER_CONFIG";

/// Default admin password used when none is configured
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Brave Search rejects `count` above 20
pub const MAX_RESULTS_PER_QUERY: u32 = 20;

/// Upper bound on planned queries actually searched
pub const MAX_QUERIES: usize = 10;

/// Upper bound on relevant results sent to the uniqueness analysis
pub const MAX_ANALYSIS_RESULTS: usize = 5;

/// On-disk TOML configuration. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub brave_api_key: Option<String>,
    pub admin_password: Option<String>,
    pub log_level: Option<String>,
    #[serde(default)]
    pub pipeline: PipelineToml,
}

/// `[pipeline]` table of the TOML config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineToml {
    pub max_queries: Option<usize>,
    pub results_per_query: Option<u32>,
    pub max_analysis_results: Option<usize>,
    pub search_concurrency: Option<usize>,
    pub require_product_signals: Option<bool>,
    pub search_requests_per_second: Option<u32>,
}

/// Tunables for the uniqueness pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Planned queries beyond this count are ignored
    pub max_queries: usize,
    /// Results requested from the search API per query (≤20)
    pub results_per_query: u32,
    /// Relevant results handed to the uniqueness analysis prompt
    pub max_analysis_results: usize,
    /// Search calls in flight at once (1 = sequential)
    pub search_concurrency: usize,
    /// Also require product/company signals when filtering relevant results
    pub require_product_signals: bool,
    /// Client-side rate limit for the search API
    pub search_requests_per_second: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_queries: 10,
            results_per_query: 10,
            max_analysis_results: 5,
            search_concurrency: 1,
            require_product_signals: true,
            search_requests_per_second: 1,
        }
    }
}

impl PipelineSettings {
    fn merged(toml: &PipelineToml) -> Self {
        let defaults = Self::default();
        Self {
            max_queries: toml
                .max_queries
                .unwrap_or(defaults.max_queries)
                .clamp(1, MAX_QUERIES),
            results_per_query: toml
                .results_per_query
                .unwrap_or(defaults.results_per_query)
                .clamp(1, MAX_RESULTS_PER_QUERY),
            max_analysis_results: toml
                .max_analysis_results
                .unwrap_or(defaults.max_analysis_results)
                .clamp(1, MAX_ANALYSIS_RESULTS),
            search_concurrency: toml
                .search_concurrency
                .unwrap_or(defaults.search_concurrency)
                .max(1),
            require_product_signals: toml
                .require_product_signals
                .unwrap_or(defaults.require_product_signals),
            search_requests_per_second: toml
                .search_requests_per_second
                .unwrap_or(defaults.search_requests_per_second)
                .max(1),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub brave_api_key: Option<String>,
    pub admin_password: String,
    pub log_level: String,
    pub pipeline: PipelineSettings,
}

impl ServiceConfig {
    /// Resolve configuration from the process environment and config file
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let toml = match locate_config_file(cli, &env) {
            Some(path) => load_toml_config(&path)?,
            None => None,
        };
        Ok(Self::from_sources(cli, &env, toml.unwrap_or_default()))
    }

    /// Merge the layers; `env` looks up an environment variable by name
    pub fn from_sources(
        cli: &CliOverrides,
        env: &dyn Fn(&str) -> Option<String>,
        toml: TomlConfig,
    ) -> Self {
        let env_nonempty = |key: &str| env(key).filter(|v| is_valid_key(v));

        let port = cli
            .port
            .or_else(|| match env_nonempty("IDEA_CHECKER_PORT") {
                Some(raw) => match raw.trim().parse::<u16>() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        warn!("Ignoring invalid IDEA_CHECKER_PORT value: {}", raw);
                        None
                    }
                },
                None => None,
            })
            .or(toml.port)
            .unwrap_or(DEFAULT_PORT);

        let admin_password = env_nonempty("ADMIN_PASSWORD")
            .or(toml.admin_password.filter(|v| is_valid_key(v)))
            .unwrap_or_else(|| {
                warn!("No admin password configured; using the built-in default");
                DEFAULT_ADMIN_PASSWORD.to_string()
            });

        Self {
            bind_address: cli
                .bind_address
                .clone()
                .or_else(|| env_nonempty("IDEA_CHECKER_BIND"))
                .or(toml.bind_address)
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            database_path: cli
                .database_path
                .clone()
                .or_else(|| env_nonempty("IDEA_CHECKER_DATABASE").map(PathBuf::from))
                .or(toml.database_path)
                .unwrap_or_else(default_database_path),
            gemini_api_key: env_nonempty("GEMINI_API_KEY")
                .or(toml.gemini_api_key.filter(|v| is_valid_key(v))),
            gemini_model: env_nonempty("GEMINI_MODEL")
                .or(toml.gemini_model)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            brave_api_key: env_nonempty("BRAVE_API_KEY")
                .or(toml.brave_api_key.filter(|v| is_valid_key(v))),
            admin_password,
            log_level: toml
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            pipeline: PipelineSettings::merged(&toml.pipeline),
        }
    }

    /// Socket address string for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Log which external API keys are missing
    pub fn warn_missing_keys(&self) {
        if self.gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY not configured; language model calls will use fallbacks");
        }
        if self.brave_api_key.is_none() {
            warn!("BRAVE_API_KEY not configured; web searches will return no results");
        }
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Find the TOML config file, if any
///
/// Explicit paths (CLI, then ENV) are returned even when missing so that the
/// loader can warn about them; the platform default is only used if present.
fn locate_config_file(
    cli: &CliOverrides,
    env: &dyn Fn(&str) -> Option<String>,
) -> Option<PathBuf> {
    if let Some(path) = &cli.config_path {
        return Some(path.clone());
    }
    if let Some(path) = env(CONFIG_PATH_ENV).filter(|v| is_valid_key(v)) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|d| d.join("idea-checker").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load a TOML config file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        warn!(
            "Config file not found: {} (continuing with defaults)",
            path.display()
        );
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    info!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("idea-checker"))
        .unwrap_or_else(|| PathBuf::from("./idea_checker_data"))
        .join("ideas.db")
}
