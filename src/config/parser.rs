use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Values supplied on the command line or through the environment
///
/// These take precedence over anything read from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub start_url: Option<String>,
    pub max_urls: Option<usize>,
    pub results_path: Option<PathBuf>,
}

/// Loads and parses a configuration file from the given path
///
/// Missing sections and keys fall back to their defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitemap_audit::config::load_config;
///
/// let config = load_config(Path::new("audit.toml")).unwrap();
/// println!("Max URLs: {}", config.crawl.max_urls);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Builds the effective configuration for a run
///
/// Reads `path` when given (defaults otherwise), applies `overrides` on top,
/// and validates the result.
///
/// # Returns
///
/// * `Ok((Config, Option<String>))` - The configuration and, when a file was read, its hash
/// * `Err(ConfigError)` - Failed to load or validate
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<(Config, Option<String>), ConfigError> {
    let (mut config, hash) = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            (config, Some(compute_config_hash(path)?))
        }
        None => (Config::default(), None),
    };

    config.apply_overrides(overrides);
    validate(&config)?;

    Ok((config, hash))
}

impl Config {
    /// Applies command line / environment overrides in place
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(start_url) = overrides.start_url {
            self.crawl.start_url = start_url;
        }
        if let Some(max_urls) = overrides.max_urls {
            self.crawl.max_urls = max_urls;
        }
        if let Some(results_path) = overrides.results_path {
            self.output.results_path = results_path.to_string_lossy().into_owned();
        }
    }
}
