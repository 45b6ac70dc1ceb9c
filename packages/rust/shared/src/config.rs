//! Application configuration for fivelist.
//!
//! User config lives at `~/.fivelist/fivelist.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FivelistError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "fivelist.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".fivelist";

/// Word-frequency list tried first.
pub const DEFAULT_PRIMARY_URL: &str = "https://raw.githubusercontent.com/first20hours/google-10000-english/master/google-10000-english-usa-no-swears.txt";

/// Word-frequency list tried once if the primary fails.
pub const DEFAULT_FALLBACK_URL: &str = "https://raw.githubusercontent.com/first20hours/google-10000-english/master/google-10000-english-no-swears.txt";

// ---------------------------------------------------------------------------
// Config structs (matching fivelist.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote word-frequency source.
    #[serde(default)]
    pub source: SourceConfig,

    /// Location of the word list files.
    #[serde(default)]
    pub lists: ListsConfig,

    /// List generator settings.
    #[serde(default)]
    pub generate: GenerateSettings,

    /// Embedded data generator settings.
    #[serde(default)]
    pub embed: EmbedSettings,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL fetched first.
    #[serde(default = "default_primary_url")]
    pub primary_url: String,

    /// URL fetched once if the primary fails.
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            fallback_url: default_fallback_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_primary_url() -> String {
    DEFAULT_PRIMARY_URL.into()
}
fn default_fallback_url() -> String {
    DEFAULT_FALLBACK_URL.into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[lists]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsConfig {
    /// Directory holding both list files, relative to the working directory.
    #[serde(default = "default_lists_dir")]
    pub dir: String,

    /// Full accepted-word list file name.
    #[serde(default = "default_all_file")]
    pub all_file: String,

    /// Solution-word list file name.
    #[serde(default = "default_solution_file")]
    pub solution_file: String,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            dir: default_lists_dir(),
            all_file: default_all_file(),
            solution_file: default_solution_file(),
        }
    }
}

fn default_lists_dir() -> String {
    "lists".into()
}
fn default_all_file() -> String {
    "ALL.TXT".into()
}
fn default_solution_file() -> String {
    "SOLUTION.TXT".into()
}

/// `[generate]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSettings {
    /// Maximum number of words written by the generator.
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
        }
    }
}

fn default_max_words() -> usize {
    2500
}

/// `[embed]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedSettings {
    /// Path of the generated C source.
    #[serde(default = "default_embed_output")]
    pub output: String,

    /// Bloom filter size in bits (positive multiple of 8).
    #[serde(default = "default_bloom_bits")]
    pub bloom_bits: u32,

    /// Number of hash functions per word.
    #[serde(default = "default_bloom_k")]
    pub bloom_k: u32,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            output: default_embed_output(),
            bloom_bits: default_bloom_bits(),
            bloom_k: default_bloom_k(),
        }
    }
}

fn default_embed_output() -> String {
    "wordlist_data.c".into()
}
fn default_bloom_bits() -> u32 {
    32 * 1024 * 8
}
fn default_bloom_k() -> u32 {
    7
}

// ---------------------------------------------------------------------------
// Runtime config (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime options for fetching the word source.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub primary_url: String,
    pub fallback_url: String,
    pub timeout_secs: u64,
}

impl From<&AppConfig> for SourceOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            primary_url: config.source.primary_url.clone(),
            fallback_url: config.source.fallback_url.clone(),
            timeout_secs: config.source.timeout_secs,
        }
    }
}

/// Resolved on-disk locations of the two word lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPaths {
    /// Full accepted-word list (`ALL.TXT`).
    pub all: PathBuf,
    /// Solution-word list (`SOLUTION.TXT`).
    pub solution: PathBuf,
}

impl From<&AppConfig> for ListPaths {
    fn from(config: &AppConfig) -> Self {
        let dir = Path::new(&config.lists.dir);
        Self {
            all: dir.join(&config.lists.all_file),
            solution: dir.join(&config.lists.solution_file),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.fivelist/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| FivelistError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.fivelist/fivelist.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FivelistError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        FivelistError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_at(&config_file_path()?)
}

/// Write a default config file to `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<PathBuf> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| FivelistError::io(dir, e))?;
    }

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| FivelistError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| FivelistError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}

/// Check source URLs and bloom filter parameters.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    for (key, value) in [
        ("source.primary_url", &config.source.primary_url),
        ("source.fallback_url", &config.source.fallback_url),
    ] {
        Url::parse(value)
            .map_err(|e| FivelistError::config(format!("{key} '{value}' is not a valid URL: {e}")))?;
    }

    let embed = &config.embed;
    if embed.bloom_bits == 0 || embed.bloom_bits % 8 != 0 {
        return Err(FivelistError::config(format!(
            "embed.bloom_bits must be a positive multiple of 8, got {}",
            embed.bloom_bits
        )));
    }
    if embed.bloom_k == 0 {
        return Err(FivelistError::config("embed.bloom_k must be at least 1"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("primary_url"));
        assert!(toml_str.contains("SOLUTION.TXT"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.generate.max_words, 2500);
        assert_eq!(parsed.embed.bloom_bits, 262_144);
        assert_eq!(parsed.embed.bloom_k, 7);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[generate]
max_words = 100

[lists]
dir = "/tmp/words"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.generate.max_words, 100);
        assert_eq!(config.lists.all_file, "ALL.TXT");
        assert_eq!(config.source.fallback_url, DEFAULT_FALLBACK_URL);
    }

    #[test]
    fn list_paths_from_app_config() {
        let paths = ListPaths::from(&AppConfig::default());
        assert_eq!(paths.all, Path::new("lists").join("ALL.TXT"));
        assert_eq!(paths.solution, Path::new("lists").join("SOLUTION.TXT"));
    }

    #[test]
    fn source_options_from_app_config() {
        let opts = SourceOptions::from(&AppConfig::default());
        assert_eq!(opts.primary_url, DEFAULT_PRIMARY_URL);
        assert_eq!(opts.timeout_secs, 30);
    }

    #[test]
    fn rejects_invalid_url() {
        let mut config = AppConfig::default();
        config.source.fallback_url = "not a url".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("source.fallback_url"));
    }

    #[test]
    fn rejects_bad_bloom_parameters() {
        let mut config = AppConfig::default();
        config.embed.bloom_bits = 1001;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.embed.bloom_k = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn init_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("fivelist-config-test-{}", uuid::Uuid::now_v7()))
            .join(CONFIG_FILE_NAME);

        let written = init_config_at(&path).expect("init config");
        let loaded = load_config_from(&written).expect("load config");
        assert_eq!(loaded.lists.dir, "lists");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
