//! Shared types, error model, and configuration for fivelist.
//!
//! This crate is the foundation depended on by all other fivelist crates.
//! It provides:
//! - [`FivelistError`] — the unified error type
//! - Domain types ([`Word`], [`WORD_LENGTH`])
//! - Configuration ([`AppConfig`], [`SourceOptions`], [`ListPaths`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_FALLBACK_URL, DEFAULT_PRIMARY_URL, EmbedSettings, GenerateSettings,
    ListPaths, ListsConfig, SourceConfig, SourceOptions, config_dir, config_file_path,
    init_config, init_config_at, load_config, load_config_from, validate_config,
};
pub use error::{FivelistError, Result};
pub use types::{WORD_LENGTH, Word};
