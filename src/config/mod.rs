//! Configuration module for Spider-Recon
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use spider_recon::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling {} categories", config.categories.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CategoryEntry, ClassifierConfig, Config, OutputConfig, RendererConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
