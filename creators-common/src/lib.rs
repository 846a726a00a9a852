//! Common types and utilities shared across the Scrape Creators crates.
//!
//! This crate defines the shared error type and observability helpers used
//! throughout the workspace. It stays dependency-light so that every crate can
//! depend on it.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`CreatorsError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use creators_common::CreatorsError;
//!
//! let err = CreatorsError::Config("api.base_url is empty".into());
//! assert_eq!(err.to_string(), "Configuration error: api.base_url is empty");
//! ```
use std::path::PathBuf;

pub mod observability;

/// Error types used by the driver and configuration layers.
#[derive(thiserror::Error, Debug)]
pub enum CreatorsError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A scrape call (or the batch around it) failed.
    #[error("Scrape error: {0}")]
    Scrape(#[from] anyhow::Error),

    /// Results could not be written to disk.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Results could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenient alias for results that use [`CreatorsError`].
pub type Result<T> = std::result::Result<T, CreatorsError>;
