//! Core functionality module
//!
//! This module contains the core business logic for the photo sorting
//! tool: configuration management, error handling, the cell grammars,
//! the settings-sheet resolver and the run summary.
//!
//! # Submodules
//!
//! - `config` - Configuration loading, saving, and management
//! - `error` - Error types and result aliases
//! - `pattern` - Simple and complex cell grammars
//! - `settings` - Settings-sheet resolver
//! - `summary` - Run summary aggregation

pub mod config;
pub mod error;
pub mod pattern;
pub mod settings;
pub mod summary;
