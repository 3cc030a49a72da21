//! Shared types, errors, and configuration for Haulbook.
//!
//! This crate provides common pieces used across all other crates:
//! - Typed IDs for type-safe references to parties and ledger records
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber setup for binaries

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
