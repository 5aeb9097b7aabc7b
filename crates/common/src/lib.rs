//! Shared configuration, deadline, and error handling for Artpost
//!
//! This crate provides common functionality used by every pipeline step:
//! - Credential and settings loading (`app.env` file with environment fallback)
//! - The run-wide `Deadline` threaded through every network call
//! - The `ApiError` taxonomy shared by all HTTP clients
//! - A single request/response exchange helper bound to the deadline

pub mod config;
pub mod deadline;
pub mod error;
pub mod http;

pub use config::{Config, ConfigError, Credentials};
pub use deadline::Deadline;
pub use error::{ApiError, Result};
pub use http::{execute, HttpReply};
