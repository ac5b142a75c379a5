//! # Engine Module
//!
//! Validated configuration, error reporting and the computational tasks that turn response
//! histories into intensity measures and rotated spectra.
//!
//! - **Configuration** ([`config`]) - Filter, conditioning, response and RotDxx settings with builders
//! - **Error Handling** ([`error`]) - The aggregate error type returned by workflows
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for long-running batches
//!
//! The tasks themselves are internal; they are reached through [`crate::workflows`].

pub mod config;
pub mod error;
pub mod progress;
pub(crate) mod tasks;
