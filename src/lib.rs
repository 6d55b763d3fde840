//! ldg - manage linkding bookmarks from the command line
//!
//! This crate provides the core functionality for the `ldg` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`api`] - The remote collection port and the linkding REST client
//! - [`interchange`] - Format detection, JSON/HTML/CSV codecs, and the
//!   reconciliation engine
//! - [`config`] - Credential persistence and resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod interchange;

pub use error::{Error, Result};
