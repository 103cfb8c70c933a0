//! # azure-compute-core
//!
//! Core types and utilities for working with the Azure Service Management API.
//!
//! This crate provides the shared error type, client configuration, and the HTTP
//! transport used by the resource-specific bindings.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`uuid`] - Strongly-typed subscription identifier
//! - [`config`] - Configuration structures for Azure Compute clients
//! - [`client`] - HTTP client utilities and retry logic
//! - [`query`] - Query parameter helper

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod uuid;

// Re-export commonly used types
pub use error::{Error, Result};
