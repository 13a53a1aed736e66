//! AWS-oriented adapters and handlers for the items API.
//!
//! This crate owns runtime integration details (Lambda entry points, the API
//! Gateway proxy envelope, and item store adapters). Domain contracts live in
//! `items_api_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
