//! Shared items API domain primitives.
//!
//! This crate owns the item record, request/response contracts, and the
//! attribute layout used by the item table. It intentionally excludes AWS SDK
//! and Lambda runtime concerns.

pub mod contract;
pub mod item_attributes;
