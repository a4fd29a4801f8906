//! Savor Core - Shared types library.
//!
//! This crate provides common types used across all Savor components:
//! - `storefront` - Public-facing marketplace site and store-owner dashboard
//! - `integration-tests` - End-to-end tests against a stub backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. All entities
//! are created and owned by the remote Savor backend; these types mirror its
//! JSON wire format and add the small amount of client-side semantics the
//! front end needs (price formatting, status transitions, directions URLs).
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, reservation statuses, and coordinates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
