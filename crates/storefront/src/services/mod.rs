//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `reservation_cache` - Session-backed reservation cache that keeps the
//!   reservations screen instant and survives backend hiccups

pub mod reservation_cache;
