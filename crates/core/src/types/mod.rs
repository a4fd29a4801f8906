//! Core types for Savor.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod geo;
pub mod id;
pub mod price;
pub mod status;

pub use geo::Coordinates;
pub use id::*;
pub use price::Price;
pub use status::ReservationStatus;
