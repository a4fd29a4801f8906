//! Domain models for the storefront.

pub mod session;
