//! Cache types for backend API responses.

use crate::backend::types::{DistanceResult, HomePageData};

/// Cached value types.
///
/// Home data is keyed by rounded coordinates; distance lookups by the full
/// origin/destination pair. Mutable state (reservations) is never cached here.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Home(Box<HomePageData>),
    Distance(DistanceResult),
}
