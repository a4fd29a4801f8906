//! Geographic coordinates and external map links.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Google Maps web URL for driving directions from `self` to `destination`.
    ///
    /// Uses the documented Maps URL scheme; the link is meant to be opened
    /// externally (new tab / maps app), not embedded.
    #[must_use]
    pub fn directions_url(&self, destination: &Self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode=driving",
            self.latitude, self.longitude, destination.latitude, destination.longitude
        )
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_url() {
        let user = Coordinates::new(21.0287, 105.8514);
        let store = Coordinates::new(21.0337, 105.814);
        assert_eq!(
            user.directions_url(&store),
            "https://www.google.com/maps/dir/?api=1&origin=21.0287,105.8514&destination=21.0337,105.814&travelmode=driving"
        );
    }

    #[test]
    fn test_display() {
        let c = Coordinates::new(37.7749, -122.4194);
        assert_eq!(c.to_string(), "37.7749,-122.4194");
    }
}
