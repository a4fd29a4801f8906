//! Reservation status handling.
//!
//! The backend stores reservation status as free text and different server
//! versions emit different vocabularies ("active", "picked_up", "confirmed",
//! "completed", ...). The enum below is tolerant: unknown strings round-trip
//! through [`ReservationStatus::Other`] instead of failing deserialization.

use serde::{Deserialize, Serialize};

/// Status of a reservation, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    /// Reserved and awaiting pickup.
    #[default]
    Active,
    /// Collected by the customer.
    PickedUp,
    /// Confirmed by the store.
    Confirmed,
    /// Created but not yet confirmed.
    Pending,
    /// Fulfilled and closed out.
    Completed,
    /// Cancelled by the customer or the store.
    Cancelled,
    /// Any status string this client does not recognize.
    Other(String),
}

impl ReservationStatus {
    /// The canonical wire string for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::PickedUp => "picked_up",
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// Human-readable label for status badges.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Active => "Active".to_string(),
            Self::PickedUp => "Picked Up".to_string(),
            Self::Confirmed => "Confirmed".to_string(),
            Self::Pending => "Pending".to_string(),
            Self::Completed => "Completed".to_string(),
            Self::Cancelled => "Cancelled".to_string(),
            Self::Other(s) => s.clone(),
        }
    }

    /// Whether the store owner may mark this reservation as picked up.
    ///
    /// The transition is one-way: only `active` reservations qualify, and a
    /// `picked_up` reservation never goes back.
    #[must_use]
    pub const fn can_mark_picked_up(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Self::Active,
            "picked_up" => Self::PickedUp,
            "confirmed" => Self::Confirmed,
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_parse() {
        let status: ReservationStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, ReservationStatus::Active);

        let status: ReservationStatus = serde_json::from_str("\"picked_up\"").unwrap();
        assert_eq!(status, ReservationStatus::PickedUp);
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: ReservationStatus = serde_json::from_str("\"no_show\"").unwrap();
        assert_eq!(status, ReservationStatus::Other("no_show".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"no_show\"");
    }

    #[test]
    fn test_pickup_transition_is_one_way() {
        assert!(ReservationStatus::Active.can_mark_picked_up());
        assert!(!ReservationStatus::PickedUp.can_mark_picked_up());
        assert!(!ReservationStatus::Completed.can_mark_picked_up());
        assert!(!ReservationStatus::Other("no_show".to_string()).can_mark_picked_up());
    }

    #[test]
    fn test_labels() {
        assert_eq!(ReservationStatus::PickedUp.label(), "Picked Up");
        assert_eq!(
            ReservationStatus::Other("no_show".to_string()).label(),
            "no_show"
        );
    }
}
