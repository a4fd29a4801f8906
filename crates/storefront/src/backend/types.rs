//! Wire types for the Savor backend's JSON API.
//!
//! Field names are camelCase on the wire (`is_selling` is the one snake_case
//! holdout - a backend quirk, preserved here). Entities are plain records
//! mirrored from the backend's responses; the front end never enforces
//! invariants beyond optional-field presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use savor_core::{Coordinates, Price, ReservationId, ReservationStatus, StoreId};

// =============================================================================
// Discovery Types
// =============================================================================

/// A store offering surprise bags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    /// Display label for the pickup window (e.g., "Today 17:00 - 19:00").
    #[serde(default)]
    pub pick_up_time: Option<String>,
    /// Pre-formatted distance label from the backend (e.g., "1.2 km").
    #[serde(default)]
    pub distance: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub discounted_price: Option<Price>,
    #[serde(default)]
    pub background_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub items_left: Option<i64>,
    #[serde(default)]
    pub bags_available: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "is_selling", default)]
    pub is_selling: bool,
    #[serde(default)]
    pub google_maps_url: Option<String>,
}

impl Store {
    /// The price a guest actually pays: discounted price when present,
    /// otherwise the base price.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.discounted_price.unwrap_or(self.price)
    }

    /// The strikethrough price: original price when present, otherwise the
    /// base price.
    #[must_use]
    pub fn full_price(&self) -> Price {
        self.original_price.unwrap_or(self.price)
    }

    /// Store coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Case-insensitive substring match over title and description.
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle_lower))
    }
}

/// User location summary as resolved by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    pub city: String,
    pub distance: f64,
}

/// Aggregate payload for the home/discovery screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageData {
    #[serde(default)]
    pub email_verified: bool,
    pub user_location: UserLocation,
    pub recommended_stores: Vec<Store>,
    pub pick_up_tomorrow: Vec<Store>,
}

impl HomePageData {
    /// Filter both store lists with a case-insensitive substring match over
    /// title and description. An empty or whitespace query yields the
    /// unfiltered lists.
    #[must_use]
    pub fn filtered(&self, query: &str) -> Self {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }

        Self {
            email_verified: self.email_verified,
            user_location: self.user_location.clone(),
            recommended_stores: self
                .recommended_stores
                .iter()
                .filter(|s| s.matches(&needle))
                .cloned()
                .collect(),
            pick_up_tomorrow: self
                .pick_up_tomorrow
                .iter()
                .filter(|s| s.matches(&needle))
                .cloned()
                .collect(),
        }
    }

    /// Find a store by ID in either list.
    #[must_use]
    pub fn find_store(&self, id: &StoreId) -> Option<&Store> {
        self.recommended_stores
            .iter()
            .chain(self.pick_up_tomorrow.iter())
            .find(|s| &s.id == id)
    }
}

// =============================================================================
// Reservation Types
// =============================================================================

/// A guest's or user's claim on surprise bags, as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub store_id: StoreId,
    pub store_name: String,
    pub store_image: String,
    #[serde(default)]
    pub store_address: Option<String>,
    #[serde(default)]
    pub store_latitude: Option<f64>,
    #[serde(default)]
    pub store_longitude: Option<f64>,
    pub quantity: u32,
    pub total_amount: Price,
    pub original_amount: Price,
    pub status: ReservationStatus,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether the pickup window has already passed.
    ///
    /// Reservations without a pickup timestamp never expire client-side.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.pickup_time.is_some_and(|t| t < now)
    }
}

/// Wrapper shape returned by the session-scoped reservations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReservations {
    pub reservations: Vec<Reservation>,
}

/// Request body for creating a guest reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestReservationRequest {
    pub store_id: StoreId,
    pub store_name: String,
    pub store_image: String,
    pub quantity: u32,
    pub total_amount: Price,
    #[serde(default)]
    pub pickup_time: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub payment_type: String,
}

// =============================================================================
// Maps Types
// =============================================================================

/// Distance/duration between a user and a store, proxied from the maps
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Display label (e.g., "1.2 km").
    pub distance: String,
    /// Display label (e.g., "5 mins").
    pub duration: String,
    pub meters: i64,
    pub seconds: i64,
}

// =============================================================================
// Partner Types
// =============================================================================

/// Request body for the partner contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub store_name: String,
    pub message: String,
}

// =============================================================================
// Store-Owner Types
// =============================================================================

/// A reservation as seen by the store owner (includes customer contact).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReservation {
    pub id: ReservationId,
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub quantity: u32,
    pub total_amount: Price,
    pub status: ReservationStatus,
    #[serde(default)]
    pub pickup_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Owner reservations split into today's and historical buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReservations {
    pub current_reservations: Vec<OwnerReservation>,
    pub past_reservations: Vec<OwnerReservation>,
    pub current_count: usize,
    pub past_count: usize,
}

/// Store settings managed from the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSettings {
    pub surprise_boxes: u32,
    pub price: Price,
    pub is_selling: bool,
}

/// One bucket of owner statistics (today or all past days).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBucket {
    pub total_reservations: u64,
    pub active_reservations: u64,
    pub picked_up_reservations: u64,
    pub total_revenue: Price,
}

/// Owner statistics payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerStats {
    pub current: StatsBucket,
    pub past: StatsBucket,
    pub date: String,
}

/// Request body for the owner status transition endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ReservationStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn store(id: &str, title: &str, description: Option<&str>) -> Store {
        Store {
            id: StoreId::new(id),
            title: title.to_string(),
            description: description.map(String::from),
            image_url: "https://img.example/bag.jpg".to_string(),
            pick_up_time: None,
            distance: None,
            price: Price::from_cents(10000),
            original_price: Some(Price::from_cents(10000)),
            discounted_price: Some(Price::from_cents(8000)),
            background_url: None,
            avatar_url: None,
            rating: Some(4.6),
            reviews: Some(120),
            address: None,
            items_left: None,
            bags_available: Some(3),
            latitude: 21.0287,
            longitude: 105.8514,
            is_selling: true,
            google_maps_url: None,
        }
    }

    fn home_data(stores: Vec<Store>, tomorrow: Vec<Store>) -> HomePageData {
        HomePageData {
            email_verified: false,
            user_location: UserLocation {
                city: "Hanoi".to_string(),
                distance: 5.0,
            },
            recommended_stores: stores,
            pick_up_tomorrow: tomorrow,
        }
    }

    #[test]
    fn test_store_parses_backend_json() {
        let json = r#"{
            "id": "store-1",
            "title": "Banh Mi 25",
            "description": "Fresh banh mi at closing time",
            "imageUrl": "https://img.example/banhmi.jpg",
            "pickUpTime": "17:00 - 19:00",
            "distance": "1.2 km",
            "price": 100,
            "originalPrice": 100,
            "discountedPrice": 80,
            "rating": 4.6,
            "bagsAvailable": 3,
            "latitude": 21.0287,
            "longitude": 105.8514,
            "is_selling": true
        }"#;

        let store: Store = serde_json::from_str(json).unwrap();
        assert_eq!(store.id.as_str(), "store-1");
        assert_eq!(store.effective_price(), Price::from_cents(8000));
        assert_eq!(store.full_price(), Price::from_cents(10000));
        assert!(store.is_selling);
    }

    #[test]
    fn test_store_missing_optionals() {
        let json = r#"{
            "id": "store-2",
            "title": "Pho Corner",
            "imageUrl": "https://img.example/pho.jpg",
            "price": 50,
            "latitude": 21.0,
            "longitude": 105.8
        }"#;

        let store: Store = serde_json::from_str(json).unwrap();
        assert!(store.description.is_none());
        assert_eq!(store.effective_price(), Price::from_cents(5000));
        assert!(!store.is_selling);
    }

    #[test]
    fn test_filtered_matches_title_and_description() {
        let data = home_data(
            vec![
                store("a", "Banh Mi 25", Some("Fresh banh mi")),
                store("b", "Pho Corner", Some("Beef noodle soup")),
            ],
            vec![store("c", "Cafe Giang", Some("Egg coffee and banh mi"))],
        );

        let filtered = data.filtered("BANH");
        assert_eq!(filtered.recommended_stores.len(), 1);
        assert_eq!(filtered.recommended_stores.first().unwrap().id.as_str(), "a");
        // Matches via description
        assert_eq!(filtered.pick_up_tomorrow.len(), 1);
    }

    #[test]
    fn test_filtered_empty_query_is_identity() {
        let data = home_data(
            vec![store("a", "Banh Mi 25", None)],
            vec![store("b", "Pho Corner", None)],
        );

        let filtered = data.filtered("   ");
        assert_eq!(filtered.recommended_stores.len(), 1);
        assert_eq!(filtered.pick_up_tomorrow.len(), 1);
    }

    #[test]
    fn test_filtered_no_match() {
        let data = home_data(vec![store("a", "Banh Mi 25", None)], vec![]);
        let filtered = data.filtered("pizza");
        assert!(filtered.recommended_stores.is_empty());
        assert!(filtered.pick_up_tomorrow.is_empty());
    }

    #[test]
    fn test_find_store_searches_both_lists() {
        let data = home_data(
            vec![store("a", "Banh Mi 25", None)],
            vec![store("b", "Pho Corner", None)],
        );
        assert!(data.find_store(&StoreId::new("b")).is_some());
        assert!(data.find_store(&StoreId::new("zzz")).is_none());
    }

    #[test]
    fn test_reservation_expiry() {
        let now = Utc::now();
        let reservation = Reservation {
            id: ReservationId::new("r1"),
            store_id: StoreId::new("s1"),
            store_name: "Banh Mi 25".to_string(),
            store_image: "https://img.example/banhmi.jpg".to_string(),
            store_address: None,
            store_latitude: None,
            store_longitude: None,
            quantity: 1,
            total_amount: Price::from_cents(8000),
            original_amount: Price::from_cents(10000),
            status: ReservationStatus::Active,
            payment_id: None,
            pickup_time: Some(now - TimeDelta::hours(2)),
            created_at: now - TimeDelta::hours(5),
        };
        assert!(reservation.is_expired(now));

        let upcoming = Reservation {
            pickup_time: Some(now + TimeDelta::hours(2)),
            ..reservation.clone()
        };
        assert!(!upcoming.is_expired(now));

        let open_ended = Reservation {
            pickup_time: None,
            ..reservation
        };
        assert!(!open_ended.is_expired(now));
    }

    #[test]
    fn test_reservation_parses_backend_json() {
        let json = r#"{
            "id": "res-1",
            "storeId": "store-1",
            "storeName": "Banh Mi 25",
            "storeImage": "https://img.example/banhmi.jpg",
            "quantity": 1,
            "totalAmount": 80,
            "originalAmount": 100,
            "status": "active",
            "paymentId": "pay-1",
            "pickupTime": "2026-09-01T17:00:00Z",
            "createdAt": "2026-08-26T09:00:00Z"
        }"#;

        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Active);
        assert_eq!(reservation.total_amount, Price::from_cents(8000));
        assert!(reservation.pickup_time.is_some());
    }

    #[test]
    fn test_owner_reservations_parse() {
        let json = r#"{
            "currentReservations": [{
                "id": "res-1",
                "customerName": "John Doe",
                "quantity": 2,
                "totalAmount": 31.98,
                "status": "active",
                "pickupTime": "2026-08-26T14:00:00Z",
                "createdAt": "2026-08-26T10:00:00Z"
            }],
            "pastReservations": [],
            "currentCount": 1,
            "pastCount": 0
        }"#;

        let owner: OwnerReservations = serde_json::from_str(json).unwrap();
        assert_eq!(owner.current_count, 1);
        let first = owner.current_reservations.first().unwrap();
        assert!(first.status.can_mark_picked_up());
        assert_eq!(first.total_amount, Price::from_cents(3198));
    }
}
