//! Integration test harness for Savor.
//!
//! Each test spins up two servers on ephemeral ports: a stub of the Savor
//! REST backend (with request counters so tests can assert which endpoints
//! were - or were not - hit) and the real storefront application wired to it.
//! Tests drive the storefront through a cookie-enabled `reqwest` client,
//! exactly as a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p savor-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post, put},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use savor_core::Coordinates;
use savor_storefront::config::StorefrontConfig;
use savor_storefront::state::AppState;

/// Bearer token the stub backend expects on store-owner endpoints.
pub const OWNER_TOKEN: &str = "test-owner-token";

// =============================================================================
// Stub Backend
// =============================================================================

/// Request counters for asserting backend traffic.
#[derive(Default)]
pub struct Counters {
    pub home: AtomicUsize,
    pub guest_create: AtomicUsize,
    pub cancel: AtomicUsize,
    pub distance: AtomicUsize,
    pub partner: AtomicUsize,
}

/// Shared state for the stub backend.
#[derive(Default)]
pub struct StubState {
    pub counters: Counters,
    /// Reservations created through the stub, returned by the session
    /// endpoint.
    pub reservations: Mutex<Vec<Value>>,
    /// When set, DELETE /api/reservations/{id} fails with a 500.
    pub fail_cancel: AtomicBool,
    /// Body of the last guest reservation request, if any.
    pub last_guest_request: Mutex<Option<Value>>,
    /// Body of the last owner status update, if any.
    pub last_status_update: Mutex<Option<(String, Value)>>,
    /// Body of the last owner settings save, if any.
    pub last_settings: Mutex<Option<Value>>,
}

fn require_owner_token(headers: &HeaderMap) -> Result<(), StatusCode> {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {OWNER_TOKEN}"));

    if authorized {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn stub_home(State(state): State<Arc<StubState>>) -> Json<Value> {
    state.counters.home.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "emailVerified": false,
        "userLocation": { "city": "Hanoi", "distance": 0.4 },
        "recommendedStores": [
            {
                "id": "store-1",
                "title": "Banh Mi 25",
                "description": "Crusty banh mi and pastries",
                "imageUrl": "https://img.test/banh-mi.jpg",
                "pickUpTime": "Today 17:00 - 19:00",
                "distance": "1.2 km",
                "price": 100,
                "originalPrice": 100,
                "discountedPrice": 80,
                "rating": 4.7,
                "reviews": 132,
                "bagsAvailable": 3,
                "latitude": 21.0352,
                "longitude": 105.8455,
                "is_selling": true
            }
        ],
        "pickUpTomorrow": [
            {
                "id": "store-2",
                "title": "Pho Corner",
                "imageUrl": "https://img.test/pho.jpg",
                "pickUpTime": "Tomorrow 08:00 - 10:00",
                "price": 50,
                "latitude": 21.0301,
                "longitude": 105.8522,
                "is_selling": true
            }
        ]
    }))
}

async fn stub_create_guest(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let n = state.counters.guest_create.fetch_add(1, Ordering::SeqCst) + 1;
    *state.last_guest_request.lock().await = Some(body.clone());

    let reservation = json!({
        "id": format!("res-{n}"),
        "storeId": body["storeId"],
        "storeName": body["storeName"],
        "storeImage": body["storeImage"],
        "quantity": body["quantity"],
        "totalAmount": body["totalAmount"],
        "originalAmount": body["totalAmount"],
        "status": "active",
        "pickupTime": Value::Null,
        "createdAt": chrono::Utc::now().to_rfc3339(),
    });

    state.reservations.lock().await.push(reservation.clone());
    Json(reservation)
}

/// The user endpoint always rejects guests, forcing the session fallback.
async fn stub_user_reservations() -> StatusCode {
    StatusCode::UNAUTHORIZED
}

async fn stub_session_reservations(State(state): State<Arc<StubState>>) -> Json<Value> {
    let reservations = state.reservations.lock().await.clone();
    Json(json!({ "reservations": reservations }))
}

async fn stub_cancel(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
) -> StatusCode {
    state.counters.cancel.fetch_add(1, Ordering::SeqCst);

    if state.fail_cancel.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    state
        .reservations
        .lock()
        .await
        .retain(|r| r["id"] != Value::String(id.clone()));
    StatusCode::OK
}

async fn stub_distance(State(state): State<Arc<StubState>>) -> Json<Value> {
    state.counters.distance.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "distance": "1.2 km",
        "duration": "5 mins",
        "meters": 1200,
        "seconds": 300
    }))
}

async fn stub_partner(State(state): State<Arc<StubState>>, Json(_body): Json<Value>) -> StatusCode {
    state.counters.partner.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn stub_owner_reservations(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    require_owner_token(&headers)?;
    Ok(Json(json!({
        "currentReservations": [
            {
                "id": "owner-res-1",
                "customerName": "Linh Tran",
                "customerEmail": "linh@example.com",
                "quantity": 2,
                "totalAmount": 160,
                "status": "active",
                "pickupTime": Value::Null,
                "createdAt": chrono::Utc::now().to_rfc3339(),
            }
        ],
        "pastReservations": [
            {
                "id": "owner-res-0",
                "customerName": "Minh Nguyen",
                "phoneNumber": "0912345678",
                "quantity": 1,
                "totalAmount": 80,
                "status": "picked_up",
                "pickupTime": Value::Null,
                "createdAt": chrono::Utc::now().to_rfc3339(),
            }
        ],
        "currentCount": 1,
        "pastCount": 1
    })))
}

async fn stub_owner_update_status(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    require_owner_token(&headers)?;
    *state.last_status_update.lock().await = Some((id, body));
    Ok(StatusCode::OK)
}

async fn stub_owner_settings(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    require_owner_token(&headers)?;
    Ok(Json(json!({
        "surpriseBoxes": 5,
        "price": 15.99,
        "isSelling": true
    })))
}

async fn stub_owner_save_settings(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    require_owner_token(&headers)?;
    *state.last_settings.lock().await = Some(body);
    Ok(StatusCode::OK)
}

async fn stub_owner_stats(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    require_owner_token(&headers)?;
    Ok(Json(json!({
        "current": {
            "totalReservations": 3,
            "activeReservations": 1,
            "pickedUpReservations": 2,
            "totalRevenue": 240
        },
        "past": {
            "totalReservations": 120,
            "activeReservations": 0,
            "pickedUpReservations": 110,
            "totalRevenue": 9600
        },
        "date": "2025-08-26"
    })))
}

/// Build the stub backend router.
pub fn stub_backend(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/home", get(stub_home))
        .route("/api/reservations/guest", post(stub_create_guest))
        .route("/api/reservations", get(stub_user_reservations))
        .route("/api/reservations/session", get(stub_session_reservations))
        .route("/api/reservations/{id}", delete(stub_cancel))
        .route("/api/maps/distance", get(stub_distance))
        .route("/api/partner/contact", post(stub_partner))
        .route("/api/store-owner/reservations", get(stub_owner_reservations))
        .route(
            "/api/store-owner/reservations/{id}/status",
            put(stub_owner_update_status),
        )
        .route(
            "/api/store-owner/settings",
            get(stub_owner_settings).put(stub_owner_save_settings),
        )
        .route("/api/store-owner/stats", get(stub_owner_stats))
        .with_state(state)
}

// =============================================================================
// Test Context
// =============================================================================

/// A running storefront wired to a stub backend.
pub struct TestContext {
    /// Cookie-enabled client, like a browser session.
    pub client: reqwest::Client,
    /// Base URL of the storefront under test.
    pub base_url: String,
    /// Handle to the stub backend's shared state.
    pub stub: Arc<StubState>,
}

impl TestContext {
    /// Spawn the stub backend and the storefront on ephemeral ports.
    pub async fn spawn() -> Self {
        let stub = Arc::new(StubState::default());

        let backend_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let backend_addr = backend_listener.local_addr().unwrap();
        let backend_router = stub_backend(stub.clone());
        tokio::spawn(async move {
            axum::serve(backend_listener, backend_router).await.unwrap();
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind storefront");
        let addr = listener.local_addr().unwrap();

        let config = StorefrontConfig {
            backend_url: format!("http://{backend_addr}"),
            host: addr.ip(),
            port: addr.port(),
            base_url: format!("http://{addr}"),
            session_secret: SecretString::from("kP9#mW2$xR7!qT4@nB8^zL5&vC1*yH6j"),
            owner_token: Some(SecretString::from(OWNER_TOKEN)),
            default_location: Coordinates::new(21.0287, 105.8514),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let app = savor_storefront::app(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap();

        Self {
            client,
            base_url: format!("http://{addr}"),
            stub,
        }
    }

    /// Build a URL under the storefront.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a page and return its body, asserting a 200.
    pub async fn get_ok(&self, path: &str) -> String {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        assert_eq!(response.status(), 200, "GET {path}");
        response.text().await.unwrap()
    }

    /// Switch the session into store-owner mode.
    pub async fn enable_owner_mode(&self) {
        let response = self
            .client
            .post(self.url("/owner/mode"))
            .form(&[("enable", "true")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
