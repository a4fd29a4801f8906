//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home/discovery page
//! GET  /health                 - Health check
//!
//! # Reservations
//! GET  /reserve/{store_id}     - Guest reservation form
//! POST /reservations           - Create a guest reservation
//! GET  /reservations           - Reservation list
//! POST /reservations/{id}/cancel - Cancel a reservation
//!
//! # Stores
//! GET  /stores/{id}/directions - Redirect to Google Maps driving directions
//! GET  /stores/{id}/distance   - Driving distance/duration (JSON)
//!
//! # Partner
//! GET  /partner                - Partner contact form
//! POST /partner                - Submit partner contact form
//!
//! # Profile
//! GET  /profile                - Profile hub (links, owner-mode toggle)
//!
//! # Store Owner
//! GET  /owner                  - Dashboard (?tab=reservations|settings|stats)
//! POST /owner/mode             - Toggle store-owner mode
//! GET  /owner/reservations/{id}/pickup  - Pickup confirmation page
//! POST /owner/reservations/{id}/pickup  - Mark the reservation picked up
//! POST /owner/settings         - Save store settings
//! ```

pub mod home;
pub mod owner;
pub mod partner;
pub mod profile;
pub mod reservations;
pub mod stores;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the reservation routes router.
pub fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reservations::index).post(reservations::create),
        )
        .route("/{id}/cancel", post(reservations::cancel))
}

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/directions", get(stores::directions))
        .route("/{id}/distance", get(stores::distance))
}

/// Create the store-owner routes router.
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(owner::dashboard))
        .route("/mode", post(owner::toggle_mode))
        .route(
            "/reservations/{id}/pickup",
            get(owner::confirm_pickup).post(owner::mark_picked_up),
        )
        .route("/settings", post(owner::save_settings))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Reservation form
        .route("/reserve/{store_id}", get(reservations::reserve_form))
        // Reservation routes
        .nest("/reservations", reservation_routes())
        // Store routes
        .nest("/stores", store_routes())
        // Partner contact
        .route("/partner", get(partner::form).post(partner::submit))
        // Profile hub
        .route("/profile", get(profile::index))
        // Store-owner dashboard
        .nest("/owner", owner_routes())
}
