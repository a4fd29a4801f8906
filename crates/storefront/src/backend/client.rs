//! HTTP client for the Savor backend REST API.
//!
//! Read-mostly endpoints (home data, distance lookups) are cached with `moka`
//! for 5 minutes. Reservation and settings endpoints are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use savor_core::{Coordinates, ReservationId, ReservationStatus};

use crate::backend::ApiError;
use crate::backend::cache::CacheValue;
use crate::backend::types::{
    DistanceResult, GuestReservationRequest, HomePageData, OwnerReservations, OwnerSettings,
    OwnerStats, PartnerContactRequest, Reservation, SessionReservations, StatusUpdateRequest,
};
use crate::config::StorefrontConfig;

/// Cache TTL for home data and distance lookups (5 minutes, matching the
/// browser's geolocation position cache).
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Client for the Savor backend API.
///
/// Cheaply cloneable; all methods take `&self`.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
    owner_token: Option<String>,
    cache: Cache<String, CacheValue>,
}

impl BackendClient {
    /// Create a new backend client from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.backend_url.clone(),
                owner_token: config
                    .owner_token
                    .as_ref()
                    .map(|t| t.expose_secret().to_string()),
                cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Read the response body and either parse it or map the failure status
    /// to an [`ApiError`].
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(&response_text, status);
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(ApiError::from_status(status, message));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Check the response status for endpoints whose body we discard.
    async fn check_response(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let response_text = response.text().await.unwrap_or_default();
        let message = extract_error_message(&response_text, status);
        Err(ApiError::from_status(status, message))
    }

    /// Bearer token for the store-owner surface.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when this deployment has no owner token
    /// configured.
    fn owner_token(&self) -> Result<&str, ApiError> {
        self.inner
            .owner_token
            .as_deref()
            .ok_or(ApiError::Unauthorized)
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    /// Fetch the home/discovery aggregate for a location.
    ///
    /// Cached per rounded coordinate pair so nearby refreshes within the TTL
    /// do not refetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    #[instrument(skip(self))]
    pub async fn home_page(&self, location: Coordinates) -> Result<HomePageData, ApiError> {
        let cache_key = format!(
            "home:{:.3}:{:.3}",
            location.latitude, location.longitude
        );

        if let Some(CacheValue::Home(data)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for home data");
            return Ok(*data);
        }

        let response = self
            .inner
            .client
            .get(self.url("/api/home"))
            .query(&[
                ("latitude", location.latitude),
                ("longitude", location.longitude),
            ])
            .send()
            .await?;

        let data: HomePageData = Self::parse_response(response).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Home(Box::new(data.clone())))
            .await;

        Ok(data)
    }

    // =========================================================================
    // Reservations (not cached - mutable state)
    // =========================================================================

    /// Fetch the authenticated user's reservations.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` on 401; callers fall back to
    /// [`Self::session_reservations`].
    #[instrument(skip(self))]
    pub async fn reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url("/api/reservations"))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the guest session's reservations (no authentication).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    #[instrument(skip(self))]
    pub async fn session_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url("/api/reservations/session"))
            .send()
            .await?;

        let wrapper: SessionReservations = Self::parse_response(response).await?;
        Ok(wrapper.reservations)
    }

    /// Fetch reservations, falling back to the session-scoped endpoint when
    /// the user endpoint rejects the request as unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns an error only when both endpoints fail.
    #[instrument(skip(self))]
    pub async fn reservations_with_fallback(&self) -> Result<Vec<Reservation>, ApiError> {
        match self.reservations().await {
            Ok(reservations) => Ok(reservations),
            Err(e) if e.is_unauthorized() => {
                debug!("User endpoint returned 401, falling back to session endpoint");
                self.session_reservations().await
            }
            Err(e) => Err(e),
        }
    }

    /// Create a guest reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the reservation.
    #[instrument(skip(self, request), fields(store_id = %request.store_id))]
    pub async fn create_guest_reservation(
        &self,
        request: &GuestReservationRequest,
    ) -> Result<Reservation, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/api/reservations/guest"))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Cancel a reservation.
    ///
    /// Callers treat this as best-effort: the UI removes the reservation
    /// before the DELETE resolves and never rolls back on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; callers log and ignore it.
    #[instrument(skip(self), fields(reservation_id = %id))]
    pub async fn cancel_reservation(&self, id: &ReservationId) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .delete(self.url(&format!("/api/reservations/{id}")))
            .send()
            .await?;

        Self::check_response(response).await
    }

    // =========================================================================
    // Maps
    // =========================================================================

    /// Driving distance/duration between a user and a store, proxied through
    /// the backend's maps endpoint. Cached per coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    #[instrument(skip(self))]
    pub async fn distance(
        &self,
        user: Coordinates,
        store: Coordinates,
    ) -> Result<DistanceResult, ApiError> {
        let cache_key = format!("distance:{user}:{store}");

        if let Some(CacheValue::Distance(result)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for distance");
            return Ok(result);
        }

        let response = self
            .inner
            .client
            .get(self.url("/api/maps/distance"))
            .query(&[
                ("userLat", user.latitude),
                ("userLng", user.longitude),
                ("storeLat", store.latitude),
                ("storeLng", store.longitude),
            ])
            .send()
            .await?;

        let result: DistanceResult = Self::parse_response(response).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Distance(result.clone()))
            .await;

        Ok(result)
    }

    // =========================================================================
    // Partner
    // =========================================================================

    /// Submit the partner contact form.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the submission.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn partner_contact(&self, request: &PartnerContactRequest) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/api/partner/contact"))
            .json(request)
            .send()
            .await?;

        Self::check_response(response).await
    }

    // =========================================================================
    // Store Owner (bearer-token authenticated)
    // =========================================================================

    /// Fetch the owner's current and past reservations.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when no owner token is configured or the
    /// backend rejects it.
    #[instrument(skip(self))]
    pub async fn owner_reservations(&self) -> Result<OwnerReservations, ApiError> {
        let token = self.owner_token()?;
        let response = self
            .inner
            .client
            .get(self.url("/api/store-owner/reservations"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Transition one reservation's status (active -> picked_up).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the transition.
    #[instrument(skip(self), fields(reservation_id = %id, status = %status))]
    pub async fn update_reservation_status(
        &self,
        id: &ReservationId,
        status: ReservationStatus,
    ) -> Result<(), ApiError> {
        let token = self.owner_token()?;
        let response = self
            .inner
            .client
            .put(self.url(&format!("/api/store-owner/reservations/{id}/status")))
            .bearer_auth(token)
            .json(&StatusUpdateRequest { status })
            .send()
            .await?;

        Self::check_response(response).await
    }

    /// Fetch the store settings.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when no owner token is configured.
    #[instrument(skip(self))]
    pub async fn owner_settings(&self) -> Result<OwnerSettings, ApiError> {
        let token = self.owner_token()?;
        let response = self
            .inner
            .client
            .get(self.url("/api/store-owner/settings"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Save the store settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the settings.
    #[instrument(skip(self, settings))]
    pub async fn update_owner_settings(&self, settings: &OwnerSettings) -> Result<(), ApiError> {
        let token = self.owner_token()?;
        let response = self
            .inner
            .client
            .put(self.url("/api/store-owner/settings"))
            .bearer_auth(token)
            .json(settings)
            .send()
            .await?;

        Self::check_response(response).await
    }

    /// Fetch today's and past owner statistics.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when no owner token is configured.
    #[instrument(skip(self))]
    pub async fn owner_stats(&self) -> Result<OwnerStats, ApiError> {
        let token = self.owner_token()?;
        let response = self
            .inner
            .client
            .get(self.url("/api/store-owner/stats"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Pull a human-readable message out of a backend error body.
///
/// The backend reports errors as `{"error": "..."}` (sometimes
/// `{"message": "..."}`); anything else falls back to a truncated body or the
/// status reason.
fn extract_error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
