//! Guest reservation route handlers.
//!
//! The reservation flow is optimistic throughout: a new reservation lands in
//! the session cache as soon as the backend confirms it, and a cancellation
//! removes it from the cache before the backend DELETE is even issued. The
//! DELETE itself is fire-and-forget - a failure is logged, never surfaced,
//! and never rolls the removal back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use savor_core::{Coordinates, Price, ReservationId, StoreId};

use crate::backend::types::{GuestReservationRequest, Reservation};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session::{GuestContact, keys};
use crate::services::reservation_cache;
use crate::state::AppState;

// =============================================================================
// Reservation Form
// =============================================================================

/// Query parameters for the reservation form.
#[derive(Debug, Deserialize)]
pub struct ReserveQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Guest reservation form template.
///
/// Renderable from form fields alone so a validation failure can re-render
/// the page without touching the backend.
#[derive(Template, WebTemplate)]
#[template(path = "reserve.html")]
pub struct ReserveTemplate {
    pub store_id: String,
    pub store_name: String,
    pub store_image: String,
    pub pick_up_time: Option<String>,
    pub quantity: i64,
    pub max_quantity: i64,
    /// Per-bag price, display-formatted.
    pub unit_price: String,
    /// Total for the selected quantity, as a plain decimal for the hidden
    /// form field (e.g. "80.00").
    pub total_amount: String,
    /// Total, display-formatted (e.g. "$80.00").
    pub total_display: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub payment_type: String,
    pub error: Option<String>,
}

/// Display the guest reservation form for a store.
#[instrument(skip(state, session))]
pub async fn reserve_form(
    State(state): State<AppState>,
    session: Session,
    Path(store_id): Path<StoreId>,
    Query(query): Query<ReserveQuery>,
) -> Result<ReserveTemplate> {
    let location = match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
        _ => state.config().default_location,
    };

    let data = state.backend().home_page(location).await?;
    let store = data
        .find_store(&store_id)
        .ok_or_else(|| AppError::NotFound(format!("store {store_id}")))?;

    let max_quantity = store.bags_available.unwrap_or(1).max(1);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let quantity = query.quantity.clamp(1, max_quantity as u32);

    let unit = store.effective_price();
    let total = total_amount(unit, quantity);

    let contact = session
        .get::<GuestContact>(keys::GUEST_CONTACT)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .unwrap_or_default();

    Ok(ReserveTemplate {
        store_id: store.id.to_string(),
        store_name: store.title.clone(),
        store_image: store.image_url.clone(),
        pick_up_time: store.pick_up_time.clone(),
        quantity: i64::from(quantity),
        max_quantity,
        unit_price: unit.to_string(),
        total_amount: format!("{:.2}", total.amount()),
        total_display: total.to_string(),
        name: contact.name,
        email: contact.email,
        phone: contact.phone,
        payment_type: "cash".to_string(),
        error: None,
    })
}

/// Total price for a quantity of bags.
fn total_amount(unit: Price, quantity: u32) -> Price {
    Price::new(unit.amount() * Decimal::from(quantity))
}

// =============================================================================
// Reservation Creation
// =============================================================================

/// Form data for creating a guest reservation.
#[derive(Debug, Deserialize)]
pub struct ReservationForm {
    pub store_id: String,
    pub store_name: String,
    pub store_image: String,
    pub quantity: u32,
    /// Plain decimal total carried through the form (e.g. "80.00").
    pub total_amount: String,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ReservationForm {
    /// Validate contact details, returning the message for the first failed
    /// check. Runs before any backend call.
    fn validate(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("Please enter your name");
        }
        if self.email.trim().is_empty() && self.phone.trim().is_empty() {
            return Some("Please enter an email or phone number");
        }
        None
    }

    /// Re-render the form with an error message, preserving what was typed.
    fn with_error(&self, message: impl Into<String>) -> ReserveTemplate {
        let total_display = self
            .total_amount
            .parse::<Decimal>()
            .map_or_else(|_| self.total_amount.clone(), |d| Price::new(d).to_string());

        ReserveTemplate {
            store_id: self.store_id.clone(),
            store_name: self.store_name.clone(),
            store_image: self.store_image.clone(),
            pick_up_time: self.pickup_time.clone(),
            quantity: i64::from(self.quantity),
            max_quantity: i64::from(self.quantity.max(1)),
            unit_price: String::new(),
            total_amount: self.total_amount.clone(),
            total_display,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            payment_type: self.payment_type.clone(),
            error: Some(message.into()),
        }
    }
}

/// Create a guest reservation.
///
/// Validation failures re-render the form without calling the backend.
#[instrument(skip(state, session, form), fields(store_id = %form.store_id))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<ReservationForm>,
) -> Result<Response> {
    if let Some(message) = form.validate() {
        return Ok(form.with_error(message).into_response());
    }

    let Ok(total) = form.total_amount.parse::<Decimal>() else {
        return Err(AppError::BadRequest("invalid total amount".to_string()));
    };

    let request = GuestReservationRequest {
        store_id: StoreId::from(form.store_id.as_str()),
        store_name: form.store_name.clone(),
        store_image: form.store_image.clone(),
        quantity: form.quantity.max(1),
        total_amount: Price::new(total),
        pickup_time: form.pickup_time.clone(),
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        payment_type: if form.payment_type.is_empty() {
            "cash".to_string()
        } else {
            form.payment_type.clone()
        },
    };

    let reservation = match state.backend().create_guest_reservation(&request).await {
        Ok(reservation) => reservation,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create reservation");
            return Ok(form
                .with_error("We couldn't complete your reservation. Please try again.")
                .into_response());
        }
    };

    add_breadcrumb(
        "reservation",
        "Created guest reservation",
        Some(&[("reservation_id", reservation.id.as_str())]),
    );

    reservation_cache::insert(&session, reservation).await?;
    session
        .insert(
            keys::GUEST_CONTACT,
            GuestContact {
                name: request.name,
                email: request.email,
                phone: request.phone,
            },
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Redirect::to("/reservations").into_response())
}

// =============================================================================
// Reservation List
// =============================================================================

/// Reservation display data for templates.
#[derive(Clone)]
pub struct ReservationView {
    pub id: String,
    pub store_name: String,
    pub store_image: String,
    pub quantity: u32,
    pub total_amount: String,
    pub status_label: String,
    pub status_class: String,
    pub pickup_time: Option<chrono::DateTime<chrono::Utc>>,
    pub can_cancel: bool,
}

impl From<&Reservation> for ReservationView {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id.to_string(),
            store_name: reservation.store_name.clone(),
            store_image: reservation.store_image.clone(),
            quantity: reservation.quantity,
            total_amount: reservation.total_amount.to_string(),
            status_label: reservation.status.label(),
            status_class: reservation.status.as_str().to_string(),
            pickup_time: reservation.pickup_time,
            can_cancel: reservation.status.can_mark_picked_up(),
        }
    }
}

/// Reservation list template.
#[derive(Template, WebTemplate)]
#[template(path = "reservations.html")]
pub struct ReservationsTemplate {
    pub reservations: Vec<ReservationView>,
}

/// Display the guest's reservations.
///
/// The session cache is the primary read path once primed: a reservation the
/// guest optimistically cancelled stays gone no matter what the backend says.
/// An unprimed session fetches from the backend once to seed the cache; a
/// failed seed fetch still renders an empty list rather than an error page.
/// Reservations whose pickup window has passed are suppressed either way.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<ReservationsTemplate> {
    let reservations = match reservation_cache::get(&session).await? {
        Some(cached) => cached,
        None => match state.backend().reservations_with_fallback().await {
            Ok(reservations) => {
                reservation_cache::replace(&session, &reservations).await?;
                reservations
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to seed the reservation cache");
                Vec::new()
            }
        },
    };

    let visible = reservation_cache::visible(reservations, chrono::Utc::now());

    Ok(ReservationsTemplate {
        reservations: visible.iter().map(ReservationView::from).collect(),
    })
}

// =============================================================================
// Cancellation
// =============================================================================

/// Cancel a reservation.
///
/// The session cache is updated first and the backend DELETE runs in the
/// background; its outcome never changes what the guest sees.
#[instrument(skip(state, session), fields(reservation_id = %id))]
pub async fn cancel(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ReservationId>,
) -> Result<Redirect> {
    let removed = reservation_cache::remove(&session, &id).await?;
    if !removed {
        tracing::debug!("Cancelled reservation was not in the session cache");
    }

    add_breadcrumb(
        "reservation",
        "Cancelled reservation",
        Some(&[("reservation_id", id.as_str())]),
    );

    let backend = state.backend().clone();
    tokio::spawn(async move {
        if let Err(e) = backend.cancel_reservation(&id).await {
            tracing::error!(error = %e, reservation_id = %id, "Background cancel failed");
        }
    });

    Ok(Redirect::to("/reservations"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, phone: &str) -> ReservationForm {
        ReservationForm {
            store_id: "store-1".to_string(),
            store_name: "Banh Mi 25".to_string(),
            store_image: "/img/banh-mi.jpg".to_string(),
            quantity: 1,
            total_amount: "5.00".to_string(),
            pickup_time: None,
            payment_type: "cash".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    #[test]
    fn test_validate_requires_name() {
        assert_eq!(
            form("  ", "a@b.com", "").validate(),
            Some("Please enter your name")
        );
    }

    #[test]
    fn test_validate_requires_email_or_phone() {
        assert_eq!(
            form("Linh", "", "  ").validate(),
            Some("Please enter an email or phone number")
        );
        assert_eq!(form("Linh", "a@b.com", "").validate(), None);
        assert_eq!(form("Linh", "", "0912345678").validate(), None);
    }

    #[test]
    fn test_total_amount_scales_unit_price() {
        let total = total_amount(Price::from_cents(8000), 2);
        assert_eq!(total.to_string(), "$160.00");
    }
}
