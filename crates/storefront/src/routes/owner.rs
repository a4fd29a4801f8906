//! Store-owner dashboard route handlers.
//!
//! The dashboard sits behind the session's owner-mode flag and talks to the
//! bearer-token-authenticated side of the backend. Marking a reservation
//! picked up is a one-way transition and goes through a confirmation page;
//! there is no way back to active.

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

use savor_core::{Price, ReservationId, ReservationStatus};

use crate::backend::types::{OwnerReservation, OwnerSettings, StatsBucket};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Stepper increment for the price setting.
const PRICE_STEP_CENTS: i64 = 50;

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Reservations,
    Settings,
    Stats,
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub tab: Tab,
    /// Set after a successful settings save to show the confirmation banner.
    #[serde(default)]
    pub saved: bool,
}

// =============================================================================
// View Models
// =============================================================================

/// Owner reservation display data.
#[derive(Clone)]
pub struct OwnerReservationView {
    pub id: String,
    pub customer_name: String,
    pub contact: String,
    pub quantity: u32,
    pub total_amount: String,
    pub status_label: String,
    pub status_class: String,
    pub pickup_time: Option<chrono::DateTime<chrono::Utc>>,
    pub can_pick_up: bool,
}

impl From<&OwnerReservation> for OwnerReservationView {
    fn from(reservation: &OwnerReservation) -> Self {
        let contact = reservation
            .customer_email
            .clone()
            .or_else(|| reservation.phone_number.clone())
            .unwrap_or_default();

        Self {
            id: reservation.id.to_string(),
            customer_name: reservation.customer_name.clone(),
            contact,
            quantity: reservation.quantity,
            total_amount: reservation.total_amount.to_string(),
            status_label: reservation.status.label(),
            status_class: reservation.status.as_str().to_string(),
            pickup_time: reservation.pickup_time,
            can_pick_up: reservation.status.can_mark_picked_up(),
        }
    }
}

/// Stats bucket display data.
#[derive(Clone)]
pub struct StatsView {
    pub total_reservations: u64,
    pub active_reservations: u64,
    pub picked_up_reservations: u64,
    pub total_revenue: String,
}

impl From<&StatsBucket> for StatsView {
    fn from(bucket: &StatsBucket) -> Self {
        Self {
            total_reservations: bucket.total_reservations,
            active_reservations: bucket.active_reservations,
            picked_up_reservations: bucket.picked_up_reservations,
            total_revenue: bucket.total_revenue.to_string(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Reservations tab template.
#[derive(Template, WebTemplate)]
#[template(path = "owner/reservations.html")]
pub struct OwnerReservationsTemplate {
    pub current: Vec<OwnerReservationView>,
    pub past: Vec<OwnerReservationView>,
    pub current_count: usize,
    pub past_count: usize,
}

/// Settings tab template.
#[derive(Template, WebTemplate)]
#[template(path = "owner/settings.html")]
pub struct OwnerSettingsTemplate {
    pub surprise_boxes: u32,
    /// Plain decimal for the form field (e.g. "15.99").
    pub price: String,
    /// Display-formatted price (e.g. "$15.99").
    pub price_display: String,
    /// Stepper increment for the price field (e.g. "0.50").
    pub price_step: String,
    pub is_selling: bool,
    pub saved: bool,
}

/// Stats tab template.
#[derive(Template, WebTemplate)]
#[template(path = "owner/stats.html")]
pub struct OwnerStatsTemplate {
    pub date: String,
    pub current: StatsView,
    pub past: StatsView,
}

/// Pickup confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "owner/pickup.html")]
pub struct PickupConfirmTemplate {
    pub reservation: OwnerReservationView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Redirect to the profile page unless owner mode is switched on.
async fn require_owner_mode(session: &Session) -> Result<Option<Redirect>> {
    let owner_mode = session
        .get::<bool>(crate::models::session::keys::OWNER_MODE)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .unwrap_or(false);

    Ok((!owner_mode).then(|| Redirect::to("/profile")))
}

/// Display the store-owner dashboard.
#[instrument(skip(state, session))]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DashboardQuery>,
) -> Result<Response> {
    if let Some(redirect) = require_owner_mode(&session).await? {
        return Ok(redirect.into_response());
    }

    match query.tab {
        Tab::Reservations => {
            let data = state.backend().owner_reservations().await?;
            Ok(OwnerReservationsTemplate {
                current: data.current_reservations.iter().map(Into::into).collect(),
                past: data.past_reservations.iter().map(Into::into).collect(),
                current_count: data.current_count,
                past_count: data.past_count,
            }
            .into_response())
        }
        Tab::Settings => {
            let settings = state.backend().owner_settings().await?;
            Ok(OwnerSettingsTemplate {
                surprise_boxes: settings.surprise_boxes,
                price: format!("{:.2}", settings.price.amount()),
                price_display: settings.price.to_string(),
                price_step: format!("{:.2}", Price::from_cents(PRICE_STEP_CENTS).amount()),
                is_selling: settings.is_selling,
                saved: query.saved,
            }
            .into_response())
        }
        Tab::Stats => {
            let stats = state.backend().owner_stats().await?;
            Ok(OwnerStatsTemplate {
                date: stats.date,
                current: StatsView::from(&stats.current),
                past: StatsView::from(&stats.past),
            }
            .into_response())
        }
    }
}

/// Form data for the owner-mode toggle.
#[derive(Debug, Deserialize)]
pub struct ModeForm {
    #[serde(default)]
    pub enable: bool,
}

/// Toggle store-owner mode for this session.
#[instrument(skip(session))]
pub async fn toggle_mode(
    session: Session,
    axum::Form(form): axum::Form<ModeForm>,
) -> Result<Redirect> {
    session
        .insert(crate::models::session::keys::OWNER_MODE, form.enable)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if form.enable {
        Ok(Redirect::to("/owner"))
    } else {
        Ok(Redirect::to("/profile"))
    }
}

/// Display the pickup confirmation page for a reservation.
///
/// Only reservations that are still active can be confirmed; anything else
/// bounces back to the reservations tab.
#[instrument(skip(state, session), fields(reservation_id = %id))]
pub async fn confirm_pickup(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ReservationId>,
) -> Result<Response> {
    if let Some(redirect) = require_owner_mode(&session).await? {
        return Ok(redirect.into_response());
    }

    let data = state.backend().owner_reservations().await?;
    let reservation = data
        .current_reservations
        .iter()
        .chain(data.past_reservations.iter())
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound(format!("reservation {id}")))?;

    if !reservation.status.can_mark_picked_up() {
        return Ok(Redirect::to("/owner?tab=reservations").into_response());
    }

    Ok(PickupConfirmTemplate {
        reservation: reservation.into(),
    }
    .into_response())
}

/// Mark a reservation as picked up.
///
/// Re-checks the transition guard here, not just on the confirmation page,
/// so a hand-crafted POST cannot flip a non-active reservation.
#[instrument(skip(state, session), fields(reservation_id = %id))]
pub async fn mark_picked_up(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ReservationId>,
) -> Result<Response> {
    if let Some(redirect) = require_owner_mode(&session).await? {
        return Ok(redirect.into_response());
    }

    let data = state.backend().owner_reservations().await?;
    let reservation = data
        .current_reservations
        .iter()
        .chain(data.past_reservations.iter())
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound(format!("reservation {id}")))?;

    if !reservation.status.can_mark_picked_up() {
        return Ok(Redirect::to("/owner?tab=reservations").into_response());
    }

    state
        .backend()
        .update_reservation_status(&id, ReservationStatus::PickedUp)
        .await?;

    add_breadcrumb(
        "owner",
        "Marked reservation picked up",
        Some(&[("reservation_id", id.as_str())]),
    );

    Ok(Redirect::to("/owner?tab=reservations").into_response())
}

/// Form data for saving store settings.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub surprise_boxes: u32,
    /// Plain decimal price (e.g. "15.99").
    pub price: String,
    /// Checkbox; absent when unchecked.
    #[serde(default)]
    pub is_selling: bool,
}

impl SettingsForm {
    /// Clamp the submitted values to their floors: at least one box, and a
    /// price of at least one cent.
    fn clamped(&self) -> Result<OwnerSettings> {
        let price = self
            .price
            .parse::<Decimal>()
            .map_err(|_| AppError::BadRequest("invalid price".to_string()))?;

        Ok(OwnerSettings {
            surprise_boxes: self.surprise_boxes.max(1),
            price: Price::new(price).max(Price::MIN),
            is_selling: self.is_selling,
        })
    }
}

/// Save the store settings.
#[instrument(skip(state, session, form))]
pub async fn save_settings(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<SettingsForm>,
) -> Result<Response> {
    if let Some(redirect) = require_owner_mode(&session).await? {
        return Ok(redirect.into_response());
    }

    let settings = form.clamped()?;
    state.backend().update_owner_settings(&settings).await?;

    Ok(Redirect::to("/owner?tab=settings&saved=true").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_clamped_to_floors() {
        let form = SettingsForm {
            surprise_boxes: 0,
            price: "0.00".to_string(),
            is_selling: true,
        };

        let settings = form.clamped().unwrap();
        assert_eq!(settings.surprise_boxes, 1);
        assert_eq!(settings.price, Price::MIN);
        assert!(settings.is_selling);
    }

    #[test]
    fn test_settings_valid_passthrough() {
        let form = SettingsForm {
            surprise_boxes: 5,
            price: "15.99".to_string(),
            is_selling: false,
        };

        let settings = form.clamped().unwrap();
        assert_eq!(settings.surprise_boxes, 5);
        assert_eq!(settings.price, Price::from_cents(1599));
    }

    #[test]
    fn test_price_step_matches_stepper() {
        let step = Price::from_cents(PRICE_STEP_CENTS);
        let price = Price::from_cents(1599);
        assert_eq!(price.step_up(step), Price::from_cents(1649));
        assert_eq!(Price::from_cents(30).step_down(step), Price::MIN);
    }
}
