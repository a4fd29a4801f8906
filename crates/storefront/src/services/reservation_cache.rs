//! Session-backed reservation cache.
//!
//! The session copy of a guest's reservations is the primary read path for
//! the reservations screen: newly created reservations are inserted here
//! before any network round-trip, cancellations remove the entry before the
//! backend DELETE resolves, and a failed backend fetch falls back to the
//! cached copy rather than an error page. When a backend fetch does succeed,
//! its result replaces the cache wholesale.

use chrono::{DateTime, Utc};
use tower_sessions::Session;
use tracing::instrument;

use savor_core::ReservationId;

use crate::backend::types::Reservation;
use crate::error::AppError;
use crate::models::session::keys;

/// The cached reservations, or `None` when the cache has never been primed
/// for this session. `Some(vec![])` means primed-but-empty, which is how an
/// optimistic cancel of the last reservation stays cancelled.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn get(session: &Session) -> Result<Option<Vec<Reservation>>, AppError> {
    session
        .get::<Vec<Reservation>>(keys::RESERVATIONS)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Load the cached reservations, newest first.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load(session: &Session) -> Result<Vec<Reservation>, AppError> {
    Ok(get(session).await?.unwrap_or_default())
}

/// Replace the cache with an authoritative list from the backend.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn replace(session: &Session, reservations: &[Reservation]) -> Result<(), AppError> {
    session
        .insert(keys::RESERVATIONS, reservations)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Insert a freshly created reservation at the front of the cache.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip(session, reservation), fields(reservation_id = %reservation.id))]
pub async fn insert(session: &Session, reservation: Reservation) -> Result<(), AppError> {
    let mut reservations = load(session).await?;
    reservations.retain(|r| r.id != reservation.id);
    reservations.insert(0, reservation);
    replace(session, &reservations).await
}

/// Remove a reservation from the cache.
///
/// Returns whether the reservation was present. Called before the backend
/// DELETE is issued; the removal is never rolled back.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip(session), fields(reservation_id = %id))]
pub async fn remove(session: &Session, id: &ReservationId) -> Result<bool, AppError> {
    let mut reservations = load(session).await?;
    let before = reservations.len();
    reservations.retain(|r| r.id != *id);

    if reservations.len() == before {
        return Ok(false);
    }

    replace(session, &reservations).await?;
    Ok(true)
}

/// Filter out reservations whose pickup window has passed.
///
/// Expired reservations are suppressed from the list rather than shown in a
/// terminal state; the backend reaps them on its own schedule.
#[must_use]
pub fn visible(reservations: Vec<Reservation>, now: DateTime<Utc>) -> Vec<Reservation> {
    reservations
        .into_iter()
        .filter(|r| !r.is_expired(now))
        .collect()
}
