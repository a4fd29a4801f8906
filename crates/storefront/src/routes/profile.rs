//! Profile hub route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session::{GuestContact, keys};
use crate::state::AppState;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    /// Contact details remembered from the last reservation, if any.
    pub contact: Option<GuestContact>,
    /// Whether store-owner mode is switched on for this session.
    pub owner_mode: bool,
    /// Whether this deployment has an owner token at all; without one the
    /// owner-mode toggle is hidden.
    pub owner_available: bool,
}

/// Display the profile hub.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<ProfileTemplate> {
    let contact = session
        .get::<GuestContact>(keys::GUEST_CONTACT)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let owner_mode = session
        .get::<bool>(keys::OWNER_MODE)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .unwrap_or(false);

    Ok(ProfileTemplate {
        contact,
        owner_mode,
        owner_available: state.config().owner_token.is_some(),
    })
}
