//! Store route handlers: directions and distance.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use savor_core::{Coordinates, StoreId};

use crate::backend::types::DistanceResult;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters carrying the user's position.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationQuery {
    fn resolve(&self, state: &AppState) -> Coordinates {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
            _ => state.config().default_location,
        }
    }
}

/// Redirect to Google Maps driving directions for a store.
///
/// Prefers the backend-provided maps URL when the store carries one;
/// otherwise builds the standard directions URL from coordinates.
#[instrument(skip(state))]
pub async fn directions(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Query(query): Query<LocationQuery>,
) -> Result<Redirect> {
    let origin = query.resolve(&state);
    let data = state.backend().home_page(origin).await?;
    let store = data
        .find_store(&store_id)
        .ok_or_else(|| AppError::NotFound(format!("store {store_id}")))?;

    let url = store
        .google_maps_url
        .clone()
        .unwrap_or_else(|| origin.directions_url(&store.coordinates()));

    Ok(Redirect::to(&url))
}

/// Driving distance and duration between the user and a store.
#[instrument(skip(state))]
pub async fn distance(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<DistanceResult>> {
    let origin = query.resolve(&state);
    let data = state.backend().home_page(origin).await?;
    let store = data
        .find_store(&store_id)
        .ok_or_else(|| AppError::NotFound(format!("store {store_id}")))?;

    let result = state
        .backend()
        .distance(origin, store.coordinates())
        .await?;

    Ok(Json(result))
}
