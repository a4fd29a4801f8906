//! Home/discovery page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use savor_core::Coordinates;

use crate::filters;

use crate::backend::types::Store;
use crate::error::Result;
use crate::state::AppState;

/// Query parameters for the home page.
///
/// Coordinates arrive via a client-side re-navigation once the browser shares
/// its position; until then the configured default location is used.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Search query for filtering stores by name or description.
    #[serde(default)]
    pub q: String,
}

/// Store display data for templates.
#[derive(Clone)]
pub struct StoreView {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub pick_up_time: Option<String>,
    pub distance: Option<String>,
    pub price: String,
    /// Strikethrough price, shown only when it exceeds the effective price.
    pub full_price: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub bags_available: Option<i64>,
    pub is_selling: bool,
}

impl From<&Store> for StoreView {
    fn from(store: &Store) -> Self {
        let effective = store.effective_price();
        let full = store.full_price();

        Self {
            id: store.id.to_string(),
            title: store.title.clone(),
            image_url: store.image_url.clone(),
            pick_up_time: store.pick_up_time.clone(),
            distance: store.distance.clone(),
            price: effective.to_string(),
            full_price: (full > effective).then(|| full.to_string()),
            rating: store.rating,
            reviews: store.reviews,
            bags_available: store.bags_available,
            is_selling: store.is_selling,
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Current search query, echoed back into the search box.
    pub query: String,
    /// Coordinates the page was rendered for.
    pub latitude: f64,
    pub longitude: f64,
    /// Whether the coordinates came from the browser (vs. the default).
    pub located: bool,
    /// Resolved city name, when the backend could reverse-geocode.
    pub city: Option<String>,
    /// Stores recommended for pickup today.
    pub recommended: Vec<StoreView>,
    /// Stores with pickup windows tomorrow.
    pub pick_up_tomorrow: Vec<StoreView>,
    /// Error banner shown when the backend fetch failed.
    pub error: Option<String>,
}

/// Display the home page.
///
/// A failed backend fetch renders the page with an error banner and a retry
/// link instead of a bare error response.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let located = query.latitude.is_some() && query.longitude.is_some();
    let location = match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
        _ => state.config().default_location,
    };

    let (city, recommended, pick_up_tomorrow, error) =
        match state.backend().home_page(location).await {
            Ok(data) => {
                let filtered = data.filtered(&query.q);
                (
                    Some(data.user_location.city),
                    filtered.recommended_stores.iter().map(StoreView::from).collect(),
                    filtered.pick_up_tomorrow.iter().map(StoreView::from).collect(),
                    None,
                )
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch home data");
                (
                    None,
                    Vec::new(),
                    Vec::new(),
                    Some("We couldn't load stores right now. Please try again.".to_string()),
                )
            }
        };

    Ok(HomeTemplate {
        query: query.q,
        latitude: location.latitude,
        longitude: location.longitude,
        located,
        city,
        recommended,
        pick_up_tomorrow,
        error,
    })
}
