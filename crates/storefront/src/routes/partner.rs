//! Partner contact form route handlers.
//!
//! Prospective partner stores reach out through this form; the backend
//! forwards submissions to the partnerships inbox.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use serde::Deserialize;
use tracing::instrument;

use crate::filters;

use crate::backend::types::PartnerContactRequest;
use crate::error::Result;
use crate::state::AppState;

/// Partner contact form data.
#[derive(Debug, Deserialize)]
pub struct PartnerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub message: String,
}

impl PartnerForm {
    /// Validate the form, returning the message for the first failed check.
    fn validate(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("Please enter your name");
        }
        if !is_valid_email(self.email.trim()) {
            return Some("Please enter a valid email address");
        }
        if self.store_name.trim().is_empty() {
            return Some("Please enter your store name");
        }
        if self.message.trim().is_empty() {
            return Some("Please tell us a bit about your store");
        }
        None
    }
}

/// Partner page template.
#[derive(Template, WebTemplate)]
#[template(path = "partner.html")]
pub struct PartnerTemplate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub store_name: String,
    pub message: String,
    pub error: Option<String>,
    pub submitted: bool,
}

impl PartnerTemplate {
    fn empty() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            store_name: String::new(),
            message: String::new(),
            error: None,
            submitted: false,
        }
    }

    fn from_form(form: &PartnerForm, error: Option<String>) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            store_name: form.store_name.clone(),
            message: form.message.clone(),
            error,
            submitted: false,
        }
    }
}

/// Display the partner contact form.
#[instrument]
pub async fn form() -> PartnerTemplate {
    PartnerTemplate::empty()
}

/// Submit the partner contact form.
#[instrument(skip(state, form), fields(email = %form.email, store_name = %form.store_name))]
pub async fn submit(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<PartnerForm>,
) -> Result<PartnerTemplate> {
    if let Some(message) = form.validate() {
        return Ok(PartnerTemplate::from_form(&form, Some(message.to_string())));
    }

    let request = PartnerContactRequest {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        phone: form.phone.trim().to_string(),
        store_name: form.store_name.trim().to_string(),
        message: form.message.trim().to_string(),
    };

    match state.backend().partner_contact(&request).await {
        Ok(()) => {
            tracing::info!("Partner contact submitted");
            Ok(PartnerTemplate {
                submitted: true,
                ..PartnerTemplate::empty()
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to submit partner contact");
            Ok(PartnerTemplate::from_form(
                &form,
                Some("Something went wrong. Please try again.".to_string()),
            ))
        }
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("owner@banhmi25.vn"));
        assert!(!is_valid_email("owner"));
        assert!(!is_valid_email("owner@localhost"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_validate_order() {
        let form = PartnerForm {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            store_name: String::new(),
            message: String::new(),
        };
        assert_eq!(form.validate(), Some("Please enter your name"));
    }
}
