//! Session-related types.
//!
//! The storefront has no accounts; the session carries everything a guest
//! accumulates while browsing - their reservations, the contact details they
//! last reserved with, and whether they flipped into store-owner mode.

use serde::{Deserialize, Serialize};

/// Contact details remembered from the guest's last reservation, used to
/// prefill the next reservation form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestContact {
    /// Guest's name.
    pub name: String,
    /// Guest's email, if provided.
    pub email: String,
    /// Guest's phone number, if provided.
    pub phone: String,
}

/// Session keys.
pub mod keys {
    /// Key for the guest's locally cached reservations.
    pub const RESERVATIONS: &str = "reservations";

    /// Key for the remembered guest contact details.
    pub const GUEST_CONTACT: &str = "guest_contact";

    /// Key for the store-owner mode flag.
    pub const OWNER_MODE: &str = "owner_mode";
}
