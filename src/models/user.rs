//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore, keyed by the Google identity subject.
///
/// Upserted on every successful sign-in; never deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity subject (also used as document ID)
    pub id: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Profile picture URL
    pub image_url: Option<String>,
    /// When the profile was first created
    pub created_at: String,
}
