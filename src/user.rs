//! The identity of the user whose transactions are summarised.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for user IDs.
///
/// User IDs come from the authentication provider and are opaque strings.
/// Wrapping them avoids mixing them up with transaction IDs or storage keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(String);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The user ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The signed in user as supplied by the authentication provider.
///
/// Only `id` is used to locate the user's transactions, the display fields
/// are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user's ID.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// URI of the user's profile photo.
    pub photo: Option<String>,
}

impl UserProfile {
    /// Create a profile with just an ID and name.
    pub fn new(id: UserID, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            photo: None,
        }
    }
}
