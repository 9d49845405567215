//! Request payloads for the myFlix API.
//!
//! # Design
//! The API accepts and returns loosely-shaped JSON, so every operation takes
//! any `Serialize` body and returns `serde_json::Value`. These structs are
//! conveniences that match the field names the hosted server expects.

use serde::{Deserialize, Serialize};

/// Account fields sent on registration and profile edits. Absent fields are
/// omitted from the JSON so a partial edit only touches what is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDetails {
    #[serde(rename = "Username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginDetails {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Body of the add-favorite request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteMovie {
    #[serde(rename = "favoriteMovie")]
    pub favorite_movie: String,
}
