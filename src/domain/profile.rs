//! Profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user profile as returned by `/users/{login}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub created_at: Option<DateTime<Utc>>,
}
