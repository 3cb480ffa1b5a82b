//! Repository domain models.
//!
//! These mirror the catalog's JSON shapes. Decoding is lenient: every field
//! has a default so partially populated payloads (fixtures, trimmed search
//! hits) still decode. Records are only ever replaced wholesale inside their
//! containing slice, never patched field by field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner of a repository, as embedded in catalog and search payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub site_admin: bool,
}

/// A repository as listed by the paginated catalog and by search.
///
/// Identity is [`RepositorySummary::id`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySummary {
    pub id: u64,
    pub node_id: String,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub owner: Owner,
    pub html_url: String,
    pub description: Option<String>,
}

impl RepositorySummary {
    #[must_use]
    pub fn owner_login(&self) -> &str {
        &self.owner.login
    }

    /// Returns the full name with path separators replaced by spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use repolens::domain::RepositorySummary;
    ///
    /// let repo = RepositorySummary { full_name: "rust-lang/cargo".into(), ..Default::default() };
    /// assert_eq!(repo.display_title(), "rust-lang cargo");
    /// ```
    #[must_use]
    pub fn display_title(&self) -> String {
        self.full_name.split('/').collect::<Vec<_>>().join(" ")
    }
}

/// License block of a repository detail record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub key: String,
    pub name: String,
    pub spdx_id: Option<String>,
    pub url: Option<String>,
}

/// Full repository record returned by `/repos/{owner}/{name}`.
///
/// A superset of [`RepositorySummary`]; the summary fields are flattened so
/// the record decodes straight from the catalog's JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryDetail {
    #[serde(flatten)]
    pub summary: RepositorySummary,
    pub size: u64,
    pub language: Option<String>,
    pub license: Option<License>,
    pub topics: Vec<String>,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub network_count: u64,
    pub subscribers_count: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Body of `/search/repositories`; only `items` is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub items: Vec<RepositorySummary>,
}

/// One decoded page of the primary catalog feed.
///
/// `next_since` is the cursor for the following page, `has_more` whether the
/// response advertised a `next` relation at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryPage {
    pub repositories: Vec<RepositorySummary>,
    pub next_since: Option<u64>,
    pub has_more: bool,
}
