//! Store state: the three independently owned slices.
//!
//! [`Store`] composes the catalog, entity, and profile slices together with
//! the per-kind [`RequestTokens`]. Every slice exposes the transitions its
//! own events drive; the event handler calls exactly one slice per event, so
//! no slice ever reads or writes another.
//!
//! # Slice invariants
//!
//! - **Catalog**: `items` and `search_items` are never merged. Search never
//!   touches `items`, the cursor or `has_more_pages`; feed fetches never touch
//!   `search_items`.
//! - **Entity** and **profile**: a failed fetch keeps the previously loaded
//!   record and only surfaces the error.
//! - **Profile**: `local_avatar_override_uri` is set only by a local action
//!   and survives every fetch.
//! - Loading flags clear on both success and failure.

use super::modes::{FeedSource, SortOrder};
use super::tokens::RequestTokens;
use crate::domain::{Profile, RepositoryDetail, RepositoryPage, RepositorySummary};
use serde::Serialize;

/// Message for a load-more request issued without a known cursor.
pub const NO_MORE_REPOSITORIES: &str = "No more repositories to load";

/// Primary feed, search feed, and their request flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogState {
    pub items: Vec<RepositorySummary>,
    pub search_items: Vec<RepositorySummary>,
    pub is_loading_initial: bool,
    pub is_loading_more: bool,
    pub is_searching: bool,
    pub last_error: Option<String>,
    /// `since` value for the next page, `None` when unknown or exhausted.
    pub pagination_cursor: Option<u64>,
    pub has_more_pages: bool,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_items: Vec::new(),
            is_loading_initial: false,
            is_loading_more: false,
            is_searching: false,
            last_error: None,
            pagination_cursor: None,
            has_more_pages: true,
        }
    }
}

impl CatalogState {
    pub fn begin_initial(&mut self) {
        self.is_loading_initial = true;
        self.last_error = None;
    }

    /// Replaces the primary feed with `page`.
    pub fn apply_initial(&mut self, page: RepositoryPage) {
        self.is_loading_initial = false;
        self.items = page.repositories;
        self.pagination_cursor = page.next_since;
        self.has_more_pages = page.has_more;
        self.last_error = None;
    }

    pub fn fail_initial(&mut self, message: String) {
        self.is_loading_initial = false;
        self.last_error = Some(message);
    }

    pub fn begin_more(&mut self) {
        self.is_loading_more = true;
        self.last_error = None;
    }

    /// Appends `page` to the primary feed, keeping order and duplicates.
    pub fn apply_more(&mut self, page: RepositoryPage) {
        self.is_loading_more = false;
        self.items.extend(page.repositories);
        self.pagination_cursor = page.next_since;
        self.has_more_pages = page.has_more;
        self.last_error = None;
    }

    pub fn fail_more(&mut self, message: String) {
        self.is_loading_more = false;
        self.last_error = Some(message);
    }

    pub fn begin_search(&mut self) {
        self.is_searching = true;
        self.last_error = None;
    }

    pub fn apply_search(&mut self, repositories: Vec<RepositorySummary>) {
        self.is_searching = false;
        self.search_items = repositories;
        self.last_error = None;
    }

    /// Records a search failure; stale `search_items` are retained.
    pub fn fail_search(&mut self, message: String) {
        self.is_searching = false;
        self.last_error = Some(message);
    }

    pub fn clear_search(&mut self) {
        self.search_items.clear();
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    #[must_use]
    pub fn feed(&self, source: FeedSource) -> &[RepositorySummary] {
        match source {
            FeedSource::Catalog => &self.items,
            FeedSource::SearchResults => &self.search_items,
        }
    }

    /// Returns the chosen feed ordered by repository name without mutating
    /// the slice.
    #[must_use]
    pub fn sorted(&self, source: FeedSource, order: SortOrder) -> Vec<&RepositorySummary> {
        let mut view: Vec<&RepositorySummary> = self.feed(source).iter().collect();
        view.sort_by(|a, b| order.compare(&a.name, &b.name));
        view
    }
}

/// The single repository detail currently on display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityState {
    pub entity: Option<RepositoryDetail>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl EntityState {
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.last_error = None;
    }

    pub fn apply(&mut self, entity: RepositoryDetail) {
        self.is_loading = false;
        self.entity = Some(entity);
        self.last_error = None;
    }

    /// Records a failure while keeping the previously loaded entity.
    pub fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.last_error = Some(message);
    }
}

/// The fetched profile plus the locally chosen avatar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileState {
    pub profile: Option<Profile>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub local_avatar_override_uri: Option<String>,
}

impl ProfileState {
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.last_error = None;
    }

    pub fn apply(&mut self, profile: Profile) {
        self.is_loading = false;
        self.profile = Some(profile);
        self.last_error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.last_error = Some(message);
    }

    pub fn set_local_avatar_override(&mut self, uri: Option<String>) {
        self.local_avatar_override_uri = uri;
    }

    /// Avatar to display: the local override if set, else the profile's.
    ///
    /// # Examples
    ///
    /// ```
    /// use repolens::app::state::ProfileState;
    /// use repolens::domain::Profile;
    ///
    /// let mut state = ProfileState::default();
    /// state.apply(Profile { avatar_url: "https://a/remote.png".into(), ..Default::default() });
    /// assert_eq!(state.effective_avatar_url(), Some("https://a/remote.png"));
    ///
    /// state.set_local_avatar_override(Some("file://x".into()));
    /// assert_eq!(state.effective_avatar_url(), Some("file://x"));
    /// ```
    #[must_use]
    pub fn effective_avatar_url(&self) -> Option<&str> {
        self.local_avatar_override_uri
            .as_deref()
            .or_else(|| self.profile.as_ref().map(|p| p.avatar_url.as_str()))
    }
}

/// Process-wide store composing the three slices.
///
/// Constructed once by the runtime and borrowed by readers; the only write
/// path is [`handle_event`](super::handle_event).
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub catalog: CatalogState,
    pub entity: EntityState,
    pub profile: ProfileState,
    pub tokens: RequestTokens,
    /// Login of the fixed profile resource.
    pub profile_login: String,
}

impl Store {
    #[must_use]
    pub fn new(profile_login: impl Into<String>) -> Self {
        Self {
            profile_login: profile_login.into(),
            ..Self::default()
        }
    }
}
