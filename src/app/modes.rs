//! Presentation-independent view selectors over the catalog slice.
//!
//! Sorting is a read-side concern: it never reorders the stored feeds.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which catalog feed a view reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedSource {
    /// The paginated primary feed.
    #[default]
    Catalog,
    /// The independent search result feed.
    SearchResults,
}

/// Ordering of a feed view by repository name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Compares two names case-insensitively, falling back to byte order so
    /// the result is total.
    ///
    /// # Examples
    ///
    /// ```
    /// use repolens::app::modes::SortOrder;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(SortOrder::Ascending.compare("alpha", "Beta"), Ordering::Less);
    /// assert_eq!(SortOrder::Descending.compare("alpha", "Beta"), Ordering::Greater);
    /// ```
    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        let ordering = a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b));
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}
