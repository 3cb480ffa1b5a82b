//! Catalog endpoint paths.
//!
//! Paths are relative to the transport's base URL; resolving them into full
//! URLs is the transport's job.

/// Path of one page of the primary catalog feed.
///
/// # Examples
///
/// ```
/// use repolens::infrastructure::paths::repositories_path;
///
/// assert_eq!(repositories_path(0), "/repositories?since=0");
/// ```
#[must_use]
pub fn repositories_path(since: u64) -> String {
    format!("/repositories?since={since}")
}

/// Path of a repository search, with the query percent-encoded.
///
/// # Examples
///
/// ```
/// use repolens::infrastructure::paths::search_path;
///
/// assert_eq!(search_path("tokio rs"), "/search/repositories?q=tokio%20rs");
/// ```
#[must_use]
pub fn search_path(query: &str) -> String {
    format!("/search/repositories?q={}", urlencoding::encode(query))
}

/// Path of a single repository record.
///
/// The key is interpolated verbatim, so an empty key still produces the
/// well-formed (if degenerate) path `/repos/`.
///
/// # Examples
///
/// ```
/// use repolens::infrastructure::paths::entity_path;
///
/// assert_eq!(entity_path("rust-lang/cargo"), "/repos/rust-lang/cargo");
/// assert_eq!(entity_path(""), "/repos/");
/// ```
#[must_use]
pub fn entity_path(full_name: &str) -> String {
    format!("/repos/{full_name}")
}

/// Path of the fixed profile resource.
#[must_use]
pub fn profile_path(login: &str) -> String {
    format!("/users/{login}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_reserved_characters_are_encoded() {
        assert_eq!(search_path("a&b=c/d"), "/search/repositories?q=a%26b%3Dc%2Fd");
        assert_eq!(search_path(""), "/search/repositories?q=");
    }

    #[test]
    fn entity_key_is_not_encoded() {
        assert_eq!(entity_path("owner/name with space"), "/repos/owner/name with space");
    }

    #[test]
    fn profile_path_embeds_login() {
        assert_eq!(profile_path("octocat"), "/users/octocat");
    }
}
