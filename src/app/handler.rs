//! Event handling and state transition logic.
//!
//! [`handle_event`] is the store's only write entry point. Request events
//! update their slice's flags, issue a ticket, and return a worker action;
//! outcome events are checked against the ticket table and applied only if
//! they belong to the newest request of their kind.
//!
//! # Event Types
//!
//! - **Catalog**: `FetchRepositoriesRequested`, `FetchMoreRequested`,
//!   `SearchRequested`, `ClearSearch`, `ClearCatalogError`
//! - **Entity**: `FetchEntityRequested`
//! - **Profile**: `FetchProfileRequested`, `SetLocalAvatarOverride`
//! - **Worker**: `WorkerResponse` with typed outcome variants
//!
//! # Example
//!
//! ```rust
//! use repolens::app::{handle_event, Action, Event, Store};
//!
//! let mut store = Store::new("octocat");
//! let (changed, actions) = handle_event(&mut store, &Event::FetchRepositoriesRequested { since: 0 })?;
//! assert!(changed);
//! assert!(store.catalog.is_loading_initial);
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! # Ok::<(), repolens::RepolensError>(())
//! ```

use super::state::NO_MORE_REPOSITORIES;
use super::tokens::{RequestKind, RequestTicket};
use crate::app::{Action, Store};
use crate::domain::error::{RepolensError, Result};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Intents and outcomes the store reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Fetches a page of the primary feed, replacing current items.
    ///
    /// Callers pass `since: 0` to start over.
    FetchRepositoriesRequested { since: u64 },
    /// Fetches the page after the stored cursor and appends it.
    FetchMoreRequested,
    /// Searches the catalog; one event is one transport call.
    SearchRequested { query: String },
    /// Empties the search feed without any transport call.
    ClearSearch,
    /// Drops the catalog slice's error message.
    ClearCatalogError,
    /// Fetches one repository by `owner/name`.
    FetchEntityRequested { full_name: String },
    FetchProfileRequested,
    /// Sets or clears the locally chosen avatar URI.
    SetLocalAvatarOverride(Option<String>),
    /// Outcome of a worker request.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates the store, and returns actions to execute.
///
/// The returned flag reports whether any slice changed.
///
/// # Errors
///
/// Returns [`RepolensError::Worker`] when a success response arrives under a
/// ticket of a different request kind. A current ticket is still completed
/// and its slot marked failed, so nothing waits on it afterwards.
pub fn handle_event(store: &mut Store, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::FetchRepositoriesRequested { since } => {
            store.catalog.begin_initial();
            let ticket = store.tokens.begin(RequestKind::Repositories);
            tracing::debug!(since = since, generation = ticket.generation, "fetching repositories");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::fetch_repositories(ticket, *since))]))
        }
        Event::FetchMoreRequested => {
            let ticket = store.tokens.begin(RequestKind::MoreRepositories);

            let Some(cursor) = store.catalog.pagination_cursor else {
                tracing::debug!("no pagination cursor, load more short-circuited");
                store.tokens.complete(ticket);
                store.catalog.fail_more(NO_MORE_REPOSITORIES.to_string());
                return Ok((true, vec![]));
            };

            store.catalog.begin_more();
            tracing::debug!(since = cursor, generation = ticket.generation, "fetching more repositories");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::fetch_more_repositories(ticket, cursor))]))
        }
        Event::SearchRequested { query } => {
            store.catalog.begin_search();
            let ticket = store.tokens.begin(RequestKind::Search);
            tracing::debug!(query = %query, generation = ticket.generation, "searching repositories");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::search_repositories(ticket, query.clone()))]))
        }
        Event::ClearSearch => {
            let changed = !store.catalog.search_items.is_empty();
            store.catalog.clear_search();
            Ok((changed, vec![]))
        }
        Event::ClearCatalogError => {
            let changed = store.catalog.last_error.is_some();
            store.catalog.clear_error();
            Ok((changed, vec![]))
        }
        Event::FetchEntityRequested { full_name } => {
            store.entity.begin();
            let ticket = store.tokens.begin(RequestKind::Entity);
            tracing::debug!(full_name = %full_name, generation = ticket.generation, "fetching entity");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::fetch_entity(ticket, full_name.clone()))]))
        }
        Event::FetchProfileRequested => {
            store.profile.begin();
            let ticket = store.tokens.begin(RequestKind::Profile);
            tracing::debug!(login = %store.profile_login, generation = ticket.generation, "fetching profile");
            let message = WorkerMessage::fetch_profile(ticket, store.profile_login.clone());
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::SetLocalAvatarOverride(uri) => {
            let changed = &store.profile.local_avatar_override_uri != uri;
            store.profile.set_local_avatar_override(uri.clone());
            Ok((changed, vec![]))
        }
        Event::WorkerResponse(response) => apply_response(store, response),
    }
}

fn apply_response(store: &mut Store, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    let ticket = response.ticket();

    if let Some(kind) = response.success_kind() {
        if kind != ticket.kind {
            if store.tokens.complete(ticket) {
                apply_failure(store, ticket, ticket.kind.fallback_message().to_string());
            }
            return Err(RepolensError::Worker(format!(
                "{kind:?} response carried a {:?} ticket",
                ticket.kind
            )));
        }
    }

    if !store.tokens.complete(ticket) {
        tracing::debug!(
            kind = ?ticket.kind,
            generation = ticket.generation,
            "discarding superseded response"
        );
        return Ok((false, vec![]));
    }

    match response {
        WorkerResponse::RepositoriesLoaded { page, .. } => store.catalog.apply_initial(page.clone()),
        WorkerResponse::MoreRepositoriesLoaded { page, .. } => store.catalog.apply_more(page.clone()),
        WorkerResponse::SearchCompleted { repositories, .. } => {
            store.catalog.apply_search(repositories.clone());
        }
        WorkerResponse::EntityLoaded { entity, .. } => store.entity.apply(entity.as_ref().clone()),
        WorkerResponse::ProfileLoaded { profile, .. } => store.profile.apply(profile.clone()),
        WorkerResponse::Failed { message, .. } => apply_failure(store, ticket, message.clone()),
    }

    Ok((true, vec![]))
}

fn apply_failure(store: &mut Store, ticket: RequestTicket, message: String) {
    tracing::debug!(kind = ?ticket.kind, message = %message, "request failed");
    match ticket.kind {
        RequestKind::Repositories => store.catalog.fail_initial(message),
        RequestKind::MoreRepositories => store.catalog.fail_more(message),
        RequestKind::Search => store.catalog.fail_search(message),
        RequestKind::Entity => store.entity.fail(message),
        RequestKind::Profile => store.profile.fail(message),
    }
}

/// Short variant name used as the span field; payloads can be large.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::FetchRepositoriesRequested { .. } => "FetchRepositoriesRequested",
        Event::FetchMoreRequested => "FetchMoreRequested",
        Event::SearchRequested { .. } => "SearchRequested",
        Event::ClearSearch => "ClearSearch",
        Event::ClearCatalogError => "ClearCatalogError",
        Event::FetchEntityRequested { .. } => "FetchEntityRequested",
        Event::FetchProfileRequested => "FetchProfileRequested",
        Event::SetLocalAvatarOverride(_) => "SetLocalAvatarOverride",
        Event::WorkerResponse(_) => "WorkerResponse",
    }
}
