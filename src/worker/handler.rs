//! Workflow execution against the transport.
//!
//! [`CatalogWorker`] turns each [`WorkerMessage`] into one transport call and
//! exactly one [`WorkerResponse`]. Transport and decoding failures are folded
//! into [`WorkerResponse::Failed`] carrying the error's message or the
//! request kind's fallback; nothing escapes to the caller.

use crate::app::tokens::RequestTicket;
use crate::domain::{Profile, RepositoryDetail, RepositoryPage, RepositorySummary, SearchResults, TransportError};
use crate::infrastructure::pagination::{extract_cursor, has_more, parse_link_relations};
use crate::infrastructure::paths;
use crate::transport::{Transport, TransportResponse};
use crate::worker::{TraceContext, WorkerMessage, WorkerResponse};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::Instrument;

/// Executes workflow requests against a shared transport.
#[derive(Clone)]
pub struct CatalogWorker {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for CatalogWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWorker").finish_non_exhaustive()
    }
}

/// Converts a transport response into a feed page via the pagination codec.
fn page_from(response: &TransportResponse, repositories: Vec<RepositorySummary>) -> RepositoryPage {
    let relations = parse_link_relations(response.header("link"));
    let next_since = extract_cursor(relations.next());

    tracing::debug!(
        count = repositories.len(),
        next_since = ?next_since,
        relations = relations.len(),
        "page decoded"
    );

    RepositoryPage {
        repositories,
        next_since,
        has_more: has_more(&relations),
    }
}

impl CatalogWorker {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GETs `path` and decodes the body into `T`, returning the raw response
    /// alongside for header access.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<(T, TransportResponse), TransportError> {
        let mut response = self.transport.get(path).await?;
        let value: T = serde_json::from_value(response.data.take())
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok((value, response))
    }

    /// Standardizes failure folding and logging across workflows.
    fn respond<T, F>(ticket: RequestTicket, result: Result<T, TransportError>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(kind = ?ticket.kind, generation = ticket.generation, "request succeeded");
                on_success(value)
            }
            Err(e) => {
                let message = e.message_or(ticket.kind.fallback_message());
                tracing::debug!(kind = ?ticket.kind, error = %e, message = %message, "request failed");
                WorkerResponse::Failed { ticket, message }
            }
        }
    }

    async fn fetch_repositories(&self, ticket: RequestTicket, since: u64, append: bool) -> WorkerResponse {
        let result = self
            .get_json::<Vec<RepositorySummary>>(&paths::repositories_path(since))
            .await;

        Self::respond(ticket, result, |(repositories, response)| {
            let page = page_from(&response, repositories);
            if append {
                WorkerResponse::MoreRepositoriesLoaded { ticket, page }
            } else {
                WorkerResponse::RepositoriesLoaded { ticket, page }
            }
        })
    }

    async fn search_repositories(&self, ticket: RequestTicket, query: &str) -> WorkerResponse {
        let result = self.get_json::<SearchResults>(&paths::search_path(query)).await;

        Self::respond(ticket, result, |(results, _)| WorkerResponse::SearchCompleted {
            ticket,
            repositories: results.items,
        })
    }

    async fn fetch_entity(&self, ticket: RequestTicket, full_name: &str) -> WorkerResponse {
        let result = self.get_json::<RepositoryDetail>(&paths::entity_path(full_name)).await;

        Self::respond(ticket, result, |(entity, _)| WorkerResponse::EntityLoaded {
            ticket,
            entity: Box::new(entity),
        })
    }

    async fn fetch_profile(&self, ticket: RequestTicket, login: &str) -> WorkerResponse {
        let result = self.get_json::<Profile>(&paths::profile_path(login)).await;

        Self::respond(ticket, result, |(profile, _)| WorkerResponse::ProfileLoaded { ticket, profile })
    }

    /// Builds the worker span, linked to the dispatching span when the
    /// message carries a trace context.
    fn message_span(message: &WorkerMessage) -> tracing::Span {
        let ticket = message.ticket();
        let span = tracing::debug_span!(
            "worker_handle_message",
            kind = ?ticket.kind,
            generation = ticket.generation
        );
        if let Some(parent) = message.trace_context().and_then(remote_parent) {
            use tracing_opentelemetry::OpenTelemetrySpanExt;
            span.set_parent(parent);
        }
        span
    }

    /// Processes one message and returns its outcome event.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = Self::message_span(&message);

        async move {
            match message {
                WorkerMessage::FetchRepositories { ticket, since, .. } => {
                    self.fetch_repositories(ticket, since, false).await
                }
                WorkerMessage::FetchMoreRepositories { ticket, since, .. } => {
                    self.fetch_repositories(ticket, since, true).await
                }
                WorkerMessage::SearchRepositories { ticket, query, .. } => {
                    self.search_repositories(ticket, &query).await
                }
                WorkerMessage::FetchEntity { ticket, full_name, .. } => {
                    self.fetch_entity(ticket, &full_name).await
                }
                WorkerMessage::FetchProfile { ticket, login, .. } => {
                    self.fetch_profile(ticket, &login).await
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Reconstructs a remote OpenTelemetry parent from a serialized context.
fn remote_parent(trace_context: &TraceContext) -> Option<opentelemetry::Context> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

    Some(opentelemetry::Context::new().with_remote_span_context(span_context))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_without_link_header_has_no_cursor() {
        let response = TransportResponse::new(serde_json::Value::Null);
        let page = page_from(&response, vec![RepositorySummary { id: 1, ..Default::default() }]);

        assert_eq!(page.next_since, None);
        assert!(!page.has_more);
        assert_eq!(page.repositories.len(), 1);
    }

    #[test]
    fn page_with_next_relation_carries_cursor() {
        let response = TransportResponse::new(serde_json::Value::Null).with_header(
            "Link",
            r#"<https://api.github.com/repositories?since=200>; rel="next""#,
        );
        let page = page_from(&response, vec![]);

        assert_eq!(page.next_since, Some(200));
        assert!(page.has_more);
    }

    #[test]
    fn remote_parent_rejects_malformed_ids() {
        let bad = TraceContext {
            trace_id: "not-hex".into(),
            parent_span_id: "0000000000000001".into(),
        };
        assert!(remote_parent(&bad).is_none());

        let good = TraceContext {
            trace_id: format!("{:032x}", 7_u128),
            parent_span_id: format!("{:016x}", 9_u64),
        };
        assert!(remote_parent(&good).is_some());
    }
}
