//! Worker message types for store ↔ workflow communication.
//!
//! The store emits a [`WorkerMessage`] for every request that needs a
//! transport call; the worker answers with exactly one [`WorkerResponse`],
//! success or failure. Both carry the [`RequestTicket`] issued when the
//! request started, which is how superseded results are recognized. Messages
//! also carry the tracing context of the dispatching span so worker spans
//! nest under the request that caused them.

use crate::app::tokens::{RequestKind, RequestTicket};
use crate::domain::{Profile, RepositoryDetail, RepositoryPage, RepositorySummary};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-task span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry IDs of the current span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that stamp the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name(ticket: RequestTicket, $($field: $ty),*) -> Self {
                    Self::$variant {
                        ticket,
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_repositories(FetchRepositories { since: u64 }),
    fetch_more_repositories(FetchMoreRepositories { since: u64 }),
    search_repositories(SearchRepositories { query: String }),
    fetch_entity(FetchEntity { full_name: String }),
    fetch_profile(FetchProfile { login: String }),
}

/// Requests sent from the store to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch one page of the primary feed, replacing the current items.
    FetchRepositories {
        ticket: RequestTicket,
        since: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the page after `since`, to be appended to the current items.
    FetchMoreRepositories {
        ticket: RequestTicket,
        since: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Keyword search over the whole catalog.
    SearchRepositories {
        ticket: RequestTicket,
        query: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch one full repository record by `owner/name`.
    FetchEntity {
        ticket: RequestTicket,
        full_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the configured profile.
    FetchProfile {
        ticket: RequestTicket,
        login: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn ticket(&self) -> RequestTicket {
        match self {
            Self::FetchRepositories { ticket, .. }
            | Self::FetchMoreRepositories { ticket, .. }
            | Self::SearchRepositories { ticket, .. }
            | Self::FetchEntity { ticket, .. }
            | Self::FetchProfile { ticket, .. } => *ticket,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchRepositories { trace_context, .. }
            | Self::FetchMoreRepositories { trace_context, .. }
            | Self::SearchRepositories { trace_context, .. }
            | Self::FetchEntity { trace_context, .. }
            | Self::FetchProfile { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Outcome events sent from the worker back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A primary feed page replacing the current items.
    RepositoriesLoaded {
        ticket: RequestTicket,
        page: RepositoryPage,
    },

    /// A primary feed page to append to the current items.
    MoreRepositoriesLoaded {
        ticket: RequestTicket,
        page: RepositoryPage,
    },

    /// Search hits; an empty list is a valid result.
    SearchCompleted {
        ticket: RequestTicket,
        repositories: Vec<RepositorySummary>,
    },

    EntityLoaded {
        ticket: RequestTicket,
        entity: Box<RepositoryDetail>,
    },

    ProfileLoaded {
        ticket: RequestTicket,
        profile: Profile,
    },

    /// The request failed; `message` is the transport's message or the
    /// kind's fallback.
    Failed {
        ticket: RequestTicket,
        message: String,
    },
}

impl WorkerResponse {
    #[must_use]
    pub const fn ticket(&self) -> RequestTicket {
        match self {
            Self::RepositoriesLoaded { ticket, .. }
            | Self::MoreRepositoriesLoaded { ticket, .. }
            | Self::SearchCompleted { ticket, .. }
            | Self::EntityLoaded { ticket, .. }
            | Self::ProfileLoaded { ticket, .. }
            | Self::Failed { ticket, .. } => *ticket,
        }
    }

    /// Kind a success variant belongs to; `None` for [`WorkerResponse::Failed`],
    /// which is valid for every kind.
    #[must_use]
    pub const fn success_kind(&self) -> Option<RequestKind> {
        match self {
            Self::RepositoriesLoaded { .. } => Some(RequestKind::Repositories),
            Self::MoreRepositoriesLoaded { .. } => Some(RequestKind::MoreRepositories),
            Self::SearchCompleted { .. } => Some(RequestKind::Search),
            Self::EntityLoaded { .. } => Some(RequestKind::Entity),
            Self::ProfileLoaded { .. } => Some(RequestKind::Profile),
            Self::Failed { .. } => None,
        }
    }
}
