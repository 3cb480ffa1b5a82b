//! Per-kind request tokens implementing latest-wins supersession.
//!
//! Each [`RequestKind`] owns one slot holding a generation counter and a
//! [`CancellationToken`]. Starting a request of a kind cancels the slot's
//! previous token and bumps its generation; the issued [`RequestTicket`]
//! travels with the worker message and its response. A response is applied
//! only while its ticket is still the current one for its kind. Kinds never
//! touch each other's slots.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Operation kinds that are independently latest-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// Initial or refresh fetch of the primary feed.
    Repositories,
    /// Incremental "load more" of the primary feed.
    MoreRepositories,
    Search,
    Entity,
    Profile,
}

impl RequestKind {
    pub const ALL: [Self; 5] = [
        Self::Repositories,
        Self::MoreRepositories,
        Self::Search,
        Self::Entity,
        Self::Profile,
    ];

    /// Failure message used when the transport error carries none.
    ///
    /// Distinct per kind so the origin of a failure is recognizable.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Repositories => "Failed to fetch repositories",
            Self::MoreRepositories => "Failed to fetch more repositories",
            Self::Search => "Failed to search repositories",
            Self::Entity => "Failed to fetch user",
            Self::Profile => "Failed to fetch profile",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Repositories => 0,
            Self::MoreRepositories => 1,
            Self::Search => 2,
            Self::Entity => 3,
            Self::Profile => 4,
        }
    }
}

/// Identifies one issued request of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u64,
    token: CancellationToken,
    in_flight: bool,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            generation: 0,
            token: CancellationToken::new(),
            in_flight: false,
        }
    }
}

/// The set of per-kind slots owned by the store.
#[derive(Debug, Clone, Default)]
pub struct RequestTokens {
    slots: [Slot; 5],
}

impl RequestTokens {
    /// Starts a new request of `kind`, superseding any outstanding one.
    ///
    /// # Examples
    ///
    /// ```
    /// use repolens::app::tokens::{RequestKind, RequestTokens};
    ///
    /// let mut tokens = RequestTokens::default();
    /// let first = tokens.begin(RequestKind::Search);
    /// let second = tokens.begin(RequestKind::Search);
    /// assert!(!tokens.is_current(first));
    /// assert!(tokens.is_current(second));
    /// ```
    pub fn begin(&mut self, kind: RequestKind) -> RequestTicket {
        let slot = &mut self.slots[kind.index()];
        if slot.in_flight {
            tracing::debug!(kind = ?kind, generation = slot.generation, "superseding outstanding request");
        }
        slot.token.cancel();
        slot.token = CancellationToken::new();
        slot.generation += 1;
        slot.in_flight = true;

        RequestTicket {
            kind,
            generation: slot.generation,
        }
    }

    /// Returns `true` if `ticket` is the newest request of its kind and has
    /// not completed yet.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        let slot = &self.slots[ticket.kind.index()];
        slot.in_flight && slot.generation == ticket.generation
    }

    /// Marks `ticket` as completed.
    ///
    /// Returns `false`, leaving the slot untouched, when the ticket has been
    /// superseded or already completed; the caller must then discard the
    /// result.
    pub fn complete(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.slots[ticket.kind.index()].in_flight = false;
        true
    }

    /// Cancellation handle for a current ticket, `None` once superseded.
    #[must_use]
    pub fn cancellation(&self, ticket: RequestTicket) -> Option<CancellationToken> {
        self.is_current(ticket)
            .then(|| self.slots[ticket.kind.index()].token.clone())
    }

    #[must_use]
    pub fn in_flight(&self, kind: RequestKind) -> bool {
        self.slots[kind.index()].in_flight
    }

    #[must_use]
    pub fn any_in_flight(&self) -> bool {
        RequestKind::ALL.iter().any(|kind| self.in_flight(*kind))
    }
}
