//! Quiet-period coalescing of free-text search input.
//!
//! The search workflow issues one transport call per request it receives,
//! so keystrokes are coalesced here first. Each pushed text restarts the
//! quiet period; only text that stays unchanged for the whole period is
//! released. Text that trims to empty is released at once as a clear.

use std::time::Duration;
use tokio::time::Instant;

/// What a settled input should turn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebouncedIntent {
    /// Search for the query exactly as typed.
    Search(String),
    /// Input was emptied; clear the search feed.
    Clear,
}

/// Coalesces text input with a fixed quiet period.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    /// Records new input at `now`.
    ///
    /// Returns [`DebouncedIntent::Clear`] immediately for blank input and
    /// drops anything pending; otherwise schedules the text unchanged.
    pub fn push(&mut self, text: &str, now: Instant) -> Option<DebouncedIntent> {
        if text.trim().is_empty() {
            self.pending = None;
            return Some(DebouncedIntent::Clear);
        }
        self.pending = Some((text.to_string(), now + self.quiet));
        None
    }

    /// Instant at which the pending text settles, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Releases the pending text if its quiet period has elapsed by `now`.
    pub fn poll_ready(&mut self, now: Instant) -> Option<DebouncedIntent> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {
                self.pending.take().map(|(query, _)| DebouncedIntent::Search(query))
            }
            _ => None,
        }
    }

    /// Sleeps until the pending text settles and releases it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn next_intent(&mut self) -> Option<DebouncedIntent> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.poll_ready(Instant::now())
    }
}
