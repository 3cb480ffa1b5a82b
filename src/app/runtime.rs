//! Runtime driving the store and its worker tasks.
//!
//! The [`Dispatcher`] owns the [`Store`] and is its single writer. Worker
//! actions run as tokio tasks that only perform transport I/O and report
//! their outcome over a channel; every state mutation, including applying
//! those outcomes, happens inside [`Dispatcher::dispatch`] on the caller's
//! task.
//!
//! ```text
//! dispatch(Event) ─► handle_event ─► Action::PostToWorker ─► spawned task ─► Transport::get
//!        ▲                                                                      │
//!        └──────────── next_response / settle ◄── WorkerResponse channel ◄─────┘
//! ```

use super::{handle_event, Action, Event, Store};
use crate::domain::error::{RepolensError, Result};
use crate::transport::Transport;
use crate::worker::{CatalogWorker, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Owns the store and runs its workflows.
#[derive(Debug)]
pub struct Dispatcher {
    store: Store,
    worker: Arc<CatalogWorker>,
    sender: mpsc::UnboundedSender<WorkerResponse>,
    receiver: mpsc::UnboundedReceiver<WorkerResponse>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(store: Store, transport: Arc<dyn Transport>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            store,
            worker: Arc::new(CatalogWorker::new(transport)),
            sender,
            receiver,
        }
    }

    /// Read access to the store for presentation collaborators.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Applies an event and starts any worker requests it implies.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (changed, actions) = handle_event(&mut self.store, &event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(changed)
    }

    fn execute(&self, action: Action) {
        match action {
            Action::PostToWorker(message) => {
                let ticket = message.ticket();
                let Some(cancel) = self.store.tokens.cancellation(ticket) else {
                    tracing::debug!(kind = ?ticket.kind, "request superseded before start");
                    return;
                };

                let worker = Arc::clone(&self.worker);
                let sender = self.sender.clone();
                let span = tracing::debug_span!("worker_task", kind = ?ticket.kind, generation = ticket.generation);

                tokio::spawn(
                    async move {
                        tokio::select! {
                            biased;
                            () = cancel.cancelled() => {
                                tracing::debug!("request cancelled by a newer one");
                            }
                            response = worker.handle_message(message) => {
                                if sender.send(response).is_err() {
                                    tracing::debug!("dispatcher dropped before response");
                                }
                            }
                        }
                    }
                    .instrument(span),
                );
            }
        }
    }

    /// Waits for the next worker outcome and applies it.
    ///
    /// Returns whether the store changed; superseded outcomes leave it as is.
    ///
    /// # Errors
    ///
    /// Returns [`RepolensError::Worker`] if the response channel closes, or
    /// any error from [`handle_event`].
    pub async fn next_response(&mut self) -> Result<bool> {
        let response = self
            .receiver
            .recv()
            .await
            .ok_or_else(|| RepolensError::Worker("response channel closed".to_string()))?;
        self.dispatch(Event::WorkerResponse(response))
    }

    /// Applies outcomes until no request of any kind is outstanding.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::next_response`].
    pub async fn settle(&mut self) -> Result<()> {
        while self.store.tokens.any_in_flight() {
            self.next_response().await?;
        }
        Ok(())
    }
}
