//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler mutates the store synchronously and returns the
//! transport work it implies as actions. The runtime executes them; the
//! handler itself never performs I/O.

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a workflow request on a worker task.
    ///
    /// The runtime looks up the ticket's cancellation token in the store; a
    /// message whose ticket is already superseded is dropped without I/O.
    PostToWorker(WorkerMessage),
}
