//! Workflow layer: executes transport-backed requests off the store's task.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Workflow implementation turning messages into outcome events

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
