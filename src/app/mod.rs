//! Application layer: the store, its events, and the runtime driving it.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! UI Intent → Event → handle_event → Slice Mutation → Actions → Worker Task
//!                         ↑                                         ↓
//!                         └────────── WorkerResponse event ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Quiet-period coalescing of search input
//! - [`handler`]: Event processing and the latest-wins check
//! - [`modes`]: Feed source and sort order selectors
//! - [`runtime`]: Dispatcher owning the store and spawning worker tasks
//! - [`state`]: The store and its three slices
//! - [`tokens`]: Per-kind request tickets and cancellation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod runtime;
pub mod state;
pub mod tokens;

pub use actions::Action;
pub use debounce::{DebouncedIntent, SearchDebouncer};
pub use handler::{handle_event, Event};
pub use modes::{FeedSource, SortOrder};
pub use runtime::Dispatcher;
pub use state::{CatalogState, EntityState, ProfileState, Store};
pub use tokens::{RequestKind, RequestTicket, RequestTokens};
