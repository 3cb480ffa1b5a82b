//! Domain layer for repolens.
//!
//! Core record types and errors, independent of the transport and of the
//! store. Nothing here performs I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`repository`]: Repository summary/detail records and the page type
//! - [`profile`]: Profile record
//!
//! # Examples
//!
//! ```
//! use repolens::domain::{RepositoryPage, Result};
//!
//! fn empty_page() -> Result<RepositoryPage> {
//!     Ok(RepositoryPage::default())
//! }
//! ```

pub mod error;
pub mod profile;
pub mod repository;

pub use error::{RepolensError, Result, TransportError};
pub use profile::Profile;
pub use repository::{License, Owner, RepositoryDetail, RepositoryPage, RepositorySummary, SearchResults};
