//! Infrastructure helpers shared by the transport and the workflows.
//!
//! - [`pagination`]: lenient `link` header codec and `since` cursor extraction
//! - [`paths`]: catalog endpoint paths

pub mod pagination;
pub mod paths;

pub use pagination::{extract_cursor, has_more, parse_link_relations, LinkRelations};
