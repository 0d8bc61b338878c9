//! Query building blocks.
//!
//! Everything here is synchronous and pure: compiling search tokens into a
//! filter expression, applying sorts and searches to a configuration,
//! deriving request identities, and deciding whether another page must be
//! fetched.
//!
//! - [`SearchToken`] / [`compile`] - search box tokens to a filter expression
//! - [`Sort`] - single-column sort
//! - [`mutate`] - copy-and-mutate helpers for configurations
//! - [`request_id`] - stable request keys
//! - [`PageHeader`] / [`next_request`] - pagination decisions

mod identity;
pub mod mutate;
mod order;
mod page;
mod search;

pub use identity::request_id;
pub use order::Direction;
pub use order::Sort;
pub use page::COUNT_HEADER;
pub use page::PAGE_HEADER;
pub use page::PageHeader;
pub use page::next_request;
pub use search::SearchElement;
pub use search::SearchToken;
pub use search::compile;
