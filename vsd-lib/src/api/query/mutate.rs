//! Copy-and-mutate helpers for query configurations.
//!
//! The free functions accept and return `Option<QueryConfiguration>` so a
//! caller holding "maybe a configuration" can chain them without checking;
//! `None` in always gives `None` out. They delegate to the inherent
//! `with_*` methods, which callers holding a configuration can use directly.
//!
//! ```
//! use vsd_lib::api::query::mutate::{set_next_page, set_page_size};
//! use vsd_lib::model::{Query, QueryConfiguration};
//!
//! let config = Some(QueryConfiguration::new(Query::new("enterprises")));
//! let config = set_next_page(set_page_size(config, 50), 2).unwrap();
//!
//! assert_eq!(config.query.page_size, Some(50));
//! assert_eq!(config.query.next_page, Some(2));
//! ```

use super::SearchToken;
use super::Sort;
use super::compile;
use crate::model::QueryConfiguration;

/// The page callers ask for when they have no specific page in mind.
pub const DEFAULT_NEXT_PAGE: u32 = 1;

impl QueryConfiguration {
    /// Applies a column sort.
    ///
    /// Leaves the configuration unchanged if `sort` is absent, its order is
    /// empty, or it has no column.
    pub fn with_sorting(mut self, sort: Option<&Sort>) -> Self {
        if let Some(expression) = sort.and_then(Sort::expression) {
            self.query.sort = Some(expression);
        }
        self
    }

    /// Conjoins compiled search tokens onto the current filter.
    ///
    /// An existing filter is kept and wrapped: `(<existing>) AND <new>`.
    pub fn with_search(mut self, tokens: &[SearchToken]) -> Self {
        if tokens.is_empty() {
            return self;
        }

        let compiled = compile(tokens);
        let filter = match self.query.filter.as_deref() {
            Some(existing) if !existing.is_empty() => format!("({}) AND {}", existing, compiled),
            _ => compiled,
        };
        self.query.filter = Some(filter);
        self
    }
}

/// Sets `query.sort` from a column sort.
pub fn add_sorting(
    config: Option<QueryConfiguration>,
    sort: Option<&Sort>,
) -> Option<QueryConfiguration> {
    config.map(|config| config.with_sorting(sort))
}

/// Adds search criteria, conjoined with any existing filter.
pub fn add_searching(
    config: Option<QueryConfiguration>,
    tokens: &[SearchToken],
) -> Option<QueryConfiguration> {
    config.map(|config| config.with_search(tokens))
}

/// Sets `query.pageSize`.
pub fn set_page_size(
    config: Option<QueryConfiguration>,
    page_size: u32,
) -> Option<QueryConfiguration> {
    config.map(|config| config.with_page_size(page_size))
}

/// Sets `query.nextPage`.
pub fn set_next_page(
    config: Option<QueryConfiguration>,
    next_page: u32,
) -> Option<QueryConfiguration> {
    config.map(|config| config.with_next_page(next_page))
}
