//! Page header parsing and continuation decisions.

use reqwest::header::HeaderMap;

use crate::model::QueryConfiguration;

/// Response header carrying the server-reported page index.
pub const PAGE_HEADER: &str = "x-nuage-page";

/// Response header carrying the total number of matching items.
pub const COUNT_HEADER: &str = "x-nuage-count";

/// Pagination metadata for one page of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageHeader {
    /// Server-reported index of this page.
    pub page: u64,
    /// Server-reported total number of matching items.
    pub count: u64,
    /// Number of items present in this page.
    pub hits: u64,
}

impl PageHeader {
    /// Builds a header from response headers and the number of rows received.
    ///
    /// Missing or non-numeric page/count headers read as `0`.
    pub fn from_response(headers: &HeaderMap, hits: usize) -> Self {
        Self {
            page: numeric_header(headers, PAGE_HEADER),
            count: numeric_header(headers, COUNT_HEADER),
            hits: hits as u64,
        }
    }

    /// Returns `true` if more items remain after this page.
    ///
    /// More pages remain iff `page_size * (page + 1) + hits < count`.
    pub fn has_more(&self, page_size: u32) -> bool {
        let covered = u64::from(page_size)
            .saturating_mul(self.page.saturating_add(1))
            .saturating_add(self.hits);
        covered < self.count
    }
}

/// Decides whether another page must be fetched.
///
/// Returns a copy of `config` pointing at the next page, or `None` when the
/// results are exhausted.
///
/// # Example
///
/// ```
/// use vsd_lib::api::query::{next_request, PageHeader};
/// use vsd_lib::model::{Query, QueryConfiguration};
///
/// let config = QueryConfiguration::new(Query::new("enterprises"));
///
/// let header = PageHeader { page: 0, count: 25, hits: 10 };
/// let next = next_request(&header, &config, 10).unwrap();
/// assert_eq!(next.query.next_page, Some(1));
///
/// let header = PageHeader { page: 1, count: 20, hits: 10 };
/// assert!(next_request(&header, &config, 10).is_none());
/// ```
pub fn next_request(
    header: &PageHeader,
    config: &QueryConfiguration,
    page_size: u32,
) -> Option<QueryConfiguration> {
    if !header.has_more(page_size) {
        return None;
    }

    let next_page = u32::try_from(header.page.saturating_add(1)).unwrap_or(u32::MAX);
    Some(config.clone().with_next_page(next_page))
}

/// Reads a header the way `parseInt` would: leading whitespace is skipped
/// and the leading run of digits is used. Anything else reads as `0`.
fn numeric_header(headers: &HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.trim_start();
            let value = value.strip_prefix('+').unwrap_or(value);
            let end = value
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(value.len());
            value[..end].parse().unwrap_or(0)
        })
        .unwrap_or(0)
}
