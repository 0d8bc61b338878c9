//! Async iteration over every page of a query.

use futures::Stream;
use futures::TryStreamExt;
use serde_json::Value;

use crate::VsdService;
use crate::api::FetchResult;
use crate::error::FetchError;
use crate::model::QueryConfiguration;

/// Async iterator that yields the pages of a query configuration.
///
/// Follows each page's `next_query` until the server reports no more items.
/// Iteration stops after the first error.
///
/// # Example
///
/// ```ignore
/// let mut pages = service.pages(config);
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for row in &page.response {
///         println!("{}", row);
///     }
/// }
/// ```
pub struct QueryPages<'a> {
    /// Service used to fetch each page.
    service: &'a VsdService,
    /// Configuration of the next page to fetch, `None` once exhausted.
    next: Option<QueryConfiguration>,
}

impl<'a> QueryPages<'a> {
    pub(crate) fn new(service: &'a VsdService, config: QueryConfiguration) -> Self {
        Self {
            service,
            next: Some(config),
        }
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed.
    pub async fn next(&mut self) -> Option<Result<FetchResult, FetchError>> {
        let config = self.next.take()?;

        match self.service.fetch(&config).await {
            Ok(page) => {
                self.next = page.next_query.clone();
                Some(Ok(page))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Returns `true` once every page has been yielded or an error occurred.
    pub fn is_done(&self) -> bool {
        self.next.is_none()
    }

    /// Converts the iterator into a [`Stream`] of pages.
    pub fn into_stream(mut self) -> impl Stream<Item = Result<FetchResult, FetchError>> + 'a {
        async_stream::stream! {
            while let Some(page) = self.next().await {
                yield page;
            }
        }
    }
}

impl VsdService {
    /// Returns an async iterator over every page of `config`, starting at
    /// the page its `query.nextPage` selects.
    pub fn pages(&self, config: QueryConfiguration) -> QueryPages<'_> {
        QueryPages::new(self, config)
    }

    /// Fetches every page of `config` and concatenates their rows.
    pub async fn fetch_all(&self, config: QueryConfiguration) -> Result<Vec<Value>, FetchError> {
        self.pages(config)
            .into_stream()
            .try_fold(Vec::new(), |mut rows, page| async move {
                rows.extend(page.response);
                Ok(rows)
            })
            .await
    }
}
