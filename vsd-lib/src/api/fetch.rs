//! Fetching one page of a query configuration

use serde_json::Value;

use crate::VsdService;
use crate::api::query::PageHeader;
use crate::api::query::next_request;
use crate::error::Error;
use crate::error::FetchError;
use crate::error::TransformError;
use crate::model::EntityRef;
use crate::model::QueryConfiguration;
use crate::transport::InvokeRequest;

/// One fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    /// Rows of this page, after the configured transform.
    pub response: Vec<Value>,
    /// Configuration for the next page, or `None` when exhausted.
    pub next_query: Option<QueryConfiguration>,
    /// Total number of matching items reported by the server.
    pub length: u64,
}

impl FetchResult {
    /// Returns `true` if another page remains.
    pub fn has_more(&self) -> bool {
        self.next_query.is_some()
    }
}

impl VsdService {
    /// Fetches the page of `config` selected by `query.nextPage`.
    ///
    /// Any failure, whether from the transport or from a missing transform,
    /// is logged and reported as a [`FetchError`] carrying only its kind;
    /// the error always displays as
    /// [`FETCH_ERROR_MESSAGE`](crate::error::FETCH_ERROR_MESSAGE).
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut page = service.fetch(&config).await?;
    /// let mut rows = page.response;
    ///
    /// while let Some(next) = page.next_query {
    ///     page = service.fetch(&next).await?;
    ///     rows.extend(page.response);
    /// }
    /// ```
    pub async fn fetch(&self, config: &QueryConfiguration) -> Result<FetchResult, FetchError> {
        self.try_fetch(config).await.map_err(|e| {
            log::error!("{}", e);
            FetchError::from(e)
        })
    }

    async fn try_fetch(&self, config: &QueryConfiguration) -> Result<FetchResult, Error> {
        let transport = self.transport();
        let query = &config.query;

        let page = query.next_page.unwrap_or(0);
        // A zero page size falls back to the transport default.
        let page_size = query
            .page_size
            .filter(|&size| size > 0)
            .unwrap_or_else(|| transport.page_size());

        let target = EntityRef::target_of(query);
        let url = transport.build_url(&target, None, &EntityRef::parent_of(query))?;
        let headers = transport.compute_headers(
            page,
            query.filter.as_deref(),
            query.sort.as_deref(),
            None,
            page_size,
        )?;

        log::debug!("GET {} (page {}, page size {})", url, page, page_size);
        let response = transport.invoke_request(InvokeRequest::get(url, headers)).await?;

        let header = PageHeader::from_response(&response.headers, response.data.len());
        let next_query = next_request(&header, config, page_size);
        log::debug!(
            "page {} returned {} of {} items, more: {}",
            header.page,
            header.hits,
            header.count,
            next_query.is_some()
        );

        Ok(FetchResult {
            response: self.tabify(response.data, config)?,
            next_query,
            length: header.count,
        })
    }

    /// Applies the transform named by `config.tabify` to `rows`.
    ///
    /// Rows pass through unchanged when no transform is configured.
    pub fn tabify(
        &self,
        rows: Vec<Value>,
        config: &QueryConfiguration,
    ) -> Result<Vec<Value>, TransformError> {
        self.transforms().apply(rows, config)
    }
}
