//! Transport abstraction
//!
//! The query layer never talks HTTP itself. It asks a [`Transport`] to
//! build the URL and headers for a request and to perform it. The crate
//! ships [`HttpTransport`] for the VSD REST API; tests and embedders can
//! supply their own.

mod http;

pub use http::*;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::TransportError;
use crate::model::EntityRef;

/// Default page size used when neither the configuration nor the transport
/// builder sets one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// A request ready to be performed.
#[derive(Debug, Clone)]
pub struct InvokeRequest {
    /// HTTP method.
    pub verb: Method,
    /// Fully built request URL.
    pub url: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl InvokeRequest {
    /// Creates a body-less `GET` request.
    pub fn get(url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            verb: Method::GET,
            url: url.into(),
            headers,
            body: None,
        }
    }
}

/// The response to a performed request.
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    /// Response headers.
    pub headers: HeaderMap,
    /// Rows in the response body; empty when the body was empty.
    pub data: Vec<Value>,
}

/// Trait for the HTTP collaborator used by
/// [`VsdService`](crate::VsdService).
///
/// Implementations are responsible for:
/// - Mapping entity references to request URLs
/// - Computing paging, filtering, ordering and authentication headers
/// - Performing requests and decoding the body into rows
/// - Tracking whether the remote endpoint is reachable
#[async_trait]
pub trait Transport: Send + Sync {
    /// Builds the URL listing `target` under `parent`, with an optional
    /// trailing route segment.
    fn build_url(
        &self,
        target: &EntityRef,
        route_suffix: Option<&str>,
        parent: &EntityRef,
    ) -> Result<String, TransportError>;

    /// Computes the request headers for one page of a query.
    fn compute_headers(
        &self,
        page: u32,
        filter: Option<&str>,
        order_by: Option<&str>,
        proxy_user: Option<&str>,
        page_size: u32,
    ) -> Result<HeaderMap, TransportError>;

    /// Performs a request.
    async fn invoke_request(
        &self,
        request: InvokeRequest,
    ) -> Result<TransportResponse, TransportError>;

    /// The page size used when a configuration does not set one.
    fn page_size(&self) -> u32 {
        DEFAULT_PAGE_SIZE
    }

    /// Returns `true` if the last request reached the server.
    fn is_connected(&self) -> bool;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn build_url(
        &self,
        target: &EntityRef,
        route_suffix: Option<&str>,
        parent: &EntityRef,
    ) -> Result<String, TransportError> {
        (**self).build_url(target, route_suffix, parent)
    }

    fn compute_headers(
        &self,
        page: u32,
        filter: Option<&str>,
        order_by: Option<&str>,
        proxy_user: Option<&str>,
        page_size: u32,
    ) -> Result<HeaderMap, TransportError> {
        (**self).compute_headers(page, filter, order_by, proxy_user, page_size)
    }

    async fn invoke_request(
        &self,
        request: InvokeRequest,
    ) -> Result<TransportResponse, TransportError> {
        (**self).invoke_request(request).await
    }

    fn page_size(&self) -> u32 {
        (**self).page_size()
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}
