//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde_json::Value;
use serde_json::json;
use vsd_lib::api::query::COUNT_HEADER;
use vsd_lib::api::query::PAGE_HEADER;
use vsd_lib::error::TransportError;
use vsd_lib::model::EntityRef;
use vsd_lib::transport::FILTER_HEADER;
use vsd_lib::transport::InvokeRequest;
use vsd_lib::transport::ORDER_BY_HEADER;
use vsd_lib::transport::PAGE_REQUEST_HEADER;
use vsd_lib::transport::PAGE_SIZE_HEADER;
use vsd_lib::transport::Transport;
use vsd_lib::transport::TransportResponse;

/// In-memory transport serving `total` numbered rows in pages.
pub struct MockTransport {
    pub total: usize,
    pub default_page_size: u32,
    pub fail: bool,
    pub requests: Mutex<Vec<InvokeRequest>>,
    connected: AtomicBool,
}

impl MockTransport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            default_page_size: 10,
            fail: false,
            requests: Mutex::new(Vec::new()),
            connected: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    pub fn requests(&self) -> Vec<InvokeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn header_u32(headers: &HeaderMap, name: &str) -> u32 {
    headers[name].to_str().unwrap().parse().unwrap()
}

#[async_trait]
impl Transport for MockTransport {
    fn build_url(
        &self,
        target: &EntityRef,
        route_suffix: Option<&str>,
        parent: &EntityRef,
    ) -> Result<String, TransportError> {
        let mut segments: Vec<&str> = parent.segments().chain(target.segments()).collect();
        segments.extend(route_suffix);
        Ok(format!("mock://{}", segments.join("/")))
    }

    fn compute_headers(
        &self,
        page: u32,
        filter: Option<&str>,
        order_by: Option<&str>,
        _proxy_user: Option<&str>,
        page_size: u32,
    ) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(PAGE_REQUEST_HEADER, HeaderValue::from(page));
        headers.insert(PAGE_SIZE_HEADER, HeaderValue::from(page_size));
        if let Some(filter) = filter {
            headers.insert(FILTER_HEADER, HeaderValue::from_str(filter).unwrap());
        }
        if let Some(order_by) = order_by {
            headers.insert(ORDER_BY_HEADER, HeaderValue::from_str(order_by).unwrap());
        }
        Ok(headers)
    }

    async fn invoke_request(
        &self,
        request: InvokeRequest,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail {
            self.connected.store(false, Ordering::Relaxed);
            return Err(TransportError::http(503, "service unavailable"));
        }
        self.connected.store(true, Ordering::Relaxed);

        let page = header_u32(&request.headers, PAGE_REQUEST_HEADER) as usize;
        let page_size = header_u32(&request.headers, PAGE_SIZE_HEADER) as usize;

        let start = (page * page_size).min(self.total);
        let end = (start + page_size).min(self.total);
        let data: Vec<Value> = (start..end).map(|i| json!({ "ID": i.to_string() })).collect();

        let mut headers = HeaderMap::new();
        headers.insert(PAGE_HEADER, HeaderValue::from(page));
        headers.insert(COUNT_HEADER, HeaderValue::from(self.total));

        Ok(TransportResponse { headers, data })
    }

    fn page_size(&self) -> u32 {
        self.default_page_size
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}
