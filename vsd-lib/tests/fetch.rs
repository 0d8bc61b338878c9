//! Integration tests for fetching pages through `VsdService`.
//!
//! A `MockTransport` serves numbered rows and reports the total count the
//! way VSD does, through the page and count response headers.

mod common;

use std::sync::Arc;

use serde_json::Value;
use serde_json::json;
use vsd_lib::VsdService;
use vsd_lib::api::query::SearchToken;
use vsd_lib::api::query::Sort;
use vsd_lib::error::FETCH_ERROR_MESSAGE;
use vsd_lib::error::FetchErrorKind;
use vsd_lib::model::Query;
use vsd_lib::model::QueryConfiguration;
use vsd_lib::template::Context;
use vsd_lib::transform::TransformRegistry;
use vsd_lib::transport::FILTER_HEADER;
use vsd_lib::transport::ORDER_BY_HEADER;
use vsd_lib::transport::PAGE_REQUEST_HEADER;
use vsd_lib::transport::PAGE_SIZE_HEADER;

use common::MockTransport;

fn service(transport: Arc<MockTransport>) -> VsdService {
    let transforms = TransformRegistry::new().register("ids", |rows: Vec<Value>| {
        rows.into_iter().map(|row| row["ID"].clone()).collect()
    });

    VsdService::builder()
        .transport(transport)
        .transforms(transforms)
        .build()
}

fn domains() -> QueryConfiguration {
    QueryConfiguration::new(Query::new("enterprises").parent_id("42").resource("domains"))
}

#[tokio::test]
async fn test_first_page_with_continuation() {
    let transport = Arc::new(MockTransport::new(25));
    let service = service(transport.clone());

    let page = service.fetch(&domains()).await.unwrap();

    assert_eq!(page.response.len(), 10);
    assert_eq!(page.length, 25);
    let next = page.next_query.expect("a second page");
    assert_eq!(next.query.next_page, Some(1));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "mock://enterprises/42/domains");
    assert_eq!(requests[0].headers[PAGE_REQUEST_HEADER], "0");
    assert_eq!(requests[0].headers[PAGE_SIZE_HEADER], "10");
}

#[tokio::test]
async fn test_last_page_has_no_continuation() {
    let transport = Arc::new(MockTransport::new(20));
    let service = service(transport);

    let page = service.fetch(&domains().with_next_page(1)).await.unwrap();

    assert_eq!(page.response.len(), 10);
    assert_eq!(page.next_query, None);
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_empty_result() {
    let service = service(Arc::new(MockTransport::new(0)));

    let page = service.fetch(&domains()).await.unwrap();

    assert!(page.response.is_empty());
    assert_eq!(page.length, 0);
    assert_eq!(page.next_query, None);
}

#[tokio::test]
async fn test_page_size_override() {
    let transport = Arc::new(MockTransport::new(100));
    let service = service(transport.clone());

    let page = service.fetch(&domains().with_page_size(30)).await.unwrap();

    assert_eq!(page.response.len(), 30);
    assert_eq!(transport.requests()[0].headers[PAGE_SIZE_HEADER], "30");
    assert_eq!(page.next_query.unwrap().query.page_size, Some(30));
}

#[tokio::test]
async fn test_zero_page_size_falls_back_to_transport_default() {
    let transport = Arc::new(MockTransport::new(25));
    let service = service(transport.clone());

    let mut pages = service.pages(domains().with_page_size(0));
    let mut seen = Vec::new();
    while let Some(page) = pages.next().await {
        seen.push(page.unwrap().response.len());
    }

    assert_eq!(seen, vec![10, 10]);
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.headers[PAGE_SIZE_HEADER] == "10"));
}

#[tokio::test]
async fn test_filter_and_sort_reach_transport() {
    let transport = Arc::new(MockTransport::new(5));
    let service = service(transport.clone());

    let config = domains()
        .with_search(&[SearchToken::element("name", "==", "web")])
        .with_sorting(Some(&Sort::desc("name")));
    service.fetch(&config).await.unwrap();

    let headers = &transport.requests()[0].headers;
    assert_eq!(headers[FILTER_HEADER], r#"name == "web""#);
    assert_eq!(headers[ORDER_BY_HEADER], "name desc");
}

#[tokio::test]
async fn test_transform_is_applied() {
    let service = service(Arc::new(MockTransport::new(3)));

    let page = service.fetch(&domains().tabify("ids")).await.unwrap();

    assert_eq!(page.response, vec![json!("0"), json!("1"), json!("2")]);
}

#[tokio::test]
async fn test_unknown_transform_fails_fetch() {
    let service = service(Arc::new(MockTransport::new(3)));

    let error = service.fetch(&domains().tabify("unknownName")).await.unwrap_err();

    assert_eq!(error.kind(), FetchErrorKind::Transform);
    assert_eq!(error.to_string(), FETCH_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_transport_failure_is_masked() {
    let service = service(Arc::new(MockTransport::failing()));

    let error = service.fetch(&domains()).await.unwrap_err();

    assert_eq!(error.kind(), FetchErrorKind::Transport);
    assert_eq!(error.to_string(), FETCH_ERROR_MESSAGE);
    assert!(!service.is_connected());
}

#[tokio::test]
async fn test_connection_state_passthrough() {
    let service = service(Arc::new(MockTransport::new(1)));
    assert!(!service.is_connected());

    service.fetch(&domains()).await.unwrap();
    assert!(service.is_connected());
}

#[tokio::test]
async fn test_pages_follow_continuations() {
    let transport = Arc::new(MockTransport::new(45));
    let service = service(transport.clone());

    let mut pages = service.pages(domains());
    let mut seen = Vec::new();
    while let Some(page) = pages.next().await {
        seen.push(page.unwrap().response.len());
    }

    // Page 3 reports 10 * 4 + 10 >= 45 and ends the iteration.
    assert_eq!(seen, vec![10, 10, 10, 10]);
    assert!(pages.is_done());
    assert_eq!(transport.requests().len(), 4);
}

#[tokio::test]
async fn test_pages_stop_after_error() {
    let transport = Arc::new(MockTransport::failing());
    let service = service(transport.clone());

    let mut pages = service.pages(domains());
    assert!(pages.next().await.unwrap().is_err());
    assert!(pages.next().await.is_none());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_fetch_all_concatenates_rows() {
    let service = service(Arc::new(MockTransport::new(45)));

    let rows = service.fetch_all(domains().tabify("ids")).await.unwrap();

    assert_eq!(rows.len(), 40);
    assert_eq!(rows.first(), Some(&json!("0")));
    assert_eq!(rows.last(), Some(&json!("39")));
}

#[tokio::test]
async fn test_request_id_uses_service_resolver() {
    let service = service(Arc::new(MockTransport::new(0)));
    let config = QueryConfiguration::new(
        Query::new("enterprises").parent_id("{{enterprise}}").resource("domains"),
    )
    .viz_id("V")
    .id("X");

    assert_eq!(service.request_id(&config, &Context::new()), None);

    let mut context = Context::new();
    context.insert("enterprise".to_string(), json!("42"));
    assert_eq!(
        service.request_id(&config, &context).as_deref(),
        Some("V-X-enterprises/42/domains")
    );
}

#[tokio::test]
async fn test_service_mutators() {
    let service = service(Arc::new(MockTransport::new(0)));

    let config = service.add_sorting(Some(domains()), Some(&Sort::asc("name")));
    let config = service.add_searching(config, &[SearchToken::element("name", "==", "a")]);
    let config = service.update_page_size(config, 50);
    let config = service.next_page_query(config, 2).unwrap();

    assert_eq!(config.query.sort.as_deref(), Some("name asc"));
    assert_eq!(config.query.filter.as_deref(), Some(r#"name == "a""#));
    assert_eq!(config.query.page_size, Some(50));
    assert_eq!(config.query.next_page, Some(2));

    assert_eq!(service.add_sorting(None, Some(&Sort::asc("name"))), None);
}
