//! Integration tests
//!
//! Tests the full end-to-end flow: YAML settings → policy → pages, and the
//! HTTP front end serving a JSON dataset.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use solidafy_pager::cli::{app, Dataset};
use solidafy_pager::config::load_settings_from_str;
use solidafy_pager::pagination::{PageRequest, PaginationPolicy};
use solidafy_pager::{Error, OrderingKey};
use tower::ServiceExt;

fn people(n: i64) -> Vec<Value> {
    (1..=n)
        .map(|id| json!({"id": id, "name": format!("person-{id}")}))
        .collect()
}

fn ids(items: &[Value]) -> Vec<i64> {
    items.iter().filter_map(|item| item["id"].as_i64()).collect()
}

/// Follow `next` links from the first page, returning the ids of every page
fn walk(dataset: &Dataset) -> Vec<Vec<i64>> {
    let mut pages = Vec::new();
    let mut request = PageRequest::new();
    loop {
        let page = dataset.paginate(&request).unwrap();
        pages.push(ids(&page.items));
        match page.next {
            Some(link) => request = PageRequest::from_params(link.params),
            None => break,
        }
    }
    pages
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .uri(uri)
            .header("host", "pager.test")
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Settings → Policy
// ============================================================================

#[test]
fn test_page_number_from_yaml() {
    let settings = load_settings_from_str(
        r"
strategy: page_number
default_page_size: 5
max_page_size: 10
",
    )
    .unwrap();
    let dataset = Dataset::new(people(12), &settings).unwrap();

    assert_eq!(
        walk(&dataset),
        vec![
            vec![1, 2, 3, 4, 5],
            vec![6, 7, 8, 9, 10],
            vec![11, 12]
        ]
    );
}

#[test]
fn test_limit_offset_from_yaml() {
    let settings = load_settings_from_str(
        r"
strategy: limit_offset
default_page_size: 5
limit_param: take
offset_param: skip
",
    )
    .unwrap();
    let dataset = Dataset::new(people(12), &settings).unwrap();

    let page = dataset
        .paginate(&PageRequest::from_query("take=5&skip=10"))
        .unwrap();
    assert_eq!(ids(&page.items), vec![11, 12]);
    assert!(page.next.is_none());
    assert_eq!(
        page.previous.as_ref().and_then(|l| l.param("skip")),
        Some("5")
    );
}

#[test]
fn test_cursor_from_yaml_descending_and_signed() {
    let settings = load_settings_from_str(
        r"
strategy: cursor
default_page_size: 4
ordering: desc
ordering_field: id
cursor_secret: integration
",
    )
    .unwrap();
    let dataset = Dataset::new(people(10), &settings).unwrap();

    assert_eq!(
        walk(&dataset),
        vec![vec![10, 9, 8, 7], vec![6, 5, 4, 3], vec![2, 1]]
    );
}

#[test]
fn test_cursor_timestamps_survive_inserts() {
    let settings = load_settings_from_str(
        r"
strategy: cursor
default_page_size: 2
ordering_field: created
",
    )
    .unwrap();

    let mut items = vec![
        json!({"id": 1, "created": "2024-01-01T00:00:00Z"}),
        json!({"id": 2, "created": "2024-01-02T00:00:00Z"}),
        json!({"id": 3, "created": "2024-01-03T00:00:00Z"}),
        json!({"id": 4, "created": "2024-01-04T00:00:00Z"}),
    ];
    let policy = PaginationPolicy::for_json(&settings).unwrap();

    let first = policy.paginate(&items, &PageRequest::new()).unwrap();
    assert_eq!(ids(&first.items), vec![1, 2]);

    // A row lands before the window between requests
    items.insert(0, json!({"id": 0, "created": "2023-12-31T00:00:00Z"}));

    let second = policy
        .paginate(&items, &PageRequest::from_params(first.next.unwrap().params))
        .unwrap();
    assert_eq!(ids(&second.items), vec![3, 4]);
    assert!(second.next.is_none());
}

#[test]
fn test_custom_ordering_key_accessor() {
    #[derive(Debug, Clone, PartialEq)]
    struct Event {
        seq: u32,
        name: &'static str,
    }

    let events: Vec<Event> = (1..=6)
        .map(|seq| Event { seq, name: "evt" })
        .collect();

    let settings = load_settings_from_str("strategy: cursor\ndefault_page_size: 4").unwrap();
    let policy = PaginationPolicy::from_settings(&settings, |e: &Event| OrderingKey::from(e.seq))
        .unwrap();

    let first = policy.paginate(&events, &PageRequest::new()).unwrap();
    assert_eq!(first.len(), 4);
    assert_eq!(first.items[0].name, "evt");

    let second = policy
        .paginate(&events, &PageRequest::from_params(first.next.unwrap().params))
        .unwrap();
    assert_eq!(
        second.items.iter().map(|e| e.seq).collect::<Vec<_>>(),
        vec![5, 6]
    );
}

#[test]
fn test_errors_name_the_parameter() {
    let settings = load_settings_from_str("page_param: p\npage_size_param: size").unwrap();
    let dataset = Dataset::new(people(3), &settings).unwrap();

    let err = dataset.paginate(&PageRequest::from_query("p=0")).unwrap_err();
    assert!(matches!(err, Error::InvalidPage { .. }));
    assert_eq!(err.param(), Some("p"));

    let err = dataset
        .paginate(&PageRequest::from_query("size=-2"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPageSize { .. }));
    assert_eq!(err.param(), Some("size"));
}

// ============================================================================
// HTTP Front End
// ============================================================================

#[tokio::test]
async fn test_http_health() {
    let dataset = Dataset::new(people(1), &Default::default()).unwrap();
    let (status, body) = get_json(app(dataset), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_http_page_number_envelope() {
    let settings = load_settings_from_str("default_page_size: 5").unwrap();
    let dataset = Dataset::new(people(12), &settings).unwrap();

    let (status, body) = get_json(app(dataset), "/items?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 12);
    assert_eq!(body["next"], "http://pager.test/items?page=3");
    assert_eq!(body["previous"], "http://pager.test/items?page=1");
    assert_eq!(
        ids(body["results"].as_array().unwrap()),
        vec![6, 7, 8, 9, 10]
    );
}

#[tokio::test]
async fn test_http_cursor_follow_next() {
    let settings =
        load_settings_from_str("strategy: cursor\ndefault_page_size: 5\nordering_field: id")
            .unwrap();
    let router = app(Dataset::new(people(12), &settings).unwrap());

    let (status, first) = get_json(router.clone(), "/items").await;
    assert_eq!(status, StatusCode::OK);
    assert!(first.get("count").is_none());
    assert_eq!(ids(first["results"].as_array().unwrap()), vec![1, 2, 3, 4, 5]);

    let next = first["next"].as_str().unwrap();
    let path = next.strip_prefix("http://pager.test").unwrap();
    let (_, second) = get_json(router, path).await;
    assert_eq!(
        ids(second["results"].as_array().unwrap()),
        vec![6, 7, 8, 9, 10]
    );
}

#[tokio::test]
async fn test_http_invalid_page_is_not_found() {
    let dataset = Dataset::new(people(3), &Default::default()).unwrap();
    let (status, body) = get_json(app(dataset), "/items?page=7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["param"], "page");
    assert_eq!(body["detail"], "That page contains no results");
}

#[tokio::test]
async fn test_http_invalid_cursor_is_bad_request() {
    let settings = load_settings_from_str("strategy: cursor\nordering_field: id").unwrap();
    let dataset = Dataset::new(people(3), &settings).unwrap();
    let (status, body) = get_json(app(dataset), "/items?cursor=bogus!").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["param"], "cursor");
}

#[tokio::test]
async fn test_http_offset_past_end_is_empty() {
    let settings = load_settings_from_str("strategy: limit_offset").unwrap();
    let dataset = Dataset::new(people(3), &settings).unwrap();
    let (status, body) = get_json(app(dataset), "/items?offset=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["next"], Value::Null);
}

#[tokio::test]
async fn test_http_links_follow_forwarded_proto() {
    let settings = load_settings_from_str("default_page_size: 2").unwrap();
    let dataset = Dataset::new(people(5), &settings).unwrap();

    let request = Request::builder()
        .uri("/items?page=2")
        .header("host", "pager.test")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(dataset), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["next"], "https://pager.test/items?page=3");
    assert_eq!(body["previous"], "https://pager.test/items?page=1");
}
