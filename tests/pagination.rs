//! End-to-end pagination scenarios against a mock server

use eclcloud::{
    urls, Error, JsonExtractor, LinkedPaginator, MarkerPaginator, RequestConfig, ServiceClient,
};
use futures::TryStreamExt;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: String,
}

async fn setup() -> (MockServer, ServiceClient) {
    let server = MockServer::start().await;
    let client = ServiceClient::builder(server.uri()).build().unwrap();
    (server, client)
}

async fn mount_two_linked_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "1"}, {"id": "2"}],
            "links": {"next": format!("{}/items?marker=abc", server.uri())}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("marker", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "3"}, {"id": "4"}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_linked_collection_in_two_calls() {
    let (server, client) = setup().await;
    mount_two_linked_pages(&server).await;

    let pager = client.list(
        urls::collection_url(&client, "items"),
        LinkedPaginator::new("items"),
    );

    let mut pages = Vec::new();
    pager
        .each_page(|page| {
            pages.push(page.items("items")?.len());
            Ok(true)
        })
        .await
        .unwrap();
    assert_eq!(pages, vec![2, 2]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.query(), None);
    assert_eq!(requests[1].url.query(), Some("marker=abc"));
}

#[tokio::test]
async fn test_linked_collection_extract_all() {
    let (server, client) = setup().await;
    mount_two_linked_pages(&server).await;

    let items = client
        .list(
            urls::collection_url(&client, "items"),
            LinkedPaginator::new("items"),
        )
        .extract_all(&JsonExtractor::<Item>::new("items"))
        .await
        .unwrap();

    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_linked_collection_as_stream() {
    let (server, client) = setup().await;
    mount_two_linked_pages(&server).await;

    let pages: Vec<_> = client
        .list(
            urls::collection_url(&client, "items"),
            LinkedPaginator::new("items"),
        )
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].url().query(), Some("marker=abc"));
}

#[tokio::test]
async fn test_linked_empty_first_page_follows_link() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "links": {"next": format!("{}/items?marker=abc", server.uri())}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("marker", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "a"}, {"id": "b"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client
        .list(
            urls::collection_url(&client, "items"),
            LinkedPaginator::new("items"),
        )
        .extract_all(&JsonExtractor::<Item>::new("items"))
        .await
        .unwrap();

    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.query(), None);
    assert_eq!(requests[1].url.query(), Some("marker=abc"));
}

#[tokio::test]
async fn test_marker_collection() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/os-keypairs"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keypairs": [{"id": "k1"}, {"id": "k2"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/os-keypairs"))
        .and(query_param("marker", "k2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"keypairs": []})))
        .mount(&server)
        .await;

    let items = client
        .list(
            urls::collection_url(&client, "os-keypairs"),
            MarkerPaginator::new("keypairs"),
        )
        .extract_all(&JsonExtractor::<Item>::new("keypairs"))
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "itemNotFound": {"message": "Item missing could not be found.", "code": 404}
        })))
        .mount(&server)
        .await;

    let result = client
        .get(urls::resource_url(&client, "items", "missing"), RequestConfig::new())
        .await;

    let err = result.extract::<Item>().unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_decode());
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(result.extract_into::<Item>("item").unwrap_err().is_not_found());
}
