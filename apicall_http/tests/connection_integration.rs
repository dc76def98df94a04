use apicall_http::{Body, Connection, Error};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_returns_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Ada"})))
        .mount(&mock_server)
        .await;

    let conn = Connection::new(&mock_server.uri()).unwrap();
    let resp = conn.get("/users/1", &[]).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body.get("name"), Some(&json!("Ada")));
}

#[tokio::test]
async fn get_sends_query_pairs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .mount(&mock_server)
        .await;

    let conn = Connection::new(&mock_server.uri()).unwrap();
    let resp = conn.get("/users", &[("page", "2")]).await.unwrap();
    assert!(resp.is_collection());
}

#[tokio::test]
async fn error_status_is_a_plain_response_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let conn = Connection::new(&mock_server.uri()).unwrap();
    let resp = conn.get("/boom", &[]).await.unwrap();
    assert_eq!(resp.status, 500);
    assert_eq!(resp.body, Body::Text("Internal Server Error".to_string()));
}

#[tokio::test]
async fn raise_for_status_returns_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let conn = Connection::builder()
        .base_url(&mock_server.uri())
        .raise_for_status(true)
        .build()
        .unwrap();
    let err = conn.get("/missing", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Status(_)));
    assert_eq!(err.response().map(|r| r.status), Some(404));
    assert_eq!(err.response().map(|r| r.body.is_empty()), Some(true));
}

#[tokio::test]
async fn raise_for_status_ignores_3xx() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cached"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&mock_server)
        .await;

    let conn = Connection::builder()
        .base_url(&mock_server.uri())
        .raise_for_status(true)
        .build()
        .unwrap();
    let resp = conn.get("/cached", &[]).await.unwrap();
    assert_eq!(resp.status, 304);
}

#[tokio::test]
async fn post_json_sends_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({"name": "Grace"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .mount(&mock_server)
        .await;

    let conn = Connection::new(&mock_server.uri()).unwrap();
    let resp = conn
        .post_json("/users", &json!({"name": "Grace"}))
        .await
        .unwrap();
    assert_eq!(resp.status, 201);
    assert_eq!(resp.body.get("id"), Some(&json!(7)));
}

#[tokio::test]
async fn delete_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let conn = Connection::new(&mock_server.uri()).unwrap();
    let resp = conn.delete("/users/7").await.unwrap();
    assert_eq!(resp.status, 204);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let conn = Connection::new("http://127.0.0.1:1").unwrap();
    let err = conn.get("/", &[]).await.unwrap_err();
    assert!(err.response().is_none());
}
