use secrecy::SecretString;
use std::time::Duration;
use terra_client::http_client::ReqwestTerraClient;
use terra_client::retry::RetryPolicy;
use terra_client::{TerraClient, TerraError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestTerraClient {
    ReqwestTerraClient::new(&server.uri(), "dev-42", SecretString::new("tok".into())).with_retry(
        RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
        },
    )
}

#[tokio::test]
async fn get_sleep_sends_auth_headers_and_parses() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "status": "success",
        "data": [{"sleep_durations_data": {"asleep": {"duration_asleep_state_seconds": 25200}}}]
    });

    Mock::given(method("GET"))
        .and(path("/v2/sleep"))
        .and(header("dev-id", "dev-42"))
        .and(header("x-api-key", "tok"))
        .and(query_param("user_id", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let sleep = client_for(&server).get_sleep("u1", Some(7)).await.expect("sleep");
    assert_eq!(sleep["status"], "success");
    assert!(sleep["data"].is_array());

    // The trailing window must be sent as start_date/end_date query params.
    let received = server.received_requests().await.unwrap();
    assert!(!received.is_empty());
    let query = received[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("start_date="));
    assert!(query.contains("end_date="));
}

#[tokio::test]
async fn get_daily_and_activity_hit_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.get_daily("u1", None).await.is_ok());
    assert!(client.get_activity("u1", None).await.is_ok());
}

#[tokio::test]
async fn auth_failures_map_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/sleep"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad api key"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_sleep("u1", None).await.unwrap_err();
    assert!(matches!(err, TerraError::Auth(_)));
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/daily"))
        .respond_with(ResponseTemplate::new(404).set_body_string("unknown user"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_daily("nobody", None).await.unwrap_err();
    assert!(matches!(err, TerraError::NotFound(_)));
}

#[tokio::test]
async fn transient_server_errors_are_retried() {
    let server = MockServer::start().await;
    let body = serde_json::json!({"status": "success", "data": []});

    // First attempt fails with a 503, the mounted-later mock takes over after
    // the first match expires.
    Mock::given(method("GET"))
        .and(path("/v2/sleep"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/sleep"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let sleep = client_for(&server).get_sleep("u1", None).await.expect("retried");
    assert_eq!(sleep["status"], "success");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
}

#[tokio::test]
async fn invalid_input_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/activity"))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad date range"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_activity("u1", None).await.unwrap_err();
    assert!(matches!(err, TerraError::InvalidInput(_)));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}
