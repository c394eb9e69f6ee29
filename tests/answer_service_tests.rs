use campusgpt::answer::{Answer, AnswerError, AnswerService, ErrorKind, HttpAnswerService};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Mounts a GET /ask mock for `query` answering with `response`.
async fn mock_ask(server: &MockServer, query: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/ask"))
        .and(query_param("query", query))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Success responses
// ============================================================================

#[tokio::test]
async fn test_answer_field_is_returned() {
    let server = MockServer::start().await;
    mock_ask(
        &server,
        "library hours",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"answer": "Library opens at 8am"})),
    )
    .await;

    let service = HttpAnswerService::new(server.uri());
    let answer = service.ask("library hours").await;

    assert_eq!(answer, Ok(Answer::Text("Library opens at 8am".to_string())));
}

#[tokio::test]
async fn test_query_is_url_encoded() {
    let server = MockServer::start().await;
    let question = "what's the fee for M.Sc & B.Tech? 100%";
    mock_ask(
        &server,
        question,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "ok"})),
    )
    .await;

    let service = HttpAnswerService::new(server.uri());
    let answer = service.ask(question).await;

    assert_eq!(answer, Ok(Answer::Text("ok".to_string())));
}

#[tokio::test]
async fn test_empty_object_is_missing_answer() {
    let server = MockServer::start().await;
    mock_ask(
        &server,
        "bar",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({})),
    )
    .await;

    let service = HttpAnswerService::new(server.uri());
    assert_eq!(service.ask("bar").await, Ok(Answer::Missing));
}

#[tokio::test]
async fn test_unexpected_json_shape_is_missing_answer() {
    let server = MockServer::start().await;
    mock_ask(
        &server,
        "bar",
        ResponseTemplate::new(200).set_body_json(serde_json::json!(["not", "an", "object"])),
    )
    .await;

    let service = HttpAnswerService::new(server.uri());
    assert_eq!(service.ask("bar").await, Ok(Answer::Missing));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_carries_backend_message() {
    let server = MockServer::start().await;
    mock_ask(
        &server,
        "foo",
        ResponseTemplate::new(500)
            .set_body_json(serde_json::json!({"error": "model not loaded"})),
    )
    .await;

    let service = HttpAnswerService::new(server.uri());
    let err = service.ask("foo").await.unwrap_err();

    assert_eq!(
        err,
        AnswerError::Status {
            status: 500,
            message: "model not loaded".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::TransportFailure);
}

#[tokio::test]
async fn test_status_codes_are_not_special_cased() {
    for status in [400u16, 404, 429, 502, 503] {
        let server = MockServer::start().await;
        mock_ask(&server, "foo", ResponseTemplate::new(status)).await;

        let service = HttpAnswerService::new(server.uri());
        let err = service.ask("foo").await.unwrap_err();

        assert!(
            matches!(err, AnswerError::Status { status: s, .. } if s == status),
            "unexpected error for {status}: {err:?}"
        );
    }
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let server = MockServer::start().await;
    mock_ask(
        &server,
        "foo",
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let service = HttpAnswerService::new(server.uri());
    let err = service.ask("foo").await.unwrap_err();

    assert!(matches!(err, AnswerError::Parse(_)));
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let service = HttpAnswerService::new(uri);
    let err = service.ask("foo").await.unwrap_err();

    assert!(matches!(err, AnswerError::Network(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::TransportFailure);
}
