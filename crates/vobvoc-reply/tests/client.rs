//! Integration tests for `ReplyClient` using wiremock HTTP mocks.

use vobvoc_reply::{ReplyClient, ReplyError, Tone};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ReplyClient {
    ReplyClient::with_base_url(Some("test-key"), "gpt-4o", 30, base_url)
        .expect("client construction should not fail")
        .with_retry_policy(2, 0)
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn generate_reply_returns_trimmed_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({ "model": "gpt-4o" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("  We are sorry to hear that. Please contact us via Shopee chat.  ")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let reply = client
        .try_generate_reply("Shipping was late", Some("Delivery delay"), Tone::Empathetic)
        .await
        .expect("should return reply");

    assert_eq!(
        reply,
        "We are sorry to hear that. Please contact us via Shopee chat."
    );
}

#[tokio::test]
async fn reply_request_carries_tone_and_review() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .try_generate_reply("Too sticky", None, Tone::FirmButPolite)
        .await
        .expect("should return reply");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = requests[0].body_json().expect("json body");
    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .contains("Tone: Firm but polite."));
    assert_eq!(
        messages[1]["content"],
        "Review: Too sticky\nIssue: Satisfied customer"
    );
}

#[tokio::test]
async fn translate_returns_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("안녕하세요.")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(client.translate("Hello.").await, "안녕하세요.");
}

#[tokio::test]
async fn unauthorized_is_reported_inline_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client.generate_reply("late", None, Tone::Professional).await;
    assert_eq!(
        reply,
        "Error: completion API returned 401: Incorrect API key provided"
    );
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Recovered.")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client
        .try_generate_reply("late", None, Tone::Professional)
        .await
        .expect("second attempt should succeed");
    assert_eq!(reply, "Recovered.");
}

#[tokio::test]
async fn empty_completion_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.try_translate("Hello").await;
    assert!(matches!(result, Err(ReplyError::EmptyCompletion)));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.try_translate("Hello").await;
    assert!(matches!(result, Err(ReplyError::Deserialize { .. })));
}

#[tokio::test]
async fn mock_mode_never_calls_the_api() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("live")))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_mock(true);
    let reply = client.generate_reply("late", None, Tone::Professional).await;
    assert_eq!(reply, vobvoc_reply::MOCK_REPLY);
}
