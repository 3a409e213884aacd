mod common;

use std::sync::Arc;
use std::time::Duration;

use common::FakeCompletion;
use serde_json::json;
use summarmuse::SummarizeError;
use summarmuse::ai::{CompletionClient, GeminiClient, OpenAiClient, SummaryRequester};
use summarmuse::core::models::{LengthTier, SummaryRequest};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(text: &str, length: LengthTier) -> SummaryRequest {
    SummaryRequest {
        text: text.to_string(),
        length,
    }
}

#[tokio::test]
async fn test_requester_trims_model_output() {
    let fake = Arc::new(FakeCompletion::replying("\n  The *budget* passed.  \n"));
    let requester = SummaryRequester::new(fake.clone());

    let result = requester
        .summarize(request("Minutes of the meeting.", LengthTier::Short))
        .await
        .unwrap();

    assert_eq!(result.as_str(), "The *budget* passed.");
    assert_eq!(fake.calls(), 1);
    assert!(fake.prompts()[0].contains("in a short format"));
    assert!(fake.prompts()[0].contains("Minutes of the meeting."));
}

#[tokio::test]
async fn test_requester_does_not_cache() {
    let fake = Arc::new(FakeCompletion::replying("summary"));
    let requester = SummaryRequester::new(fake.clone());

    for _ in 0..2 {
        requester
            .summarize(request("same text", LengthTier::Medium))
            .await
            .unwrap();
    }
    assert_eq!(fake.calls(), 2);
}

#[tokio::test]
async fn test_requester_propagates_provider_failure() {
    let fake = Arc::new(FakeCompletion::failing());
    let requester = SummaryRequester::new(fake.clone());

    let result = requester.summarize(request("text", LengthTier::Long)).await;
    assert!(matches!(result, Err(SummarizeError::SummaryGenerationFailed(_))));
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn test_requester_rejects_blank_output() {
    let requester = SummaryRequester::new(Arc::new(FakeCompletion::replying("   ")));
    let result = requester.summarize(request("text", LengthTier::Long)).await;
    assert!(matches!(result, Err(SummarizeError::SummaryGenerationFailed(_))));
}

fn gemini(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        "test-key".to_string(),
        "gemini-1.5-flash".to_string(),
        Some(server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_gemini_client_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("Summarize this"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "A *short* " }, { "text": "summary." }]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = gemini(&server).complete("Summarize this").await.unwrap();
    assert_eq!(text, "A *short* summary.");
}

#[tokio::test]
async fn test_gemini_client_maps_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let result = gemini(&server).complete("prompt").await;
    match result {
        Err(SummarizeError::SummaryGenerationFailed(msg)) => assert!(msg.contains("403")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_gemini_client_rejects_response_without_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let result = gemini(&server).complete("prompt").await;
    assert!(matches!(result, Err(SummarizeError::SummaryGenerationFailed(_))));
}

#[tokio::test]
async fn test_gemini_client_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = gemini(&server).complete("prompt").await;
    assert!(matches!(result, Err(SummarizeError::SummaryGenerationFailed(_))));
}

#[tokio::test]
async fn test_openai_client_reads_output_items() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("OpenAI-Organization", "org-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": [{
                "type": "message",
                "content": [
                    { "type": "output_text", "text": "First *point*." },
                    { "type": "refusal", "text": "ignored" }
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(
        "sk-test".to_string(),
        Some("org-1".to_string()),
        "gpt-4o-mini".to_string(),
        Some(server.uri()),
        Duration::from_secs(5),
    )
    .unwrap();

    assert_eq!(client.complete("prompt").await.unwrap(), "First *point*.");
}

#[tokio::test]
async fn test_gemini_client_honors_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "candidates": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::new(
        "test-key".to_string(),
        "gemini-1.5-flash".to_string(),
        Some(server.uri()),
        Duration::from_millis(200),
    )
    .unwrap();

    let started = std::time::Instant::now();
    let result = client.complete("prompt").await;

    assert!(matches!(result, Err(SummarizeError::SummaryGenerationFailed(_))));
    assert!(started.elapsed() < Duration::from_secs(4));
}
