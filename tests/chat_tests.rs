//! End-to-end chat orchestration tests with mocked vendor endpoints.
//!
//! These tests use wiremock to validate:
//! - the plain user/assistant exchange
//! - the two-phase tool-use protocol (swarm execution + correlated follow-up)
//! - the unrecognized-tool no-op policy
//! - error propagation and tool-failure containment

use ants::agents::AgentProfile;
use ants::chat::ChatService;
use ants::llm::{AnthropicClient, ChatDefaults, OpenAIClient};
use ants::swarm::SwarmCoordinator;
use ants::types::{AppError, TurnRole};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helper Functions =============

fn profile(name: &str, model: &str) -> AgentProfile {
    AgentProfile {
        id: Uuid::new_v4(),
        name: name.to_string(),
        model: model.to_string(),
        top_p: 0.5,
        temperature: 0.7,
        system_prompt: String::new(),
        default_prompt: String::new(),
        max_output_tokens: 256,
    }
}

/// Anthropic response carrying only text.
fn text_response(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_1",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    })
}

/// Anthropic response carrying text plus one tool invocation.
fn tool_use_response(text: &str, tool: &str, id: &str, input: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "msg_1",
        "content": [
            {"type": "text", "text": text},
            {"type": "tool_use", "id": id, "name": tool, "input": input}
        ],
        "stop_reason": "tool_use"
    })
}

fn agent_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn service(anthropic: &MockServer, openai: &MockServer) -> ChatService {
    let chat_gateway = Arc::new(
        AnthropicClient::with_base_url(
            "test-key".to_string(),
            anthropic.uri(),
            Duration::from_secs(5),
        )
        .unwrap(),
    );
    let agent_gateway = Arc::new(
        OpenAIClient::with_base_url(
            "test-key".to_string(),
            openai.uri(),
            Duration::from_secs(5),
        )
        .unwrap(),
    );
    ChatService::new(
        chat_gateway,
        SwarmCoordinator::new(agent_gateway),
        ChatDefaults::default(),
    )
}

// ============= Tests =============

#[tokio::test]
async fn test_plain_exchange_appends_user_then_assistant() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Hi there!")))
        .mount(&anthropic)
        .await;

    let mut service = service(&anthropic, &openai);
    let outcome = service.send("hello", &[]).await.unwrap().unwrap();

    assert_eq!(outcome.reply, "Hi there!");
    assert!(outcome.synthesis.is_none());

    let turns = service.session().snapshot();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, TurnRole::User);
    assert_eq!(turns[0].content, "hello");
    assert_eq!(turns[1].role, TurnRole::Assistant);

    // The request carried the full history and the tool declarations.
    let requests = anthropic.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["tools"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_blank_input_is_a_noop() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("unused")))
        .expect(0)
        .mount(&anthropic)
        .await;

    let mut service = service(&anthropic, &openai);
    let outcome = service.send("   ", &[]).await.unwrap();
    assert!(outcome.is_none());
    assert!(service.session().is_empty());
}

#[tokio::test]
async fn test_unrecognized_tool_is_a_silent_noop() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_response(
            "Let me try something.",
            "mystery_tool",
            "toolu_7",
            json!({}),
        )))
        .mount(&anthropic)
        .await;

    let mut service = service(&anthropic, &openai);
    let profiles = vec![profile("Atta", "m1")];
    let outcome = service.send("do a thing", &profiles).await.unwrap().unwrap();

    // No side effect, no error, primary reply intact.
    assert_eq!(outcome.reply, "Let me try something.");
    assert!(outcome.synthesis.is_none());
    assert_eq!(anthropic.received_requests().await.unwrap().len(), 1);
    assert_eq!(openai.received_requests().await.unwrap().len(), 0);
    assert_eq!(service.session().len(), 2);
}

#[tokio::test]
async fn test_greetings_tool_needs_no_followup() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_response(
            "Hello to you too!",
            "greetings",
            "toolu_8",
            json!({"message": "hi"}),
        )))
        .mount(&anthropic)
        .await;

    let mut service = service(&anthropic, &openai);
    let outcome = service.send("hi", &[]).await.unwrap().unwrap();

    assert_eq!(outcome.reply, "Hello to you too!");
    assert!(outcome.synthesis.is_none());
    assert_eq!(anthropic.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_activate_swarm_runs_the_two_phase_protocol() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;

    // Phase one: the model requests the swarm tool.
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_response(
            "On it.",
            "activate_swarm",
            "toolu_123",
            json!({"problem": "optimize X"}),
        )))
        .up_to_n_times(1)
        .mount(&anthropic)
        .await;
    // Phase two: the follow-up synthesis call.
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Synthesized plan.")))
        .mount(&anthropic)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"model": "m1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_response("use a heap")))
        .mount(&openai)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"model": "m2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_response("use a btree")))
        .mount(&openai)
        .await;

    let mut service = service(&anthropic, &openai);
    let profiles = vec![profile("Atta", "m1"), profile("Weaver", "m2")];
    let outcome = service
        .send("please optimize X", &profiles)
        .await
        .unwrap()
        .unwrap();

    // Dual output: the primary reply and the synthesis are both surfaced.
    assert_eq!(outcome.reply, "On it.");
    assert_eq!(outcome.synthesis.as_deref(), Some("Synthesized plan."));

    // Exactly one fan-out (one call per profile).
    assert_eq!(openai.received_requests().await.unwrap().len(), 2);

    // Exactly one follow-up call, carrying pre-tool history + 2 messages.
    let requests = anthropic.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let followup: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let messages = followup["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);

    // The assistant turn echoes the model's own tool invocation.
    assert_eq!(messages[1]["role"], "assistant");
    let assistant_blocks = messages[1]["content"].as_array().unwrap();
    assert!(assistant_blocks
        .iter()
        .any(|b| b["type"] == "tool_use" && b["id"] == "toolu_123"));

    // The user turn carries the correlated acknowledgment and the synthesis
    // request built from the aggregated replies.
    assert_eq!(messages[2]["role"], "user");
    let user_blocks = messages[2]["content"].as_array().unwrap();
    assert_eq!(user_blocks[0]["type"], "tool_result");
    assert_eq!(user_blocks[0]["tool_use_id"], "toolu_123");
    assert_eq!(user_blocks[0]["content"], "Tool completed successfully");
    let synthesis_text = user_blocks[1]["text"].as_str().unwrap();
    assert!(synthesis_text.contains("## Problem\noptimize X"));
    assert!(synthesis_text.contains("**Atta (m1)**: use a heap"));
    assert!(synthesis_text.contains("**Weaver (m2)**: use a btree"));

    // Session order: user, synthesis reply, then the primary reply.
    let turns = service.session().snapshot();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].role, TurnRole::User);
    assert_eq!(turns[1].content, "Synthesized plan.");
    assert_eq!(turns[2].content, "On it.");
}

#[tokio::test]
async fn test_swarm_tool_without_problem_skips_the_fanout() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_response(
            "Hmm.",
            "activate_swarm",
            "toolu_9",
            json!({}),
        )))
        .up_to_n_times(1)
        .mount(&anthropic)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Nothing to do.")))
        .mount(&anthropic)
        .await;

    let mut service = service(&anthropic, &openai);
    let profiles = vec![profile("Atta", "m1")];
    let outcome = service.send("go", &profiles).await.unwrap().unwrap();

    // Missing problem degrades to an empty batch; the follow-up still runs.
    assert_eq!(openai.received_requests().await.unwrap().len(), 0);
    assert_eq!(anthropic.received_requests().await.unwrap().len(), 2);
    assert_eq!(outcome.synthesis.as_deref(), Some("Nothing to do."));
}

#[tokio::test]
async fn test_primary_call_failure_propagates() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&anthropic)
        .await;

    let mut service = service(&anthropic, &openai);
    let err = service.send("hello", &[]).await.unwrap_err();
    match err {
        AppError::Upstream { status, body } => {
            assert_eq!(status, 529);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected Upstream, got {other}"),
    }
}

#[tokio::test]
async fn test_followup_failure_keeps_the_primary_reply() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_response(
            "Dispatching the swarm.",
            "activate_swarm",
            "toolu_5",
            json!({"problem": "optimize X"}),
        )))
        .up_to_n_times(1)
        .mount(&anthropic)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&anthropic)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_response("an idea")))
        .mount(&openai)
        .await;

    let mut service = service(&anthropic, &openai);
    let profiles = vec![profile("Atta", "m1")];
    let outcome = service.send("go", &profiles).await.unwrap().unwrap();

    // The handler failure is contained: the user still sees the first reply.
    assert_eq!(outcome.reply, "Dispatching the swarm.");
    assert!(outcome.synthesis.is_none());
    let turns = service.session().snapshot();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].content, "Dispatching the swarm.");
}

#[tokio::test]
async fn test_empty_followup_appends_no_synthesis_turn() {
    let anthropic = MockServer::start().await;
    let openai = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_response(
            "Working on it.",
            "activate_swarm",
            "toolu_6",
            json!({"problem": "optimize X"}),
        )))
        .up_to_n_times(1)
        .mount(&anthropic)
        .await;
    // Success with no text content: silent completion.
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_2",
            "content": [],
            "stop_reason": "end_turn"
        })))
        .mount(&anthropic)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_response("an idea")))
        .mount(&openai)
        .await;

    let mut service = service(&anthropic, &openai);
    let profiles = vec![profile("Atta", "m1")];
    let outcome = service.send("go", &profiles).await.unwrap().unwrap();

    assert!(outcome.synthesis.is_none());
    let turns = service.session().snapshot();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].content, "Working on it.");
}
