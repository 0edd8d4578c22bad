//! Integration tests — end-to-end generation flows.
//!
//! These exercise the full request path against a scripted provider fake:
//! candidate fallback order, two-tier attempts, call-count short-circuiting,
//! exhaustion diagnostics, and resolved-text → frame-stream delivery.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use parking_lot::Mutex;

use quill_core::gateway::Gateway;
use quill_core::stream::StreamEmitter;
use quill_core::{GatewayConfig, GatewayError, Mode};
use quill_llm::client::InferenceClient;
use quill_llm::error::LlmError;
use quill_llm::types::{ChatCompletion, ChatRequest, CompletionRequest};

/// Scripted behavior for one tier of one model.
#[derive(Clone)]
enum Script {
    Text(&'static str),
    Empty,
    Fail(&'static str),
}

/// Provider fake that records every call in arrival order.
#[derive(Default)]
struct ScriptedProvider {
    chat: HashMap<String, Script>,
    raw: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn chat_script(mut self, model: &str, script: Script) -> Self {
        self.chat.insert(model.to_string(), script);
        self
    }

    fn raw_script(mut self, model: &str, script: Script) -> Self {
        self.raw.insert(model.to_string(), script);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl InferenceClient for ScriptedProvider {
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError> {
        self.calls.lock().push(format!("chat:{}", request.model));
        match self.chat.get(&request.model).cloned().unwrap_or(Script::Empty) {
            Script::Text(text) => Ok(serde_json::from_value(serde_json::json!({
                "choices": [{"message": {"content": text}}]
            }))
            .expect("valid completion json")),
            Script::Empty => Ok(ChatCompletion { choices: vec![] }),
            Script::Fail(message) => Err(LlmError::RequestFailed(message.to_string())),
        }
    }

    async fn text_generation(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.calls.lock().push(format!("raw:{}", request.model));
        match self.raw.get(&request.model).cloned().unwrap_or(Script::Empty) {
            Script::Text(text) => Ok(text.to_string()),
            Script::Empty => Ok(String::new()),
            Script::Fail(message) => Err(LlmError::RequestFailed(message.to_string())),
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn gateway(provider: ScriptedProvider, models: &[&str]) -> (Gateway, Arc<ScriptedProvider>) {
    let provider = Arc::new(provider);
    let config = GatewayConfig {
        models: models.iter().map(ToString::to_string).collect(),
        ..GatewayConfig::default()
    };
    (Gateway::new(provider.clone(), config), provider)
}

// ---------------------------------------------------------------------------
// Candidate fallback scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fallback_reaches_second_candidate_structured_tier() {
    // m1: both tiers empty. m2: structured tier answers.
    let provider = ScriptedProvider::default()
        .chat_script("m1", Script::Empty)
        .raw_script("m1", Script::Empty)
        .chat_script("m2", Script::Text("Fixed text."));
    let (gateway, provider) = gateway(provider, &["m1", "m2"]);

    let output = gateway
        .generate(Mode::Grammar, "fix this pls")
        .await
        .expect("m2 should resolve");

    assert_eq!(output, "Fixed text.");
    // m1 tried fully (2 calls), m2 structured only; m2 raw never touched.
    assert_eq!(provider.calls(), vec!["chat:m1", "raw:m1", "chat:m2"]);
}

#[tokio::test]
async fn erroring_candidate_advances_to_next() {
    let provider = ScriptedProvider::default()
        .chat_script("m1", Script::Fail("503 overloaded"))
        .raw_script("m1", Script::Fail("503 overloaded"))
        .chat_script("m2", Script::Text("A short summary."));
    let (gateway, provider) = gateway(provider, &["m1", "m2"]);

    let output = gateway
        .generate(Mode::Summary, "long draft body")
        .await
        .expect("m2 should resolve");

    assert_eq!(output, "A short summary.");
    assert_eq!(provider.calls(), vec!["chat:m1", "raw:m1", "chat:m2"]);
}

#[tokio::test]
async fn exhaustion_names_the_last_candidate() {
    let provider = ScriptedProvider::default()
        .chat_script("m1", Script::Fail("timeout"))
        .raw_script("m1", Script::Fail("timeout"))
        .chat_script("m2", Script::Empty)
        .raw_script("m2", Script::Empty);
    let (gateway, provider) = gateway(provider, &["m1", "m2"]);

    let err = gateway
        .generate(Mode::Grammar, "text")
        .await
        .expect_err("all candidates fail");

    match err {
        GatewayError::ModelsExhausted { detail } => {
            assert!(detail.contains("m2"), "detail should name the last model: {detail}");
            assert!(!detail.contains("m1"), "only the last attempt survives: {detail}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        provider.calls(),
        vec!["chat:m1", "raw:m1", "chat:m2", "raw:m2"]
    );
}

#[tokio::test]
async fn empty_candidate_list_makes_zero_calls() {
    let (gateway, provider) = gateway(ScriptedProvider::default(), &[]);

    let err = gateway
        .generate(Mode::Summary, "text")
        .await
        .expect_err("should fail fast");

    assert!(matches!(err, GatewayError::NoModelsConfigured));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn prompt_carries_mode_instruction_and_client_text() {
    // Capture the prompt the provider actually receives.
    struct CapturingProvider {
        prompt: Mutex<Option<String>>,
    }

    #[async_trait]
    impl InferenceClient for CapturingProvider {
        async fn chat_completion(
            &self,
            request: &ChatRequest,
        ) -> Result<ChatCompletion, LlmError> {
            *self.prompt.lock() = Some(request.messages[0].content.clone());
            Ok(serde_json::from_value(serde_json::json!({
                "choices": [{"message": {"content": "ok"}}]
            }))
            .expect("valid completion json"))
        }

        async fn text_generation(&self, _: &CompletionRequest) -> Result<String, LlmError> {
            Ok(String::new())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    let provider = Arc::new(CapturingProvider {
        prompt: Mutex::new(None),
    });
    let gateway = Gateway::new(
        provider.clone(),
        GatewayConfig {
            models: vec!["m1".to_string()],
            ..GatewayConfig::default()
        },
    );

    gateway
        .generate(Mode::Summary, "my blog draft")
        .await
        .expect("should resolve");

    let prompt = provider.prompt.lock().clone().expect("prompt captured");
    assert!(prompt.contains("Summarize this blog content"));
    assert!(prompt.contains("my blog draft"));
    assert!(prompt.contains("Return only the final text. No explanations."));
}

// ---------------------------------------------------------------------------
// Resolved text → frame stream delivery
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn generate_then_stream_reassembles_the_result() {
    let provider = ScriptedProvider::default().chat_script(
        "m1",
        Script::Text("Cleaned up, readable, and ready for publication."),
    );
    let (gateway, _provider) = gateway(provider, &["m1"]);

    let output = gateway
        .generate(Mode::Grammar, "draft")
        .await
        .expect("should resolve");

    let emitter = StreamEmitter::from_config(gateway.config());
    let frames: Vec<_> = emitter.stream(output.clone()).collect().await;

    // Sentinel strictly last, exactly once.
    assert!(frames.last().expect("at least the sentinel").is_terminal);
    assert_eq!(frames.iter().filter(|f| f.is_terminal).count(), 1);

    let reassembled: String = frames
        .iter()
        .filter(|f| !f.is_terminal)
        .map(|f| f.payload.as_str())
        .collect();
    assert_eq!(reassembled, output);

    // Default width 18: every content frame but the last is full width.
    let content: Vec<_> = frames.iter().filter(|f| !f.is_terminal).collect();
    for frame in &content[..content.len() - 1] {
        assert_eq!(frame.payload.chars().count(), 18);
    }
}

#[tokio::test(start_paused = true)]
async fn sse_rendering_of_a_full_stream() {
    let emitter = StreamEmitter::new(4, std::time::Duration::from_millis(50));
    let wire: Vec<String> = emitter
        .stream("abcdefgh".to_string())
        .map(|frame| frame.to_sse())
        .collect()
        .await;

    assert_eq!(
        wire,
        vec![
            "data: abcd\n\n".to_string(),
            "data: efgh\n\n".to_string(),
            "data: [DONE]\n\n".to_string(),
        ]
    );
}
