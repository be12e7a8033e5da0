//! Routine generation pipeline.
//!
//! nutrition targets → prompt → LLM → split routine/meditation → audio (best effort).
//! Persistence is left to the caller so the pipeline can run without a database.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::athlete::AthleteProfileRow;
use crate::nutrition::{calculate, NutritionCalcs, NutritionInputs};
use crate::routine::prompts::{build_routine_prompt, ROUTINE_SYSTEM};
use crate::routine::script::split_reply;
use crate::routine::MatchContext;
use crate::speech::{render_audio, AudioStore, SynthesisChain};

#[derive(Debug, Clone, Serialize)]
pub struct ComposedRoutine {
    pub nutrition: NutritionCalcs,
    pub routine_text: String,
    pub meditation_script: Option<String>,
    pub routine_audio_url: Option<String>,
}

/// Runs everything except persistence. Only an LLM failure fails the call;
/// a missing audio URL is a normal outcome.
pub async fn compose_routine(
    llm: &LlmClient,
    speech: &SynthesisChain,
    audio_store: &dyn AudioStore,
    profile: &AthleteProfileRow,
    ctx: &MatchContext,
) -> Result<ComposedRoutine, AppError> {
    let nutrition = calculate(&NutritionInputs::for_match(profile, &ctx.match_duration));

    let prompt = build_routine_prompt(profile, ctx, &nutrition);
    let reply = llm
        .complete(&prompt, ROUTINE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Routine generation failed: {e}")))?;

    let split = split_reply(&reply);
    if split.meditation_script.is_none() {
        warn!("No meditation script marker in reply; narrating the routine text instead");
    }
    info!(
        "Generated routine for profile {} ({} chars, meditation script: {})",
        profile.id,
        split.routine_text.len(),
        split.meditation_script.is_some()
    );

    let narration = split
        .meditation_script
        .as_deref()
        .unwrap_or(&split.routine_text);
    let routine_audio_url = render_audio(speech, audio_store, narration).await;

    Ok(ComposedRoutine {
        nutrition,
        routine_text: split.routine_text,
        meditation_script: split.meditation_script,
        routine_audio_url,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::routine::tests_support::{sample_context, sample_profile};
    use crate::speech::testing::{FakeSynth, MemoryStore};
    use crate::speech::{SpeechSynthesizer, TtsError};

    /// Returns the narrated text itself so tests can see what was spoken.
    struct EchoSynth;

    #[async_trait]
    impl SpeechSynthesizer for EchoSynth {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn synthesize(&self, text: &str) -> Result<Bytes, TtsError> {
            Ok(Bytes::from(text.to_string()))
        }
    }

    async fn llm_replying(text: &str) -> (MockServer, LlmClient) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": text}],
                "usage": {"input_tokens": 100, "output_tokens": 50}
            })))
            .mount(&server)
            .await;
        let client = LlmClient::new("k".to_string())
            .unwrap()
            .with_base_url(server.uri());
        (server, client)
    }

    #[tokio::test]
    async fn test_meditation_script_is_narrated() {
        let reply = "1. BREATHING ROUTINE:\nBreathe.\n---MEDITATION SCRIPT---\nClose your eyes.";
        let (_server, llm) = llm_replying(reply).await;
        let chain = SynthesisChain::new(vec![Arc::new(EchoSynth)]);
        let store = MemoryStore::default();

        let composed = compose_routine(&llm, &chain, &store, &sample_profile(), &sample_context())
            .await
            .unwrap();

        assert_eq!(composed.routine_text, "1. BREATHING ROUTINE:\nBreathe.");
        assert_eq!(composed.meditation_script.as_deref(), Some("Close your eyes."));
        assert!(composed.routine_audio_url.is_some());
        let uploads = store.uploads.lock().unwrap();
        assert_eq!(&uploads[0][..], b"Close your eyes.");
    }

    #[tokio::test]
    async fn test_routine_text_is_narrated_without_script() {
        let (_server, llm) = llm_replying("Stay loose. Trust your serve.").await;
        let chain = SynthesisChain::new(vec![Arc::new(EchoSynth)]);
        let store = MemoryStore::default();

        let composed = compose_routine(&llm, &chain, &store, &sample_profile(), &sample_context())
            .await
            .unwrap();

        assert_eq!(composed.meditation_script, None);
        let uploads = store.uploads.lock().unwrap();
        assert_eq!(&uploads[0][..], b"Stay loose. Trust your serve.");
    }

    #[tokio::test]
    async fn test_audio_failure_does_not_fail_generation() {
        let (_server, llm) = llm_replying("Routine text").await;
        let chain = SynthesisChain::new(vec![FakeSynth::failing("a"), FakeSynth::failing("b")]);
        let store = MemoryStore::default();

        let composed = compose_routine(&llm, &chain, &store, &sample_profile(), &sample_context())
            .await
            .unwrap();
        assert_eq!(composed.routine_audio_url, None);
        assert_eq!(composed.routine_text, "Routine text");

        let failing_store = MemoryStore {
            fail: true,
            ..Default::default()
        };
        let chain = SynthesisChain::new(vec![FakeSynth::ok("a")]);
        let composed =
            compose_routine(&llm, &chain, &failing_store, &sample_profile(), &sample_context())
                .await
                .unwrap();
        assert_eq!(composed.routine_audio_url, None);
    }

    #[tokio::test]
    async fn test_blank_llm_reply_is_an_error() {
        let (_server, llm) = llm_replying("   ").await;
        let chain = SynthesisChain::new(vec![FakeSynth::ok("a")]);
        let store = MemoryStore::default();

        let result =
            compose_routine(&llm, &chain, &store, &sample_profile(), &sample_context()).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
        assert!(store.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nutrition_uses_profile_and_duration() {
        let (_server, llm) = llm_replying("Routine").await;
        let chain = SynthesisChain::default();
        let store = MemoryStore::default();

        let composed = compose_routine(&llm, &chain, &store, &sample_profile(), &sample_context())
            .await
            .unwrap();
        // 62.5 kg, advanced, 120 minutes → 1.75 g/kg
        assert_eq!(composed.nutrition.carbohydrates.match_target_g, 109);
        // heavy sweater → 9 ml/kg
        assert_eq!(composed.nutrition.hydration.pre_match_2to4h_ml, 563);
    }
}
