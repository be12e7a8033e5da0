use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::LlmClient;
use crate::speech::{AudioStore, SynthesisChain};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Ordered TTS providers. Earlier entries win.
    pub speech: Arc<SynthesisChain>,
    /// Pluggable audio storage. Default: S3AudioStore (MinIO locally).
    pub audio_store: Arc<dyn AudioStore>,
}
