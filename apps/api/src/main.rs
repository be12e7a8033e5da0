mod auth;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod nutrition;
mod profile;
mod routes;
mod routine;
mod speech;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::speech::google::GoogleTranslateSpeech;
use crate::speech::openai::OpenAiSpeech;
use crate::speech::{S3AudioStore, SpeechSynthesizer, SynthesisChain};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pregame API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO audio store
    let s3 = build_s3_client(&config).await;
    let audio_store = Arc::new(S3AudioStore::new(
        s3,
        config.s3_bucket.clone(),
        config.audio_public_base_url.clone(),
    ));
    info!("Audio store initialized (bucket: {})", config.s3_bucket);

    // Initialize LLM client
    let mut llm = LlmClient::new(config.anthropic_api_key.clone())?;
    if let Some(base_url) = &config.anthropic_base_url {
        llm = llm.with_base_url(base_url.clone());
    }
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize speech chain
    let speech = Arc::new(build_speech_chain(&config)?);
    info!("Speech providers: {:?}", speech.provider_names());

    let state = AppState {
        db,
        llm,
        speech,
        audio_store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAI first when a key is configured, then the keyless Google fallback.
fn build_speech_chain(config: &Config) -> Result<SynthesisChain> {
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    let mut providers: Vec<Arc<dyn SpeechSynthesizer>> = Vec::new();
    if let Some(key) = &config.openai_api_key {
        let mut openai = OpenAiSpeech::new(http.clone(), key.clone(), config.tts_voice.clone());
        if let Some(base_url) = &config.openai_base_url {
            openai = openai.with_base_url(base_url.clone());
        }
        providers.push(Arc::new(openai));
    }
    providers.push(Arc::new(GoogleTranslateSpeech::new(http)));

    Ok(SynthesisChain::new(providers))
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "pregame-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
