//! Speech synthesis and audio storage.
//!
//! Pluggable, trait-based: `AppState` carries an `Arc<SynthesisChain>` and an
//! `Arc<dyn AudioStore>`. Audio is best-effort. `render_audio` turns every failure
//! into `None` so a routine is still saved without audio.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

pub mod google;
pub mod openai;
pub mod store;

pub use store::{AudioStore, S3AudioStore};

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}: {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("nothing to synthesize")]
    EmptyText,

    #[error("no speech providers configured")]
    NoProviders,

    #[error("audio storage failed: {0}")]
    Storage(String),
}

/// A text-to-speech backend producing MP3 bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn synthesize(&self, text: &str) -> Result<Bytes, TtsError>;
}

/// Ordered provider list. Earlier entries win: each provider is tried once, in
/// order, with no backoff, and the first success is returned.
#[derive(Clone, Default)]
pub struct SynthesisChain {
    providers: Vec<Arc<dyn SpeechSynthesizer>>,
}

impl SynthesisChain {
    pub fn new(providers: Vec<Arc<dyn SpeechSynthesizer>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Returns the audio and the name of the provider that produced it.
    pub async fn synthesize(&self, text: &str) -> Result<(Bytes, &'static str), TtsError> {
        if text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let mut last_error = TtsError::NoProviders;
        for provider in &self.providers {
            match provider.synthesize(text).await {
                Ok(audio) => return Ok((audio, provider.name())),
                Err(e) => {
                    warn!("TTS provider {} failed: {e}", provider.name());
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

/// Synthesizes `text` and uploads it. Returns the public URL, or `None` on any failure.
pub async fn render_audio(
    chain: &SynthesisChain,
    store: &dyn AudioStore,
    text: &str,
) -> Option<String> {
    match synthesize_and_store(chain, store, text).await {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Audio rendering skipped: {e}");
            None
        }
    }
}

async fn synthesize_and_store(
    chain: &SynthesisChain,
    store: &dyn AudioStore,
    text: &str,
) -> Result<String, TtsError> {
    let (audio, provider) = chain.synthesize(text).await?;
    info!("Synthesized {} bytes of audio via {provider}", audio.len());
    store.put_mp3(audio).await
}

/// Removes audio whose routine was never saved. A failed delete leaves the object
/// orphaned, so its URL is logged for manual cleanup.
pub async fn discard_audio(store: &dyn AudioStore, url: &str) {
    match store.delete(url).await {
        Ok(()) => info!("Discarded unsaved routine audio {url}"),
        Err(e) => warn!("Orphaned routine audio {url}: {e}"),
    }
}
