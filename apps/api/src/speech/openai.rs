//! Primary speech provider: OpenAI `/v1/audio/speech`.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use super::google::chunk_text;
use super::{SpeechSynthesizer, TtsError};

const OPENAI_API_URL: &str = "https://api.openai.com";
const TTS_MODEL: &str = "tts-1";
/// The endpoint rejects longer inputs; longer text is split and the MP3 segments joined.
const MAX_INPUT_CHARS: usize = 4096;

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

pub struct OpenAiSpeech {
    client: Client,
    api_key: String,
    voice: String,
    base_url: String,
}

impl OpenAiSpeech {
    pub fn new(client: Client, api_key: String, voice: String) -> Self {
        Self {
            client,
            api_key,
            voice,
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_segment(&self, input: &str) -> Result<Bytes, TtsError> {
        let request = SpeechRequest {
            model: TTS_MODEL,
            input,
            voice: &self.voice,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{}/v1/audio/speech", self.base_url.trim_end_matches('/')))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TtsError::Api {
                provider: self.name(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn synthesize(&self, text: &str) -> Result<Bytes, TtsError> {
        let chunks = chunk_text(text, MAX_INPUT_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }
        if chunks.len() > 1 {
            info!(
                "Narration exceeds {MAX_INPUT_CHARS} chars; synthesizing {} segments",
                chunks.len()
            );
        }

        let mut audio = BytesMut::new();
        for chunk in &chunks {
            audio.extend_from_slice(&self.fetch_segment(chunk).await?);
        }
        Ok(audio.freeze())
    }
}
