//! Fallback speech provider: the keyless Google Translate TTS endpoint.
//!
//! The endpoint only accepts short inputs, so text is packed into chunks of at most
//! `MAX_CHUNK_CHARS` characters on word boundaries and the MP3 segments are
//! concatenated in order (MP3 frames are self-delimiting, so plain concatenation plays).

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;

use super::{SpeechSynthesizer, TtsError};

const TRANSLATE_TTS_URL: &str = "https://translate.google.com";
const MAX_CHUNK_CHARS: usize = 200;

pub struct GoogleTranslateSpeech {
    client: Client,
    lang: String,
    base_url: String,
}

impl GoogleTranslateSpeech {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            lang: "en".to_string(),
            base_url: TRANSLATE_TTS_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_chunk(&self, chunk: &str, idx: usize, total: usize) -> Result<Bytes, TtsError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(format!("{}/translate_tts", self.base_url.trim_end_matches('/')))
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.lang.as_str()),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
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
impl SpeechSynthesizer for GoogleTranslateSpeech {
    fn name(&self) -> &'static str {
        "google-translate"
    }

    async fn synthesize(&self, text: &str) -> Result<Bytes, TtsError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let segment = self.fetch_chunk(chunk, idx, chunks.len()).await?;
            audio.extend_from_slice(&segment);
        }
        Ok(audio.freeze())
    }
}

/// Greedy word packing into chunks of at most `max_chars` characters.
/// A chunk is closed early at a sentence end once it is at least half full, so
/// pauses fall between sentences where possible.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, max_chars) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + 1 + piece_len > max_chars {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(piece);
            current_len += piece_len;

            if piece.ends_with(['.', '!', '?']) && current_len >= max_chars / 2 {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
        }
    }
    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<&str> {
    if word.chars().count() <= max_chars {
        return vec![word];
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    for (count, (idx, _)) in word.char_indices().enumerate() {
        if count > 0 && count % max_chars == 0 {
            pieces.push(&word[start..idx]);
            start = idx;
        }
    }
    pieces.push(&word[start..]);
    pieces
}
