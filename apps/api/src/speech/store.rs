use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use super::TtsError;

/// Where rendered audio lives. Returns the URL clients use for playback.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn put_mp3(&self, audio: Bytes) -> Result<String, TtsError>;

    /// Deletes an object previously returned by `put_mp3`, addressed by its URL.
    async fn delete(&self, url: &str) -> Result<(), TtsError>;
}

pub struct S3AudioStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3AudioStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url,
        }
    }
}

#[async_trait]
impl AudioStore for S3AudioStore {
    async fn put_mp3(&self, audio: Bytes) -> Result<String, TtsError> {
        let key = audio_key(Uuid::new_v4());
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(audio))
            .content_type("audio/mpeg")
            .send()
            .await
            .map_err(|e| TtsError::Storage(e.to_string()))?;

        info!("Uploaded routine audio to s3://{}/{}", self.bucket, key);
        Ok(public_url(&self.public_base_url, &key))
    }

    async fn delete(&self, url: &str) -> Result<(), TtsError> {
        let key = key_from_url(&self.public_base_url, url)
            .ok_or_else(|| TtsError::Storage(format!("{url} is not in this bucket")))?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| TtsError::Storage(e.to_string()))?;

        info!("Deleted s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

fn audio_key(id: Uuid) -> String {
    format!("audio/routine_{id}.mp3")
}

fn public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

/// Inverse of `public_url`.
fn key_from_url<'a>(base: &str, url: &'a str) -> Option<&'a str> {
    url.strip_prefix(base.trim_end_matches('/'))?
        .strip_prefix('/')
        .filter(|key| !key.is_empty())
}
