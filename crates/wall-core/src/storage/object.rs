use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

use crate::{WallError, WallResult};

/// Hosted object storage: accepts raw bytes and hands back a public URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads `bytes` as `bucket/key`.
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> WallResult<()>;
    /// The public address of `bucket/key`. Does not check existence.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Error body returned by the storage API on a failed request.
#[derive(Debug, serde::Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for a Supabase-compatible storage REST API.
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    client: Client,
    base_url: String,
    key: String,
}

impl SupabaseStorage {
    /// `base_url` is the project URL, e.g. `https://<ref>.supabase.co`;
    /// `key` is the access key sent with every request.
    pub fn new(base_url: &str, key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{key}", self.base_url)
    }
}

/// Best effort content type from the object key's extension.
fn content_type(key: &str) -> &'static str {
    let ext = key.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<StorageErrorBody>(body) {
        Ok(StorageErrorBody {
            message: Some(message),
            ..
        }) => format!("{status}: {message}"),
        Ok(StorageErrorBody {
            error: Some(error), ..
        }) => format!("{status}: {error}"),
        _ if body.is_empty() => status.to_string(),
        _ => format!("{status}: {body}"),
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> WallResult<()> {
        let size = bytes.len();
        let response = self
            .client
            .post(self.object_url(bucket, key))
            .bearer_auth(&self.key)
            .header("apikey", &self.key)
            .header(header::CONTENT_TYPE, content_type(key))
            .body(bytes)
            .send()
            .await
            .map_err(|err| WallError::upload_error(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WallError::upload_error(describe_failure(status, &body)).into());
        }
        tracing::info!(bucket, key, size, "uploaded image");
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{key}", self.base_url)
    }
}
