//! HTTP wrappers around the stylist backend.
//!
//! Each operation is a single request/response round trip with no retry;
//! failures surface as `StylistError` and the caller decides what to show.

use std::path::Path;
use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::error::StylistError;
use crate::protocol::{ProcessResponse, UploadResponse, WardrobeItem};

/// Derive the chat channel URL from the backend base URL: same host, `/ws`
/// path, `ws`/`wss` scheme mirroring `http`/`https`.
pub fn chat_channel_url(base_url: &str) -> Result<String, StylistError> {
    let trimmed = base_url.trim_end_matches('/');
    if let Some(rest) = trimmed.strip_prefix("https://") {
        Ok(format!("wss://{}/ws", rest))
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        Ok(format!("ws://{}/ws", rest))
    } else {
        Err(StylistError::InvalidUrl(base_url.to_string()))
    }
}

/// Thin client for the backend's HTTP endpoints.
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        BackendClient {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /upload?auto=false`: package the given files as repeated
    /// multipart `files` parts. Processing stays disabled; the user triggers
    /// it explicitly afterwards.
    pub async fn upload(&self, paths: &[PathBuf]) -> Result<UploadResponse, StylistError> {
        let url = format!("{}/upload", self.base_url);

        let mut form = Form::new();
        for path in paths {
            let bytes = tokio::fs::read(path).await.map_err(|source| StylistError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload.bin")
                .to_string();
            form = form.part("files", Part::bytes(bytes).file_name(file_name));
        }

        let response = self
            .http
            .post(&url)
            .query(&[("auto", "false")])
            .multipart(form)
            .send()
            .await
            .map_err(|source| StylistError::Http { url: url.clone(), source })?;

        if !response.status().is_success() {
            return Err(StylistError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|source| StylistError::Http { url: url.clone(), source })?;
        debug!(saved = body.saved.len(), "upload accepted");
        Ok(body)
    }

    /// `POST /process`: kick off wardrobe processing. Completion is never
    /// polled; the chat channel reports it later.
    pub async fn process(&self) -> Result<ProcessResponse, StylistError> {
        let url = format!("{}/process", self.base_url);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|source| StylistError::Http { url: url.clone(), source })?;

        if !response.status().is_success() {
            return Err(StylistError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let body: ProcessResponse = response
            .json()
            .await
            .map_err(|source| StylistError::Http { url: url.clone(), source })?;
        debug!(status = %body.status, pending = body.files.len(), "process request answered");
        Ok(body)
    }

    /// `GET /wardrobe`: the full garment collection. Emptiness gates chat.
    pub async fn wardrobe(&self) -> Result<Vec<WardrobeItem>, StylistError> {
        let url = format!("{}/wardrobe", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| StylistError::Http { url: url.clone(), source })?;

        if !response.status().is_success() {
            return Err(StylistError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        response
            .json()
            .await
            .map_err(|source| StylistError::Http { url, source })
    }

    /// `GET /image/{name}`: raw bytes of one wardrobe or recommendation
    /// image.
    pub async fn download_image(&self, name: &str) -> Result<Vec<u8>, StylistError> {
        // Server-supplied names are reduced to their final path component.
        let name = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(name);
        let url = format!("{}/image/{}", self.base_url, name);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| StylistError::Http { url: url.clone(), source })?;

        if !response.status().is_success() {
            return Err(StylistError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| StylistError::Http { url, source })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://127.0.0.1:8000", "ws://127.0.0.1:8000/ws")]
    #[case("http://127.0.0.1:8000/", "ws://127.0.0.1:8000/ws")]
    #[case("https://stylist.example.com", "wss://stylist.example.com/ws")]
    #[case("http://localhost", "ws://localhost/ws")]
    fn test_chat_channel_url_mapping(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(chat_channel_url(base).expect("valid"), expected);
    }

    #[rstest]
    #[case("ftp://example.com")]
    #[case("ws://already-a-socket")]
    #[case("127.0.0.1:8000")]
    #[case("")]
    fn test_chat_channel_url_rejects_non_http(#[case] base: &str) {
        assert!(matches!(
            chat_channel_url(base),
            Err(StylistError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_backend_client_trims_trailing_slash() {
        let client = BackendClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_backend_client_keeps_plain_base() {
        let client = BackendClient::new("http://127.0.0.1:8000");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_upload_missing_local_file_is_io_error() {
        let client = BackendClient::new("http://127.0.0.1:1");
        let err = client
            .upload(&[PathBuf::from("/definitely/not/here.png")])
            .await
            .expect_err("must fail before any request");
        assert!(matches!(err, StylistError::Io { .. }));
    }
}
