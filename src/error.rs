//! Crate-level error type.

use thiserror::Error;

/// Errors surfaced by backend calls and the chat channel.
///
/// Each variant carries enough context to diagnose the failure without
/// needing to inspect the originating error directly.
#[derive(Debug, Error)]
pub enum StylistError {
    /// The request could not be sent or the response body could not be read.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend replied with a non-2xx HTTP status code.
    #[error("backend returned HTTP {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The chat channel handshake or a frame write failed.
    #[error("channel error: {0}")]
    Channel(#[from] tokio_tungstenite::tungstenite::Error),

    /// A send was attempted with no live channel session.
    #[error("channel is not open")]
    ChannelClosed,

    /// A local file could not be read or written.
    #[error("could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configured server URL has an unsupported scheme.
    #[error("invalid server URL '{0}': expected http:// or https://")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_closed_display() {
        assert_eq!(StylistError::ChannelClosed.to_string(), "channel is not open");
    }

    #[test]
    fn test_unexpected_status_display_mentions_status_and_url() {
        let err = StylistError::UnexpectedStatus {
            status: 503,
            url: "http://127.0.0.1:8000/process".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("/process"));
    }

    #[test]
    fn test_invalid_url_display_mentions_input() {
        let err = StylistError::InvalidUrl("ftp://example".to_string());
        assert!(err.to_string().contains("ftp://example"));
    }

    #[test]
    fn test_io_variant_preserves_source() {
        use std::error::Error as _;
        let err = StylistError::Io {
            path: "missing.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.png"));
    }
}
