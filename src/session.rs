//! Chat channel session management.
//!
//! ## Design
//! - One `ChannelSession` per application, owning at most one live
//!   connection to the backend's `/ws` endpoint.
//! - The connection is created lazily by `ensure_open` and never recreated
//!   automatically: a remote close clears the handle, and the next
//!   user-triggered send reconnects.
//! - Inbound frames are forwarded as `SessionEvent`s over an mpsc channel
//!   to the single registered observer (the application's event loop); all
//!   session state is mutated only from that loop, so no locking is needed.

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::error::StylistError;

/// Write half of the live connection.
pub type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

/// Discrete events emitted by the session to its observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new underlying connection was established.
    Connected,
    /// One inbound text frame, delivered raw; decoding is the consumer's
    /// concern.
    MessageReceived(String),
    /// The connection ended (remote close or transport error). Emitted
    /// exactly once per underlying connection.
    Closed,
}

/// Owns the single optional connection handle for the chat channel.
pub struct ChannelSession {
    url: String,
    sink: Option<WsSink>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelSession {
    /// Create a session manager for `url` and hand back the event stream
    /// its observer consumes.
    pub fn new(url: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (
            ChannelSession {
                url: url.into(),
                sink: None,
                events_tx,
            },
            events_rx,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether a connection handle is currently held.
    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    /// Open the connection if none exists. Idempotent: with a live handle
    /// this is a no-op, so repeated calls create exactly one underlying
    /// connection.
    pub async fn ensure_open(&mut self) -> Result<(), StylistError> {
        if self.sink.is_some() {
            return Ok(());
        }

        debug!(url = %self.url, "opening channel session");
        let (ws, _response) = connect_async(self.url.as_str()).await?;
        let (sink, mut stream) = ws.split();
        self.sink = Some(sink);
        let _ = self.events_tx.send(SessionEvent::Connected);

        // Reader task: forward text frames until the stream ends, then
        // report the close. It holds no session state of its own.
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(WsMessage::Text(text)) => {
                        if events_tx.send(SessionEvent::MessageReceived(text)).is_err() {
                            return; // observer gone, nothing left to do
                        }
                    }
                    Ok(WsMessage::Close(_)) => break,
                    Ok(_) => {} // binary / ping / pong frames carry no chat payload
                    Err(_) => break,
                }
            }
            let _ = events_tx.send(SessionEvent::Closed);
        });

        Ok(())
    }

    /// Transmit one raw text frame over the live connection.
    ///
    /// Fails with `ChannelClosed` when no handle is held. A transport error
    /// drops the stale handle so the next `ensure_open` reconnects.
    pub async fn send(&mut self, text: &str) -> Result<(), StylistError> {
        let sink = self.sink.as_mut().ok_or(StylistError::ChannelClosed)?;
        if let Err(err) = sink.send(WsMessage::Text(text.to_string())).await {
            self.sink = None;
            return Err(err.into());
        }
        Ok(())
    }

    /// Forget the current handle. Called by the observer when it processes
    /// `Closed`; the next `ensure_open` will reconnect.
    pub fn mark_closed(&mut self) {
        if self.sink.take().is_some() {
            debug!(url = %self.url, "channel session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_without_connection() {
        let (session, _rx) = ChannelSession::new("ws://127.0.0.1:9/ws");
        assert!(!session.is_open());
        assert_eq!(session.url(), "ws://127.0.0.1:9/ws");
    }

    #[test]
    fn test_mark_closed_on_fresh_session_is_noop() {
        let (mut session, _rx) = ChannelSession::new("ws://127.0.0.1:9/ws");
        session.mark_closed();
        assert!(!session.is_open());
    }

    #[tokio::test]
    async fn test_send_without_connection_fails_closed() {
        let (mut session, _rx) = ChannelSession::new("ws://127.0.0.1:9/ws");
        let err = session.send("hello").await.expect_err("must fail");
        assert!(matches!(err, StylistError::ChannelClosed));
    }

    #[tokio::test]
    async fn test_ensure_open_unreachable_host_errors_and_stays_closed() {
        // Port 9 (discard) is closed in the test environment; the connect
        // attempt must fail without leaving a half-open handle behind.
        let (mut session, _rx) = ChannelSession::new("ws://127.0.0.1:9/ws");
        assert!(session.ensure_open().await.is_err());
        assert!(!session.is_open());
    }
}
