pub mod backend;
pub mod cli;
pub mod error;
pub mod gallery;
pub mod protocol;
pub mod session;
pub mod transcript;

use std::path::{Path, PathBuf};

use colored::*;
use tracing::debug;

use backend::BackendClient;
use error::StylistError;
use gallery::Gallery;
use protocol::{decode, InboundPayload};
use session::{ChannelSession, SessionEvent};
use transcript::{Role, Transcript};

// ---------------------------------------------------------------------------
// StylistApp: the application reactor
// ---------------------------------------------------------------------------

/// Ties the backend client, the chat channel, and the two display
/// projections together.
///
/// All state lives here and is mutated only from the task driving the event
/// loop; channel frames arrive as [`SessionEvent`]s and user input arrives
/// as REPL lines, interleaved but never parallel.
pub struct StylistApp {
    pub backend: BackendClient,
    pub session: ChannelSession,
    pub transcript: Transcript,
    pub gallery: Gallery,
    pub save_dir: PathBuf,
    /// Precondition alerts shown to the user, newest last.
    pub alerts: Vec<String>,
}

impl StylistApp {
    pub fn new(backend: BackendClient, session: ChannelSession, save_dir: PathBuf) -> Self {
        StylistApp {
            backend,
            session,
            transcript: Transcript::new(),
            gallery: Gallery::new(),
            save_dir,
            alerts: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Channel event reactor
    // -----------------------------------------------------------------------

    /// React to one session event.
    ///
    /// Inbound payloads map to exactly one of: a bot line (plain text), a
    /// system line, or a bot line plus a gallery replace (commentary with a
    /// non-empty file list). Unrecognized records are dropped silently.
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Connected => {
                debug!("channel connected");
            }
            SessionEvent::Closed => {
                self.session.mark_closed();
            }
            SessionEvent::MessageReceived(raw) => match decode(&raw) {
                InboundPayload::PlainText(text) => {
                    self.transcript.append(&text, Role::Bot);
                }
                InboundPayload::SystemNotice(text) => {
                    self.transcript.append(&text, Role::System);
                }
                InboundPayload::Commentary { text, files, items } => {
                    self.transcript.append(&text, Role::Bot);
                    if !files.is_empty() {
                        self.gallery.render(&files, &items);
                    }
                }
                InboundPayload::Unrecognized => {
                    debug!(payload = %raw, "dropping unrecognized channel record");
                }
            },
        }
    }

    // -----------------------------------------------------------------------
    // Wardrobe actions
    // -----------------------------------------------------------------------

    /// Upload garment images with processing disabled, then tell the user
    /// to run processing next.
    pub async fn upload(&mut self, paths: &[PathBuf]) -> Result<(), StylistError> {
        if paths.is_empty() {
            self.alert("Pick image files first");
            return Ok(());
        }

        let response = self.backend.upload(paths).await?;
        debug!(status = %response.status, saved = response.saved.len(), "upload finished");
        self.transcript
            .append("⏳ Uploaded!  Run /process next.", Role::System);
        Ok(())
    }

    /// Kick off wardrobe processing and report how the backend answered.
    /// Completion itself arrives later over the chat channel.
    pub async fn process(&mut self) -> Result<(), StylistError> {
        self.transcript.append("⏳ Processing wardrobe …", Role::System);
        let response = self.backend.process().await?;
        if response.started() {
            self.transcript.append(
                "🔎 Extracting metadata – this can take more than few minutes depends on number of clothing…",
                Role::System,
            );
        } else {
            self.transcript.append("✅ Nothing new to process.", Role::System);
        }
        Ok(())
    }

    /// Send one chat message: echo it locally, make sure the channel is
    /// open, transmit the raw text. The reply is whatever the channel
    /// delivers next; there is no correlation.
    pub async fn send_chat_message(&mut self, text: &str) -> Result<(), StylistError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        // quick check: do we have any wardrobe data?
        let wardrobe = self.backend.wardrobe().await?;
        if wardrobe.is_empty() {
            self.alert("Upload & process your wardrobe first!");
            return Ok(());
        }

        self.transcript.append(text, Role::User);
        self.session.ensure_open().await?;
        self.session.send(text).await?;
        Ok(())
    }

    /// Download the image behind gallery entry `index` (1-based, as
    /// displayed) into the save directory.
    pub async fn save_image(&mut self, index: usize) -> Result<(), StylistError> {
        let entry = index
            .checked_sub(1)
            .and_then(|i| self.gallery.entries().get(i))
            .cloned();
        let Some(entry) = entry else {
            self.alert("No such recommendation, ask for an outfit first");
            return Ok(());
        };

        let file_name = entry.file_name;
        let bytes = self.backend.download_image(&file_name).await?;

        tokio::fs::create_dir_all(&self.save_dir)
            .await
            .map_err(|source| StylistError::Io {
                path: self.save_dir.display().to_string(),
                source,
            })?;
        let dest = self.save_dir.join(
            Path::new(&file_name)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(&file_name)),
        );
        tokio::fs::write(&dest, &bytes)
            .await
            .map_err(|source| StylistError::Io {
                path: dest.display().to_string(),
                source,
            })?;

        self.transcript
            .append(&format!("💾 Saved {}", dest.display()), Role::System);
        Ok(())
    }

    /// Print the wardrobe collection for the `/wardrobe` command.
    pub async fn wardrobe_listing(&mut self) -> Result<(), StylistError> {
        let items = self.backend.wardrobe().await?;
        if items.is_empty() {
            self.transcript
                .append("👗 Wardrobe is empty – upload some garments first.", Role::System);
            return Ok(());
        }

        self.transcript
            .append(&format!("👗 {} garments on file:", items.len()), Role::System);
        for item in &items {
            println!("  {} {}", "•".bright_magenta(), item.label());
        }
        Ok(())
    }

    /// Record and display a blocking precondition alert.
    fn alert(&mut self, text: &str) {
        eprintln!("{}", format!("⚠ {}", text).bright_red().bold());
        self.alerts.push(text.to_string());
    }
}
