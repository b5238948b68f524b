//! Wire types shared with the stylist backend.
//!
//! The chat channel delivers either plain text or a JSON record with
//! optional `system` / `commentary` / `files` / `items` fields; the HTTP
//! endpoints reply with small JSON bodies. Everything here is a passive
//! mirror of what the backend emits: no behavior, just shapes.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inbound channel payloads
// ---------------------------------------------------------------------------

/// Raw record shape of a structured channel frame.
#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    system: Option<String>,
    #[serde(default)]
    commentary: Option<String>,
    #[serde(default)]
    files: Option<Vec<String>>,
    #[serde(default)]
    items: Option<Vec<String>>,
}

/// A decoded inbound channel payload.
///
/// `PlainText` is the decode-failure fallback: anything the backend sends
/// that is not a tagged record is shown verbatim as a bot line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload {
    /// Unstructured text, displayed as a bot message.
    PlainText(String),
    /// A `system` notice; never touches the gallery.
    SystemNotice(String),
    /// Bot commentary, optionally accompanied by a recommendation set.
    /// `items` pairs positionally with `files`; missing captions render empty.
    Commentary {
        text: String,
        files: Vec<String>,
        items: Vec<String>,
    },
    /// A record that decoded cleanly but carries neither recognized field.
    /// Dropped without any visible effect.
    Unrecognized,
}

/// Decode one inbound channel frame.
///
/// Branches are checked in order and are mutually exclusive in effect:
/// decode failure → `PlainText`; a `system` field wins over `commentary`;
/// a recognized-field-free record is `Unrecognized`.
pub fn decode(raw: &str) -> InboundPayload {
    let wire: WireMessage = match serde_json::from_str(raw) {
        Ok(w) => w,
        Err(_) => return InboundPayload::PlainText(raw.to_string()),
    };

    if let Some(text) = wire.system {
        return InboundPayload::SystemNotice(text);
    }

    if let Some(text) = wire.commentary {
        return InboundPayload::Commentary {
            text,
            files: wire.files.unwrap_or_default(),
            items: wire.items.unwrap_or_default(),
        };
    }

    InboundPayload::Unrecognized
}

// ---------------------------------------------------------------------------
// HTTP response bodies
// ---------------------------------------------------------------------------

/// `POST /upload` response. Only `status` matters to the flow; the rest
/// feeds diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    #[serde(default)]
    pub saved: Vec<String>,
    #[serde(default)]
    pub processed: bool,
}

/// `POST /process` response. Only the literal status `"started"` is treated
/// specially by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub status: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl ProcessResponse {
    pub fn started(&self) -> bool {
        self.status == "started"
    }
}

/// One garment record from `GET /wardrobe`.
///
/// The backend's vision pipeline writes free-form records; only a few
/// fields are interesting to the client, the rest is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source_image: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WardrobeItem {
    /// Human-readable one-liner for the `/wardrobe` listing.
    pub fn label(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(color) = self.color.as_deref() {
            parts.push(color);
        }
        if let Some(item) = self.item.as_deref() {
            parts.push(item);
        }
        let desc = if parts.is_empty() {
            "garment".to_string()
        } else {
            parts.join(" ")
        };
        match self.source_image.as_deref() {
            Some(src) => format!("{} ({})", desc, src),
            None => desc,
        }
    }
}
