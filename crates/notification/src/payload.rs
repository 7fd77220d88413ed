//! The message shapes handed to a chat-webhook transport.
//!
//! A [`MessagePayload`] serializes to a single attachment object:
//!
//! ```json
//! {
//!   "color": "good",
//!   "mrkdwn_in": ["text", "fields"],
//!   "text": "Run ok",
//!   "fallback": "Run ok",
//!   "fields": [{ "title": "Node", "value": "web01", "short": true }],
//!   "ts": 1700000000
//! }
//! ```
//!
//! `fallback` is not stored; it is written from `text` at serialization time
//! so the two can never diverge.

use serde::{Deserialize, Serialize, Serializer};

use crate::types::{Color, Timestamp};

/// A title/value display unit inside an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Field heading.
    pub title: String,
    /// Field body; markdown is rendered.
    pub value: String,
    /// Whether the field may share a row with another short field.
    #[serde(default)]
    pub short: bool,
}

impl Field {
    /// A full-width field.
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }

    /// A field that may share a row with another short field.
    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            short: true,
            ..Self::new(title, value)
        }
    }
}

/// Attachment parts in which markdown is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkdownTarget {
    /// The attachment text.
    Text,
    /// Every field value.
    Fields,
}

/// Markdown is always enabled for both the text and the fields.
pub const MARKDOWN_IN: [MarkdownTarget; 2] = [MarkdownTarget::Text, MarkdownTarget::Fields];

/// A complete attachment describing one run lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePayload {
    color: Color,
    text: String,
    fields: Vec<Field>,
    timestamp: Option<Timestamp>,
}

impl MessagePayload {
    /// Creates a payload. `fallback` is always `text`.
    pub fn new(
        color: Color,
        text: impl Into<String>,
        fields: Vec<Field>,
        timestamp: Option<Timestamp>,
    ) -> Self {
        Self {
            color,
            text: text.into(),
            fields,
            timestamp,
        }
    }

    /// Attachment colour.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text shown by clients that cannot render attachments; equal to [`Self::text`].
    pub fn fallback(&self) -> &str {
        &self.text
    }

    /// Fields in display order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// When the run ended; absent for start messages.
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Parts of the attachment rendered as markdown.
    pub fn markdown_in(&self) -> &'static [MarkdownTarget] {
        &MARKDOWN_IN
    }
}

#[derive(Serialize)]
struct AttachmentWire<'a> {
    color: Color,
    mrkdwn_in: &'static [MarkdownTarget],
    text: &'a str,
    fallback: &'a str,
    fields: &'a [Field],
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<i64>,
}

impl Serialize for MessagePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AttachmentWire {
            color: self.color,
            mrkdwn_in: self.markdown_in(),
            text: &self.text,
            fallback: &self.text,
            fields: &self.fields,
            ts: self.timestamp.map(Timestamp::epoch_seconds),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_as_chat_attachment() {
        let payload = MessagePayload::new(
            Color::Good,
            "Run ok",
            vec![Field::short("Node", "web01"), Field::new("Resources", "a, b")],
            Timestamp::from_epoch_seconds(1_700_000_000),
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "color": "good",
                "mrkdwn_in": ["text", "fields"],
                "text": "Run ok",
                "fallback": "Run ok",
                "fields": [
                    { "title": "Node", "value": "web01", "short": true },
                    { "title": "Resources", "value": "a, b", "short": false },
                ],
                "ts": 1_700_000_000,
            })
        );
    }

    #[test]
    fn omits_ts_when_absent() {
        let payload = MessagePayload::new(Color::Warning, "starting", Vec::new(), None);
        let value = serde_json::to_value(&payload).unwrap();

        assert!(value.get("ts").is_none());
        assert_eq!(value["color"], "warning");
        assert_eq!(payload.fallback(), payload.text());
    }

    #[test]
    fn field_short_defaults_to_false_when_deserialized() {
        let field: Field = serde_json::from_value(json!({ "title": "Team", "value": "ops" })).unwrap();
        assert_eq!(field, Field::new("Team", "ops"));
    }
}
