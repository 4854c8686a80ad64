//! Registered content items.
//!
//! A `ContentItem` is the registry's record of one piece of feed content:
//! the shareable code it was registered under, the opaque file handle the
//! messaging platform issued for the uploaded payload, and the metadata
//! extracted from the feed caption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of payload a content item refers to.
///
/// Recorded once at ingestion time, from the payload that was actually
/// attached to the feed post. Delivery selects the matching relay operation
/// from this field rather than inspecting the opaque handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Video payload, relayed with a video send.
    Video,
    /// Document payload, relayed with a document send.
    Document,
}

/// A piece of content registered under a shareable code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique shareable code, normalized to lowercase.
    pub code: String,

    /// Opaque reference issued by the messaging platform for the payload.
    pub handle: String,

    /// Payload kind recorded at ingestion time.
    pub kind: ContentKind,

    /// Display title derived from the feed caption.
    pub title: String,

    /// Full feed caption, verbatim.
    pub caption: String,

    /// When the item was (last) registered.
    pub registered_at: DateTime<Utc>,
}

impl ContentItem {
    /// Creates a new content item, normalizing the code to lowercase.
    pub fn new(
        code: impl Into<String>,
        handle: impl Into<String>,
        kind: ContentKind,
        title: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into().to_lowercase(),
            handle: handle.into(),
            kind,
            title: title.into(),
            caption: caption.into(),
            registered_at: Utc::now(),
        }
    }

    /// Caption to attach when relaying the payload.
    ///
    /// Falls back caption -> title -> code, so delivery always carries
    /// something human-readable.
    pub fn delivery_caption(&self) -> &str {
        if !self.caption.is_empty() {
            &self.caption
        } else if !self.title.is_empty() {
            &self.title
        } else {
            &self.code
        }
    }

    /// Display label for browsing views (title, or the code when untitled).
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.code
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_code() {
        let item = ContentItem::new("FILM042", "BAADBAAD", ContentKind::Video, "t", "c");
        assert_eq!(item.code, "film042");
    }

    #[test]
    fn test_delivery_caption_fallback() {
        let full = ContentItem::new("film1", "h", ContentKind::Video, "Title", "Caption");
        assert_eq!(full.delivery_caption(), "Caption");

        let no_caption = ContentItem::new("film1", "h", ContentKind::Video, "Title", "");
        assert_eq!(no_caption.delivery_caption(), "Title");

        let bare = ContentItem::new("film1", "h", ContentKind::Video, "", "");
        assert_eq!(bare.delivery_caption(), "film1");
    }

    #[test]
    fn test_display_title_falls_back_to_code() {
        let untitled = ContentItem::new("film7", "h", ContentKind::Document, "", "");
        assert_eq!(untitled.display_title(), "film7");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ContentKind::Video).unwrap();
        assert_eq!(json, "\"video\"");

        let deserialized: ContentKind = serde_json::from_str("\"document\"").unwrap();
        assert_eq!(deserialized, ContentKind::Document);
    }

    #[test]
    fn test_item_serialization_roundtrip() {
        let item = ContentItem::new("film9", "BAADxyz", ContentKind::Document, "Nine", "Nine\nmore");
        let json = serde_json::to_string(&item).unwrap();
        let back: ContentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
