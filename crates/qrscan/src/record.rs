//! Core scan record types for qrscan.
//!
//! A [`ScanRecord`] is one decoded QR payload plus the metadata the history,
//! favorites and statistics screens work with.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a record's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    /// A web link.
    Url,
    /// Free text.
    Text,
    /// Wi-Fi network credentials (`WIFI:` payload).
    Wifi,
    /// A vCard contact.
    Contact,
    /// A `mailto:` address.
    Email,
    /// A `tel:` number.
    Phone,
    /// A `geo:` coordinate.
    Location,
}

impl ScanKind {
    /// Every kind, in display order.
    pub const ALL: [ScanKind; 7] = [
        Self::Url,
        Self::Text,
        Self::Wifi,
        Self::Contact,
        Self::Email,
        Self::Phone,
        Self::Location,
    ];

    /// Classify decoded content by its prefix.
    ///
    /// Prefixes are checked in a fixed order; anything unrecognised is text.
    #[must_use]
    pub fn classify(content: &str) -> Self {
        if content.starts_with("BEGIN:VCARD") {
            Self::Contact
        } else if content.starts_with("WIFI:") {
            Self::Wifi
        } else if content.starts_with("mailto:") {
            Self::Email
        } else if content.starts_with("tel:") {
            Self::Phone
        } else if content.starts_with("geo:") {
            Self::Location
        } else if content.starts_with("http") {
            Self::Url
        } else {
            Self::Text
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Text => "Text",
            Self::Wifi => "WiFi",
            Self::Contact => "Contact",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Location => "Location",
        }
    }

    /// Stable lowercase name, as persisted.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Text => "text",
            Self::Wifi => "wifi",
            Self::Contact => "contact",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown scan kind: {s}"))
    }
}

/// A stored scan result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Unique identifier, assigned by the store.
    pub id: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// The decoded payload.
    pub content: String,

    /// Classification of `content`.
    #[serde(rename = "type")]
    pub kind: ScanKind,

    /// Display title.
    pub title: String,

    /// Whether the user starred this record.
    pub favorite: bool,
}

impl ScanRecord {
    /// Whether the record can be opened as a link.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.kind == ScanKind::Url
    }

    /// Case-insensitive match of `needle` against title or content.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// Fields supplied when creating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDraft {
    /// The decoded payload.
    pub content: String,
    /// Classification of `content`.
    pub kind: ScanKind,
    /// Display title.
    pub title: String,
    /// Initial favorite flag.
    pub favorite: bool,
}

impl ScanDraft {
    /// Build a draft from freshly decoded content.
    ///
    /// The kind is classified from the content and the title derived from the kind.
    #[must_use]
    pub fn from_decoded(content: impl Into<String>) -> Self {
        let content = content.into();
        let kind = ScanKind::classify(&content);
        Self {
            title: format!("QR code - {}", kind.label()),
            content,
            kind,
            favorite: false,
        }
    }
}

/// A partial update to a record.
///
/// `id` and `created_at` cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPatch {
    /// New content.
    pub content: Option<String>,
    /// New kind.
    pub kind: Option<ScanKind>,
    /// New title.
    pub title: Option<String>,
    /// New favorite flag.
    pub favorite: Option<bool>,
}

impl ScanPatch {
    /// Patch that only sets the favorite flag.
    #[must_use]
    pub fn favorite(value: bool) -> Self {
        Self {
            favorite: Some(value),
            ..Self::default()
        }
    }

    /// Patch that only sets the title.
    #[must_use]
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    /// Merge this patch into `record`.
    pub fn apply_to(self, record: &mut ScanRecord) {
        if let Some(content) = self.content {
            record.content = content;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(favorite) = self.favorite {
            record.favorite = favorite;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ScanRecord {
        ScanRecord {
            id: "1".to_string(),
            created_at: Utc::now(),
            content: "https://example.com".to_string(),
            kind: ScanKind::Url,
            title: "Example".to_string(),
            favorite: false,
        }
    }

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(ScanKind::classify("BEGIN:VCARD\nN:Ada"), ScanKind::Contact);
        assert_eq!(
            ScanKind::classify("WIFI:S:Home;T:WPA;P:secret;;"),
            ScanKind::Wifi
        );
        assert_eq!(ScanKind::classify("mailto:a@b.c"), ScanKind::Email);
        assert_eq!(ScanKind::classify("tel:+33600000000"), ScanKind::Phone);
        assert_eq!(ScanKind::classify("geo:48.85,2.35"), ScanKind::Location);
        assert_eq!(ScanKind::classify("https://example.com"), ScanKind::Url);
        assert_eq!(ScanKind::classify("http://example.com"), ScanKind::Url);
        assert_eq!(ScanKind::classify("random text"), ScanKind::Text);
        assert_eq!(ScanKind::classify(""), ScanKind::Text);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(ScanKind::classify("wifi:S:x;;"), ScanKind::Text);
        assert_eq!(ScanKind::classify("HTTP://EXAMPLE.COM"), ScanKind::Text);
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ScanKind::ALL {
            assert_eq!(kind.as_str().parse::<ScanKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert!("barcode".parse::<ScanKind>().is_err());
    }

    #[test]
    fn test_record_serializes_kind_as_type() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["type"], "url");
        assert!(json.get("kind").is_none());
        assert!(json.get("created_at").is_some());
    }

    #[test]
    fn test_draft_from_decoded() {
        let draft = ScanDraft::from_decoded("WIFI:S:Home;T:WPA;P:secret;;");
        assert_eq!(draft.kind, ScanKind::Wifi);
        assert_eq!(draft.title, "QR code - WiFi");
        assert!(!draft.favorite);
    }

    #[test]
    fn test_patch_apply() {
        let mut record = sample_record();
        let id = record.id.clone();
        let created_at = record.created_at;

        ScanPatch {
            title: Some("Renamed".to_string()),
            favorite: Some(true),
            ..ScanPatch::default()
        }
        .apply_to(&mut record);

        assert_eq!(record.title, "Renamed");
        assert!(record.favorite);
        assert_eq!(record.content, "https://example.com");
        assert_eq!(record.id, id);
        assert_eq!(record.created_at, created_at);
    }

    #[test]
    fn test_matches_lowercase() {
        let record = sample_record();
        assert!(record.matches_lowercase("example"));
        assert!(record.matches_lowercase("https"));
        assert!(!record.matches_lowercase("missing"));
    }

    #[test]
    fn test_is_link() {
        let mut record = sample_record();
        assert!(record.is_link());
        record.kind = ScanKind::Text;
        assert!(!record.is_link());
    }
}
