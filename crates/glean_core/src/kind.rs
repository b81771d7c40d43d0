//! Media kind enumeration and key classifier.

use serde::{Deserialize, Serialize};

/// Kind of media an object key denotes.
///
/// Derived from the key's extension only; object bodies are never sniffed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image (JPEG, PNG)
    #[display("image")]
    Image,
    /// PDF document
    #[display("pdf")]
    Pdf,
    /// Video (MP4). Recognised but not analyzed yet.
    #[display("video")]
    Video,
    /// Anything else, including keys without an extension
    #[display("unsupported")]
    Unsupported,
}

impl MediaKind {
    /// Classify an object key by its extension.
    ///
    /// Splits at the last `.` and compares the extension case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use glean_core::MediaKind;
    ///
    /// assert_eq!(MediaKind::classify("holiday/beach.JPG"), MediaKind::Image);
    /// assert_eq!(MediaKind::classify("report.pdf"), MediaKind::Pdf);
    /// assert_eq!(MediaKind::classify("clip.mp4"), MediaKind::Video);
    /// assert_eq!(MediaKind::classify("README"), MediaKind::Unsupported);
    /// ```
    pub fn classify(key: &str) -> Self {
        let Some((_, extension)) = key.rsplit_once('.') else {
            return MediaKind::Unsupported;
        };

        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" => MediaKind::Image,
            "pdf" => MediaKind::Pdf,
            "mp4" => MediaKind::Video,
            _ => MediaKind::Unsupported,
        }
    }

    /// Whether objects of this kind are sent to the content analyzer.
    pub fn is_analyzable(&self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::Pdf)
    }

    /// Convert to string representation used in metadata records.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Pdf => "pdf",
            MediaKind::Video => "video",
            MediaKind::Unsupported => "unsupported",
        }
    }
}

/// Classify an object key. Shorthand for [`MediaKind::classify`].
pub fn classify(key: &str) -> MediaKind {
    MediaKind::classify(key)
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "pdf" => Ok(MediaKind::Pdf),
            "video" => Ok(MediaKind::Video),
            "unsupported" => Ok(MediaKind::Unsupported),
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}
