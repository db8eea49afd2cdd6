//! Data structures for the stream catalog boundary

use std::fmt;

/// Which side of the media split a stream (or a download) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// One retrievable stream variant as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    /// Declared MIME type, e.g. `audio/mp4; codecs="mp4a.40.2"`
    pub mime_type: String,
    /// Bitrate label for audio streams, e.g. "128kbps"
    pub bitrate: Option<String>,
    /// Resolution label for video streams, e.g. "720p"
    pub resolution: Option<String>,
    /// Container extension, e.g. "m4a", "mp4", "webm"
    pub ext: String,
    /// Catalog-internal handle used to resolve the concrete stream
    pub format_id: String,
    pub filesize: Option<u64>,
}

impl StreamDescriptor {
    /// The declared media subtype this stream is grouped by
    pub fn subtype(&self) -> Option<&str> {
        media_subtype(&self.mime_type)
    }
}

/// Extract the media subtype from a MIME type: the part after the slash,
/// before any parameter delimiter. `audio/mp4; codecs="mp4a.40.2"` → `mp4`.
pub fn media_subtype(mime_type: &str) -> Option<&str> {
    let after_slash = mime_type.split('/').nth(1)?;
    let subtype = after_slash
        .split(';')
        .next()
        .unwrap_or(after_slash)
        .trim();
    if subtype.is_empty() {
        None
    } else {
        Some(subtype)
    }
}

/// What the dialog asks the catalog to match when the user confirms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamCriteria {
    /// Audio-only stream at the given bitrate label
    Audio { bitrate: String },
    /// Video-only stream at the given resolution label in the given container
    Video { resolution: String, ext: String },
}

impl fmt::Display for StreamCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamCriteria::Audio { bitrate } => write!(f, "audio at {}", bitrate),
            StreamCriteria::Video { resolution, ext } => {
                write!(f, "{} video at {}", ext, resolution)
            }
        }
    }
}

impl StreamCriteria {
    pub fn kind(&self) -> MediaKind {
        match self {
            StreamCriteria::Audio { .. } => MediaKind::Audio,
            StreamCriteria::Video { .. } => MediaKind::Video,
        }
    }

    pub fn matches(&self, descriptor: &StreamDescriptor) -> bool {
        match self {
            StreamCriteria::Audio { bitrate } => descriptor.bitrate.as_deref() == Some(bitrate),
            StreamCriteria::Video { resolution, ext } => {
                descriptor.resolution.as_deref() == Some(resolution) && descriptor.ext == *ext
            }
        }
    }
}

/// A concrete stream the catalog resolved a selection to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStream {
    /// Directly retrievable HTTP URL
    pub direct_url: String,
    pub ext: String,
    pub filesize: Option<u64>,
}

/// Display metadata for a page, used by the shell's preview pane and to
/// prefill the dialog's title field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub title: String,
    pub uploader: Option<String>,
    /// Duration in seconds
    pub duration: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtype_is_taken_after_slash() {
        assert_eq!(media_subtype("audio/mp4"), Some("mp4"));
        assert_eq!(media_subtype("video/webm"), Some("webm"));
    }

    #[test]
    fn subtype_stops_at_parameter_delimiter() {
        assert_eq!(
            media_subtype("audio/mp4; codecs=\"mp4a.40.2\""),
            Some("mp4")
        );
        assert_eq!(media_subtype("video/webm;codecs=vp9"), Some("webm"));
    }

    #[test]
    fn subtype_of_malformed_mime_is_none() {
        assert_eq!(media_subtype("mp4"), None);
        assert_eq!(media_subtype("audio/"), None);
    }

    #[test]
    fn audio_criteria_match_on_bitrate_only() {
        let descriptor = StreamDescriptor {
            mime_type: "audio/mp4".to_string(),
            bitrate: Some("128kbps".to_string()),
            resolution: None,
            ext: "m4a".to_string(),
            format_id: "140".to_string(),
            filesize: None,
        };

        let hit = StreamCriteria::Audio {
            bitrate: "128kbps".to_string(),
        };
        let miss = StreamCriteria::Audio {
            bitrate: "160kbps".to_string(),
        };
        assert!(hit.matches(&descriptor));
        assert!(!miss.matches(&descriptor));
    }

    #[test]
    fn video_criteria_require_resolution_and_extension() {
        let descriptor = StreamDescriptor {
            mime_type: "video/mp4".to_string(),
            bitrate: None,
            resolution: Some("720p".to_string()),
            ext: "mp4".to_string(),
            format_id: "136".to_string(),
            filesize: None,
        };

        let hit = StreamCriteria::Video {
            resolution: "720p".to_string(),
            ext: "mp4".to_string(),
        };
        let wrong_ext = StreamCriteria::Video {
            resolution: "720p".to_string(),
            ext: "webm".to_string(),
        };
        assert!(hit.matches(&descriptor));
        assert!(!wrong_ext.matches(&descriptor));
    }
}
