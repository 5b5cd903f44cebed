//! Track abstractions for selectable audio/video variants

use crate::format::humanize_bitrate;
use serde::{Deserialize, Serialize};

/// Kind of track a descriptor refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    /// Combined or video-only variant
    Video,
    /// Audio variant or language track
    Audio,
    /// Thumbnail/image track
    Image,
}

/// Track as reported by a media engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantTrack {
    /// Engine-assigned track ID
    pub id: u64,
    /// Video height in pixels
    pub height: Option<u32>,
    /// Video width in pixels
    pub width: Option<u32>,
    /// Total bandwidth in bits per second
    pub bandwidth: u64,
    /// Audio language code
    pub language: Option<String>,
    /// Label provided by the manifest
    pub label: Option<String>,
    /// Whether the engine is currently playing this track
    pub active: bool,
}

/// Selectable track exposed to the player UI
///
/// Produced fresh on every query from the engine's current track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Engine-assigned track ID
    pub id: u64,
    /// Track kind
    pub kind: TrackKind,
    /// Video height in pixels
    pub height: Option<u32>,
    /// Bandwidth in bits per second
    pub bandwidth: u64,
    /// Audio language code
    pub language: Option<String>,
    /// Human-readable label
    pub label: String,
    /// Whether the engine is currently playing this track
    pub active: bool,
}

impl TrackDescriptor {
    fn from_variant(track: &VariantTrack, kind: TrackKind, label: String) -> Self {
        Self {
            id: track.id,
            kind,
            height: track.height,
            bandwidth: track.bandwidth,
            language: track.language.clone(),
            label,
            active: track.active,
        }
    }

    /// Video quality entry labelled `"<height>p - <bitrate>"`
    pub fn video_quality(track: &VariantTrack) -> Self {
        let height = track
            .height
            .map(|h| h.to_string())
            .unwrap_or_else(|| "?".to_string());
        let label = format!("{}p - {}", height, humanize_bitrate(track.bandwidth));
        Self::from_variant(track, TrackKind::Video, label)
    }

    /// Audio quality entry labelled with the humanized bitrate, prefixed by
    /// the language when known
    pub fn audio_quality(track: &VariantTrack) -> Self {
        let bitrate = humanize_bitrate(track.bandwidth);
        let label = match &track.language {
            Some(language) => format!("{} - {}", language, bitrate),
            None => bitrate,
        };
        Self::from_variant(track, TrackKind::Audio, label)
    }

    /// Audio language entry labelled with the manifest label or language code
    pub fn audio_track(track: &VariantTrack) -> Self {
        let label = track
            .label
            .clone()
            .or_else(|| track.language.clone())
            .unwrap_or_default();
        Self::from_variant(track, TrackKind::Audio, label)
    }

    /// Image (thumbnail) track entry labelled with the manifest label
    pub fn image_track(track: &VariantTrack) -> Self {
        let label = match (&track.label, track.height) {
            (Some(label), _) => label.clone(),
            (None, Some(height)) => format!("{}p", height),
            (None, None) => String::new(),
        };
        Self::from_variant(track, TrackKind::Image, label)
    }
}
