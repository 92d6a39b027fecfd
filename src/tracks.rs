//! Track catalogue for the music gallery.

use serde::Deserialize;
use std::fmt;

/// Catalogue bundled into the binary.
pub const BUNDLED_TRACKS: &str = include_str!("tracks.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    /// Relative path of the audio resource.
    pub audio: String,
    /// Relative path of the album cover image.
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug)]
pub enum TrackListError {
    Parse(serde_json::Error),
    MissingAudio { index: usize, title: String },
}

impl fmt::Display for TrackListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackListError::Parse(e) => write!(f, "Invalid track catalogue: {}", e),
            TrackListError::MissingAudio { index, title } => write!(
                f,
                "Track {} ({:?}) has no audio source",
                index + 1,
                title
            ),
        }
    }
}

impl std::error::Error for TrackListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackListError::Parse(e) => Some(e),
            TrackListError::MissingAudio { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TrackListError {
    fn from(e: serde_json::Error) -> Self {
        TrackListError::Parse(e)
    }
}

/// Parse and validate a JSON track catalogue.
pub fn parse_tracks(json: &str) -> Result<Vec<Track>, TrackListError> {
    let tracks: Vec<Track> = serde_json::from_str(json)?;
    if let Some((index, track)) = tracks
        .iter()
        .enumerate()
        .find(|(_, t)| t.audio.trim().is_empty())
    {
        return Err(TrackListError::MissingAudio { index, title: track.title.clone() });
    }
    log::info!("Loaded {} tracks into the gallery", tracks.len());
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalogue_is_valid() {
        let tracks = parse_tracks(BUNDLED_TRACKS).unwrap();
        assert!(!tracks.is_empty());
        assert!(tracks.iter().all(|t| t.audio.starts_with("music/")));
    }

    #[test]
    fn optional_fields_default() {
        let tracks = parse_tracks(r#"[{"title": "A", "audio": "music/a.mp3"}]"#).unwrap();
        assert_eq!(tracks[0].artist, "");
        assert_eq!(tracks[0].cover, None);
    }

    #[test]
    fn rejects_blank_audio() {
        let err = parse_tracks(r#"[{"title": "A", "audio": "a.mp3"}, {"title": "B", "audio": " "}]"#)
            .unwrap_err();
        assert!(matches!(err, TrackListError::MissingAudio { index: 1, .. }));
        assert_eq!(err.to_string(), "Track 2 (\"B\") has no audio source");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_tracks("{"), Err(TrackListError::Parse(_))));
    }
}
