//! Fault classification: image placeholders and user-facing notices.

use std::fmt;

pub const ALBUM_PLACEHOLDER: &str = "picture/placeholder-album.jpg";
pub const GENERIC_PLACEHOLDER: &str = "picture/placeholder-generic.jpg";
/// Class on an image's parent marking it as an album cover.
pub const ALBUM_COVER_CLASS: &str = "album-cover";

/// Where a broken image sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageContext {
    AlbumCover,
    Generic,
}

impl ImageContext {
    pub fn from_album_cover(in_album_cover: bool) -> Self {
        if in_album_cover {
            ImageContext::AlbumCover
        } else {
            ImageContext::Generic
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ImageContext::AlbumCover => ALBUM_PLACEHOLDER,
            ImageContext::Generic => GENERIC_PLACEHOLDER,
        }
    }
}

/// Placeholder to swap in for a failed image, or `None` when the failing
/// source already is that placeholder.
pub fn replacement_for(current_src: &str, context: ImageContext) -> Option<&'static str> {
    let placeholder = context.placeholder();
    if current_src.ends_with(placeholder) {
        None
    } else {
        Some(placeholder)
    }
}

/// Last path segment of a resource path or URL.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Messages shown to the user through the host's alert dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A foreground track could not be loaded.
    TrackUnavailable { file: String },
    /// An uncaught runtime error; the page should be reloaded.
    UnexpectedError,
}

impl Notice {
    pub fn track_unavailable(src: &str) -> Self {
        Notice::TrackUnavailable { file: file_name(src).to_string() }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::TrackUnavailable { file } => write!(f, "无法播放: {}", file),
            Notice::UnexpectedError => write!(f, "发生意外错误，请刷新页面"),
        }
    }
}
