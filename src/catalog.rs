//! Catalog of tracks served by the music server.
//!
//! The server exposes a single listing endpoint (`GET /music`) returning a
//! JSON array of track descriptors whose metadata was extracted server-side,
//! and serves the raw audio bytes under `/music/{name}`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Shown when a track carries no artist tag.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Extensions stripped from file names when no title tag exists.
const AUDIO_EXTENSIONS: [&str; 3] = [".mp3", ".m4a", ".wav"];

/// Errors raised while fetching the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Connection or body read failed
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("catalog server returned {0}")]
    Status(u16),

    /// Body was not a JSON array of tracks
    #[error("malformed catalog: {0}")]
    Parse(String),

    /// Configured server origin is not a usable base URL
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Embedded cover art, base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    /// MIME type, e.g. `image/jpeg`
    pub format: String,
    pub data: String,
}

impl Picture {
    /// Raw image bytes.
    pub fn decode(&self) -> std::result::Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub picture: Option<Picture>,
}

/// One playable file as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Server-relative file name, also the media path segment.
    pub name: String,
    #[serde(default)]
    pub metadata: TrackMetadata,
}

impl Track {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metadata: TrackMetadata::default(),
        }
    }

    pub fn display_title(&self) -> String {
        match self.metadata.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => strip_audio_extension(&self.name).to_string(),
        }
    }

    pub fn display_artist(&self) -> String {
        match self.metadata.artist.as_deref() {
            Some(artist) if !artist.is_empty() => artist.to_string(),
            _ => UNKNOWN_ARTIST.to_string(),
        }
    }
}

/// Drops a trailing `.mp3`, `.m4a` or `.wav`, ignoring case.
pub fn strip_audio_extension(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    for ext in AUDIO_EXTENSIONS {
        if lower.ends_with(ext) {
            return &name[..name.len() - ext.len()];
        }
    }
    name
}

/// Builds `{origin}/music/{name}`, encoding the name as one path segment.
pub fn media_url(origin: &Url, name: &str) -> Result<Url> {
    let mut url = origin.clone();
    url.path_segments_mut()
        .map_err(|_| CatalogError::InvalidUrl(origin.to_string()))?
        .pop_if_empty()
        .push("music")
        .push(name);
    Ok(url)
}

/// Parses and normalises a server origin such as `http://localhost:3000`.
pub fn parse_origin(origin: &str) -> Result<Url> {
    let trimmed = origin.trim().trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(CatalogError::InvalidUrl(format!(
            "{} (must start with http:// or https://)",
            origin
        )));
    }
    Url::parse(trimmed).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", origin, e)))
}

/// HTTP client for the listing endpoint.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    origin: Url,
}

impl CatalogClient {
    pub fn new(http: Client, origin: Url) -> Self {
        Self { http, origin }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// One unauthenticated GET; any failure fails the whole load.
    pub async fn fetch(&self) -> Result<Vec<Track>> {
        let mut url = self.origin.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.origin.to_string()))?
            .pop_if_empty()
            .push("music");
        debug!(url = %url, "Fetching catalog");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let tracks: Vec<Track> =
            serde_json::from_slice(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        debug!(tracks = tracks.len(), "Fetched catalog");
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_stripped_name() {
        let track = Track::new("b.mp3");
        assert_eq!(track.display_title(), "b");
        assert_eq!(track.display_artist(), UNKNOWN_ARTIST);
    }

    #[test]
    fn test_title_prefers_metadata() {
        let mut track = Track::new("a.mp3");
        track.metadata.title = Some("A".to_string());
        track.metadata.artist = Some("X".to_string());
        assert_eq!(track.display_title(), "A");
        assert_eq!(track.display_artist(), "X");
    }

    #[test]
    fn test_empty_tags_fall_back() {
        let mut track = Track::new("Song.WAV");
        track.metadata.title = Some(String::new());
        track.metadata.artist = Some(String::new());
        assert_eq!(track.display_title(), "Song");
        assert_eq!(track.display_artist(), UNKNOWN_ARTIST);
    }

    #[test]
    fn test_only_known_extensions_are_stripped() {
        assert_eq!(strip_audio_extension("tune.M4A"), "tune");
        assert_eq!(strip_audio_extension("tune.flac"), "tune.flac");
        assert_eq!(strip_audio_extension("mp3"), "mp3");
    }

    #[test]
    fn test_media_url_encodes_name() {
        let origin = parse_origin("http://localhost:3000/").unwrap();
        let url = media_url(&origin, "Note Block #1.mp3").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/music/Note%20Block%20%231.mp3"
        );
    }

    #[test]
    fn test_parse_origin_rejects_missing_scheme() {
        assert!(matches!(
            parse_origin("localhost:3000"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_picture_decode() {
        let pic = Picture {
            format: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        };
        assert_eq!(pic.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_deserialize_without_metadata() {
        let tracks: Vec<Track> =
            serde_json::from_str(r#"[{"name":"a.mp3"},{"name":"b.mp3","metadata":{}}]"#).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].metadata, TrackMetadata::default());
    }
}
