use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CurrentlyPlayingType {
    Track,
    Episode,
    #[serde(rename = "ad")]
    Advertisement,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimplifiedAlbum {
    pub id: Option<String>,
    pub name: String,
}

/// A playable item reported by `GET /me/player/currently-playing`.
///
/// Tracks and episodes share this shape. Episodes have no artists or album and
/// local files have no id.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Track {
    pub id: Option<String>,
    #[serde(default)]
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    pub album: Option<SimplifiedAlbum>,
    #[serde(rename = "duration_ms")]
    pub duration: u64,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    #[serde(rename = "type", default)]
    pub _type: String,
    #[serde(default)]
    pub is_local: bool,
}

impl Track {
    /// Identifier used for change detection. Falls back to the uri for local files.
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(self.uri.as_str())
    }

    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }

    pub fn album_name(&self) -> Option<&str> {
        self.album.as_ref().map(|a| a.name.as_str())
    }

    pub fn listen_url(&self) -> Option<&str> {
        self.external_urls.get("spotify").map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CurrentlyPlaying {
    #[serde(rename = "is_playing", default)]
    pub playing: bool,
    #[serde(rename = "progress_ms")]
    pub progress: Option<u64>,
    pub currently_playing_type: Option<CurrentlyPlayingType>,
    pub item: Option<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_track_payload() {
        let payload = serde_json::json!({
            "is_playing": true,
            "progress_ms": 1200,
            "currently_playing_type": "track",
            "item": {
                "id": "4iV5W9uYEdYUVa79Axb7Rh",
                "uri": "spotify:track:4iV5W9uYEdYUVa79Axb7Rh",
                "name": "Bling-Bang-Bang-Born",
                "type": "track",
                "duration_ms": 168000,
                "is_local": false,
                "artists": [{ "id": "1", "name": "Creepy Nuts", "external_urls": {} }],
                "album": { "id": "2", "name": "Bling-Bang-Bang-Born" },
                "external_urls": { "spotify": "https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh" }
            }
        });

        let playing: CurrentlyPlaying = serde_json::from_value(payload).unwrap();
        assert!(playing.playing);
        assert_eq!(playing.currently_playing_type, Some(CurrentlyPlayingType::Track));

        let track = playing.item.unwrap();
        assert_eq!(track.identity(), "4iV5W9uYEdYUVa79Axb7Rh");
        assert_eq!(track.primary_artist(), Some("Creepy Nuts"));
        assert_eq!(track.album_name(), Some("Bling-Bang-Bang-Born"));
        assert_eq!(track.duration, 168000);
        assert_eq!(
            track.listen_url(),
            Some("https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh")
        );
    }

    #[test]
    fn ads_have_no_item() {
        let payload = serde_json::json!({
            "is_playing": true,
            "progress_ms": null,
            "currently_playing_type": "ad",
            "item": null
        });

        let playing: CurrentlyPlaying = serde_json::from_value(payload).unwrap();
        assert_eq!(playing.currently_playing_type, Some(CurrentlyPlayingType::Advertisement));
        assert!(playing.item.is_none());
    }

    #[test]
    fn unrecognised_playing_type_is_unknown() {
        let payload = serde_json::json!({
            "is_playing": true,
            "progress_ms": 0,
            "currently_playing_type": "audiobook_chapter",
            "item": null
        });

        let playing: CurrentlyPlaying = serde_json::from_value(payload).unwrap();
        assert_eq!(playing.currently_playing_type, Some(CurrentlyPlayingType::Unknown));
    }

    #[test]
    fn local_files_use_uri_as_identity() {
        let payload = serde_json::json!({
            "id": null,
            "uri": "spotify:local:Artist:Album:Song:200",
            "name": "Song",
            "duration_ms": 200000,
            "is_local": true,
            "artists": [],
            "album": null,
            "external_urls": {}
        });

        let track: Track = serde_json::from_value(payload).unwrap();
        assert_eq!(track.identity(), "spotify:local:Artist:Album:Song:200");
        assert_eq!(track.primary_artist(), None);
        assert_eq!(track.listen_url(), None);
    }
}
