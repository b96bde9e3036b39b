use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Token endpoint payload. The refresh grant may omit `refresh_token`, in
/// which case the previous one stays valid.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// One normalized input line: a song title and an artist, either of which
/// may be empty but never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub artist: String,
}

/// Which side of a `-` separated line holds the artist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseOrder {
    #[default]
    #[serde(rename = "artist-song")]
    ArtistSong,
    #[serde(rename = "song-artist")]
    SongArtist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: TracksPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksPage {
    pub items: Vec<TrackCandidate>,
}

/// One catalog search hit, in the relevance order Spotify returned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackCandidate {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub external_ids: ExternalIds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub isrc: Option<String>,
}

/// Per-row match outcome, index-aligned with the input rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub input_song: String,
    pub input_artist: String,
    pub found: bool,
    pub duplicate: bool,
    pub uri: Option<String>,
    pub matched_song: Option<String>,
    pub matched_artist: Option<String>,
    pub isrc: Option<String>,
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchResult {
    /// A row that produced no match, with an optional remote-failure message.
    pub fn miss(song: &str, artist: &str, error: Option<String>) -> Self {
        MatchResult {
            input_song: song.to_string(),
            input_artist: artist.to_string(),
            found: false,
            duplicate: false,
            uri: None,
            matched_song: None,
            matched_artist: None,
            isrc: None,
            id: None,
            error,
        }
    }
}

/// Aggregate over one match run. Always recomputed from the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub total: usize,
    pub found: usize,
    #[serde(rename = "notFound")]
    pub not_found: usize,
    pub duplicates: usize,
}

impl MatchSummary {
    pub fn tally(results: &[MatchResult]) -> Self {
        let found = results.iter().filter(|r| r.found).count();
        MatchSummary {
            total: results.len(),
            found,
            not_found: results.len() - found,
            duplicates: results.iter().filter(|r| r.duplicate).count(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub order: Option<ParseOrder>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeResponse {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub results: Vec<MatchResult>,
    pub summary: MatchSummary,
    /// Default inclusion state per row: `found && !duplicate`.
    pub selected: Vec<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uris: Vec<String>,
    #[serde(default, rename = "isPublic")]
    pub is_public: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistCommitResult {
    pub id: String,
    pub url: Option<String>,
    pub name: String,
    pub added: usize,
    pub batches: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoamiResponse {
    pub authenticated: bool,
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}
