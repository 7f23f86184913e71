use serde::Deserialize;
use serde_json::Value;

/// One candidate title from a backend search or lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// TVDB id for shows, TMDB id for movies
    pub external_id: Option<i64>,
    /// Display title
    pub title: Option<String>,
    /// Release year as the catalog reports it, `0` for unreleased titles
    pub year: Option<i32>,
    /// Backend slug, echoed back on add
    pub title_slug: Option<String>,
    /// Artwork references, passed through opaquely
    pub images: Vec<Value>,
    /// Season list (shows only), passed through opaquely
    pub seasons: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupRecord {
    title: Option<String>,
    year: Option<i32>,
    title_slug: Option<String>,
    images: Option<Vec<Value>>,
    seasons: Option<Vec<Value>>,
}

impl SearchResult {
    /// Build a result from a raw lookup record, reading the external id from `id_field`.
    ///
    /// Returns `None` if the value is not an object.
    #[must_use]
    pub fn from_lookup(id_field: &str, value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let external_id = value.get(id_field).and_then(Value::as_i64).filter(|id| *id > 0);
        let record: LookupRecord = serde_json::from_value(value).ok()?;
        Some(Self {
            external_id,
            title: record.title,
            year: record.year,
            title_slug: record.title_slug,
            images: record.images.unwrap_or_default(),
            seasons: record.seasons.unwrap_or_default(),
        })
    }
}

/// Availability of a title already in a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Backend status string (shows), e.g. `continuing` or `ended`
    Status(String),
    /// A file is on disk (movies)
    Downloaded,
    /// No file yet, the backend is looking (movies)
    Searching,
}

/// A title already known to a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    /// Backend-internal id
    pub id: Option<i64>,
    /// Display title
    pub title: String,
    /// Release year, only rendered for movies
    pub year: Option<i32>,
    /// Download state
    pub availability: Availability,
}

/// Library record as the backends return it; fields are a superset of both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryRecord {
    /// Backend-internal id
    pub id: Option<i64>,
    /// Display title
    pub title: Option<String>,
    /// Release year
    pub year: Option<i32>,
    /// Backend status string
    pub status: Option<String>,
    /// Whether a file is present (movies)
    pub has_file: Option<bool>,
}

/// Storage location configured in a backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RootFolder {
    /// Backend id of the folder
    #[serde(default)]
    pub id: Option<i64>,
    /// Absolute path on the backend host
    pub path: String,
}

/// Quality tier configured in a backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QualityProfile {
    /// Backend id of the profile
    pub id: i64,
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// Acknowledgement of a queued backend command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandAck {
    /// Command id assigned by the backend
    pub id: Option<i64>,
    /// Command name echoed back
    pub name: Option<String>,
    /// Queue status, e.g. `queued` or `started`
    pub status: Option<String>,
}
