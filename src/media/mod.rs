//! Media Client Pair
//!
//! Two clients of one shape, one per backend: Sonarr for shows, Radarr for movies.
//! Both expose title search, library listing and add-by-external-id behind
//! [`MediaBackend`], and collapse every failure into a [`BackendError`].

/// Generic `*arr` client shape shared by both backends
pub mod arr;
/// Low-level REST plumbing (paths, API key header, error mapping)
pub mod http;
/// Radarr field names and payloads
pub mod radarr;
/// Sonarr field names and payloads
pub mod sonarr;
/// Request-scoped records returned by the backends
pub mod types;

pub use arr::{ArrClient, ArrFlavor, RadarrClient, SonarrClient};
pub use http::create_http_client;
pub use types::{Availability, CommandAck, LibraryEntry, QualityProfile, RootFolder, SearchResult};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Kind of media, one per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// TV series, handled by Sonarr, keyed by TVDB id
    Show,
    /// Movies, handled by Radarr, keyed by TMDB id
    Movie,
}

impl MediaKind {
    /// Name of the backend service handling this kind.
    #[must_use]
    pub const fn backend_name(self) -> &'static str {
        match self {
            Self::Show => "Sonarr",
            Self::Movie => "Radarr",
        }
    }

    /// Name of the external catalog the ids come from.
    #[must_use]
    pub const fn catalog_name(self) -> &'static str {
        match self {
            Self::Show => "TVDB",
            Self::Movie => "TMDB",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => f.write_str("show"),
            Self::Movie => f.write_str("movie"),
        }
    }
}

/// Any failure talking to a backend.
///
/// Connection errors, timeouts, non-2xx statuses, undecodable bodies and
/// misconfigured backends all end up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} API error: {reason}", .backend.backend_name())]
pub struct BackendError {
    /// Which backend failed
    pub backend: MediaKind,
    /// Transport or status failure text
    pub reason: String,
}

impl BackendError {
    /// Create an error for the given backend.
    pub fn new(backend: MediaKind, reason: impl Into<String>) -> Self {
        Self {
            backend,
            reason: reason.into(),
        }
    }
}

/// Result of a title search that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// At least one candidate, in backend order
    Found(Vec<SearchResult>),
    /// The backend answered with an empty list
    Empty,
}

impl SearchOutcome {
    /// Classify a list of results.
    #[must_use]
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        if results.is_empty() {
            Self::Empty
        } else {
            Self::Found(results)
        }
    }
}

/// Operations the router needs from a backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Search the backend's catalog by free-form title.
    async fn search_by_title(&self, query: &str) -> Result<SearchOutcome, BackendError>;

    /// Add a title by external id using the first root folder and quality profile.
    async fn add_by_external_id(&self, external_id: i64) -> Result<LibraryEntry, BackendError>;

    /// Everything the backend already knows about, in backend order.
    async fn list_library(&self) -> Result<Vec<LibraryEntry>, BackendError>;
}
