//! Decoding user intent
//!
//! Button payloads carry the whole selection (`add_show_<tvdb id>` or
//! `add_movie_<tmdb id>`), so nothing is kept between presenting choices and
//! receiving the pick. Free text is routed by a fixed keyword heuristic.

use crate::media::MediaKind;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Payload prefix for show buttons.
pub const SHOW_PAYLOAD_PREFIX: &str = "add_show_";
/// Payload prefix for movie buttons.
pub const MOVIE_PAYLOAD_PREFIX: &str = "add_movie_";

/// Keywords that turn free text into a movie request.
const MOVIE_KEYWORDS: [&str; 2] = ["movie", "film"];

/// A title picked from a search result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Which backend the title belongs to
    pub kind: MediaKind,
    /// TVDB id for shows, TMDB id for movies
    pub external_id: i64,
}

/// Button payload that does not describe a selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Prefix is neither a show nor a movie tag
    #[error("unrecognized selection '{0}'")]
    UnknownKind(String),
    /// Trailing id is missing, not a number or not positive
    #[error("invalid id in selection '{0}'")]
    InvalidId(String),
}

impl Selection {
    /// Create a selection.
    #[must_use]
    pub const fn new(kind: MediaKind, external_id: i64) -> Self {
        Self { kind, external_id }
    }

    /// Encode as a button payload.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            MediaKind::Show => SHOW_PAYLOAD_PREFIX,
            MediaKind::Movie => MOVIE_PAYLOAD_PREFIX,
        };
        write!(f, "{prefix}{}", self.external_id)
    }
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        let (kind, id) = if let Some(id) = payload.strip_prefix(SHOW_PAYLOAD_PREFIX) {
            (MediaKind::Show, id)
        } else if let Some(id) = payload.strip_prefix(MOVIE_PAYLOAD_PREFIX) {
            (MediaKind::Movie, id)
        } else {
            return Err(SelectionError::UnknownKind(payload.to_string()));
        };

        match id.parse::<i64>() {
            Ok(external_id) if external_id > 0 => Ok(Self::new(kind, external_id)),
            _ => Err(SelectionError::InvalidId(payload.to_string())),
        }
    }
}

/// Search request guessed from unstructured text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeTextRequest {
    /// Backend to search
    pub kind: MediaKind,
    /// Whitespace-normalized query, may be empty
    pub query: String,
}

/// Guess whether free text asks for a movie or a show.
///
/// Text containing "movie" or "film" (any case) is a movie request with those
/// substrings removed and the rest lowercased. Anything else is a show request
/// for the text as typed. Substring matching means titles like "Filmore" also
/// count as movie requests.
#[must_use]
pub fn classify_free_text(text: &str) -> FreeTextRequest {
    let lowered = text.to_lowercase();

    if MOVIE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        let stripped = MOVIE_KEYWORDS
            .iter()
            .fold(lowered, |acc, keyword| acc.replace(keyword, ""));
        FreeTextRequest {
            kind: MediaKind::Movie,
            query: normalize_whitespace(&stripped),
        }
    } else {
        FreeTextRequest {
            kind: MediaKind::Show,
            query: normalize_whitespace(text),
        }
    }
}

/// Collapse runs of whitespace and trim, like splitting command arguments.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
