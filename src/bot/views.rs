//! User-facing texts
//!
//! Every string the bot sends lives here so handlers only decide *which* one.

use super::intent::Selection;
use super::reply::Choice;
use crate::media::{Availability, LibraryEntry, MediaKind, SearchResult};

/// Uniform rejection for users outside the allow-list.
pub const UNAUTHORIZED: &str = "Sorry, you are not authorized to use this bot.";

/// Command reference shown by `/help`.
pub const HELP: &str = "🎬 ZulianTV Bot Commands:

📺 TV Shows:
/searchshow <name> - Search for a TV show
Example: /searchshow Breaking Bad

🎥 Movies:
/searchmovie <name> - Search for a movie
Example: /searchmovie Inception

📋 My Library:
/myshows - List all your TV shows
/mymovies - List all your movies

💡 Tips:
- You can also just type the name of a show/movie
- I'll help you choose if there are multiple matches
- I'll automatically download and organize everything!";

/// Greeting for `/start`.
#[must_use]
pub fn welcome(first_name: &str) -> String {
    format!(
        "🎬 Welcome to ZulianTV, {first_name}!

I can help you add movies and TV shows to your Jellyfin library.

Available commands:
/searchshow <name> - Search for a TV show
/searchmovie <name> - Search for a movie
/myshows - List your TV shows
/mymovies - List your movies
/help - Show this help message

Just send me the name of what you want to watch!"
    )
}

const fn noun(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Show => "show",
        MediaKind::Movie => "movie",
    }
}

const fn plural(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Show => "shows",
        MediaKind::Movie => "movies",
    }
}

/// Instruction when a search has no query.
#[must_use]
pub const fn missing_query(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Show => "Please provide a show name. Example: /searchshow Breaking Bad",
        MediaKind::Movie => "Please provide a movie name. Example: /searchmovie Inception",
    }
}

/// Progress line sent before the backend call.
#[must_use]
pub fn searching(query: &str) -> String {
    format!("🔍 Searching for '{query}'...")
}

/// Reply for a search that came back empty.
#[must_use]
pub fn nothing_found(kind: MediaKind, query: &str) -> String {
    format!(
        "No {} found for '{query}'. Try a different search term.",
        plural(kind)
    )
}

/// Header above the result buttons.
#[must_use]
pub fn results_header(kind: MediaKind, total: usize) -> String {
    format!("Found {total} results. Select a {}:", noun(kind))
}

/// Reply when the search request failed.
#[must_use]
pub fn search_failed(kind: MediaKind, reason: &str) -> String {
    format!("Error searching for {}: {reason}", noun(kind))
}

/// Button for one search result, or `None` if it has no external id.
#[must_use]
pub fn result_choice(kind: MediaKind, result: &SearchResult) -> Option<Choice> {
    let external_id = result.external_id?;
    let title = result.title.as_deref().unwrap_or("Unknown");
    let year = result
        .year
        .filter(|y| *y > 0)
        .map_or_else(|| "N/A".to_string(), |y| y.to_string());
    Some(Choice::new(
        format!("{title} ({year})"),
        Selection::new(kind, external_id).encode(),
    ))
}

/// Progress line sent before the library listing.
#[must_use]
pub const fn fetching_library(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Show => "📺 Fetching your TV shows...",
        MediaKind::Movie => "🎥 Fetching your movies...",
    }
}

/// Reply for an empty library.
#[must_use]
pub const fn empty_library(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Show => "No TV shows found in your library.",
        MediaKind::Movie => "No movies found in your library.",
    }
}

/// Reply when the listing request failed.
#[must_use]
pub fn library_failed(kind: MediaKind, reason: &str) -> String {
    format!("Error fetching {}: {reason}", plural(kind))
}

/// Render the first `limit` library entries, with a count of the rest.
#[must_use]
pub fn library_listing(kind: MediaKind, entries: &[LibraryEntry], limit: usize) -> String {
    let header = match kind {
        MediaKind::Show => "📺 Your TV Shows",
        MediaKind::Movie => "🎥 Your Movies",
    };
    let mut message = format!("{header} ({} total):\n\n", entries.len());

    for entry in entries.iter().take(limit) {
        message.push_str(&library_line(kind, entry));
        message.push('\n');
    }

    if entries.len() > limit {
        message.push_str(&format!("\n... and {} more", entries.len() - limit));
    }

    message
}

fn library_line(kind: MediaKind, entry: &LibraryEntry) -> String {
    let status = match &entry.availability {
        Availability::Status(s) => s.as_str(),
        Availability::Downloaded => "Downloaded",
        Availability::Searching => "Searching",
    };
    match kind {
        MediaKind::Show => format!("• {} - {status}", entry.title),
        MediaKind::Movie => {
            let year = entry
                .year
                .map_or_else(|| "N/A".to_string(), |y| y.to_string());
            format!("• {} ({year}) - {status}", entry.title)
        }
    }
}

/// Message text while an add request is in flight.
#[must_use]
pub const fn adding(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Show => "📺 Adding TV show to Sonarr...",
        MediaKind::Movie => "🎥 Adding movie to Radarr...",
    }
}

/// Confirmation after a successful add.
#[must_use]
pub fn added(kind: MediaKind, title: &str) -> String {
    let follow_up = match kind {
        MediaKind::Show => {
            "Sonarr is now searching for episodes. You'll be notified when they're ready."
        }
        MediaKind::Movie => {
            "Radarr is now searching for the movie. You'll be notified when it's ready."
        }
    };
    format!("✅ '{title}' has been added!\n{follow_up}")
}

/// Failure of a button press, with the underlying description.
#[must_use]
pub fn selection_failed(reason: &str) -> String {
    format!("❌ Error: {reason}")
}
