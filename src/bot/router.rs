//! Command Router
//!
//! One handler per command, one for free text and one for button presses.
//! Every handler checks the [`AccessGate`] first; a rejected user gets the
//! uniform rejection reply and no backend is touched.
//!
//! A search moves a chat to "awaiting choice" and a button press resolves it.
//! Nothing backs that state: the payload carries the selection, so a stale
//! button stays valid forever.

use super::access::AccessGate;
use super::intent::{classify_free_text, normalize_whitespace, Selection};
use super::reply::{ChatReply, Choice};
use super::views;
use crate::config::{LIBRARY_LISTING_LIMIT, SEARCH_RESULT_LIMIT};
use crate::media::{MediaBackend, MediaKind, SearchOutcome};
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

/// The person behind an incoming event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    /// Transport user id
    pub id: i64,
    /// Display name used in greetings
    pub first_name: String,
}

impl ChatUser {
    /// Create a user.
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
        }
    }
}

/// Maps chat events to backend calls and replies.
///
/// Built once at startup and shared read-only across all event tasks.
pub struct MediaRouter {
    gate: AccessGate,
    shows: Arc<dyn MediaBackend>,
    movies: Arc<dyn MediaBackend>,
}

impl MediaRouter {
    /// Create a router over the show and movie backends.
    #[must_use]
    pub fn new(gate: AccessGate, shows: Arc<dyn MediaBackend>, movies: Arc<dyn MediaBackend>) -> Self {
        Self { gate, shows, movies }
    }

    fn backend(&self, kind: MediaKind) -> &dyn MediaBackend {
        match kind {
            MediaKind::Show => self.shows.as_ref(),
            MediaKind::Movie => self.movies.as_ref(),
        }
    }

    fn authorize(&self, user: &ChatUser) -> bool {
        if self.gate.is_authorized(user.id) {
            return true;
        }
        info!("⛔️ Unauthorized access from user {} ({})", user.id, user.first_name);
        false
    }

    /// `/start`
    ///
    /// # Errors
    ///
    /// Returns an error if the reply cannot be delivered.
    pub async fn start(&self, user: &ChatUser, reply: &dyn ChatReply) -> Result<()> {
        if !self.authorize(user) {
            return reply.send_text(views::UNAUTHORIZED).await;
        }
        info!("User {} ({}) initiated /start command.", user.id, user.first_name);
        reply.send_text(&views::welcome(&user.first_name)).await
    }

    /// `/help`
    ///
    /// # Errors
    ///
    /// Returns an error if the reply cannot be delivered.
    pub async fn help(&self, user: &ChatUser, reply: &dyn ChatReply) -> Result<()> {
        if !self.authorize(user) {
            return reply.send_text(views::UNAUTHORIZED).await;
        }
        info!("User {} ({}) requested /help.", user.id, user.first_name);
        reply.send_text(views::HELP).await
    }

    /// `/searchshow` and `/searchmovie`: offer the first results as buttons.
    ///
    /// # Errors
    ///
    /// Returns an error if a reply cannot be delivered. Backend failures are
    /// reported to the user instead.
    pub async fn search(
        &self,
        user: &ChatUser,
        kind: MediaKind,
        query: &str,
        reply: &dyn ChatReply,
    ) -> Result<()> {
        if !self.authorize(user) {
            return reply.send_text(views::UNAUTHORIZED).await;
        }

        let query = normalize_whitespace(query);
        if query.is_empty() {
            return reply.send_text(views::missing_query(kind)).await;
        }

        info!("User {} searching {kind}s for '{query}'", user.id);
        reply.send_text(&views::searching(&query)).await?;

        match self.backend(kind).search_by_title(&query).await {
            Ok(SearchOutcome::Empty) => reply.send_text(&views::nothing_found(kind, &query)).await,
            Ok(SearchOutcome::Found(results)) => {
                let choices: Vec<Choice> = results
                    .iter()
                    .filter_map(|result| views::result_choice(kind, result))
                    .take(SEARCH_RESULT_LIMIT)
                    .collect();
                if choices.is_empty() {
                    return reply.send_text(&views::nothing_found(kind, &query)).await;
                }
                reply
                    .send_choices(&views::results_header(kind, results.len()), &choices)
                    .await
            }
            Err(e) => {
                error!("Error searching for {kind}: {e}");
                reply.send_text(&views::search_failed(kind, &e.to_string())).await
            }
        }
    }

    /// `/myshows` and `/mymovies`
    ///
    /// # Errors
    ///
    /// Returns an error if a reply cannot be delivered.
    pub async fn library(&self, user: &ChatUser, kind: MediaKind, reply: &dyn ChatReply) -> Result<()> {
        if !self.authorize(user) {
            return reply.send_text(views::UNAUTHORIZED).await;
        }

        info!("User {} listing {kind}s", user.id);
        reply.send_text(views::fetching_library(kind)).await?;

        match self.backend(kind).list_library().await {
            Ok(entries) if entries.is_empty() => reply.send_text(views::empty_library(kind)).await,
            Ok(entries) => {
                let text = views::library_listing(kind, &entries, LIBRARY_LISTING_LIMIT);
                reply.send_text(&text).await
            }
            Err(e) => {
                error!("Error fetching {kind}s: {e}");
                reply.send_text(&views::library_failed(kind, &e.to_string())).await
            }
        }
    }

    /// Unstructured text: guess movie or show and search.
    ///
    /// # Errors
    ///
    /// Returns an error if a reply cannot be delivered.
    pub async fn free_text(&self, user: &ChatUser, text: &str, reply: &dyn ChatReply) -> Result<()> {
        if !self.authorize(user) {
            return reply.send_text(views::UNAUTHORIZED).await;
        }
        let request = classify_free_text(text);
        self.search(user, request.kind, &request.query, reply).await
    }

    /// Button press: decode the payload and add the title, editing the
    /// originating message in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be edited.
    pub async fn select(&self, user: &ChatUser, payload: &str, reply: &dyn ChatReply) -> Result<()> {
        if !self.authorize(user) {
            return reply.edit_text(views::UNAUTHORIZED).await;
        }

        let selection = match payload.parse::<Selection>() {
            Ok(selection) => selection,
            Err(e) => {
                warn!("User {} sent undecodable payload: {e}", user.id);
                return reply.edit_text(&views::selection_failed(&e.to_string())).await;
            }
        };

        info!(
            "User {} adding {} {} {}",
            user.id,
            selection.kind,
            selection.kind.catalog_name(),
            selection.external_id
        );
        reply.edit_text(views::adding(selection.kind)).await?;

        match self.backend(selection.kind).add_by_external_id(selection.external_id).await {
            Ok(entry) => reply.edit_text(&views::added(selection.kind, &entry.title)).await,
            Err(e) => {
                error!("Error in button callback: {e}");
                reply.edit_text(&views::selection_failed(&e.to_string())).await
            }
        }
    }
}
