use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Greeting and command overview
    #[command(description = "Start the bot.")]
    Start,
    /// Command reference
    #[command(description = "Show this help message.")]
    Help,
    /// Search Sonarr for a show
    #[command(description = "Search for a TV show.")]
    SearchShow(String),
    /// Search Radarr for a movie
    #[command(description = "Search for a movie.")]
    SearchMovie(String),
    /// List the Sonarr library
    #[command(description = "List your TV shows.")]
    MyShows,
    /// List the Radarr library
    #[command(description = "List your movies.")]
    MyMovies,
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
#[must_use]
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// First name of the sender, or "there" if unknown.
#[must_use]
pub fn get_first_name(msg: &Message) -> String {
    msg.from
        .as_ref()
        .map(|u| u.first_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "there".to_string())
}
