#![deny(missing_docs)]
//! Telegram front end for requesting shows from Sonarr and movies from Radarr.

/// Chat-side logic: authorization, routing, texts and the Telegram adapter.
pub mod bot;
/// Settings loading and validation.
pub mod config;
/// Logging setup with secret redaction.
pub mod logging;
/// Sonarr and Radarr clients.
pub mod media;
/// Telegram runtime entrypoint.
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;
