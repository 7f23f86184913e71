/// Authorization Gate
pub mod access;
/// Slash-command grammar and message helpers
pub mod commands;
/// Button payloads and the free-text heuristic
pub mod intent;
/// Transport-agnostic reply seam
pub mod reply;
/// Command Router
pub mod router;
/// Telegram implementation of the reply seam
pub mod telegram;
/// User-facing texts
pub mod views;

pub use access::AccessGate;
pub use router::{ChatUser, MediaRouter};
