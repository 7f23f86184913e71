//! Authorization Gate
//!
//! A fixed allow-list of Telegram user ids, loaded once at startup.

use std::collections::HashSet;

/// Static allow-list checked before any other processing.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    allowed: HashSet<i64>,
}

impl AccessGate {
    /// Create a gate over the given ids.
    #[must_use]
    pub fn new(allowed: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Whether the user may invoke any command.
    #[must_use]
    pub fn is_authorized(&self, user_id: i64) -> bool {
        self.allowed.contains(&user_id)
    }
}
