//! Error codes carried by failure [`Response`](crate::Response)s.
//!
//! Codes serialize as `SCREAMING_SNAKE_CASE` strings so a host can forward
//! them to a UI or a log pipeline unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a brokering operation failed.
///
/// Use [`description()`](ErrorCode::description) for a human-readable explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A call to the session API failed. The envelope's message holds the
    /// underlying error text.
    UnknownError,
    /// No active game session exists to connect to.
    NoGameSessionWasFound,
}

impl ErrorCode {
    /// Returns a human-readable description of this error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnknownError => {
                "The session service call failed. See the error message for details."
            }
            Self::NoGameSessionWasFound => {
                "No active game session was found. Start a game before requesting a connection."
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
