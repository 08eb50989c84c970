//! Request and response payloads of the brokering operations.

use serde::{Deserialize, Serialize};

/// Default prefix of generated player identifiers.
pub const DEFAULT_PLAYER_ID_PREFIX: &str = "playerId-";

/// Player-session capacity of game sessions created by the broker.
pub const MAX_PLAYER_SESSIONS: u32 = 4;

/// Asks the broker to make sure a game session is running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameRequest {}

/// Result payload of [`start_game`](crate::GameServerAdapter::start_game).
///
/// Carries no data: the outcome lives on the enclosing [`Response`](crate::Response).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameResponse {}

/// Asks the broker for a connectable session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetGameConnectionRequest {}

/// Where a game client should connect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetGameConnectionResponse {
    pub ip_address: Option<String>,
    pub dns_name: Option<String>,
    /// Port as text, empty when the service did not report one.
    pub port: String,
    pub player_session_id: Option<String>,
    /// `true` once the connection details are usable.
    pub ready: bool,
}

/// Builds a fresh player identifier: `prefix` followed by a v4 UUID.
pub fn new_player_id(prefix: &str) -> String {
    format!("{prefix}{}", uuid::Uuid::new_v4())
}

pub(crate) fn port_to_string(port: Option<u16>) -> String {
    port.map(|p| p.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn player_id_has_prefix_and_uuid() {
        let id = new_player_id(DEFAULT_PLAYER_ID_PREFIX);
        let suffix = id.strip_prefix(DEFAULT_PLAYER_ID_PREFIX).unwrap();
        assert!(uuid::Uuid::parse_str(suffix).is_ok());
    }

    #[test]
    fn player_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| new_player_id("p-")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn missing_port_is_empty_text() {
        assert_eq!(port_to_string(Some(7777)), "7777");
        assert_eq!(port_to_string(None), "");
    }

    #[test]
    fn connection_response_default_is_not_ready() {
        let response = GetGameConnectionResponse::default();
        assert!(!response.ready);
        assert!(response.player_session_id.is_none());
    }
}
