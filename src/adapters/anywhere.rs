//! Adapter for a service-managed (Anywhere) fleet.
//!
//! `start_game` finds or creates an active game session on the configured
//! fleet and location. `get_game_connection` reserves a player session in the
//! oldest active game session, as ordered by the service, and returns the
//! player session's connection details.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::unknown_error;
use crate::adapter::GameServerAdapter;
use crate::client::GameLiftClient;
use crate::error::{BrokerError, Result};
use crate::error_codes::ErrorCode;
use crate::models::{
    new_player_id, port_to_string, GetGameConnectionRequest, GetGameConnectionResponse,
    StartGameRequest, StartGameResponse, DEFAULT_PLAYER_ID_PREFIX, MAX_PLAYER_SESSIONS,
};
use crate::protocol::{
    CreateGameSessionRequest, CreatePlayerSessionRequest, DescribeGameSessionsRequest,
    GameSession, GameSessionStatus, HTTP_STATUS_OK,
};
use crate::response::Response;

/// [`GameServerAdapter`] for one fleet in one location.
///
/// Fleet id and location are fixed at construction. Target another fleet by
/// building another adapter.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use fleet_session_broker::adapters::AnywhereGameAdapter;
/// use fleet_session_broker::clients::InMemoryFleet;
///
/// let adapter = AnywhereGameAdapter::new(
///     Arc::new(InMemoryFleet::new()),
///     "fleet-1a2b",
///     "custom-home-lab",
/// )
/// .with_player_id_prefix("tester-");
/// assert_eq!(adapter.fleet_id(), "fleet-1a2b");
/// ```
pub struct AnywhereGameAdapter {
    client: Arc<dyn GameLiftClient>,
    fleet_id: String,
    location: String,
    player_id_prefix: String,
}

impl AnywhereGameAdapter {
    /// Create an adapter for `fleet_id` that places sessions in `location`.
    pub fn new(
        client: Arc<dyn GameLiftClient>,
        fleet_id: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            client,
            fleet_id: fleet_id.into(),
            location: location.into(),
            player_id_prefix: DEFAULT_PLAYER_ID_PREFIX.to_string(),
        }
    }

    /// Set the prefix of generated player ids.
    ///
    /// Defaults to `"playerId-"`.
    #[must_use]
    pub fn with_player_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.player_id_prefix = prefix.into();
        self
    }

    /// The fleet this adapter targets.
    pub fn fleet_id(&self) -> &str {
        &self.fleet_id
    }

    /// The custom location new game sessions are placed in.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The prefix of every generated player id.
    pub fn player_id_prefix(&self) -> &str {
        &self.player_id_prefix
    }

    async fn active_sessions(&self) -> Result<Vec<GameSession>> {
        let response = self
            .client
            .describe_game_sessions(DescribeGameSessionsRequest {
                fleet_id: Some(self.fleet_id.clone()),
                status_filter: Some(GameSessionStatus::Active),
                ..Default::default()
            })
            .await?;
        Ok(response.game_sessions)
    }

    async fn ensure_session(&self) -> Result<()> {
        let sessions = self.active_sessions().await?;
        if !sessions.is_empty() {
            debug!(
                fleet_id = %self.fleet_id,
                active = sessions.len(),
                "active game session found, skipping creation"
            );
            return Ok(());
        }

        info!(
            fleet_id = %self.fleet_id,
            location = %self.location,
            "no active game session, creating one"
        );
        let response = self
            .client
            .create_game_session(CreateGameSessionRequest {
                fleet_id: Some(self.fleet_id.clone()),
                location: Some(self.location.clone()),
                maximum_player_session_count: MAX_PLAYER_SESSIONS,
                ..Default::default()
            })
            .await?;

        if response.http_status != HTTP_STATUS_OK {
            warn!(
                status = response.http_status,
                fleet_id = %self.fleet_id,
                "create game session returned a non-OK status"
            );
        }
        Ok(())
    }

    async fn connect(&self) -> Result<Option<GetGameConnectionResponse>> {
        let Some(session) = self.active_sessions().await?.into_iter().next() else {
            return Ok(None);
        };

        let player_id = new_player_id(&self.player_id_prefix);
        debug!(
            game_session_id = %session.game_session_id,
            player_id = %player_id,
            "creating player session"
        );
        let player_session = self
            .client
            .create_player_session(CreatePlayerSessionRequest {
                game_session_id: session.game_session_id,
                player_id,
                player_data: None,
            })
            .await?
            .player_session
            .ok_or(BrokerError::MissingField("PlayerSession"))?;

        Ok(Some(GetGameConnectionResponse {
            ip_address: player_session.ip_address,
            dns_name: player_session.dns_name,
            port: port_to_string(player_session.port),
            player_session_id: Some(player_session.player_session_id),
            ready: true,
        }))
    }
}

#[async_trait]
impl GameServerAdapter for AnywhereGameAdapter {
    async fn start_game(&self, _request: StartGameRequest) -> Response<StartGameResponse> {
        match self.ensure_session().await {
            Ok(()) => Response::ok(StartGameResponse::default()),
            Err(e) => unknown_error("start_game", &e),
        }
    }

    async fn get_game_connection(
        &self,
        _request: GetGameConnectionRequest,
    ) -> Response<GetGameConnectionResponse> {
        match self.connect().await {
            Ok(Some(connection)) => Response::ok(connection),
            Ok(None) => {
                debug!(fleet_id = %self.fleet_id, "no active game session to connect to");
                Response::failure_code(ErrorCode::NoGameSessionWasFound)
            }
            Err(e) => unknown_error("get_game_connection", &e),
        }
    }
}

impl fmt::Debug for AnywhereGameAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnywhereGameAdapter")
            .field("fleet_id", &self.fleet_id)
            .field("location", &self.location)
            .field("player_id_prefix", &self.player_id_prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::clients::InMemoryFleet;
    use crate::protocol::{
        ComputeType, CreateFleetRequest, CreateLocationRequest, LocationConfiguration,
    };

    async fn fleet_with_anywhere(fleet: &InMemoryFleet) -> String {
        fleet
            .create_location(CreateLocationRequest {
                location_name: "custom-test".into(),
            })
            .await
            .unwrap();
        fleet
            .create_fleet(CreateFleetRequest {
                name: "anywhere-test".into(),
                compute_type: Some(ComputeType::Anywhere),
                locations: vec![LocationConfiguration {
                    location: "custom-test".into(),
                }],
                ..Default::default()
            })
            .await
            .unwrap()
            .fleet_attributes
            .unwrap()
            .fleet_id
    }

    #[tokio::test]
    async fn connects_through_player_session() {
        let fleet = Arc::new(InMemoryFleet::new());
        let fleet_id = fleet_with_anywhere(&fleet).await;
        let adapter = AnywhereGameAdapter::new(fleet.clone(), fleet_id, "custom-test");

        assert!(adapter.start_game(StartGameRequest::default()).await.is_success());
        let connection = adapter
            .get_game_connection(GetGameConnectionRequest::default())
            .await
            .into_result()
            .unwrap();

        assert!(connection.ready);
        assert!(connection
            .player_session_id
            .as_deref()
            .unwrap()
            .starts_with("psess-"));
        assert_eq!(connection.port, "7777");
        assert_eq!(fleet.player_session_count().await, 1);
    }

    #[tokio::test]
    async fn full_session_surfaces_unknown_error() {
        let fleet = Arc::new(InMemoryFleet::new());
        let adapter = AnywhereGameAdapter::new(fleet.clone(), "fleet-full", "custom-test");
        adapter.start_game(StartGameRequest::default()).await;

        for _ in 0..MAX_PLAYER_SESSIONS {
            assert!(adapter
                .get_game_connection(GetGameConnectionRequest::default())
                .await
                .is_success());
        }

        let response = adapter
            .get_game_connection(GetGameConnectionRequest::default())
            .await;
        assert_eq!(response.error_code(), Some(ErrorCode::UnknownError));
        assert!(response.error_message().unwrap().contains("full"));
    }

    #[test]
    fn accessors_return_configuration() {
        let adapter = AnywhereGameAdapter::new(Arc::new(InMemoryFleet::new()), "fleet-9", "loc")
            .with_player_id_prefix("tester-");
        assert_eq!(adapter.fleet_id(), "fleet-9");
        assert_eq!(adapter.location(), "loc");
        assert_eq!(adapter.player_id_prefix(), "tester-");
    }

    #[test]
    fn debug_lists_configuration() {
        let adapter = AnywhereGameAdapter::new(Arc::new(InMemoryFleet::new()), "fleet-9", "loc");
        let debug = format!("{adapter:?}");
        assert!(debug.contains("fleet-9"));
        assert!(debug.contains("loc"));
        assert!(debug.contains(DEFAULT_PLAYER_ID_PREFIX));
    }
}
