//! Adapter for a locally run fleet.
//!
//! Local fleets (a fleet emulator, or an [`InMemoryFleet`](crate::clients::InMemoryFleet))
//! expose game sessions with their own address and port, so a connection is
//! read from the oldest active session without reserving a player session.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::unknown_error;
use crate::adapter::GameServerAdapter;
use crate::client::GameLiftClient;
use crate::error::Result;
use crate::error_codes::ErrorCode;
use crate::models::{
    port_to_string, GetGameConnectionRequest, GetGameConnectionResponse, StartGameRequest,
    StartGameResponse, MAX_PLAYER_SESSIONS,
};
use crate::protocol::{
    CreateGameSessionRequest, DescribeGameSessionsRequest, GameSession, GameSessionStatus,
};
use crate::response::Response;

/// Fleet id local fleet emulators accept.
pub const LOCAL_FLEET_ID: &str = "fleet-123";

/// [`GameServerAdapter`] for locally hosted test servers.
pub struct LocalGameAdapter {
    client: Arc<dyn GameLiftClient>,
    fleet_id: String,
}

impl LocalGameAdapter {
    /// Create an adapter targeting [`LOCAL_FLEET_ID`].
    pub fn new(client: Arc<dyn GameLiftClient>) -> Self {
        Self::with_fleet_id(client, LOCAL_FLEET_ID)
    }

    /// Create an adapter targeting another local fleet id.
    pub fn with_fleet_id(client: Arc<dyn GameLiftClient>, fleet_id: impl Into<String>) -> Self {
        Self {
            client,
            fleet_id: fleet_id.into(),
        }
    }

    /// The fleet this adapter targets.
    pub fn fleet_id(&self) -> &str {
        &self.fleet_id
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
        if !self.active_sessions().await?.is_empty() {
            debug!(fleet_id = %self.fleet_id, "local game session already running");
            return Ok(());
        }

        info!(fleet_id = %self.fleet_id, "no local game session, creating one");
        self.client
            .create_game_session(CreateGameSessionRequest {
                fleet_id: Some(self.fleet_id.clone()),
                maximum_player_session_count: MAX_PLAYER_SESSIONS,
                ..Default::default()
            })
            .await?;
        Ok(())
    }

    async fn find_connection(&self) -> Result<Option<GetGameConnectionResponse>> {
        let sessions = self.active_sessions().await?;
        Ok(sessions.into_iter().next().map(|session| {
            debug!(game_session_id = %session.game_session_id, "using local game session");
            GetGameConnectionResponse {
                ip_address: session.ip_address,
                dns_name: session.dns_name,
                port: port_to_string(session.port),
                player_session_id: None,
                ready: true,
            }
        }))
    }
}

#[async_trait]
impl GameServerAdapter for LocalGameAdapter {
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
        match self.find_connection().await {
            Ok(Some(connection)) => Response::ok(connection),
            Ok(None) => Response::failure_code(ErrorCode::NoGameSessionWasFound),
            Err(e) => unknown_error("get_game_connection", &e),
        }
    }
}

impl fmt::Debug for LocalGameAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalGameAdapter")
            .field("fleet_id", &self.fleet_id)
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

    #[tokio::test]
    async fn start_game_then_connect_against_simulated_fleet() {
        let fleet = Arc::new(InMemoryFleet::new());
        let adapter = LocalGameAdapter::new(fleet.clone());

        let missing = adapter
            .get_game_connection(GetGameConnectionRequest::default())
            .await;
        assert_eq!(missing.error_code(), Some(ErrorCode::NoGameSessionWasFound));

        assert!(adapter.start_game(StartGameRequest::default()).await.is_success());
        assert!(adapter.start_game(StartGameRequest::default()).await.is_success());
        assert_eq!(fleet.game_session_count().await, 1);

        let connection = adapter
            .get_game_connection(GetGameConnectionRequest::default())
            .await
            .into_result()
            .unwrap();
        assert_eq!(connection.ip_address.as_deref(), Some("127.0.0.1"));
        assert_eq!(connection.port, "7777");
        assert!(connection.ready);
        assert!(connection.player_session_id.is_none());
    }

    #[tokio::test]
    async fn custom_fleet_id_is_used() {
        let fleet = Arc::new(InMemoryFleet::new());
        let adapter = LocalGameAdapter::with_fleet_id(fleet.clone(), "fleet-local-7");
        assert_eq!(adapter.fleet_id(), "fleet-local-7");

        adapter.start_game(StartGameRequest::default()).await;
        let sessions = fleet
            .describe_game_sessions(DescribeGameSessionsRequest {
                fleet_id: Some("fleet-local-7".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(sessions.game_sessions.len(), 1);
    }

    #[test]
    fn debug_shows_fleet_id() {
        let adapter = LocalGameAdapter::new(Arc::new(InMemoryFleet::new()));
        let debug = format!("{adapter:?}");
        assert!(debug.contains("LocalGameAdapter"));
        assert!(debug.contains(LOCAL_FLEET_ID));
    }
}
