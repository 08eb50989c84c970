//! An in-process, simulated fleet.
//!
//! [`InMemoryFleet`] implements [`GameLiftClient`] against state held in
//! memory. It behaves like a local fleet emulator: game sessions may be
//! created on any fleet id and become `ACTIVE` immediately, and each new
//! session listens on the next port of the configured host. Creation fails
//! with `LimitExceededException` once the ports run out.
//!
//! Fleet setup calls (`create_fleet`, `register_compute`, ...) are checked
//! against the fleets and locations created through the same instance.
//!
//! # Example
//!
//! ```
//! # async fn example() -> fleet_session_broker::Result<()> {
//! use fleet_session_broker::clients::InMemoryFleet;
//! use fleet_session_broker::protocol::CreateGameSessionRequest;
//! use fleet_session_broker::GameLiftClient;
//!
//! let fleet = InMemoryFleet::new().with_base_port(9000);
//! let created = fleet
//!     .create_game_session(CreateGameSessionRequest {
//!         fleet_id: Some("fleet-123".into()),
//!         maximum_player_session_count: 4,
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(created.game_session.and_then(|s| s.port), Some(9000));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::client::GameLiftClient;
use crate::error::{BrokerError, Result};
use crate::protocol::{
    Compute, ComputeStatus, ComputeType, CreateFleetRequest, CreateFleetResponse,
    CreateGameSessionRequest, CreateGameSessionResponse, CreateLocationRequest,
    CreateLocationResponse, CreatePlayerSessionRequest, CreatePlayerSessionResponse,
    DescribeGameSessionsRequest, DescribeGameSessionsResponse, FleetAttributes, FleetStatus,
    GameSession, GameSessionStatus, GetComputeAuthTokenRequest, GetComputeAuthTokenResponse,
    ListLocationsRequest, ListLocationsResponse, LocationFilter, LocationModel, PlayerSession,
    PlayerSessionStatus, RegisterComputeRequest, RegisterComputeResponse,
    SearchGameSessionsRequest, SearchGameSessionsResponse,
};

/// Prefix every custom location name must start with.
pub const CUSTOM_LOCATION_PREFIX: &str = "custom-";

/// Filter expression accepted by `search_game_sessions`.
pub const HAS_AVAILABLE_PLAYER_SESSIONS: &str = "hasAvailablePlayerSessions=true";

const DEFAULT_IP_ADDRESS: &str = "127.0.0.1";
const DEFAULT_DNS_NAME: &str = "localhost";
const DEFAULT_BASE_PORT: u16 = 7777;
const DEFAULT_LOCATION: &str = "local";
const AWS_LOCATIONS: &[&str] = &["us-east-1", "us-west-2", "eu-west-1", "ap-northeast-1"];
const AUTH_TOKEN_TTL_SECS: f64 = 15.0 * 60.0;

// Vendor error codes.
const INVALID_REQUEST: &str = "InvalidRequestException";
const NOT_FOUND: &str = "NotFoundException";
const CONFLICT: &str = "ConflictException";
const GAME_SESSION_FULL: &str = "GameSessionFullException";
const INVALID_GAME_SESSION_STATUS: &str = "InvalidGameSessionStatusException";
const LIMIT_EXCEEDED: &str = "LimitExceededException";

#[derive(Debug)]
struct FleetState {
    fleets: Vec<FleetAttributes>,
    locations: Vec<LocationModel>,
    computes: Vec<Compute>,
    /// Creation order; describe and search report sessions in this order.
    game_sessions: Vec<GameSession>,
    player_sessions: Vec<PlayerSession>,
    /// `None` once every port up to `u16::MAX` is taken.
    next_port: Option<u16>,
    fail_next: Option<(String, String)>,
}

impl FleetState {
    fn take_failure(&mut self) -> Result<()> {
        match self.fail_next.take() {
            Some((code, message)) => Err(BrokerError::Service { code, message }),
            None => Ok(()),
        }
    }

    fn has_fleet(&self, fleet_id: &str) -> bool {
        self.fleets.iter().any(|f| f.fleet_id == fleet_id)
    }
}

/// A simulated fleet implementing [`GameLiftClient`] in memory.
#[derive(Debug)]
pub struct InMemoryFleet {
    state: Mutex<FleetState>,
    ip_address: String,
    dns_name: String,
}

impl Default for InMemoryFleet {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFleet {
    /// An empty fleet serving sessions on `127.0.0.1` / `localhost`, from port 7777.
    pub fn new() -> Self {
        let locations = AWS_LOCATIONS
            .iter()
            .map(|name| LocationModel {
                location_name: (*name).to_string(),
                location_arn: None,
            })
            .collect();
        Self {
            state: Mutex::new(FleetState {
                fleets: Vec::new(),
                locations,
                computes: Vec::new(),
                game_sessions: Vec::new(),
                player_sessions: Vec::new(),
                next_port: Some(DEFAULT_BASE_PORT),
                fail_next: None,
            }),
            ip_address: DEFAULT_IP_ADDRESS.to_string(),
            dns_name: DEFAULT_DNS_NAME.to_string(),
        }
    }

    /// Set the address reported for new game sessions.
    #[must_use]
    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = ip_address.into();
        self
    }

    /// Set the DNS name reported for new game sessions.
    #[must_use]
    pub fn with_dns_name(mut self, dns_name: impl Into<String>) -> Self {
        self.dns_name = dns_name.into();
        self
    }

    /// Set the port of the first game session. Later sessions count up from it.
    #[must_use]
    pub fn with_base_port(mut self, port: u16) -> Self {
        self.state.get_mut().next_port = Some(port);
        self
    }

    /// Make the next call fail with a service error.
    pub async fn fail_next(&self, code: impl Into<String>, message: impl Into<String>) {
        self.state.lock().await.fail_next = Some((code.into(), message.into()));
    }

    /// Mark a game session `TERMINATED`.
    ///
    /// # Errors
    ///
    /// Returns a `NotFoundException` service error for an unknown session.
    pub async fn terminate_game_session(&self, game_session_id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let session = state
            .game_sessions
            .iter_mut()
            .find(|s| s.game_session_id == game_session_id)
            .ok_or_else(|| {
                BrokerError::service(
                    NOT_FOUND,
                    format!("Game session {game_session_id} not found."),
                )
            })?;
        session.status = GameSessionStatus::Terminated;
        info!(game_session_id, "game session terminated");
        Ok(())
    }

    /// Number of game sessions ever created, in any status.
    pub async fn game_session_count(&self) -> usize {
        self.state.lock().await.game_sessions.len()
    }

    /// Number of player sessions ever created.
    pub async fn player_session_count(&self) -> usize {
        self.state.lock().await.player_sessions.len()
    }
}

#[async_trait]
impl GameLiftClient for InMemoryFleet {
    async fn create_game_session(
        &self,
        request: CreateGameSessionRequest,
    ) -> Result<CreateGameSessionResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let fleet_id = request
            .fleet_id
            .ok_or_else(|| BrokerError::service(INVALID_REQUEST, "FleetId is required."))?;
        let location = request
            .location
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        let port = state.next_port.ok_or_else(|| {
            BrokerError::service(LIMIT_EXCEEDED, "No free port left for a new game session.")
        })?;
        state.next_port = port.checked_add(1);

        let session = GameSession {
            game_session_id: format!(
                "arn:gamelift:{location}::gamesession/{fleet_id}/gsess-{}",
                uuid::Uuid::new_v4()
            ),
            name: request.name,
            fleet_id: Some(fleet_id),
            location: Some(location),
            status: GameSessionStatus::Active,
            current_player_session_count: 0,
            maximum_player_session_count: request.maximum_player_session_count,
            ip_address: Some(self.ip_address.clone()),
            dns_name: Some(self.dns_name.clone()),
            port: Some(port),
        };
        debug!(game_session_id = %session.game_session_id, port, "game session created");
        state.game_sessions.push(session.clone());
        Ok(CreateGameSessionResponse::ok(session))
    }

    async fn describe_game_sessions(
        &self,
        request: DescribeGameSessionsRequest,
    ) -> Result<DescribeGameSessionsResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let matching: Vec<GameSession> = state
            .game_sessions
            .iter()
            .filter(|s| {
                request
                    .fleet_id
                    .as_ref()
                    .is_none_or(|id| s.fleet_id.as_ref() == Some(id))
            })
            .filter(|s| {
                request
                    .game_session_id
                    .as_ref()
                    .is_none_or(|id| &s.game_session_id == id)
            })
            .filter(|s| {
                request
                    .location
                    .as_ref()
                    .is_none_or(|loc| s.location.as_ref() == Some(loc))
            })
            .filter(|s| request.status_filter.is_none_or(|status| s.status == status))
            .cloned()
            .collect();

        let (game_sessions, next_token) =
            paginate(matching, request.limit, request.next_token.as_deref())?;
        Ok(DescribeGameSessionsResponse {
            game_sessions,
            next_token,
        })
    }

    async fn search_game_sessions(
        &self,
        request: SearchGameSessionsRequest,
    ) -> Result<SearchGameSessionsResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let only_available = match request.filter_expression.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(HAS_AVAILABLE_PLAYER_SESSIONS) => true,
            Some(other) => {
                return Err(BrokerError::service(
                    INVALID_REQUEST,
                    format!("Unsupported filter expression: {other}"),
                ))
            }
        };
        if request.sort_expression.is_some() {
            return Err(BrokerError::service(
                INVALID_REQUEST,
                "Sort expressions are not supported.",
            ));
        }

        let matching: Vec<GameSession> = state
            .game_sessions
            .iter()
            .filter(|s| s.status == GameSessionStatus::Active)
            .filter(|s| {
                request
                    .fleet_id
                    .as_ref()
                    .is_none_or(|id| s.fleet_id.as_ref() == Some(id))
            })
            .filter(|s| {
                request
                    .location
                    .as_ref()
                    .is_none_or(|loc| s.location.as_ref() == Some(loc))
            })
            .filter(|s| !only_available || s.has_available_player_sessions())
            .cloned()
            .collect();

        let (game_sessions, next_token) =
            paginate(matching, request.limit, request.next_token.as_deref())?;
        Ok(SearchGameSessionsResponse {
            game_sessions,
            next_token,
        })
    }

    async fn create_player_session(
        &self,
        request: CreatePlayerSessionRequest,
    ) -> Result<CreatePlayerSessionResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let session = state
            .game_sessions
            .iter_mut()
            .find(|s| s.game_session_id == request.game_session_id)
            .ok_or_else(|| {
                BrokerError::service(
                    NOT_FOUND,
                    format!("Game session {} not found.", request.game_session_id),
                )
            })?;
        if session.status != GameSessionStatus::Active {
            return Err(BrokerError::service(
                INVALID_GAME_SESSION_STATUS,
                format!("Game session {} is not active.", session.game_session_id),
            ));
        }
        if session.current_player_session_count >= session.maximum_player_session_count {
            return Err(BrokerError::service(
                GAME_SESSION_FULL,
                format!("Game session {} is full.", session.game_session_id),
            ));
        }
        session.current_player_session_count += 1;

        let player_session = PlayerSession {
            player_session_id: format!("psess-{}", uuid::Uuid::new_v4()),
            player_id: Some(request.player_id),
            game_session_id: session.game_session_id.clone(),
            fleet_id: session.fleet_id.clone(),
            status: PlayerSessionStatus::Reserved,
            ip_address: session.ip_address.clone(),
            dns_name: session.dns_name.clone(),
            port: session.port,
        };
        debug!(
            player_session_id = %player_session.player_session_id,
            game_session_id = %player_session.game_session_id,
            "player session reserved"
        );
        state.player_sessions.push(player_session.clone());
        Ok(CreatePlayerSessionResponse {
            player_session: Some(player_session),
        })
    }

    async fn list_locations(&self, request: ListLocationsRequest) -> Result<ListLocationsResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let filters = request.filters.unwrap_or_default();
        let matching: Vec<LocationModel> = state
            .locations
            .iter()
            .filter(|loc| {
                let kind = if loc.location_name.starts_with(CUSTOM_LOCATION_PREFIX) {
                    LocationFilter::Custom
                } else {
                    LocationFilter::Aws
                };
                filters.is_empty() || filters.contains(&kind)
            })
            .cloned()
            .collect();

        let (locations, next_token) =
            paginate(matching, request.limit, request.next_token.as_deref())?;
        Ok(ListLocationsResponse {
            locations,
            next_token,
        })
    }

    async fn create_location(
        &self,
        request: CreateLocationRequest,
    ) -> Result<CreateLocationResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let name = request.location_name;
        if !name.starts_with(CUSTOM_LOCATION_PREFIX) || name.len() == CUSTOM_LOCATION_PREFIX.len()
        {
            return Err(BrokerError::service(
                INVALID_REQUEST,
                format!("Location name must start with '{CUSTOM_LOCATION_PREFIX}': {name}"),
            ));
        }
        if state.locations.iter().any(|l| l.location_name == name) {
            return Err(BrokerError::service(
                CONFLICT,
                format!("Location {name} already exists."),
            ));
        }

        let location = LocationModel {
            location_arn: Some(format!("arn:gamelift:local::location/{name}")),
            location_name: name,
        };
        info!(location = %location.location_name, "custom location created");
        state.locations.push(location.clone());
        Ok(CreateLocationResponse {
            location: Some(location),
        })
    }

    async fn register_compute(
        &self,
        request: RegisterComputeRequest,
    ) -> Result<RegisterComputeResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        if !state.has_fleet(&request.fleet_id) {
            return Err(BrokerError::service(
                NOT_FOUND,
                format!("Fleet {} not found.", request.fleet_id),
            ));
        }
        if let Some(location) = &request.location {
            if !state.locations.iter().any(|l| &l.location_name == location) {
                return Err(BrokerError::service(
                    NOT_FOUND,
                    format!("Location {location} not found."),
                ));
            }
        }

        let compute = Compute {
            fleet_id: request.fleet_id,
            compute_name: request.compute_name,
            ip_address: request.ip_address,
            location: request.location,
            compute_status: Some(ComputeStatus::Active),
            game_lift_service_sdk_endpoint: Some(format!(
                "ws://{DEFAULT_DNS_NAME}:{DEFAULT_BASE_PORT}"
            )),
        };
        // Registering an existing compute name replaces it.
        state.computes.retain(|c| {
            !(c.fleet_id == compute.fleet_id && c.compute_name == compute.compute_name)
        });
        info!(
            fleet_id = %compute.fleet_id,
            compute = %compute.compute_name,
            "compute registered"
        );
        state.computes.push(compute.clone());
        Ok(RegisterComputeResponse {
            compute: Some(compute),
        })
    }

    async fn get_compute_auth_token(
        &self,
        request: GetComputeAuthTokenRequest,
    ) -> Result<GetComputeAuthTokenResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let registered = state
            .computes
            .iter()
            .any(|c| c.fleet_id == request.fleet_id && c.compute_name == request.compute_name);
        if !registered {
            return Err(BrokerError::service(
                NOT_FOUND,
                format!(
                    "Compute {} is not registered to fleet {}.",
                    request.compute_name, request.fleet_id
                ),
            ));
        }

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Ok(GetComputeAuthTokenResponse {
            fleet_id: Some(request.fleet_id),
            compute_name: Some(request.compute_name),
            auth_token: Some(uuid::Uuid::new_v4().to_string()),
            expiration_timestamp: Some(now + AUTH_TOKEN_TTL_SECS),
        })
    }

    async fn create_fleet(&self, request: CreateFleetRequest) -> Result<CreateFleetResponse> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        if request.name.trim().is_empty() {
            return Err(BrokerError::service(INVALID_REQUEST, "Fleet name is required."));
        }
        for loc in &request.locations {
            if !state.locations.iter().any(|l| l.location_name == loc.location) {
                return Err(BrokerError::service(
                    NOT_FOUND,
                    format!("Location {} not found.", loc.location),
                ));
            }
        }

        let fleet_id = format!("fleet-{}", uuid::Uuid::new_v4());
        let attributes = FleetAttributes {
            fleet_arn: Some(format!("arn:gamelift:local::fleet/{fleet_id}")),
            fleet_id,
            name: Some(request.name),
            description: request.description,
            status: Some(FleetStatus::Active),
            compute_type: Some(request.compute_type.unwrap_or(ComputeType::Anywhere)),
        };
        info!(fleet_id = %attributes.fleet_id, "fleet created");
        state.fleets.push(attributes.clone());
        Ok(CreateFleetResponse {
            fleet_attributes: Some(attributes),
        })
    }
}

/// Slice `items` into one page. Tokens are the offset of the next page.
fn paginate<T>(
    items: Vec<T>,
    limit: Option<u32>,
    next_token: Option<&str>,
) -> Result<(Vec<T>, Option<String>)> {
    let offset = match next_token {
        None => 0,
        Some(token) => token.parse::<usize>().map_err(|_| {
            BrokerError::service(INVALID_REQUEST, format!("Invalid NextToken: {token}"))
        })?,
    };
    let limit = match limit {
        Some(0) => {
            return Err(BrokerError::service(
                INVALID_REQUEST,
                "Limit must be at least 1.",
            ))
        }
        Some(limit) => usize::try_from(limit).unwrap_or(usize::MAX),
        None => usize::MAX,
    };

    let total = items.len();
    let page: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
    let consumed = offset.saturating_add(page.len());
    let next = (consumed < total).then(|| consumed.to_string());
    Ok((page, next))
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
    use crate::protocol::LocationConfiguration;

    fn create_request(fleet_id: &str, max: u32) -> CreateGameSessionRequest {
        CreateGameSessionRequest {
            fleet_id: Some(fleet_id.into()),
            maximum_player_session_count: max,
            ..Default::default()
        }
    }

    async fn session_id(fleet: &InMemoryFleet, fleet_id: &str, max: u32) -> String {
        fleet
            .create_game_session(create_request(fleet_id, max))
            .await
            .unwrap()
            .game_session
            .unwrap()
            .game_session_id
    }

    #[tokio::test]
    async fn create_requires_fleet_id() {
        let fleet = InMemoryFleet::new();
        let err = fleet
            .create_game_session(CreateGameSessionRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.service_code(), Some(INVALID_REQUEST));
    }

    #[tokio::test]
    async fn sessions_get_consecutive_ports_and_configured_host() {
        let fleet = InMemoryFleet::new()
            .with_ip_address("10.0.0.5")
            .with_dns_name("box.lan")
            .with_base_port(5000);
        let first = fleet
            .create_game_session(create_request("fleet-a", 2))
            .await
            .unwrap()
            .game_session
            .unwrap();
        let second = fleet
            .create_game_session(create_request("fleet-a", 2))
            .await
            .unwrap()
            .game_session
            .unwrap();

        assert_eq!(first.port, Some(5000));
        assert_eq!(second.port, Some(5001));
        assert_eq!(first.ip_address.as_deref(), Some("10.0.0.5"));
        assert_eq!(first.dns_name.as_deref(), Some("box.lan"));
        assert_eq!(first.status, GameSessionStatus::Active);
        assert!(first.game_session_id.contains("/fleet-a/gsess-"));
    }

    #[tokio::test]
    async fn last_port_is_handed_out_once() {
        let fleet = InMemoryFleet::new().with_base_port(u16::MAX);
        let last = fleet
            .create_game_session(create_request("fleet-a", 2))
            .await
            .unwrap()
            .game_session
            .unwrap();
        assert_eq!(last.port, Some(u16::MAX));

        let err = fleet
            .create_game_session(create_request("fleet-a", 2))
            .await
            .unwrap_err();
        assert_eq!(err.service_code(), Some(LIMIT_EXCEEDED));
        assert_eq!(fleet.game_session_count().await, 1);
    }

    #[tokio::test]
    async fn describe_filters_and_keeps_creation_order() {
        let fleet = InMemoryFleet::new();
        let a1 = session_id(&fleet, "fleet-a", 4).await;
        let _b1 = session_id(&fleet, "fleet-b", 4).await;
        let a2 = session_id(&fleet, "fleet-a", 4).await;
        fleet.terminate_game_session(&a2).await.unwrap();

        let active = fleet
            .describe_game_sessions(DescribeGameSessionsRequest {
                fleet_id: Some("fleet-a".into()),
                status_filter: Some(GameSessionStatus::Active),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.game_sessions.len(), 1);
        assert_eq!(active.game_sessions[0].game_session_id, a1);

        let all_a = fleet
            .describe_game_sessions(DescribeGameSessionsRequest {
                fleet_id: Some("fleet-a".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<_> = all_a
            .game_sessions
            .iter()
            .map(|s| s.game_session_id.clone())
            .collect();
        assert_eq!(ids, vec![a1, a2]);
    }

    #[tokio::test]
    async fn describe_paginates() {
        let fleet = InMemoryFleet::new();
        for _ in 0..3 {
            session_id(&fleet, "fleet-a", 4).await;
        }

        let first = fleet
            .describe_game_sessions(DescribeGameSessionsRequest {
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(first.game_sessions.len(), 2);
        assert_eq!(first.next_token.as_deref(), Some("2"));

        let second = fleet
            .describe_game_sessions(DescribeGameSessionsRequest {
                limit: Some(2),
                next_token: first.next_token,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.game_sessions.len(), 1);
        assert!(second.next_token.is_none());

        let err = fleet
            .describe_game_sessions(DescribeGameSessionsRequest {
                next_token: Some("abc".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.service_code(), Some(INVALID_REQUEST));
    }

    #[tokio::test]
    async fn player_sessions_respect_capacity_and_status() {
        let fleet = InMemoryFleet::new();
        let id = session_id(&fleet, "fleet-a", 1).await;

        let player = fleet
            .create_player_session(CreatePlayerSessionRequest {
                game_session_id: id.clone(),
                player_id: "p1".into(),
                player_data: None,
            })
            .await
            .unwrap()
            .player_session
            .unwrap();
        assert_eq!(player.status, PlayerSessionStatus::Reserved);
        assert_eq!(player.port, Some(DEFAULT_BASE_PORT));
        assert_eq!(player.player_id.as_deref(), Some("p1"));

        let full = fleet
            .create_player_session(CreatePlayerSessionRequest {
                game_session_id: id.clone(),
                player_id: "p2".into(),
                player_data: None,
            })
            .await
            .unwrap_err();
        assert_eq!(full.service_code(), Some(GAME_SESSION_FULL));

        let other = session_id(&fleet, "fleet-a", 4).await;
        fleet.terminate_game_session(&other).await.unwrap();
        let inactive = fleet
            .create_player_session(CreatePlayerSessionRequest {
                game_session_id: other,
                player_id: "p3".into(),
                player_data: None,
            })
            .await
            .unwrap_err();
        assert_eq!(inactive.service_code(), Some(INVALID_GAME_SESSION_STATUS));

        let missing = fleet
            .create_player_session(CreatePlayerSessionRequest {
                game_session_id: "nope".into(),
                player_id: "p4".into(),
                player_data: None,
            })
            .await
            .unwrap_err();
        assert_eq!(missing.service_code(), Some(NOT_FOUND));
    }

    #[tokio::test]
    async fn search_honours_availability_filter() {
        let fleet = InMemoryFleet::new();
        let full = session_id(&fleet, "fleet-a", 1).await;
        let open = session_id(&fleet, "fleet-a", 2).await;
        fleet
            .create_player_session(CreatePlayerSessionRequest {
                game_session_id: full,
                player_id: "p".into(),
                player_data: None,
            })
            .await
            .unwrap();

        let found = fleet
            .search_game_sessions(SearchGameSessionsRequest {
                fleet_id: Some("fleet-a".into()),
                filter_expression: Some(HAS_AVAILABLE_PLAYER_SESSIONS.into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.game_sessions.len(), 1);
        assert_eq!(found.game_sessions[0].game_session_id, open);

        let err = fleet
            .search_game_sessions(SearchGameSessionsRequest {
                filter_expression: Some("gameSessionName = 'x'".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.service_code(), Some(INVALID_REQUEST));
    }

    #[tokio::test]
    async fn fail_next_applies_once() {
        let fleet = InMemoryFleet::new();
        fleet.fail_next("ThrottlingException", "Rate exceeded").await;

        let err = fleet
            .describe_game_sessions(DescribeGameSessionsRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Rate exceeded");
        assert!(fleet
            .describe_game_sessions(DescribeGameSessionsRequest::default())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn anywhere_setup_flow() {
        let fleet = InMemoryFleet::new();

        let bad = fleet
            .create_location(CreateLocationRequest {
                location_name: "home".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(bad.service_code(), Some(INVALID_REQUEST));

        fleet
            .create_location(CreateLocationRequest {
                location_name: "custom-home".into(),
            })
            .await
            .unwrap();
        let dup = fleet
            .create_location(CreateLocationRequest {
                location_name: "custom-home".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(dup.service_code(), Some(CONFLICT));

        let custom = fleet
            .list_locations(ListLocationsRequest {
                filters: Some(vec![LocationFilter::Custom]),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(custom.locations.len(), 1);
        assert_eq!(custom.locations[0].location_name, "custom-home");

        let all = fleet
            .list_locations(ListLocationsRequest::default())
            .await
            .unwrap();
        assert_eq!(all.locations.len(), AWS_LOCATIONS.len() + 1);

        let attributes = fleet
            .create_fleet(CreateFleetRequest {
                name: "my-anywhere".into(),
                locations: vec![LocationConfiguration {
                    location: "custom-home".into(),
                }],
                ..Default::default()
            })
            .await
            .unwrap()
            .fleet_attributes
            .unwrap();
        assert_eq!(attributes.compute_type, Some(ComputeType::Anywhere));
        assert_eq!(attributes.status, Some(FleetStatus::Active));

        let no_token = fleet
            .get_compute_auth_token(GetComputeAuthTokenRequest {
                fleet_id: attributes.fleet_id.clone(),
                compute_name: "laptop".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(no_token.service_code(), Some(NOT_FOUND));

        let compute = fleet
            .register_compute(RegisterComputeRequest {
                fleet_id: attributes.fleet_id.clone(),
                compute_name: "laptop".into(),
                ip_address: Some("192.168.1.20".into()),
                location: Some("custom-home".into()),
            })
            .await
            .unwrap()
            .compute
            .unwrap();
        assert_eq!(compute.compute_status, Some(ComputeStatus::Active));

        let token = fleet
            .get_compute_auth_token(GetComputeAuthTokenRequest {
                fleet_id: attributes.fleet_id,
                compute_name: "laptop".into(),
            })
            .await
            .unwrap();
        assert!(token.auth_token.is_some());
        assert!(token.expiration_timestamp.unwrap() > 0.0);
    }

    #[tokio::test]
    async fn register_compute_requires_known_fleet() {
        let fleet = InMemoryFleet::new();
        let err = fleet
            .register_compute(RegisterComputeRequest {
                fleet_id: "fleet-missing".into(),
                compute_name: "laptop".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.service_code(), Some(NOT_FOUND));
    }
}
