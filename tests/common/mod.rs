#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing,
    dead_code
)]
//! Shared test utilities for fleet session broker integration tests.
//!
//! Provides a scripted [`MockGameLiftClient`] and helpers for building the
//! vendor entities the mock returns.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use fleet_session_broker::protocol::{
    CreateFleetRequest, CreateFleetResponse, CreateGameSessionRequest, CreateGameSessionResponse,
    CreateLocationRequest, CreateLocationResponse, CreatePlayerSessionRequest,
    CreatePlayerSessionResponse, DescribeGameSessionsRequest, DescribeGameSessionsResponse,
    GameSession, GameSessionStatus, GetComputeAuthTokenRequest, GetComputeAuthTokenResponse,
    ListLocationsRequest, ListLocationsResponse, PlayerSession, PlayerSessionStatus,
    RegisterComputeRequest, RegisterComputeResponse, SearchGameSessionsRequest,
    SearchGameSessionsResponse,
};
use fleet_session_broker::{BrokerError, GameLiftClient};

pub const NON_EMPTY_IP: &str = "NonEmptyIp";
pub const NON_EMPTY_DNS: &str = "NonEmptyDns";

// ── Builders ────────────────────────────────────────────────────────

/// An active game session with the given connection details.
pub fn game_session(id: &str, ip: &str, dns: &str, port: u16) -> GameSession {
    GameSession {
        game_session_id: id.to_string(),
        name: None,
        fleet_id: Some("fleet-test".to_string()),
        location: None,
        status: GameSessionStatus::Active,
        current_player_session_count: 0,
        maximum_player_session_count: 4,
        ip_address: Some(ip.to_string()),
        dns_name: Some(dns.to_string()),
        port: Some(port),
    }
}

/// A reserved player session in `game_session_id`.
pub fn player_session(
    id: &str,
    game_session_id: &str,
    ip: &str,
    dns: &str,
    port: u16,
) -> PlayerSession {
    PlayerSession {
        player_session_id: id.to_string(),
        player_id: None,
        game_session_id: game_session_id.to_string(),
        fleet_id: None,
        status: PlayerSessionStatus::Reserved,
        ip_address: Some(ip.to_string()),
        dns_name: Some(dns.to_string()),
        port: Some(port),
    }
}

/// A describe result listing `sessions`.
pub fn sessions(sessions: Vec<GameSession>) -> Result<DescribeGameSessionsResponse, BrokerError> {
    Ok(DescribeGameSessionsResponse {
        game_sessions: sessions,
        next_token: None,
    })
}

// ── MockGameLiftClient ──────────────────────────────────────────────

/// A scripted [`GameLiftClient`] for integration testing.
///
/// Results of `describe_game_sessions`, `create_game_session` and
/// `create_player_session` are consumed in order. When a script runs out,
/// describe returns no sessions, create returns a fresh session and player
/// session creation returns a reserved player session.
///
/// Every request is recorded. The fleet setup operations are not scripted
/// and fail with a service error.
#[derive(Default)]
pub struct MockGameLiftClient {
    describe: StdMutex<VecDeque<Result<DescribeGameSessionsResponse, BrokerError>>>,
    create_game: StdMutex<VecDeque<Result<CreateGameSessionResponse, BrokerError>>>,
    create_player: StdMutex<VecDeque<Result<CreatePlayerSessionResponse, BrokerError>>>,

    pub describe_requests: StdMutex<Vec<DescribeGameSessionsRequest>>,
    pub create_game_requests: StdMutex<Vec<CreateGameSessionRequest>>,
    pub create_player_requests: StdMutex<Vec<CreatePlayerSessionRequest>>,
    unscripted_calls: AtomicUsize,
}

impl MockGameLiftClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_describe(self, result: Result<DescribeGameSessionsResponse, BrokerError>) -> Self {
        self.describe.lock().unwrap().push_back(result);
        self
    }

    pub fn on_create_game(self, result: Result<CreateGameSessionResponse, BrokerError>) -> Self {
        self.create_game.lock().unwrap().push_back(result);
        self
    }

    pub fn on_create_player(
        self,
        result: Result<CreatePlayerSessionResponse, BrokerError>,
    ) -> Self {
        self.create_player.lock().unwrap().push_back(result);
        self
    }

    pub fn describe_calls(&self) -> usize {
        self.describe_requests.lock().unwrap().len()
    }

    pub fn create_game_calls(&self) -> usize {
        self.create_game_requests.lock().unwrap().len()
    }

    pub fn create_player_calls(&self) -> usize {
        self.create_player_requests.lock().unwrap().len()
    }

    pub fn unscripted_calls(&self) -> usize {
        self.unscripted_calls.load(Ordering::Relaxed)
    }

    fn unscripted<T>(&self, operation: &str) -> Result<T, BrokerError> {
        self.unscripted_calls.fetch_add(1, Ordering::Relaxed);
        Err(BrokerError::service(
            "UnsupportedOperationException",
            format!("{operation} is not scripted"),
        ))
    }
}

#[async_trait]
impl GameLiftClient for MockGameLiftClient {
    async fn create_game_session(
        &self,
        request: CreateGameSessionRequest,
    ) -> Result<CreateGameSessionResponse, BrokerError> {
        let index = {
            let mut requests = self.create_game_requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        self.create_game.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(CreateGameSessionResponse::ok(game_session(
                &format!("gsess-mock-{index}"),
                NON_EMPTY_IP,
                NON_EMPTY_DNS,
                1,
            )))
        })
    }

    async fn describe_game_sessions(
        &self,
        request: DescribeGameSessionsRequest,
    ) -> Result<DescribeGameSessionsResponse, BrokerError> {
        self.describe_requests.lock().unwrap().push(request);
        self.describe
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| sessions(Vec::new()))
    }

    async fn search_game_sessions(
        &self,
        _request: SearchGameSessionsRequest,
    ) -> Result<SearchGameSessionsResponse, BrokerError> {
        self.unscripted("SearchGameSessions")
    }

    async fn create_player_session(
        &self,
        request: CreatePlayerSessionRequest,
    ) -> Result<CreatePlayerSessionResponse, BrokerError> {
        let game_session_id = request.game_session_id.clone();
        let index = {
            let mut requests = self.create_player_requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        self.create_player.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(CreatePlayerSessionResponse {
                player_session: Some(player_session(
                    &format!("psess-mock-{index}"),
                    &game_session_id,
                    NON_EMPTY_IP,
                    NON_EMPTY_DNS,
                    1,
                )),
            })
        })
    }

    async fn list_locations(
        &self,
        _request: ListLocationsRequest,
    ) -> Result<ListLocationsResponse, BrokerError> {
        self.unscripted("ListLocations")
    }

    async fn create_location(
        &self,
        _request: CreateLocationRequest,
    ) -> Result<CreateLocationResponse, BrokerError> {
        self.unscripted("CreateLocation")
    }

    async fn register_compute(
        &self,
        _request: RegisterComputeRequest,
    ) -> Result<RegisterComputeResponse, BrokerError> {
        self.unscripted("RegisterCompute")
    }

    async fn get_compute_auth_token(
        &self,
        _request: GetComputeAuthTokenRequest,
    ) -> Result<GetComputeAuthTokenResponse, BrokerError> {
        self.unscripted("GetComputeAuthToken")
    }

    async fn create_fleet(
        &self,
        _request: CreateFleetRequest,
    ) -> Result<CreateFleetResponse, BrokerError> {
        self.unscripted("CreateFleet")
    }
}
