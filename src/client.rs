//! Facade over the session-management API.
//!
//! The [`GameLiftClient`] trait has one method per service call the broker
//! and its setup flows need. Implementations are pure pass-through: they send
//! the request, return the service's response, and surface failures as
//! [`BrokerError`](crate::BrokerError) without interpreting them. Deciding what a failure means
//! is the adapters' job.
//!
//! Two implementations ship with the crate:
//!
//! | Type | Availability |
//! |------|--------------|
//! | [`InMemoryFleet`](crate::clients::InMemoryFleet) | always |
//! | [`HttpGameLiftClient`](crate::clients::HttpGameLiftClient) | `client-http` feature |
//!
//! # Implementing a Custom Client
//!
//! Wrap any SDK or test double by implementing the trait; every method is
//! required, so doubles that only care about a few calls can return
//! [`BrokerError::Service`](crate::BrokerError::Service) from the rest.

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{
    CreateFleetRequest, CreateFleetResponse, CreateGameSessionRequest, CreateGameSessionResponse,
    CreateLocationRequest, CreateLocationResponse, CreatePlayerSessionRequest,
    CreatePlayerSessionResponse, DescribeGameSessionsRequest, DescribeGameSessionsResponse,
    GetComputeAuthTokenRequest, GetComputeAuthTokenResponse, ListLocationsRequest,
    ListLocationsResponse, RegisterComputeRequest, RegisterComputeResponse,
    SearchGameSessionsRequest, SearchGameSessionsResponse,
};

/// Asynchronous access to the session-management API.
///
/// # Object Safety
///
/// The trait is object-safe; adapters hold it as `Arc<dyn GameLiftClient>`.
///
/// # Cancellation
///
/// Dropping a returned future abandons the call. A request already delivered
/// to the service is not rolled back.
#[async_trait]
pub trait GameLiftClient: Send + Sync {
    // ── Client calls ────────────────────────────────────────────────

    /// Create a game session on a fleet.
    async fn create_game_session(
        &self,
        request: CreateGameSessionRequest,
    ) -> Result<CreateGameSessionResponse>;

    /// List game sessions matching the request's filters, oldest first.
    async fn describe_game_sessions(
        &self,
        request: DescribeGameSessionsRequest,
    ) -> Result<DescribeGameSessionsResponse>;

    /// Search active game sessions with a filter/sort expression.
    async fn search_game_sessions(
        &self,
        request: SearchGameSessionsRequest,
    ) -> Result<SearchGameSessionsResponse>;

    /// Reserve a player slot in a game session.
    async fn create_player_session(
        &self,
        request: CreatePlayerSessionRequest,
    ) -> Result<CreatePlayerSessionResponse>;

    // ── Server setup calls ──────────────────────────────────────────

    /// List the locations fleets can use.
    async fn list_locations(&self, request: ListLocationsRequest) -> Result<ListLocationsResponse>;

    /// Create a custom location.
    async fn create_location(
        &self,
        request: CreateLocationRequest,
    ) -> Result<CreateLocationResponse>;

    /// Register a host as compute of an Anywhere fleet.
    async fn register_compute(
        &self,
        request: RegisterComputeRequest,
    ) -> Result<RegisterComputeResponse>;

    /// Fetch the token a server process on a registered compute authenticates with.
    async fn get_compute_auth_token(
        &self,
        request: GetComputeAuthTokenRequest,
    ) -> Result<GetComputeAuthTokenResponse>;

    /// Create a fleet.
    async fn create_fleet(&self, request: CreateFleetRequest) -> Result<CreateFleetResponse>;
}
