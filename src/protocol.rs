//! Wire-compatible request and response types of the session-management API.
//!
//! Every type in this module serializes to the JSON 1.1 shape the service
//! expects: `PascalCase` member names and `SCREAMING_SNAKE_CASE` enum values.
//! Optional members are omitted when unset. Enum values added by the
//! service later decode as `Unknown` instead of failing the whole reply.

use serde::{Deserialize, Serialize};

/// HTTP status code of a successful call.
pub const HTTP_STATUS_OK: u16 = 200;

fn http_status_ok() -> u16 {
    HTTP_STATUS_OK
}

// ── Enums ───────────────────────────────────────────────────────────

/// Lifecycle status of a game session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameSessionStatus {
    /// Accepting player sessions.
    Active,
    /// The server process is still starting the session.
    Activating,
    /// Shutting down.
    Terminating,
    /// Ended.
    Terminated,
    /// Failed to activate.
    Error,
    /// A value this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// Lifecycle status of a player session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerSessionStatus {
    /// Slot reserved, player has not connected yet.
    Reserved,
    /// Player connected to the server process.
    Active,
    /// Player disconnected.
    Completed,
    /// Reservation expired before the player connected.
    #[serde(rename = "TIMEDOUT")]
    TimedOut,
    /// A value this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// Hosting model of a fleet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComputeType {
    /// Managed cloud instances.
    Ec2,
    /// Customer-owned compute registered with the service.
    #[default]
    Anywhere,
    /// A value this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// Lifecycle status of a fleet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FleetStatus {
    New,
    Downloading,
    Validating,
    Building,
    Activating,
    Active,
    Deleting,
    Error,
    Terminated,
    /// A value this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// Registration status of a compute resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComputeStatus {
    Pending,
    Active,
    Terminating,
    /// A value this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// Which kind of locations a location listing returns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationFilter {
    /// Service-operated regions.
    Aws,
    /// Custom locations created for Anywhere fleets.
    Custom,
}

// ── Entities ────────────────────────────────────────────────────────

/// A running server process instance known to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameSession {
    pub game_session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: GameSessionStatus,
    #[serde(default)]
    pub current_player_session_count: u32,
    #[serde(default)]
    pub maximum_player_session_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl GameSession {
    /// Returns `true` if the session can accept another player session.
    pub fn has_available_player_sessions(&self) -> bool {
        self.status == GameSessionStatus::Active
            && self.current_player_session_count < self.maximum_player_session_count
    }
}

/// A reservation binding one player to a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerSession {
    pub player_session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    pub game_session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_id: Option<String>,
    pub status: PlayerSessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// A location a fleet can host game sessions in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationModel {
    pub location_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_arn: Option<String>,
}

/// A compute resource registered to an Anywhere fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Compute {
    pub fleet_id: String,
    pub compute_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_status: Option<ComputeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_lift_service_sdk_endpoint: Option<String>,
}

/// Attributes of a fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FleetAttributes {
    pub fleet_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FleetStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_type: Option<ComputeType>,
}

/// A location entry of a fleet definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationConfiguration {
    pub location: String,
}

// ── Game sessions ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGameSessionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub maximum_player_session_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGameSessionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session: Option<GameSession>,
    /// HTTP status of the call. Not part of the JSON body.
    #[serde(skip, default = "http_status_ok")]
    pub http_status: u16,
}

impl CreateGameSessionResponse {
    /// A `200 OK` response carrying `game_session`.
    pub fn ok(game_session: GameSession) -> Self {
        Self {
            game_session: Some(game_session),
            http_status: HTTP_STATUS_OK,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeGameSessionsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<GameSessionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeGameSessionsResponse {
    #[serde(default)]
    pub game_sessions: Vec<GameSession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchGameSessionsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchGameSessionsResponse {
    #[serde(default)]
    pub game_sessions: Vec<GameSession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

// ── Player sessions ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePlayerSessionRequest {
    pub game_session_id: String,
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePlayerSessionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_session: Option<PlayerSession>,
}

// ── Fleet setup ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLocationsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<LocationFilter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLocationsResponse {
    #[serde(default)]
    pub locations: Vec<LocationModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLocationRequest {
    pub location_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLocationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterComputeRequest {
    pub fleet_id: String,
    pub compute_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterComputeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<Compute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetComputeAuthTokenRequest {
    pub fleet_id: String,
    pub compute_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetComputeAuthTokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateFleetRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_type: Option<ComputeType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<LocationConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateFleetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_attributes: Option<FleetAttributes>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describe_request_omits_unset_members() {
        let request = DescribeGameSessionsRequest {
            fleet_id: Some("fleet-123".into()),
            status_filter: Some(GameSessionStatus::Active),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "FleetId": "fleet-123", "StatusFilter": "ACTIVE" })
        );
    }

    #[test]
    fn describe_response_without_sessions_is_empty() {
        let response: DescribeGameSessionsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.game_sessions.is_empty());
        assert!(response.next_token.is_none());
    }

    #[test]
    fn create_game_session_response_defaults_to_ok_status() {
        let response: CreateGameSessionResponse = serde_json::from_value(json!({
            "GameSession": {
                "GameSessionId": "gsess-1",
                "Status": "ACTIVATING",
                "MaximumPlayerSessionCount": 4
            }
        }))
        .unwrap();
        assert_eq!(response.http_status, HTTP_STATUS_OK);
        let session = response.game_session.unwrap();
        assert_eq!(session.status, GameSessionStatus::Activating);
        assert_eq!(session.current_player_session_count, 0);
        assert!(!session.has_available_player_sessions());
    }

    #[test]
    fn player_session_timed_out_uses_vendor_spelling() {
        assert_eq!(
            serde_json::to_value(PlayerSessionStatus::TimedOut).unwrap(),
            json!("TIMEDOUT")
        );
    }

    #[test]
    fn unrecognized_setup_values_decode_as_unknown() {
        let response: CreateFleetResponse = serde_json::from_value(json!({
            "FleetAttributes": {
                "FleetId": "fleet-1",
                "Status": "IMPAIRED",
                "ComputeType": "CONTAINER"
            }
        }))
        .unwrap();
        let attributes = response.fleet_attributes.unwrap();
        assert_eq!(attributes.status, Some(FleetStatus::Unknown));
        assert_eq!(attributes.compute_type, Some(ComputeType::Unknown));

        let compute: RegisterComputeResponse = serde_json::from_value(json!({
            "Compute": { "FleetId": "fleet-1", "ComputeName": "c", "ComputeStatus": "NOT_FOUND" }
        }))
        .unwrap();
        assert_eq!(
            compute.compute.unwrap().compute_status,
            Some(ComputeStatus::Unknown)
        );
    }

    #[test]
    fn compute_type_anywhere_round_trips() {
        let value = serde_json::to_value(ComputeType::Anywhere).unwrap();
        assert_eq!(value, json!("ANYWHERE"));
        assert_eq!(
            serde_json::from_value::<ComputeType>(json!("EC2")).unwrap(),
            ComputeType::Ec2
        );
    }
}
