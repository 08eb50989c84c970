#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Wire-format tests for the session API types.
//!
//! Request bodies are compared against the JSON the service expects and
//! response bodies are parsed from captured service replies.

use fleet_session_broker::protocol::{
    ComputeStatus, ComputeType, CreateFleetRequest, CreateFleetResponse, CreateGameSessionRequest,
    CreateGameSessionResponse, CreatePlayerSessionRequest, CreatePlayerSessionResponse,
    DescribeGameSessionsRequest, DescribeGameSessionsResponse, FleetStatus, GameSessionStatus,
    GetComputeAuthTokenResponse, ListLocationsRequest, LocationConfiguration, LocationFilter,
    PlayerSessionStatus, RegisterComputeRequest, RegisterComputeResponse, HTTP_STATUS_OK,
};
use fleet_session_broker::{ErrorCode, GetGameConnectionResponse, Response};
use serde_json::json;

// ════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════

#[test]
fn describe_request_uses_pascal_case_and_omits_unset_fields() {
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
fn create_game_session_request_shape() {
    let request = CreateGameSessionRequest {
        fleet_id: Some("fleet-1".into()),
        location: Some("custom-home".into()),
        maximum_player_session_count: 4,
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "FleetId": "fleet-1",
            "Location": "custom-home",
            "MaximumPlayerSessionCount": 4
        })
    );
}

#[test]
fn create_player_session_request_shape() {
    let request = CreatePlayerSessionRequest {
        game_session_id: "gsess-1".into(),
        player_id: "playerId-abc".into(),
        player_data: None,
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "GameSessionId": "gsess-1", "PlayerId": "playerId-abc" })
    );
}

#[test]
fn fleet_setup_requests_shape() {
    let fleet = CreateFleetRequest {
        name: "lab".into(),
        compute_type: Some(ComputeType::Anywhere),
        locations: vec![LocationConfiguration {
            location: "custom-lab".into(),
        }],
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&fleet).unwrap(),
        json!({
            "Name": "lab",
            "ComputeType": "ANYWHERE",
            "Locations": [{ "Location": "custom-lab" }]
        })
    );

    let register = RegisterComputeRequest {
        fleet_id: "fleet-1".into(),
        compute_name: "laptop".into(),
        ip_address: Some("10.1.1.1".into()),
        location: Some("custom-lab".into()),
    };
    let value = serde_json::to_value(&register).unwrap();
    assert_eq!(value["ComputeName"], "laptop");
    assert_eq!(value["IpAddress"], "10.1.1.1");

    let list = ListLocationsRequest {
        filters: Some(vec![LocationFilter::Custom]),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&list).unwrap(),
        json!({ "Filters": ["CUSTOM"] })
    );
}

// ════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════

#[test]
fn describe_response_parses_service_reply() {
    let body = r#"{
        "GameSessions": [{
            "GameSessionId": "arn:gamelift:us-west-2::gamesession/fleet-1/gsess-1",
            "FleetId": "fleet-1",
            "Status": "ACTIVE",
            "CurrentPlayerSessionCount": 1,
            "MaximumPlayerSessionCount": 4,
            "IpAddress": "10.0.0.1",
            "DnsName": "ec2-10-0-0-1.compute.amazonaws.com",
            "Port": 7777,
            "CreationTime": 1700000000.0
        }],
        "NextToken": "abc"
    }"#;
    let response: DescribeGameSessionsResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.next_token.as_deref(), Some("abc"));
    let session = &response.game_sessions[0];
    assert_eq!(session.status, GameSessionStatus::Active);
    assert_eq!(session.port, Some(7777));
    assert!(session.has_available_player_sessions());
}

#[test]
fn empty_describe_reply_has_no_sessions() {
    let response: DescribeGameSessionsResponse = serde_json::from_str("{}").unwrap();
    assert!(response.game_sessions.is_empty());
}

#[test]
fn create_game_session_response_defaults_to_ok_status() {
    let response: CreateGameSessionResponse = serde_json::from_str(
        r#"{ "GameSession": { "GameSessionId": "gsess-1", "Status": "ACTIVATING" } }"#,
    )
    .unwrap();
    assert_eq!(response.http_status, HTTP_STATUS_OK);
    let session = response.game_session.unwrap();
    assert_eq!(session.status, GameSessionStatus::Activating);
    assert!(!session.has_available_player_sessions());

    let value = serde_json::to_value(CreateGameSessionResponse::ok(session)).unwrap();
    assert!(value.get("HttpStatus").is_none());
}

#[test]
fn player_session_status_uses_vendor_spelling() {
    let response: CreatePlayerSessionResponse = serde_json::from_str(
        r#"{ "PlayerSession": {
            "PlayerSessionId": "psess-1",
            "GameSessionId": "gsess-1",
            "Status": "TIMEDOUT",
            "Port": 1
        } }"#,
    )
    .unwrap();
    let session = response.player_session.unwrap();
    assert_eq!(session.status, PlayerSessionStatus::TimedOut);
    assert!(session.ip_address.is_none());
}

#[test]
fn newer_session_status_decodes_as_unknown() {
    let response: DescribeGameSessionsResponse = serde_json::from_str(
        r#"{ "GameSessions": [{ "GameSessionId": "g", "Status": "SLEEPING", "MaximumPlayerSessionCount": 4 }] }"#,
    )
    .unwrap();
    let session = &response.game_sessions[0];
    assert_eq!(session.status, GameSessionStatus::Unknown);
    assert!(!session.has_available_player_sessions());
}

#[test]
fn newer_fleet_and_compute_values_decode_as_unknown() {
    let fleet: CreateFleetResponse = serde_json::from_str(
        r#"{ "FleetAttributes": { "FleetId": "fleet-1", "Status": "IMPAIRED", "ComputeType": "CONTAINER" } }"#,
    )
    .unwrap();
    let attributes = fleet.fleet_attributes.unwrap();
    assert_eq!(attributes.status, Some(FleetStatus::Unknown));
    assert_eq!(attributes.compute_type, Some(ComputeType::Unknown));

    let compute: RegisterComputeResponse = serde_json::from_str(
        r#"{ "Compute": { "FleetId": "fleet-1", "ComputeName": "laptop", "ComputeStatus": "NOT_FOUND" } }"#,
    )
    .unwrap();
    assert_eq!(
        compute.compute.unwrap().compute_status,
        Some(ComputeStatus::Unknown)
    );
}

#[test]
fn session_without_id_is_rejected() {
    let result = serde_json::from_str::<DescribeGameSessionsResponse>(
        r#"{ "GameSessions": [{ "Status": "ACTIVE" }] }"#,
    );
    assert!(result.is_err());
}

#[test]
fn auth_token_expiration_is_epoch_seconds() {
    let response: GetComputeAuthTokenResponse = serde_json::from_str(
        r#"{ "AuthToken": "tok", "ExpirationTimestamp": 1700000900.5 }"#,
    )
    .unwrap();
    assert_eq!(response.auth_token.as_deref(), Some("tok"));
    assert_eq!(response.expiration_timestamp, Some(1_700_000_900.5));
}

// ════════════════════════════════════════════════════════════════════
// Broker envelope
// ════════════════════════════════════════════════════════════════════

#[test]
fn envelope_serializes_connection_payload() {
    let response = Response::ok(GetGameConnectionResponse {
        ip_address: Some("NonEmptyIp".into()),
        dns_name: Some("NonEmptyDns".into()),
        port: "1".into(),
        player_session_id: Some("psess-1".into()),
        ready: true,
    });
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["payload"]["port"], "1");
    assert_eq!(value["payload"]["ready"], true);
    assert!(value.get("error_code").is_none());
}

#[test]
fn envelope_serializes_not_found_code() {
    let response: Response<GetGameConnectionResponse> =
        Response::failure_code(ErrorCode::NoGameSessionWasFound);
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error_code"], "NO_GAME_SESSION_WAS_FOUND");
}
