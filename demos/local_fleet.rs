//! # Local Fleet Example
//!
//! Brokers sessions against an in-process simulated fleet:
//!
//! 1. Start a game through the local adapter and read its connection
//! 2. Set up an Anywhere fleet (custom location, fleet, compute, auth token)
//! 3. Broker player connections through the Anywhere adapter until the
//!    session is full
//!
//! ## Running
//!
//! ```sh
//! cargo run --example local_fleet
//!
//! # Show every service call:
//! RUST_LOG=debug cargo run --example local_fleet
//! ```

use std::sync::Arc;

use fleet_session_broker::protocol::{
    ComputeType, CreateFleetRequest, CreateLocationRequest, GetComputeAuthTokenRequest,
    LocationConfiguration, RegisterComputeRequest,
};
use fleet_session_broker::{
    BrokerConfig, GameLiftClient, GameServerAdapter, GetGameConnectionRequest, InMemoryFleet,
    LocalGameAdapter, StartGameRequest,
};

const LOCATION: &str = "custom-home-lab";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Logging ─────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let fleet = Arc::new(InMemoryFleet::new());

    // ── Local adapter ───────────────────────────────────────────────
    let local = LocalGameAdapter::new(fleet.clone());
    let started = local.start_game(StartGameRequest::default()).await;
    tracing::info!(success = started.is_success(), "local start_game");

    match local
        .get_game_connection(GetGameConnectionRequest::default())
        .await
        .into_result()
    {
        Ok(connection) => tracing::info!(?connection, "local connection"),
        Err((code, message)) => tracing::warn!(%code, ?message, "local connection failed"),
    }

    // ── Anywhere fleet setup ────────────────────────────────────────
    fleet
        .create_location(CreateLocationRequest {
            location_name: LOCATION.into(),
        })
        .await?;
    let fleet_id = fleet
        .create_fleet(CreateFleetRequest {
            name: "home-lab".into(),
            description: Some("Demo Anywhere fleet".into()),
            compute_type: Some(ComputeType::Anywhere),
            locations: vec![LocationConfiguration {
                location: LOCATION.into(),
            }],
        })
        .await?
        .fleet_attributes
        .ok_or("fleet attributes missing")?
        .fleet_id;
    fleet
        .register_compute(RegisterComputeRequest {
            fleet_id: fleet_id.clone(),
            compute_name: "laptop".into(),
            ip_address: Some("127.0.0.1".into()),
            location: Some(LOCATION.into()),
        })
        .await?;
    let token = fleet
        .get_compute_auth_token(GetComputeAuthTokenRequest {
            fleet_id: fleet_id.clone(),
            compute_name: "laptop".into(),
        })
        .await?;
    tracing::info!(
        %fleet_id,
        expires = ?token.expiration_timestamp,
        "compute registered and authorized"
    );

    // ── Anywhere adapter ────────────────────────────────────────────
    let anywhere = BrokerConfig::anywhere(fleet_id, LOCATION)
        .with_player_id_prefix("demo-player-")
        .build_adapter(fleet.clone())?;
    anywhere.start_game(StartGameRequest::default()).await;

    for attempt in 1..=5 {
        let response = anywhere
            .get_game_connection(GetGameConnectionRequest::default())
            .await;
        match response.into_result() {
            Ok(connection) => tracing::info!(
                attempt,
                player_session_id = ?connection.player_session_id,
                port = %connection.port,
                "player connected"
            ),
            Err((code, message)) => {
                tracing::warn!(attempt, %code, ?message, "no connection available")
            }
        }
    }

    tracing::info!(
        game_sessions = fleet.game_session_count().await,
        player_sessions = fleet.player_session_count().await,
        "done"
    );
    Ok(())
}
