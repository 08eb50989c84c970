//! # Anywhere Fleet Example
//!
//! Brokers one player connection through the HTTP session client.
//!
//! Point it at a fleet emulator or a signing proxy in front of the session
//! service. The fleet and its custom location must already exist.
//!
//! ## Running
//!
//! ```sh
//! FLEET_ID=fleet-1a2b FLEET_LOCATION=custom-home-lab \
//!     SESSION_ENDPOINT=http://localhost:8080 \
//!     cargo run --example anywhere_fleet
//! ```

use fleet_session_broker::{BrokerConfig, GetGameConnectionRequest, StartGameRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Logging ─────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // ── Configuration ───────────────────────────────────────────────
    let fleet_id = std::env::var("FLEET_ID")?;
    let location = std::env::var("FLEET_LOCATION")?;
    let mut config = BrokerConfig::anywhere(fleet_id, location);
    if let Ok(endpoint) = std::env::var("SESSION_ENDPOINT") {
        config = config.with_endpoint(endpoint);
    }
    if let Ok(region) = std::env::var("AWS_REGION") {
        config = config.with_region(region);
    }
    tracing::info!(endpoint = %config.resolved_endpoint(), "using session endpoint");

    // ── Broker ──────────────────────────────────────────────────────
    let adapter = config.connect()?;

    let started = adapter.start_game(StartGameRequest::default()).await;
    if let Err((code, message)) = started.into_result() {
        tracing::error!(%code, ?message, "start_game failed");
        return Ok(());
    }

    match adapter
        .get_game_connection(GetGameConnectionRequest::default())
        .await
        .into_result()
    {
        Ok(connection) => {
            tracing::info!(
                ip = ?connection.ip_address,
                dns = ?connection.dns_name,
                port = %connection.port,
                player_session_id = ?connection.player_session_id,
                "connect here"
            );
        }
        Err((code, message)) => tracing::error!(%code, ?message, "get_game_connection failed"),
    }
    Ok(())
}
