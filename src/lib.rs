//! # Fleet Session Broker
//!
//! Brokers game sessions between game clients and a managed fleet of game
//! servers.
//!
//! A client asks the broker to start a game, then asks for connection
//! details. The broker makes sure an active game session exists on the fleet
//! and answers with the address, port and (for managed fleets) the player
//! session reserved for the caller.
//!
//! ## Features
//!
//! - **Two fleet flavours**: [`LocalGameAdapter`] for a locally run fleet and
//!   [`AnywhereGameAdapter`] for a service-managed fleet, both behind the
//!   [`GameServerAdapter`] trait
//! - **Client-agnostic**: adapters talk to the session service through the
//!   [`GameLiftClient`] trait
//! - **HTTP client built in**: the default `client-http` feature provides
//!   `HttpGameLiftClient`, speaking the service's JSON protocol
//! - **Simulated fleet**: [`InMemoryFleet`] serves the whole API in memory
//!   for tests and demos
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use fleet_session_broker::{
//!     GameServerAdapter, GetGameConnectionRequest, InMemoryFleet, LocalGameAdapter,
//!     StartGameRequest,
//! };
//!
//! # tokio_test::block_on(async {
//! let adapter = LocalGameAdapter::new(Arc::new(InMemoryFleet::new()));
//!
//! let started = adapter.start_game(StartGameRequest::default()).await;
//! assert!(started.is_success());
//!
//! let connection = adapter
//!     .get_game_connection(GetGameConnectionRequest::default())
//!     .await;
//! assert_eq!(connection.payload().port, "7777");
//! # });
//! ```
//!
//! Failures never escape as errors. Both operations always return a
//! [`Response`] whose error code is one of [`ErrorCode`].

pub mod adapter;
pub mod adapters;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod error_codes;
pub mod models;
pub mod protocol;
pub mod response;

// Re-export primary types for ergonomic imports.
pub use adapter::GameServerAdapter;
pub use adapters::{AnywhereGameAdapter, LocalGameAdapter, LOCAL_FLEET_ID};
pub use client::GameLiftClient;
pub use clients::InMemoryFleet;
pub use config::{AdapterKind, BrokerConfig};
pub use error::{BrokerError, Result};
pub use error_codes::ErrorCode;
pub use models::{
    GetGameConnectionRequest, GetGameConnectionResponse, StartGameRequest, StartGameResponse,
};
pub use response::Response;

#[cfg(feature = "client-http")]
pub use clients::HttpGameLiftClient;
