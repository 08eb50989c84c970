//! The capability contract every hosting backend implements.
//!
//! A host holds one [`GameServerAdapter`] picked by configuration (see
//! [`BrokerConfig::build_adapter`](crate::BrokerConfig::build_adapter)) and
//! never needs to know which backend it talks to.
//!
//! ```rust,no_run
//! use fleet_session_broker::{GameServerAdapter, GetGameConnectionRequest, StartGameRequest};
//!
//! async fn join(adapter: &dyn GameServerAdapter) -> Option<String> {
//!     if !adapter.start_game(StartGameRequest::default()).await.is_success() {
//!         return None;
//!     }
//!     let connection = adapter
//!         .get_game_connection(GetGameConnectionRequest::default())
//!         .await
//!         .into_result()
//!         .ok()?;
//!     Some(format!("{}:{}", connection.ip_address?, connection.port))
//! }
//! ```

use async_trait::async_trait;

use crate::models::{
    GetGameConnectionRequest, GetGameConnectionResponse, StartGameRequest, StartGameResponse,
};
use crate::response::Response;

/// Start-a-game and get-a-connection, for one hosting backend.
///
/// Neither method returns an error type: every failure of the underlying
/// session API is folded into a failed [`Response`].
///
/// # Cancellation
///
/// Dropping the returned future cancels the operation at whichever service
/// call it is awaiting. Calls already delivered are not undone.
#[async_trait]
pub trait GameServerAdapter: Send + Sync {
    /// Make sure a game session exists, creating one if none is active.
    async fn start_game(&self, request: StartGameRequest) -> Response<StartGameResponse>;

    /// Find an active game session and return how to connect to it.
    async fn get_game_connection(
        &self,
        request: GetGameConnectionRequest,
    ) -> Response<GetGameConnectionResponse>;
}
