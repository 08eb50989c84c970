//! Concrete [`GameServerAdapter`](crate::GameServerAdapter) backends.
//!
//! | Adapter | Hosting model |
//! |---------|---------------|
//! | [`LocalGameAdapter`] | a locally run or simulated fleet; the connection comes straight from the game session |
//! | [`AnywhereGameAdapter`] | a service-managed fleet; each connection reserves a player session |

pub mod anywhere;
pub mod local;

pub use anywhere::AnywhereGameAdapter;
pub use local::{LocalGameAdapter, LOCAL_FLEET_ID};

use tracing::error;

use crate::error::BrokerError;
use crate::error_codes::ErrorCode;
use crate::response::Response;

/// Log a failed service call and fold it into an `UnknownError` response.
fn unknown_error<T: Default>(operation: &'static str, err: &BrokerError) -> Response<T> {
    error!(operation, error = %err, "session service call failed");
    Response::failure(ErrorCode::UnknownError, err.message())
}
