#![no_main]

use fleet_session_broker::protocol::{
    CreateGameSessionResponse, CreatePlayerSessionResponse, DescribeGameSessionsResponse,
    GetComputeAuthTokenResponse, ListLocationsResponse, SearchGameSessionsResponse,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every reply body the HTTP client decodes.
    let _ = serde_json::from_slice::<DescribeGameSessionsResponse>(data);
    let _ = serde_json::from_slice::<SearchGameSessionsResponse>(data);
    let _ = serde_json::from_slice::<CreatePlayerSessionResponse>(data);
    let _ = serde_json::from_slice::<ListLocationsResponse>(data);
    let _ = serde_json::from_slice::<GetComputeAuthTokenResponse>(data);

    if let Ok(response) = serde_json::from_slice::<CreateGameSessionResponse>(data) {
        if let Some(session) = response.game_session {
            let _ = session.has_available_player_sessions();
        }
    }
});
