//! JSON-over-HTTP client for the session-management API, built on `reqwest`.
//!
//! This module provides [`HttpGameLiftClient`], a [`GameLiftClient`] that
//! speaks the service's JSON 1.1 protocol: every call is a `POST /` whose
//! `X-Amz-Target` header names the operation and whose body is the
//! `PascalCase` request document.
//!
//! Requests are not signed. Point the client at an endpoint that accepts
//! unsigned calls, such as a local fleet emulator, or at a signing proxy.
//!
//! # Feature gate
//!
//! This module is only available when the `client-http` feature is enabled
//! (it is enabled by default).
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> fleet_session_broker::Result<()> {
//! use fleet_session_broker::clients::HttpGameLiftClient;
//! use fleet_session_broker::protocol::DescribeGameSessionsRequest;
//! use fleet_session_broker::GameLiftClient;
//!
//! let client = HttpGameLiftClient::new("http://localhost:8080")?;
//! let sessions = client
//!     .describe_game_sessions(DescribeGameSessionsRequest {
//!         fleet_id: Some("fleet-123".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{} sessions", sessions.game_sessions.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::GameLiftClient;
use crate::error::{BrokerError, Result};
use crate::protocol::{
    CreateFleetRequest, CreateFleetResponse, CreateGameSessionRequest, CreateGameSessionResponse,
    CreateLocationRequest, CreateLocationResponse, CreatePlayerSessionRequest,
    CreatePlayerSessionResponse, DescribeGameSessionsRequest, DescribeGameSessionsResponse,
    GetComputeAuthTokenRequest, GetComputeAuthTokenResponse, ListLocationsRequest,
    ListLocationsResponse, RegisterComputeRequest, RegisterComputeResponse,
    SearchGameSessionsRequest, SearchGameSessionsResponse,
};

/// Default timeout of one API call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const TARGET_HEADER: &str = "X-Amz-Target";
const TARGET_PREFIX: &str = "GameLift.";

/// Error document returned with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type", default)]
    kind: Option<String>,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

/// A [`GameLiftClient`] talking to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpGameLiftClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpGameLiftClient {
    /// Create a client for `endpoint` with [`DEFAULT_REQUEST_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::InvalidConfig`] if `endpoint` is not an absolute
    /// `http`/`https` URL, or [`BrokerError::Transport`] if the HTTP client
    /// cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client whose calls fail with [`BrokerError::Timeout`] after `timeout`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        let url = reqwest::Url::parse(&endpoint)
            .map_err(|e| BrokerError::InvalidConfig(format!("endpoint `{endpoint}`: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BrokerError::InvalidConfig(format!(
                "endpoint `{endpoint}` must use http or https"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BrokerError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: url.to_string(),
        })
    }

    /// The base URL every request is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one operation and decode its reply, returning the HTTP status too.
    async fn call<Req, Resp>(&self, operation: &'static str, request: &Req) -> Result<(Resp, u16)>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_vec(request)?;
        debug!(operation, endpoint = %self.endpoint, "calling session service");

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(TARGET_HEADER, format!("{TARGET_PREFIX}{operation}"))
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if !(200..300).contains(&status) {
            let err = parse_service_error(status, &bytes);
            warn!(operation, status, error = %err, "session service rejected request");
            return Err(err);
        }

        let decoded = if bytes.is_empty() {
            serde_json::from_slice(b"{}")?
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((decoded, status))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BrokerError {
    if err.is_timeout() {
        BrokerError::Timeout
    } else {
        BrokerError::Transport(err.to_string())
    }
}

/// Build a [`BrokerError::Service`] from a non-2xx reply.
///
/// The error code is the part of `__type` after the last `#`
/// (`"com.amazonaws.gamelift#NotFoundException"` → `"NotFoundException"`).
fn parse_service_error(status: u16, body: &[u8]) -> BrokerError {
    let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|b| b.kind.as_deref())
        .and_then(|kind| kind.rsplit('#').next())
        .filter(|code| !code.is_empty())
        .map_or_else(|| format!("Http{status}"), str::to_string);
    let message = parsed
        .and_then(|b| b.message)
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
    BrokerError::Service { code, message }
}

#[async_trait]
impl GameLiftClient for HttpGameLiftClient {
    async fn create_game_session(
        &self,
        request: CreateGameSessionRequest,
    ) -> Result<CreateGameSessionResponse> {
        let (mut response, status): (CreateGameSessionResponse, u16) =
            self.call("CreateGameSession", &request).await?;
        response.http_status = status;
        Ok(response)
    }

    async fn describe_game_sessions(
        &self,
        request: DescribeGameSessionsRequest,
    ) -> Result<DescribeGameSessionsResponse> {
        Ok(self.call("DescribeGameSessions", &request).await?.0)
    }

    async fn search_game_sessions(
        &self,
        request: SearchGameSessionsRequest,
    ) -> Result<SearchGameSessionsResponse> {
        Ok(self.call("SearchGameSessions", &request).await?.0)
    }

    async fn create_player_session(
        &self,
        request: CreatePlayerSessionRequest,
    ) -> Result<CreatePlayerSessionResponse> {
        Ok(self.call("CreatePlayerSession", &request).await?.0)
    }

    async fn list_locations(&self, request: ListLocationsRequest) -> Result<ListLocationsResponse> {
        Ok(self.call("ListLocations", &request).await?.0)
    }

    async fn create_location(
        &self,
        request: CreateLocationRequest,
    ) -> Result<CreateLocationResponse> {
        Ok(self.call("CreateLocation", &request).await?.0)
    }

    async fn register_compute(
        &self,
        request: RegisterComputeRequest,
    ) -> Result<RegisterComputeResponse> {
        Ok(self.call("RegisterCompute", &request).await?.0)
    }

    async fn get_compute_auth_token(
        &self,
        request: GetComputeAuthTokenRequest,
    ) -> Result<GetComputeAuthTokenResponse> {
        Ok(self.call("GetComputeAuthToken", &request).await?.0)
    }

    async fn create_fleet(&self, request: CreateFleetRequest) -> Result<CreateFleetResponse> {
        Ok(self.call("CreateFleet", &request).await?.0)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::protocol::{GameSessionStatus, HTTP_STATUS_OK};
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    #[test]
    fn http_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpGameLiftClient>();
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let err = HttpGameLiftClient::new("not a url").unwrap_err();
        assert!(matches!(err, BrokerError::InvalidConfig(_)));
        let err = HttpGameLiftClient::new("ftp://localhost:8080").unwrap_err();
        assert!(matches!(err, BrokerError::InvalidConfig(_)));
    }

    #[test]
    fn endpoint_is_normalized_to_a_url() {
        let client = HttpGameLiftClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/");
    }

    #[test]
    fn service_error_code_is_taken_from_type() {
        let err = parse_service_error(
            400,
            br#"{"__type":"com.amazonaws.gamelift#NotFoundException","message":"No such fleet"}"#,
        );
        assert_eq!(err.service_code(), Some("NotFoundException"));
        assert_eq!(err.message(), "No such fleet");
    }

    #[test]
    fn service_error_accepts_capitalized_message() {
        let err = parse_service_error(
            400,
            br#"{"__type":"GameSessionFullException","Message":"Session is full"}"#,
        );
        assert_eq!(err.service_code(), Some("GameSessionFullException"));
        assert_eq!(err.message(), "Session is full");
    }

    #[test]
    fn service_error_falls_back_to_status_and_raw_body() {
        let err = parse_service_error(502, b"Bad Gateway");
        assert_eq!(err.service_code(), Some("Http502"));
        assert_eq!(err.message(), "Bad Gateway");
    }

    // ── Stub-server helpers ─────────────────────────────────────────

    /// One request as the stub server saw it.
    #[derive(Debug)]
    struct Captured {
        target: Option<String>,
        content_type: Option<String>,
        body: String,
    }

    /// Serve `status` and `body` for every `POST /`. The receiver yields each
    /// request the server handled.
    async fn serve_scripted(
        status: StatusCode,
        body: &'static str,
    ) -> (String, mpsc::UnboundedReceiver<Captured>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new().route(
            "/",
            post(move |headers: HeaderMap, request_body: String| {
                let tx = tx.clone();
                async move {
                    let read = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    let _ = tx.send(Captured {
                        target: read("x-amz-target"),
                        content_type: read("content-type"),
                        body: request_body,
                    });
                    (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), rx)
    }

    #[tokio::test]
    async fn describe_sends_target_header_and_body() {
        let (endpoint, mut seen) = serve_scripted(
            StatusCode::OK,
            r#"{"GameSessions":[{"GameSessionId":"gsess-1","Status":"ACTIVE","IpAddress":"10.1.1.1","Port":1935}]}"#,
        )
        .await;
        let client = HttpGameLiftClient::new(endpoint).unwrap();

        let response = client
            .describe_game_sessions(DescribeGameSessionsRequest {
                fleet_id: Some("fleet-123".into()),
                status_filter: Some(GameSessionStatus::Active),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.game_sessions.len(), 1);
        assert_eq!(response.game_sessions[0].port, Some(1935));

        let request = seen.recv().await.unwrap();
        assert_eq!(
            request.target.as_deref(),
            Some("GameLift.DescribeGameSessions")
        );
        assert_eq!(request.content_type.as_deref(), Some(JSON_CONTENT_TYPE));
        let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({ "FleetId": "fleet-123", "StatusFilter": "ACTIVE" })
        );
    }

    #[tokio::test]
    async fn create_game_session_records_status() {
        let (endpoint, mut seen) = serve_scripted(
            StatusCode::OK,
            r#"{"GameSession":{"GameSessionId":"gsess-2","Status":"ACTIVATING"}}"#,
        )
        .await;
        let client = HttpGameLiftClient::new(endpoint).unwrap();

        let response = client
            .create_game_session(CreateGameSessionRequest {
                fleet_id: Some("fleet-123".into()),
                maximum_player_session_count: 4,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(response.http_status, HTTP_STATUS_OK);
        assert_eq!(
            response.game_session.unwrap().status,
            GameSessionStatus::Activating
        );

        let request = seen.recv().await.unwrap();
        assert_eq!(request.target.as_deref(), Some("GameLift.CreateGameSession"));
        assert!(request.body.contains(r#""MaximumPlayerSessionCount":4"#));
    }

    #[tokio::test]
    async fn error_reply_becomes_service_error() {
        let (endpoint, _seen) = serve_scripted(
            StatusCode::BAD_REQUEST,
            r#"{"__type":"com.amazonaws.gamelift#InvalidRequestException","message":"FleetId is invalid"}"#,
        )
        .await;
        let client = HttpGameLiftClient::new(endpoint).unwrap();

        let err = client
            .create_player_session(CreatePlayerSessionRequest {
                game_session_id: "gsess-1".into(),
                player_id: "playerId-1".into(),
                player_data: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.service_code(), Some("InvalidRequestException"));
        assert_eq!(err.message(), "FleetId is invalid");
    }

    #[tokio::test]
    async fn empty_body_decodes_as_empty_response() {
        let (endpoint, _seen) = serve_scripted(StatusCode::OK, "").await;
        let client = HttpGameLiftClient::new(endpoint).unwrap();

        let response = client
            .list_locations(ListLocationsRequest::default())
            .await
            .unwrap();
        assert!(response.locations.is_empty());
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client =
            HttpGameLiftClient::with_timeout(format!("http://{addr}"), Duration::from_millis(100))
                .unwrap();
        let err = client
            .describe_game_sessions(DescribeGameSessionsRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::Timeout), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let client = HttpGameLiftClient::new("http://127.0.0.1:1").unwrap();
        let err = client
            .describe_game_sessions(DescribeGameSessionsRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::Transport(_)), "got {err:?}");
    }
}
