//! Broker configuration.
//!
//! [`BrokerConfig`] picks the adapter variant and carries the values it is
//! built with. Hosts usually deserialize it from their own settings file:
//!
//! ```
//! # fn main() -> Result<(), serde_json::Error> {
//! use fleet_session_broker::{AdapterKind, BrokerConfig};
//!
//! let config: BrokerConfig = serde_json::from_str(
//!     r#"{ "adapter": "anywhere", "fleet_id": "fleet-1a2b", "fleet_location": "custom-lab" }"#,
//! )?;
//! assert_eq!(config.adapter, AdapterKind::Anywhere);
//! assert!(config.validate().is_ok());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::GameServerAdapter;
use crate::adapters::{AnywhereGameAdapter, LocalGameAdapter, LOCAL_FLEET_ID};
use crate::client::GameLiftClient;
use crate::error::{BrokerError, Result};
use crate::models::DEFAULT_PLAYER_ID_PREFIX;

/// Endpoint of a local fleet emulator.
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:8080";

/// Default timeout of one session API call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Which [`GameServerAdapter`] to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    /// [`LocalGameAdapter`]: a locally run fleet.
    #[default]
    Local,
    /// [`AnywhereGameAdapter`]: a service-managed fleet.
    Anywhere,
}

/// Settings the broker is built from.
///
/// Missing fields take their defaults when deserializing.
///
/// # Example
///
/// ```
/// use fleet_session_broker::BrokerConfig;
/// use std::time::Duration;
///
/// let config = BrokerConfig::anywhere("fleet-1a2b", "custom-lab")
///     .with_region("us-west-2")
///     .with_request_timeout(Duration::from_secs(5));
/// assert_eq!(
///     config.resolved_endpoint(),
///     "https://gamelift.us-west-2.amazonaws.com"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Adapter variant.
    pub adapter: AdapterKind,
    /// Fleet the adapter targets. Defaults to the local emulator's fleet id.
    pub fleet_id: String,
    /// Location new game sessions are placed in. Required for Anywhere fleets.
    pub fleet_location: String,
    /// Explicit session API endpoint. Overrides `aws_region`.
    pub endpoint: Option<String>,
    /// Region used to derive the endpoint when `endpoint` is unset.
    pub aws_region: Option<String>,
    /// Prefix of generated player ids.
    pub player_id_prefix: String,
    /// Timeout of one session API call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            adapter: AdapterKind::Local,
            fleet_id: LOCAL_FLEET_ID.to_string(),
            fleet_location: String::new(),
            endpoint: None,
            aws_region: None,
            player_id_prefix: DEFAULT_PLAYER_ID_PREFIX.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl BrokerConfig {
    /// Default configuration for `adapter`.
    pub fn new(adapter: AdapterKind) -> Self {
        Self {
            adapter,
            ..Self::default()
        }
    }

    /// Configuration for a local fleet emulator.
    pub fn local() -> Self {
        Self::new(AdapterKind::Local)
    }

    /// Configuration for a service-managed fleet.
    pub fn anywhere(fleet_id: impl Into<String>, fleet_location: impl Into<String>) -> Self {
        Self {
            adapter: AdapterKind::Anywhere,
            fleet_id: fleet_id.into(),
            fleet_location: fleet_location.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.aws_region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_player_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.player_id_prefix = prefix.into();
        self
    }

    /// Set the per-call timeout. Sub-second precision is dropped; values
    /// below one second are raised to one second.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// The endpoint the HTTP client should call.
    ///
    /// `endpoint` if set, else the regional endpoint of `aws_region`, else
    /// [`DEFAULT_LOCAL_ENDPOINT`].
    pub fn resolved_endpoint(&self) -> String {
        match (&self.endpoint, &self.aws_region) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Some(region)) => format!("https://gamelift.{region}.amazonaws.com"),
            (None, None) => DEFAULT_LOCAL_ENDPOINT.to_string(),
        }
    }

    /// Check that the adapter variant has everything it needs.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::InvalidConfig`] naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.fleet_id.trim().is_empty() {
            return Err(BrokerError::InvalidConfig("fleet_id is empty".into()));
        }
        if self.adapter == AdapterKind::Anywhere {
            if self.fleet_location.trim().is_empty() {
                return Err(BrokerError::InvalidConfig(
                    "fleet_location is required for anywhere fleets".into(),
                ));
            }
            if self.player_id_prefix.is_empty() {
                return Err(BrokerError::InvalidConfig(
                    "player_id_prefix is empty".into(),
                ));
            }
        }
        if matches!(&self.aws_region, Some(region) if region.trim().is_empty()) {
            return Err(BrokerError::InvalidConfig("aws_region is empty".into()));
        }
        Ok(())
    }

    /// Build the configured adapter on top of `client`.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::InvalidConfig`] if [`validate`](Self::validate) fails.
    pub fn build_adapter(
        &self,
        client: Arc<dyn GameLiftClient>,
    ) -> Result<Box<dyn GameServerAdapter>> {
        self.validate()?;
        debug!(adapter = ?self.adapter, fleet_id = %self.fleet_id, "building game server adapter");
        Ok(match self.adapter {
            AdapterKind::Local => Box::new(LocalGameAdapter::with_fleet_id(
                client,
                self.fleet_id.clone(),
            )),
            AdapterKind::Anywhere => Box::new(
                AnywhereGameAdapter::new(client, self.fleet_id.clone(), self.fleet_location.clone())
                    .with_player_id_prefix(self.player_id_prefix.clone()),
            ),
        })
    }

    /// Build an HTTP client for [`resolved_endpoint`](Self::resolved_endpoint).
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::InvalidConfig`] for a malformed endpoint.
    #[cfg(feature = "client-http")]
    pub fn build_client(&self) -> Result<crate::clients::HttpGameLiftClient> {
        crate::clients::HttpGameLiftClient::with_timeout(
            self.resolved_endpoint(),
            self.request_timeout(),
        )
    }

    /// Build the HTTP client and the configured adapter in one step.
    ///
    /// # Errors
    ///
    /// Any error of [`build_client`](Self::build_client) or
    /// [`build_adapter`](Self::build_adapter).
    #[cfg(feature = "client-http")]
    pub fn connect(&self) -> Result<Box<dyn GameServerAdapter>> {
        self.validate()?;
        let client = Arc::new(self.build_client()?);
        self.build_adapter(client)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::clients::InMemoryFleet;
    use crate::models::{GetGameConnectionRequest, StartGameRequest};

    #[test]
    fn defaults_target_local_emulator() {
        let config = BrokerConfig::default();
        assert_eq!(config.adapter, AdapterKind::Local);
        assert_eq!(config.fleet_id, LOCAL_FLEET_ID);
        assert_eq!(config.player_id_prefix, DEFAULT_PLAYER_ID_PREFIX);
        assert_eq!(config.resolved_endpoint(), DEFAULT_LOCAL_ENDPOINT);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_toml_with_defaults() {
        let config: BrokerConfig = toml::from_str(
            r#"
            adapter = "anywhere"
            fleet_id = "fleet-1a2b"
            fleet_location = "custom-home"
            aws_region = "eu-west-1"
            "#,
        )
        .unwrap();
        assert_eq!(config.adapter, AdapterKind::Anywhere);
        assert_eq!(config.fleet_location, "custom-home");
        assert_eq!(config.player_id_prefix, DEFAULT_PLAYER_ID_PREFIX);
        assert_eq!(
            config.resolved_endpoint(),
            "https://gamelift.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn new_keeps_other_defaults() {
        let config = BrokerConfig::new(AdapterKind::Anywhere);
        assert_eq!(config.adapter, AdapterKind::Anywhere);
        assert_eq!(config.fleet_id, LOCAL_FLEET_ID);
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_endpoint_wins_over_region() {
        let config = BrokerConfig::local()
            .with_region("us-east-1")
            .with_endpoint("http://127.0.0.1:9080");
        assert_eq!(config.resolved_endpoint(), "http://127.0.0.1:9080");
    }

    #[test]
    fn anywhere_requires_location() {
        let err = BrokerConfig::anywhere("fleet-1", "").validate().unwrap_err();
        assert!(err.to_string().contains("fleet_location"));
    }

    #[test]
    fn empty_fleet_id_is_rejected() {
        let config = BrokerConfig::anywhere("  ", "custom-home");
        assert!(matches!(
            config.validate(),
            Err(BrokerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_prefix_is_rejected_for_anywhere() {
        let config = BrokerConfig::anywhere("fleet-1", "custom-home").with_player_id_prefix("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn sub_second_timeout_rounds_up() {
        let config = BrokerConfig::local().with_request_timeout(Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn build_adapter_rejects_invalid_config() {
        let client: Arc<dyn GameLiftClient> = Arc::new(InMemoryFleet::new());
        let result = BrokerConfig::anywhere("fleet-1", "").build_adapter(client);
        assert!(result.is_err());
    }

    #[test]
    fn built_adapters_broker_sessions() {
        let fleet = Arc::new(InMemoryFleet::new());
        for config in [
            BrokerConfig::local(),
            BrokerConfig::anywhere("fleet-remote", "custom-home"),
        ] {
            let adapter = config.build_adapter(fleet.clone()).unwrap();
            tokio_test::block_on(async {
                assert!(adapter.start_game(StartGameRequest::default()).await.is_success());
                let connection = adapter
                    .get_game_connection(GetGameConnectionRequest::default())
                    .await;
                assert!(connection.is_success(), "{config:?}: {connection:?}");
            });
        }
    }

    #[cfg(feature = "client-http")]
    #[test]
    fn connect_builds_http_backed_adapter() {
        let config = BrokerConfig::local().with_endpoint("http://127.0.0.1:9");
        assert!(config.connect().is_ok());

        let bad = BrokerConfig::local().with_endpoint("nonsense");
        assert!(matches!(bad.connect(), Err(BrokerError::InvalidConfig(_))));
    }
}
