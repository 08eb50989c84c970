//! [`GameLiftClient`](crate::GameLiftClient) implementations.
//!
//! | Type | Feature | Backend |
//! |------|---------|---------|
//! | [`InMemoryFleet`] | always | simulated fleet held in process memory |
//! | [`HttpGameLiftClient`] | `client-http` | JSON-over-HTTP session API endpoint |

pub mod memory;

#[cfg(feature = "client-http")]
pub mod http;

pub use memory::InMemoryFleet;

#[cfg(feature = "client-http")]
pub use http::HttpGameLiftClient;
