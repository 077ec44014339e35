//! Sync layer: HTTP client for the SR&ED report AI server (generation, improvement, feedback).

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{
    AiClient, DEFAULT_SERVER_URL, GenerateRequest, GenerateResponse, HealthStatus, ImproveResponse,
    SyncError,
};
