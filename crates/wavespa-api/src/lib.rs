// wavespa-api: Async Rust client for the Gizwits cloud API behind Wavespa spa controllers

pub mod classify;
pub mod client;
pub mod error;
pub mod models;
pub mod redact;
pub mod transport;

pub use client::{UserToken, WavespaClient};
pub use error::Error;
pub use models::{Attributes, LatestStatus, RawDevice};
pub use transport::TransportConfig;
