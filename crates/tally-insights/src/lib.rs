//! # tally-insights: Insights/Chat Proxy Client
//!
//! The only asynchronous boundary of the back-office. The store and the
//! reports stay synchronous; a command assembles a prompt from report
//! figures and awaits this client.
//!
//! ## Module Organization
//!
//! - [`config`] - Proxy base URL, endpoint paths, optional timeout
//! - [`client`] - `request_insights` and `send_chat`
//! - [`error`] - `InsightsError`

pub mod client;
pub mod config;
pub mod error;

pub use client::{ChatMessage, ChatRole, InsightsClient};
pub use config::InsightsConfig;
pub use error::{InsightsError, InsightsResult};
