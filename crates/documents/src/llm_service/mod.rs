//! Document classification and question answering backends.
//!
//! Two interchangeable services implement [`LlmService`]: a deterministic
//! offline service and a network-backed one. [`LlmServiceFactory`] picks
//! between them from the configured provider name on every call.

pub mod provider;
pub mod providers;

pub use provider::{LlmService, LlmServiceFactory};
pub use providers::{MockLlmService, RemoteLlmService};
