//! DocQA Core Library
//!
//! This crate provides the foundational utilities shared by every DocQA crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - The `DocumentCategory` type assigned to every uploaded document

pub mod category;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use category::DocumentCategory;
pub use config::{AppConfig, CacheSettings};
pub use error::{AppError, AppResult};
