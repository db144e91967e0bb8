//! MEMO Core - Shared Types
//!
//! Error taxonomy and configuration types used by every MEMO crate.
//! This crate contains no cache logic.

pub mod config;
pub mod error;

pub use config::{CacheConfig, MAX_INITIAL_CAPACITY};
pub use error::{ConfigError, MemoError, MemoResult};
