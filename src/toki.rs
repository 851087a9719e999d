//! Main module for toki library functionality
//!
//! - [`token`] - token identifiers and the EOF/ERROR sentinels
//! - [`position`] - 1-based line/column tracking
//! - [`scanner`] - the immutable, ordered rule registry
//! - [`session`] - the peek/next cursor over one input
//! - [`result`] - what a scan step hands back
//! - [`config`] - rule files layered over embedded defaults
//! - [`format`] - text/JSON/YAML rendering of scan results

pub mod config;
pub mod error;
pub mod format;
pub mod position;
pub mod result;
pub mod scanner;
pub mod session;
pub mod token;
