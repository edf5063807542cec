//! Data models for the patcher.
//!
//! - [`Platform`]: Operating system classification that selects how Steam is located
//! - [`PatcherSettings`]: User preferences loaded from `csgo-patcher.yaml` and the environment
//!
//! Both are plain values: they are built once at startup and passed down explicitly,
//! never stored in globals.

pub mod config;
pub mod platform;

pub use config::PatcherSettings;
pub use platform::Platform;
