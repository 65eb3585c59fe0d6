//! Shared test utilities for the addon-loader workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`channels`]: [`TestChannels`] builder for on-disk channel trees

pub mod channels;

pub use channels::TestChannels;
