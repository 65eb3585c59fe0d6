//! Command implementations

mod channel;
mod resolve;

pub use channel::{run_channel, run_latest};
pub use resolve::run_resolve;
