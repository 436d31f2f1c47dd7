//! Arena runner for battle tournaments
//!
//! This crate wraps `battle_core` with the pieces a real arena needs:
//! - Loading arena definitions and runner config from TOML
//! - Storing finished session artifacts as JSON, per arena
//! - An interactive play loop over any `BufRead`/`Write` pair
//! - Text reports for schedules, session standings and the leaderboard
//!
//! # Usage
//!
//! ```bash
//! # Play one session
//! cargo run -p arena -- play arenas/snacks.toml --player alice
//!
//! # Show the aggregated leaderboard
//! cargo run -p arena -- leaderboard arenas/snacks.toml
//! ```

mod config;
mod play;
mod report;
mod store;

pub use config::*;
pub use play::*;
pub use report::*;
pub use store::*;
