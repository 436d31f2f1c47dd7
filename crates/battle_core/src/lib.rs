//! Battle engine for head-to-head arenas
//!
//! This crate provides the pure computation behind a battle arena:
//! - Generating a balanced partial round-robin schedule
//! - Resolving a match from a 0-100 score split
//! - Accumulating one participant's session, with undo
//! - Aggregating many finished sessions into a ranked leaderboard
//!
//! No IO happens here. Loading arenas and storing session artifacts is the
//! caller's job (see the `arena` crate).
//!
//! # Usage
//!
//! ```rust
//! use battle_core::{generate_schedule, Competitor, ScoreSplit, Session};
//!
//! let items = vec![
//!     Competitor::new("a", "Apples"),
//!     Competitor::new("b", "Bananas"),
//!     Competitor::new("c", "Cherries"),
//! ];
//!
//! let mut session = Session::new("alice", generate_schedule(&items));
//! while !session.is_complete() {
//!     session.record(ScoreSplit::even()).unwrap();
//! }
//! let artifact = session.finish("fruit").unwrap();
//! assert_eq!(artifact.final_scores.values().sum::<u32>(), 300);
//! ```

mod arena;
mod error;
mod leaderboard;
mod resolve;
mod schedule;
mod session;
mod types;

pub use arena::*;
pub use error::*;
pub use leaderboard::*;
pub use resolve::*;
pub use schedule::*;
pub use session::*;
pub use types::*;
