//! Match schedule generation
//!
//! Produces a doubly shuffled round robin, capped per competitor once the
//! arena grows past [`FULL_ROUND_ROBIN_LIMIT`] items.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

use crate::types::{Competitor, Match};

/// Maximum matches any competitor plays when the arena is larger than
/// [`FULL_ROUND_ROBIN_LIMIT`].
pub const MAX_MATCHES_PER_COMPETITOR: usize = 5;

/// Arenas with at most this many competitors play a full round robin.
pub const FULL_ROUND_ROBIN_LIMIT: usize = 6;

/// Generate a schedule using the thread-local RNG.
///
/// Returns an empty schedule for fewer than 2 competitors; callers must treat
/// that as "cannot start a session".
pub fn generate_schedule(competitors: &[Competitor]) -> Vec<Match> {
    generate_schedule_with_rng(competitors, &mut rand::thread_rng())
}

/// Generate a schedule drawing all randomness from `rng`.
///
/// Steps:
/// 1. Shuffle the competitors.
/// 2. Enumerate every unordered pair once.
/// 3. Shuffle the pair list.
/// 4. For more than [`FULL_ROUND_ROBIN_LIMIT`] competitors, greedily keep a pair
///    only while both sides are under [`MAX_MATCHES_PER_COMPETITOR`].
/// 5. Label rounds in chunks of `max(1, N / 2)`.
pub fn generate_schedule_with_rng<R: Rng + ?Sized>(
    competitors: &[Competitor],
    rng: &mut R,
) -> Vec<Match> {
    let mut shuffled = unique_competitors(competitors);
    let n = shuffled.len();
    if n < 2 {
        return Vec::new();
    }

    shuffled.shuffle(rng);

    // (match id, index a, index b) into `shuffled`
    let mut pairs: Vec<(usize, usize, usize)> = Vec::with_capacity(total_round_robin_matches(n));
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((pairs.len(), i, j));
        }
    }
    pairs.shuffle(rng);

    let selected = if n <= FULL_ROUND_ROBIN_LIMIT {
        pairs
    } else {
        cap_pairs(pairs, n)
    };

    debug!(
        competitors = n,
        candidates = total_round_robin_matches(n),
        selected = selected.len(),
        "generated schedule"
    );

    let per_round = (n / 2).max(1);
    selected
        .into_iter()
        .enumerate()
        .map(|(position, (id, a, b))| Match {
            id: format!("match-{id}"),
            round: (position / per_round) as u32 + 1,
            competitor_a: shuffled[a].clone(),
            competitor_b: shuffled[b].clone(),
            completed: false,
        })
        .collect()
}

/// Greedy cap pass over an already shuffled pair list.
fn cap_pairs(pairs: Vec<(usize, usize, usize)>, n: usize) -> Vec<(usize, usize, usize)> {
    let mut counts = vec![0usize; n];
    let mut selected = Vec::with_capacity(n * MAX_MATCHES_PER_COMPETITOR / 2);

    for (id, a, b) in pairs {
        if counts[a] < MAX_MATCHES_PER_COMPETITOR && counts[b] < MAX_MATCHES_PER_COMPETITOR {
            counts[a] += 1;
            counts[b] += 1;
            selected.push((id, a, b));
        }
    }

    selected
}

/// Drop repeated ids so a competitor can never be paired with itself.
fn unique_competitors(competitors: &[Competitor]) -> Vec<Competitor> {
    let mut seen = HashSet::with_capacity(competitors.len());
    let mut unique = Vec::with_capacity(competitors.len());
    for competitor in competitors {
        if seen.insert(&competitor.id) {
            unique.push(competitor.clone());
        } else {
            warn!(id = %competitor.id, "duplicate competitor ignored when scheduling");
        }
    }
    unique
}

/// Number of matches in a full round robin: `n * (n - 1) / 2`.
pub fn total_round_robin_matches(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Stage of a session, derived from how far through the schedule it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Opening,
    Mid,
    Late,
    Final,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Opening => "Opening Matches",
            Stage::Mid => "Mid Stage",
            Stage::Late => "Late Stage",
            Stage::Final => "Final Matches",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stage for the 1-based `match_number` out of `total_matches`.
pub fn stage_for(match_number: usize, total_matches: usize) -> Stage {
    if total_matches == 0 {
        return Stage::Opening;
    }
    let progress = match_number as f64 / total_matches as f64;
    if progress >= 0.9 {
        Stage::Final
    } else if progress >= 0.7 {
        Stage::Late
    } else if progress >= 0.4 {
        Stage::Mid
    } else {
        Stage::Opening
    }
}

/// Completion percentage, rounded to the nearest integer.
pub fn progress_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod schedule_tests;
