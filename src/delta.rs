// src/delta.rs
//! Movement detection between the current ranking and the previous snapshot.
//!
//! Only the current top 10 is examined. Moves within the noise band emit
//! nothing; entries the previous snapshot never saw are debuts.

use std::collections::HashMap;

/// Positions a title must move before the change counts as notable.
pub const MOVEMENT_THRESHOLD: u32 = 5;

/// How many leading entries get movement analysis.
pub const TOP_MOVERS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementInsight {
    /// Not present in the previous snapshot.
    New,
    /// Climbed by this many places.
    Surge(u32),
    /// Fell by this many places.
    Drop(u32),
}

impl MovementInsight {
    /// One-line rendering for the commentary prompt and the page.
    pub fn describe(&self, title: &str, current_rank: u32) -> String {
        match self {
            MovementInsight::New => format!("{title}: debuts at #{current_rank} (NEW)"),
            MovementInsight::Surge(n) => {
                format!("{title}: surges {n} places up to #{current_rank}")
            }
            MovementInsight::Drop(n) => {
                format!("{title}: drops {n} places down to #{current_rank}")
            }
        }
    }
}

/// One classified entry of the current top 10, in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub title: String,
    pub current_rank: u32,
    pub insight: MovementInsight,
}

/// Classify movement for the current top entries against the previous
/// `title → rank` snapshot. First rule wins: absent → New; up more than the
/// threshold → Surge; down more than the threshold → Drop; otherwise silent.
pub fn analyze(current_top: &[(String, u32)], previous: &HashMap<String, u32>) -> Vec<Movement> {
    let mut out = Vec::new();
    for (title, rank) in current_top.iter().take(TOP_MOVERS) {
        let insight = match previous.get(title) {
            None => MovementInsight::New,
            Some(&prev) => {
                let climbed = prev as i64 - *rank as i64;
                if climbed > MOVEMENT_THRESHOLD as i64 {
                    MovementInsight::Surge(climbed as u32)
                } else if climbed < -(MOVEMENT_THRESHOLD as i64) {
                    MovementInsight::Drop((-climbed) as u32)
                } else {
                    continue;
                }
            }
        };
        out.push(Movement {
            title: title.clone(),
            current_rank: *rank,
            insight,
        });
    }
    out
}
