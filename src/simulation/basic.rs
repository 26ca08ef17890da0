//! Rating-based simulation. Always available; also the fallback for failed external strategies.

use crate::models::{MatchResult, Team};
use crate::simulation::MatchSimulationStrategy;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

pub const BASIC_SUMMARY: &str = "Simulated based on team rating.";

/// Simulate with the rating formula.
///
/// A wins when a uniform draw falls below `0.5 + ratingDiff * 0.025` (not clamped,
/// so a gap of 20+ points makes the result certain). The loser scores
/// `12 + floor(uniform(0, 25))`, the winner adds
/// `1 + floor(uniform(0, 20)) + floor(|ratingDiff| / 2)`.
/// The margin is at least one, so the result is never a draw.
pub fn simulate_basic<R: Rng + ?Sized>(team_a: &Team, team_b: &Team, rng: &mut R) -> MatchResult {
    let rating_diff = i64::from(team_a.rating) - i64::from(team_b.rating);
    let win_prob_a = 0.5 + rating_diff as f64 * 0.025;
    let a_wins = rng.gen::<f64>() < win_prob_a;

    let base_score = 12 + rng.gen_range(0..25u32);
    let half_gap = u32::try_from(rating_diff.unsigned_abs() / 2).unwrap_or(u32::MAX);
    let margin = (1 + rng.gen_range(0..20u32)).saturating_add(half_gap);
    let winning_score = base_score.saturating_add(margin);
    let (score_a, score_b) = if a_wins {
        (winning_score, base_score)
    } else {
        (base_score, winning_score)
    };

    MatchResult::from_scores(team_a, team_b, score_a, score_b)
        .with_summary(BASIC_SUMMARY)
        .simulated()
}

/// `simulate_basic` behind the strategy trait, with an optional delay so a result
/// does not arrive instantly.
#[derive(Clone, Debug, Default)]
pub struct BasicStrategy {
    pub delay: Duration,
}

impl BasicStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl MatchSimulationStrategy for BasicStrategy {
    async fn simulate(&self, team_a: &Team, team_b: &Team, _stage: &str) -> MatchResult {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        simulate_basic(team_a, team_b, &mut rand::thread_rng())
    }
}
