//! Match simulation strategies: turn two teams into a final score.
//!
//! The engine does not care which strategy produced a result, only that the
//! contract holds: non-negative scores, a winner that is one of the two teams,
//! and no draws outside the pool stage.

mod basic;
mod external;

pub use basic::{simulate_basic, BasicStrategy, BASIC_SUMMARY};
pub use external::{
    parse_score_response, post_process, ExternalStrategy, ScoreResponse, ScoreSource,
    SimulationError, KNOCKOUT_TIE_BREAK,
};

use crate::models::{MatchResult, Team};
use async_trait::async_trait;

/// Something that can decide a match between two teams.
#[async_trait]
pub trait MatchSimulationStrategy: Send + Sync {
    /// Simulate `team_a` vs `team_b` at `stage` ("Pool", "R16", "QF", "SF", "3rd", "Final").
    async fn simulate(&self, team_a: &Team, team_b: &Team, stage: &str) -> MatchResult;
}
