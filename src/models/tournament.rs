//! Tournament session and TournamentPhase.

use crate::models::bracket::Bracket;
use crate::models::draw::default_draw;
use crate::models::game::MatchId;
use crate::models::pool::{Pool, PoolId, POOL_MATCHES_PER_TEAM, POOL_SIZE};
use crate::models::qualification::{Qualifiers, ThirdPlaceAssignment};
use crate::models::team::{PoolTeam, Team};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Some pools have not played all round-robin matches yet.
    #[error("Please simulate all pools first (incomplete: {})", format_pools(.incomplete))]
    PoolsIncomplete { incomplete: Vec<PoolId> },
    /// Tournament is not in a state that allows this action.
    #[error("Invalid state for this action")]
    InvalidState,
    /// The draw does not hold exactly pools A..F with four teams each.
    #[error("Invalid draw: {0}")]
    InvalidDraw(String),
    #[error("Pool {0} not found")]
    PoolNotFound(PoolId),
    /// A pool update tried to change membership or carried impossible stats.
    #[error("Invalid update for pool {pool}: {reason}")]
    InvalidPoolUpdate { pool: PoolId, reason: String },
    /// The qualifiers lack a team the bracket seeding needs.
    #[error("Missing qualifier: {0}")]
    MissingQualifier(String),
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    /// The match is still waiting for a qualifier or a previous winner.
    #[error("Match {0} does not have both teams yet")]
    MatchNotReady(MatchId),
    /// The result names teams other than the ones in the match.
    #[error("Result does not belong to match {0}")]
    ResultTeamsMismatch(MatchId),
    #[error("Winner {winner} is not playing in match {match_id}")]
    WinnerNotInMatch { match_id: MatchId, winner: String },
    /// Knockout matches need a winner.
    #[error("Match {0} cannot end in a draw")]
    TiedResult(MatchId),
    /// A different result would overwrite a slot that a later match already played with.
    #[error("Match {match_id} already decided and {downstream} has been played")]
    DownstreamAlreadyPlayed { match_id: MatchId, downstream: MatchId },
    /// The bracket was reset or rebuilt while a simulation was running.
    #[error("Bracket changed while the match was being simulated")]
    StaleBracket,
}

fn format_pools(pools: &[PoolId]) -> String {
    pools.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// Pool matches being simulated or edited.
    #[default]
    Pools,
    /// Bracket built; knockout matches being played.
    Knockout,
    /// Final and Bronze decided.
    Completed,
}

/// Full tournament session: pools, qualifiers, bracket and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub phase: TournamentPhase,
    pub pools: Vec<Pool>,
    /// Set once pools are finished.
    pub qualifiers: Option<Qualifiers>,
    pub third_place_assignment: Option<ThirdPlaceAssignment>,
    pub bracket: Option<Bracket>,
    /// The draw this session started from, restored by `reset`.
    #[serde(skip)]
    initial_pools: Vec<Pool>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::with_pools(default_draw())
    }
}

impl Tournament {
    /// Create a session from a draw: pools A..F in order, four teams each.
    pub fn new(pools: Vec<Pool>) -> Result<Self, TournamentError> {
        validate_draw(&pools)?;
        Ok(Self::with_pools(pools))
    }

    fn with_pools(pools: Vec<Pool>) -> Self {
        Self {
            phase: TournamentPhase::Pools,
            initial_pools: pools.clone(),
            pools,
            qualifiers: None,
            third_place_assignment: None,
            bracket: None,
        }
    }

    pub fn pool(&self, pool_id: PoolId) -> Option<&Pool> {
        self.pools.iter().find(|p| p.id == pool_id)
    }

    pub fn pool_mut(&mut self, pool_id: PoolId) -> Option<&mut Pool> {
        self.pools.iter_mut().find(|p| p.id == pool_id)
    }

    /// Pools where not every team has played three matches.
    pub fn incomplete_pools(&self) -> Vec<PoolId> {
        self.pools.iter().filter(|p| !p.is_complete()).map(|p| p.id).collect()
    }

    /// Replace a pool's teams (Pools phase only). Same four members with unchanged
    /// name, flag and rating; only stats may change.
    pub fn update_pool(
        &mut self,
        pool_id: PoolId,
        teams: Vec<PoolTeam>,
    ) -> Result<(), TournamentError> {
        if self.phase != TournamentPhase::Pools {
            return Err(TournamentError::InvalidState);
        }
        let pool = self.pool_mut(pool_id).ok_or(TournamentError::PoolNotFound(pool_id))?;
        if !pool.has_same_members(&teams) {
            return Err(TournamentError::InvalidPoolUpdate {
                pool: pool_id,
                reason: "teams must be the same four members, unchanged".to_string(),
            });
        }
        if let Some(t) = teams.iter().find(|t| t.played > POOL_MATCHES_PER_TEAM) {
            return Err(TournamentError::InvalidPoolUpdate {
                pool: pool_id,
                reason: format!(
                    "{} cannot have played more than {} matches",
                    t.id(),
                    POOL_MATCHES_PER_TEAM
                ),
            });
        }
        pool.teams = teams;
        Ok(())
    }

    /// Back to the Pools phase with the original draw. Any running simulation is discarded.
    pub fn reset(&mut self) {
        *self = Self::with_pools(self.initial_pools.clone());
    }

    /// Final winner, once decided.
    pub fn champion(&self) -> Option<&Team> {
        self.bracket.as_ref()?.champion()
    }

    /// Bronze winner, once decided.
    pub fn third_place(&self) -> Option<&Team> {
        self.bracket.as_ref()?.third_place()
    }
}

fn validate_draw(pools: &[Pool]) -> Result<(), TournamentError> {
    if pools.len() != PoolId::ALL.len() {
        return Err(TournamentError::InvalidDraw(format!(
            "expected {} pools, got {}",
            PoolId::ALL.len(),
            pools.len()
        )));
    }
    for (pool, expected) in pools.iter().zip(PoolId::ALL) {
        if pool.id != expected {
            return Err(TournamentError::InvalidDraw(format!(
                "expected pool {} but found pool {}",
                expected, pool.id
            )));
        }
        if pool.teams.len() != POOL_SIZE {
            return Err(TournamentError::InvalidDraw(format!(
                "pool {} has {} teams",
                pool.id,
                pool.teams.len()
            )));
        }
    }
    let mut ids: Vec<&str> = pools.iter().flat_map(|p| p.teams.iter().map(PoolTeam::id)).collect();
    ids.sort_unstable();
    if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
        return Err(TournamentError::InvalidDraw(format!("duplicate team id '{}'", w[0])));
    }
    Ok(())
}
