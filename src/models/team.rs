//! Team, PoolTeam (team + pool table stats) and QualifiedTeam (team + origin pool).

use crate::models::pool::PoolId;
use serde::{Deserialize, Serialize};

/// Short team code, e.g. `"nzl"`.
pub type TeamId = String;

/// A national team. `rating` only feeds the simulation strategies.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Emoji or short code.
    pub flag: String,
    pub rating: i32,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        flag: impl Into<String>,
        rating: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            flag: flag.into(),
            rating,
        }
    }
}

/// A team inside a pool, with its round-robin table stats.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolTeam {
    #[serde(flatten)]
    pub team: Team,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    /// Table points.
    pub points: u32,
    /// Point difference.
    pub diff: i32,
}

impl PoolTeam {
    /// Wrap a team with zeroed stats.
    pub fn new(team: Team) -> Self {
        Self {
            team,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            points: 0,
            diff: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.team.id
    }

    /// Clear all stats (before re-simulating a pool).
    pub fn reset_stats(&mut self) {
        self.played = 0;
        self.won = 0;
        self.drawn = 0;
        self.lost = 0;
        self.points = 0;
        self.diff = 0;
    }

    /// Record a win by `margin` points.
    pub fn record_win(&mut self, table_points: u32, margin: i32) {
        self.won += 1;
        self.points = self.points.saturating_add(table_points);
        self.diff = self.diff.saturating_add(margin);
    }

    /// Record a loss by `margin` points.
    pub fn record_loss(&mut self, margin: i32) {
        self.lost += 1;
        self.diff = self.diff.saturating_sub(margin);
    }
}

/// A knockout qualifier: the team plus the pool it came from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QualifiedTeam {
    #[serde(flatten)]
    pub team: Team,
    pub pool_id: PoolId,
}

impl QualifiedTeam {
    pub fn new(team: Team, pool_id: PoolId) -> Self {
        Self { team, pool_id }
    }

    /// Tag a pool entry with its origin pool (stats are dropped).
    pub fn from_pool_team(pool_team: &PoolTeam, pool_id: PoolId) -> Self {
        Self::new(pool_team.team.clone(), pool_id)
    }

    pub fn id(&self) -> &str {
        &self.team.id
    }
}
