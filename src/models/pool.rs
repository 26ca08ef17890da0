//! Pool (round-robin group of 4) and PoolId.

use crate::models::team::PoolTeam;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Teams per pool.
pub const POOL_SIZE: usize = 4;

/// Round-robin matches each team plays inside its pool.
pub const POOL_MATCHES_PER_TEAM: u32 = 3;

/// Pool identifier, A through F.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum PoolId {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl PoolId {
    pub const ALL: [PoolId; 6] = [PoolId::A, PoolId::B, PoolId::C, PoolId::D, PoolId::E, PoolId::F];

    pub fn as_str(self) -> &'static str {
        match self {
            PoolId::A => "A",
            PoolId::B => "B",
            PoolId::C => "C",
            PoolId::D => "D",
            PoolId::E => "E",
            PoolId::F => "F",
        }
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(PoolId::A),
            "B" => Ok(PoolId::B),
            "C" => Ok(PoolId::C),
            "D" => Ok(PoolId::D),
            "E" => Ok(PoolId::E),
            "F" => Ok(PoolId::F),
            other => Err(format!("unknown pool '{}'", other)),
        }
    }
}

/// A pool of exactly four teams. Membership never changes after the draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub teams: Vec<PoolTeam>,
}

impl Pool {
    pub fn new(id: PoolId, teams: Vec<PoolTeam>) -> Self {
        Self { id, teams }
    }

    /// True once every team has played all of its round-robin matches.
    pub fn is_complete(&self) -> bool {
        self.teams.len() == POOL_SIZE
            && self.teams.iter().all(|t| t.played == POOL_MATCHES_PER_TEAM)
    }

    /// Whether `teams` holds exactly this pool's members (any order), with
    /// unchanged identity and rating. Only table stats may differ.
    pub fn has_same_members(&self, teams: &[PoolTeam]) -> bool {
        teams.len() == self.teams.len()
            && self
                .teams
                .iter()
                .all(|t| teams.iter().filter(|o| o.team == t.team).count() == 1)
    }
}
