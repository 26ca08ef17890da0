//! Knockout match node, Round, Slot and MatchResult.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Bracket match identifier, e.g. `"R16-1"`, `"QF2"`, `"Final"`.
pub type MatchId = String;

/// Stage label passed to simulation strategies for pool matches.
pub const POOL_STAGE: &str = "Pool";

/// Knockout round of a bracket match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Round {
    R16,
    QF,
    SF,
    #[serde(rename = "3rd")]
    Third,
    Final,
}

impl Round {
    /// Stage label handed to a simulation strategy.
    pub fn stage_label(self) -> &'static str {
        match self {
            Round::R16 => "R16",
            Round::QF => "QF",
            Round::SF => "SF",
            Round::Third => "3rd",
            Round::Final => "Final",
        }
    }
}

/// One of the two team positions in a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

/// Where a match's winner (or semi-final loser) goes next.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlotTarget {
    pub match_id: MatchId,
    pub slot: Slot,
}

impl SlotTarget {
    pub fn new(match_id: impl Into<String>, slot: Slot) -> Self {
        Self {
            match_id: match_id.into(),
            slot,
        }
    }
}

/// Outcome of a played match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    pub score_a: u32,
    pub score_b: u32,
    /// Must be `team_a_id` or `team_b_id`.
    pub winner_id: TeamId,
    pub summary: Option<String>,
    pub is_simulated: bool,
}

impl MatchResult {
    /// Result from final scores; team B wins unless A scored strictly more.
    pub fn from_scores(team_a: &Team, team_b: &Team, score_a: u32, score_b: u32) -> Self {
        let winner_id = if score_a > score_b {
            team_a.id.clone()
        } else {
            team_b.id.clone()
        };
        Self {
            team_a_id: team_a.id.clone(),
            team_b_id: team_b.id.clone(),
            score_a,
            score_b,
            winner_id,
            summary: None,
            is_simulated: false,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn simulated(mut self) -> Self {
        self.is_simulated = true;
        self
    }

    pub fn is_tie(&self) -> bool {
        self.score_a == self.score_b
    }
}

/// A bracket node: two team slots, an optional result and its outgoing edges.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    pub id: MatchId,
    pub round: Round,
    /// Human-readable label, e.g. "R16: 1A vs Best 3rd".
    pub label: String,
    /// None until a qualifier or previous winner fills it.
    pub team_a: Option<Team>,
    pub team_b: Option<Team>,
    /// None if not yet played.
    pub result: Option<MatchResult>,
    /// Where the winner advances. None for Final and Bronze.
    pub next: Option<SlotTarget>,
    /// Where the loser drops to. Only semi-finals have one.
    pub loser_next: Option<SlotTarget>,
}

impl KnockoutMatch {
    pub fn new(id: impl Into<String>, label: impl Into<String>, round: Round) -> Self {
        Self {
            id: id.into(),
            round,
            label: label.into(),
            team_a: None,
            team_b: None,
            result: None,
            next: None,
            loser_next: None,
        }
    }

    pub fn with_teams(mut self, team_a: Team, team_b: Team) -> Self {
        self.team_a = Some(team_a);
        self.team_b = Some(team_b);
        self
    }

    pub fn advancing_to(mut self, target: SlotTarget) -> Self {
        self.next = Some(target);
        self
    }

    pub fn dropping_to(mut self, target: SlotTarget) -> Self {
        self.loser_next = Some(target);
        self
    }

    pub fn team(&self, slot: Slot) -> Option<&Team> {
        match slot {
            Slot::A => self.team_a.as_ref(),
            Slot::B => self.team_b.as_ref(),
        }
    }

    /// Put a team into a slot, replacing whatever was there.
    pub fn set_team(&mut self, slot: Slot, team: Team) {
        match slot {
            Slot::A => self.team_a = Some(team),
            Slot::B => self.team_b = Some(team),
        }
    }

    /// Both contenders, once both slots are filled.
    pub fn contenders(&self) -> Option<(&Team, &Team)> {
        match (&self.team_a, &self.team_b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.contenders().is_some()
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    /// Winning team, once played.
    pub fn winner(&self) -> Option<&Team> {
        let result = self.result.as_ref()?;
        let (a, b) = self.contenders()?;
        if result.winner_id == a.id {
            Some(a)
        } else {
            Some(b)
        }
    }

    /// Losing team, once played.
    pub fn loser(&self) -> Option<&Team> {
        let result = self.result.as_ref()?;
        let (a, b) = self.contenders()?;
        if result.winner_id == a.id {
            Some(b)
        } else {
            Some(a)
        }
    }
}
