//! Bracket: the 16 knockout match nodes of one tournament run.

use crate::models::game::{KnockoutMatch, Round};
use crate::models::team::Team;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one bracket generation. A reset or rebuild produces a new id.
pub type BracketId = Uuid;

pub const FINAL_ID: &str = "Final";
pub const BRONZE_ID: &str = "Bronze";

/// Fixed-topology elimination graph from Round of 16 to Final/Bronze.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    /// R16-1..8, QF1..4, SF1, SF2, Bronze, Final.
    pub matches: Vec<KnockoutMatch>,
}

impl Bracket {
    pub fn new(matches: Vec<KnockoutMatch>) -> Self {
        Self {
            id: Uuid::new_v4(),
            matches,
        }
    }

    pub fn get(&self, match_id: &str) -> Option<&KnockoutMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn get_mut(&mut self, match_id: &str) -> Option<&mut KnockoutMatch> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    pub fn round(&self, round: Round) -> impl Iterator<Item = &KnockoutMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// Terminal state: Final and Bronze both decided.
    pub fn is_complete(&self) -> bool {
        [FINAL_ID, BRONZE_ID]
            .iter()
            .all(|id| self.get(id).is_some_and(KnockoutMatch::is_played))
    }

    pub fn champion(&self) -> Option<&Team> {
        self.get(FINAL_ID)?.winner()
    }

    pub fn runner_up(&self) -> Option<&Team> {
        self.get(FINAL_ID)?.loser()
    }

    /// Winner of the bronze match.
    pub fn third_place(&self) -> Option<&Team> {
        self.get(BRONZE_ID)?.winner()
    }
}
