//! Knockout qualifiers and the best-third slot assignment.

use crate::models::pool::PoolId;
use crate::models::team::QualifiedTeam;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of third-placed teams that reach the knockout stage.
pub const QUALIFIED_THIRDS: usize = 4;

/// Cross-pool ranking of the six third-placed teams.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThirdPlaceRanking {
    /// Top four, best first.
    pub qualified: Vec<QualifiedTeam>,
    /// The rest, best first.
    pub eliminated: Vec<QualifiedTeam>,
}

/// Everyone who advanced out of the pools. Immutable once extracted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Qualifiers {
    pub winners: BTreeMap<PoolId, QualifiedTeam>,
    pub runners_up: BTreeMap<PoolId, QualifiedTeam>,
    pub third_places: ThirdPlaceRanking,
}

impl Qualifiers {
    pub fn winner(&self, pool_id: PoolId) -> Option<&QualifiedTeam> {
        self.winners.get(&pool_id)
    }

    pub fn runner_up(&self, pool_id: PoolId) -> Option<&QualifiedTeam> {
        self.runners_up.get(&pool_id)
    }
}

/// Bracket position for a best third. Slot X meets the winner of pool X.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum ThirdPlaceSlot {
    A,
    B,
    C,
    D,
}

impl ThirdPlaceSlot {
    /// Assignment order; a permutation's i-th team goes to `ALL[i]`.
    pub const ALL: [ThirdPlaceSlot; 4] = [
        ThirdPlaceSlot::A,
        ThirdPlaceSlot::B,
        ThirdPlaceSlot::C,
        ThirdPlaceSlot::D,
    ];

    /// Pools a third-placed team may come from to fill this slot.
    pub fn allowed_pools(self) -> [PoolId; 3] {
        match self {
            ThirdPlaceSlot::A => [PoolId::C, PoolId::E, PoolId::F],
            ThirdPlaceSlot::B => [PoolId::D, PoolId::E, PoolId::F],
            ThirdPlaceSlot::C => [PoolId::A, PoolId::E, PoolId::F],
            ThirdPlaceSlot::D => [PoolId::B, PoolId::E, PoolId::F],
        }
    }

    pub fn accepts(self, pool_id: PoolId) -> bool {
        self.allowed_pools().contains(&pool_id)
    }

    pub fn index(self) -> usize {
        match self {
            ThirdPlaceSlot::A => 0,
            ThirdPlaceSlot::B => 1,
            ThirdPlaceSlot::C => 2,
            ThirdPlaceSlot::D => 3,
        }
    }
}

/// Best thirds placed into slots A..D.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThirdPlaceAssignment {
    /// Indexed by `ThirdPlaceSlot::index`.
    pub slots: Vec<QualifiedTeam>,
    /// True when no permutation met every origin constraint and the input order was used.
    pub relaxed: bool,
}

impl ThirdPlaceAssignment {
    pub fn get(&self, slot: ThirdPlaceSlot) -> Option<&QualifiedTeam> {
        self.slots.get(slot.index())
    }

    /// Whether every slot holds a team from one of its allowed pools.
    pub fn satisfies_constraints(&self) -> bool {
        self.slots.len() == QUALIFIED_THIRDS
            && ThirdPlaceSlot::ALL
                .iter()
                .zip(&self.slots)
                .all(|(slot, team)| slot.accepts(team.pool_id))
    }
}
