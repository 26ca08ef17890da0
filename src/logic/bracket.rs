//! Bracket construction: fixed Round-of-16 seeding and the advance/loser wiring.

use crate::models::{
    Bracket, KnockoutMatch, PoolId, Qualifiers, Round, Slot, SlotTarget, Team,
    ThirdPlaceAssignment, ThirdPlaceSlot, TournamentError, BRONZE_ID, FINAL_ID,
};

/// Where an R16 contender comes from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Seed {
    Winner(PoolId),
    RunnerUp(PoolId),
    BestThird(ThirdPlaceSlot),
}

/// One row of the Round-of-16 seeding table.
#[derive(Clone, Copy, Debug)]
pub struct R16Seeding {
    pub id: &'static str,
    pub label: &'static str,
    pub team_a: Seed,
    pub team_b: Seed,
    pub next: (&'static str, Slot),
}

/// Round-of-16 pairings. Consumers rely on these exact ids.
pub const R16_SEEDING: [R16Seeding; 8] = [
    R16Seeding {
        id: "R16-1",
        label: "R16: 1A vs Best 3rd",
        team_a: Seed::Winner(PoolId::A),
        team_b: Seed::BestThird(ThirdPlaceSlot::A),
        next: ("QF1", Slot::A),
    },
    R16Seeding {
        id: "R16-2",
        label: "R16: 1B vs Best 3rd",
        team_a: Seed::Winner(PoolId::B),
        team_b: Seed::BestThird(ThirdPlaceSlot::B),
        next: ("QF1", Slot::B),
    },
    R16Seeding {
        id: "R16-3",
        label: "R16: 2C vs 2F",
        team_a: Seed::RunnerUp(PoolId::C),
        team_b: Seed::RunnerUp(PoolId::F),
        next: ("QF2", Slot::A),
    },
    R16Seeding {
        id: "R16-4",
        label: "R16: 1E vs 2D",
        team_a: Seed::Winner(PoolId::E),
        team_b: Seed::RunnerUp(PoolId::D),
        next: ("QF2", Slot::B),
    },
    R16Seeding {
        id: "R16-5",
        label: "R16: 2A vs 2E",
        team_a: Seed::RunnerUp(PoolId::A),
        team_b: Seed::RunnerUp(PoolId::E),
        next: ("QF3", Slot::A),
    },
    R16Seeding {
        id: "R16-6",
        label: "R16: 1F vs 2B",
        team_a: Seed::Winner(PoolId::F),
        team_b: Seed::RunnerUp(PoolId::B),
        next: ("QF3", Slot::B),
    },
    R16Seeding {
        id: "R16-7",
        label: "R16: 1C vs Best 3rd",
        team_a: Seed::Winner(PoolId::C),
        team_b: Seed::BestThird(ThirdPlaceSlot::C),
        next: ("QF4", Slot::A),
    },
    R16Seeding {
        id: "R16-8",
        label: "R16: 1D vs Best 3rd",
        team_a: Seed::Winner(PoolId::D),
        team_b: Seed::BestThird(ThirdPlaceSlot::D),
        next: ("QF4", Slot::B),
    },
];

/// Later rounds: (id, label, round, winner target, loser target). All start empty.
const LATER_ROUNDS: [(&str, &str, Round, Option<(&str, Slot)>, Option<(&str, Slot)>); 8] = [
    ("QF1", "QF1", Round::QF, Some(("SF1", Slot::A)), None),
    ("QF2", "QF2", Round::QF, Some(("SF1", Slot::B)), None),
    ("QF3", "QF3", Round::QF, Some(("SF2", Slot::A)), None),
    ("QF4", "QF4", Round::QF, Some(("SF2", Slot::B)), None),
    ("SF1", "Semi-Final 1", Round::SF, Some((FINAL_ID, Slot::A)), Some((BRONZE_ID, Slot::A))),
    ("SF2", "Semi-Final 2", Round::SF, Some((FINAL_ID, Slot::B)), Some((BRONZE_ID, Slot::B))),
    (BRONZE_ID, "Bronze Final", Round::Third, None, None),
    (FINAL_ID, "Final", Round::Final, None, None),
];

fn seeded_team(
    seed: Seed,
    qualifiers: &Qualifiers,
    assignment: &ThirdPlaceAssignment,
) -> Result<Team, TournamentError> {
    let team = match seed {
        Seed::Winner(pool_id) => qualifiers.winner(pool_id),
        Seed::RunnerUp(pool_id) => qualifiers.runner_up(pool_id),
        Seed::BestThird(slot) => assignment.get(slot),
    };
    team.map(|q| q.team.clone())
        .ok_or_else(|| TournamentError::MissingQualifier(format!("{:?}", seed)))
}

/// Build the 16-match bracket: R16 seeded from the qualifiers, everything later empty.
pub fn build_bracket(
    qualifiers: &Qualifiers,
    assignment: &ThirdPlaceAssignment,
) -> Result<Bracket, TournamentError> {
    let mut matches = Vec::with_capacity(R16_SEEDING.len() + LATER_ROUNDS.len());
    for seeding in &R16_SEEDING {
        let team_a = seeded_team(seeding.team_a, qualifiers, assignment)?;
        let team_b = seeded_team(seeding.team_b, qualifiers, assignment)?;
        let (next_id, next_slot) = seeding.next;
        matches.push(
            KnockoutMatch::new(seeding.id, seeding.label, Round::R16)
                .with_teams(team_a, team_b)
                .advancing_to(SlotTarget::new(next_id, next_slot)),
        );
    }
    for (id, label, round, next, loser_next) in LATER_ROUNDS {
        let mut m = KnockoutMatch::new(id, label, round);
        if let Some((next_id, slot)) = next {
            m = m.advancing_to(SlotTarget::new(next_id, slot));
        }
        if let Some((loser_id, slot)) = loser_next {
            m = m.dropping_to(SlotTarget::new(loser_id, slot));
        }
        matches.push(m);
    }
    Ok(Bracket::new(matches))
}
