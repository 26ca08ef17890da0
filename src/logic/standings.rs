//! Pool standings and qualifier extraction.

use crate::models::{
    Pool, PoolId, PoolTeam, QualifiedTeam, Qualifiers, ThirdPlaceRanking, TournamentError,
    QUALIFIED_THIRDS,
};
use std::cmp::Ordering;

/// Intra-pool order: points desc, then point difference desc.
fn compare_in_pool(a: &PoolTeam, b: &PoolTeam) -> Ordering {
    b.points.cmp(&a.points).then(b.diff.cmp(&a.diff))
}

/// Cross-pool order for third-placed teams: points, difference, then rating (all desc).
fn compare_thirds(a: &PoolTeam, b: &PoolTeam) -> Ordering {
    compare_in_pool(a, b).then(b.team.rating.cmp(&a.team.rating))
}

/// Rank a pool's teams. Stable: fully tied teams keep their input order.
pub fn rank(teams: &[PoolTeam]) -> Vec<PoolTeam> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(compare_in_pool);
    ranked
}

/// Winner, runner-up and third-place candidate of one pool.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolStanding {
    pub pool_id: PoolId,
    pub winner: PoolTeam,
    pub runner_up: PoolTeam,
    pub third: PoolTeam,
}

/// Standing of a pool, or None if it has fewer than three teams.
pub fn pool_standing(pool: &Pool) -> Option<PoolStanding> {
    let mut ranked = rank(&pool.teams).into_iter();
    Some(PoolStanding {
        pool_id: pool.id,
        winner: ranked.next()?,
        runner_up: ranked.next()?,
        third: ranked.next()?,
    })
}

/// Rank third-placed candidates across pools; the top four qualify.
pub fn rank_third_places(candidates: &[(PoolId, PoolTeam)]) -> ThirdPlaceRanking {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|(_, a), (_, b)| compare_thirds(a, b));
    let mut qualified: Vec<QualifiedTeam> = ranked
        .iter()
        .map(|(pool_id, team)| QualifiedTeam::from_pool_team(team, *pool_id))
        .collect();
    let eliminated = qualified.split_off(QUALIFIED_THIRDS.min(qualified.len()));
    ThirdPlaceRanking {
        qualified,
        eliminated,
    }
}

/// Extract pool winners, runners-up and the best thirds.
///
/// Every pool must have completed its round robin; otherwise the incomplete
/// pools are reported and nothing is extracted.
pub fn extract_qualifiers(pools: &[Pool]) -> Result<Qualifiers, TournamentError> {
    let incomplete: Vec<PoolId> = pools.iter().filter(|p| !p.is_complete()).map(|p| p.id).collect();
    if !incomplete.is_empty() {
        return Err(TournamentError::PoolsIncomplete { incomplete });
    }

    let mut qualifiers = Qualifiers::default();
    let mut thirds = Vec::with_capacity(pools.len());
    for standing in pools.iter().filter_map(pool_standing) {
        qualifiers.winners.insert(
            standing.pool_id,
            QualifiedTeam::from_pool_team(&standing.winner, standing.pool_id),
        );
        qualifiers.runners_up.insert(
            standing.pool_id,
            QualifiedTeam::from_pool_team(&standing.runner_up, standing.pool_id),
        );
        thirds.push((standing.pool_id, standing.third));
    }

    qualifiers.third_places = rank_third_places(&thirds);
    if qualifiers.third_places.qualified.len() < QUALIFIED_THIRDS {
        return Err(TournamentError::PoolsIncomplete {
            incomplete: PoolId::ALL
                .into_iter()
                .filter(|id| !qualifiers.winners.contains_key(id))
                .collect(),
        });
    }
    Ok(qualifiers)
}
