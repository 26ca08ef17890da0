//! Knockout stage: build the bracket from the pools, then record results until
//! Final and Bronze are decided.

use crate::logic::bracket::build_bracket;
use crate::logic::propagation::apply_result;
use crate::logic::standings::extract_qualifiers;
use crate::logic::third_place::solve_third_place_assignment;
use crate::models::{
    BracketId, MatchId, MatchResult, Team, Tournament, TournamentError, TournamentPhase,
};
use crate::simulation::MatchSimulationStrategy;
use std::sync::RwLock;

/// Finish the pool stage: extract qualifiers, place the best thirds, build the bracket.
///
/// Fails with `PoolsIncomplete` (and leaves the session untouched) while any pool
/// still has matches to play.
pub fn finish_pools(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.phase != TournamentPhase::Pools {
        return Err(TournamentError::InvalidState);
    }
    let qualifiers = extract_qualifiers(&tournament.pools)?;
    let assignment = solve_third_place_assignment(&qualifiers.third_places.qualified);
    let bracket = build_bracket(&qualifiers, &assignment)?;

    log::info!(
        "Pools finished; best thirds: {}",
        qualifiers
            .third_places
            .qualified
            .iter()
            .map(|t| format!("{} ({})", t.id(), t.pool_id))
            .collect::<Vec<_>>()
            .join(", ")
    );

    tournament.qualifiers = Some(qualifiers);
    tournament.third_place_assignment = Some(assignment);
    tournament.bracket = Some(bracket);
    tournament.phase = TournamentPhase::Knockout;
    Ok(())
}

/// Record a knockout result (Knockout or Completed phase).
pub fn apply_match_result(
    tournament: &mut Tournament,
    match_id: &str,
    result: MatchResult,
) -> Result<(), TournamentError> {
    if tournament.phase == TournamentPhase::Pools {
        return Err(TournamentError::InvalidState);
    }
    let bracket = tournament.bracket.as_mut().ok_or(TournamentError::InvalidState)?;
    apply_result(bracket, match_id, result)?;

    tournament.phase = if bracket.is_complete() {
        TournamentPhase::Completed
    } else {
        TournamentPhase::Knockout
    };
    if tournament.phase == TournamentPhase::Completed {
        log::info!(
            "Tournament complete: champion {}, third place {}",
            bracket.champion().map(|t| t.name.as_str()).unwrap_or("?"),
            bracket.third_place().map(|t| t.name.as_str()).unwrap_or("?"),
        );
    }
    Ok(())
}

/// What a simulation needs to know about a match, captured under the lock.
#[derive(Clone, Debug)]
pub struct PendingMatch {
    pub bracket_id: BracketId,
    pub match_id: MatchId,
    pub team_a: Team,
    pub team_b: Team,
    pub stage: &'static str,
}

/// Snapshot a ready match for simulation.
pub fn pending_match(
    tournament: &Tournament,
    match_id: &str,
) -> Result<PendingMatch, TournamentError> {
    let bracket = tournament.bracket.as_ref().ok_or(TournamentError::InvalidState)?;
    let m = bracket
        .get(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    let (team_a, team_b) = m
        .contenders()
        .ok_or_else(|| TournamentError::MatchNotReady(match_id.to_string()))?;
    Ok(PendingMatch {
        bracket_id: bracket.id,
        match_id: m.id.clone(),
        team_a: team_a.clone(),
        team_b: team_b.clone(),
        stage: m.round.stage_label(),
    })
}

/// Apply a simulated result, unless the bracket was rebuilt or reset meanwhile.
pub fn apply_simulated_result(
    tournament: &mut Tournament,
    pending: &PendingMatch,
    result: MatchResult,
) -> Result<(), TournamentError> {
    let current = tournament.bracket.as_ref().map(|b| b.id);
    if current != Some(pending.bracket_id) {
        log::info!("Discarding result for {}: bracket changed", pending.match_id);
        return Err(TournamentError::StaleBracket);
    }
    apply_match_result(tournament, &pending.match_id, result)
}

/// Simulate a match with `strategy` and apply the result.
///
/// The lock is only held to snapshot the match and to apply the result, never
/// across the strategy call. Dropping the returned future before it resolves
/// leaves the session untouched.
pub async fn simulate_match<S>(
    session: &RwLock<Tournament>,
    match_id: &str,
    strategy: &S,
) -> Result<MatchResult, TournamentError>
where
    S: MatchSimulationStrategy + ?Sized,
{
    let pending = {
        let guard = session.read().map_err(|_| TournamentError::InvalidState)?;
        pending_match(&guard, match_id)?
    };
    let result = strategy
        .simulate(&pending.team_a, &pending.team_b, pending.stage)
        .await;
    let mut guard = session.write().map_err(|_| TournamentError::InvalidState)?;
    apply_simulated_result(&mut guard, &pending, result.clone())?;
    Ok(result)
}
