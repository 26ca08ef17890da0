//! Result propagation: record a knockout result and push winner/loser down the bracket.

use crate::models::{Bracket, KnockoutMatch, MatchResult, SlotTarget, Team, TournamentError};

/// Check `result` against the match it is being applied to.
fn validate_result(m: &KnockoutMatch, result: &MatchResult) -> Result<(), TournamentError> {
    let (a, b) = m
        .contenders()
        .ok_or_else(|| TournamentError::MatchNotReady(m.id.clone()))?;
    if result.team_a_id != a.id || result.team_b_id != b.id {
        return Err(TournamentError::ResultTeamsMismatch(m.id.clone()));
    }
    if result.winner_id != a.id && result.winner_id != b.id {
        return Err(TournamentError::WinnerNotInMatch {
            match_id: m.id.clone(),
            winner: result.winner_id.clone(),
        });
    }
    if result.is_tie() {
        return Err(TournamentError::TiedResult(m.id.clone()));
    }
    Ok(())
}

/// Apply a finished match's result to the bracket.
///
/// Stores the result, writes the winner into the advance target's slot and,
/// for semi-finals, the loser into the bronze match. Target slots are
/// overwritten. Re-applying the identical result is a no-op. Replacing an
/// existing result is rejected once a target match has been played.
///
/// Nothing is mutated when an error is returned.
pub fn apply_result(
    bracket: &mut Bracket,
    match_id: &str,
    result: MatchResult,
) -> Result<(), TournamentError> {
    let m = bracket
        .get(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    validate_result(m, &result)?;

    if let Some(previous) = &m.result {
        if *previous == result {
            log::debug!("Result for {} unchanged; nothing to propagate", match_id);
            return Ok(());
        }
        let played_target = [&m.next, &m.loser_next]
            .into_iter()
            .flatten()
            .find(|t| bracket.get(&t.match_id).is_some_and(KnockoutMatch::is_played));
        if let Some(target) = played_target {
            return Err(TournamentError::DownstreamAlreadyPlayed {
                match_id: match_id.to_string(),
                downstream: target.match_id.clone(),
            });
        }
    }

    let mut decided = m.clone();
    decided.result = Some(result);
    let advance = decided.next.clone().zip(decided.winner().cloned());
    let relegate = decided.loser_next.clone().zip(decided.loser().cloned());

    // Targets must exist before anything is written.
    for (target, _) in advance.iter().chain(relegate.iter()) {
        if bracket.get(&target.match_id).is_none() {
            return Err(TournamentError::MatchNotFound(target.match_id.clone()));
        }
    }

    log::debug!(
        "{} won by {}",
        match_id,
        decided.winner().map(|t| t.id.as_str()).unwrap_or("?")
    );
    if let Some(node) = bracket.get_mut(match_id) {
        *node = decided;
    }
    for (target, team) in advance.into_iter().chain(relegate) {
        write_slot(bracket, &target, team);
    }
    Ok(())
}

fn write_slot(bracket: &mut Bracket, target: &SlotTarget, team: Team) {
    if let Some(m) = bracket.get_mut(&target.match_id) {
        log::debug!("{} -> {} slot {:?}", team.id, target.match_id, target.slot);
        m.set_team(target.slot, team);
    }
}
