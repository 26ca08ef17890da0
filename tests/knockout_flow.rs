//! Integration tests for the tournament session: pools -> knockout -> champion.

mod common;

use async_trait::async_trait;
use common::{completed_tournament, HigherRatingWins};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rugby_knockout_web::models::default_draw;
use rugby_knockout_web::{
    apply_match_result, finish_pools, simulate_all_pools, simulate_match, simulate_single_pool,
    MatchResult, MatchSimulationStrategy, PoolId, Team, Tournament, TournamentError,
    TournamentPhase,
};
use std::sync::{Arc, RwLock};
use std::time::Duration;

fn slot_ids(t: &Tournament, id: &str) -> (Option<String>, Option<String>) {
    let m = t.bracket.as_ref().unwrap().get(id).unwrap();
    (
        m.team_a.as_ref().map(|t| t.id.clone()),
        m.team_b.as_ref().map(|t| t.id.clone()),
    )
}

#[test]
fn finish_pools_fails_until_every_pool_is_complete() {
    let mut t = Tournament::default();
    simulate_single_pool(&mut t, PoolId::A, &mut StdRng::seed_from_u64(7)).unwrap();
    let err = finish_pools(&mut t).unwrap_err();
    assert_eq!(
        err,
        TournamentError::PoolsIncomplete {
            incomplete: vec![PoolId::B, PoolId::C, PoolId::D, PoolId::E, PoolId::F]
        }
    );
    assert_eq!(t.phase, TournamentPhase::Pools);
    assert!(t.bracket.is_none());
}

#[test]
fn finish_pools_fails_when_one_team_is_short_a_match() {
    let mut t = completed_tournament();
    let mut teams = t.pool(PoolId::E).unwrap().teams.clone();
    teams[3].played = 2;
    t.update_pool(PoolId::E, teams).unwrap();
    assert!(matches!(
        finish_pools(&mut t),
        Err(TournamentError::PoolsIncomplete { ref incomplete }) if incomplete == &[PoolId::E]
    ));
}

#[test]
fn finish_pools_builds_bracket_and_locks_pools() {
    let mut t = completed_tournament();
    finish_pools(&mut t).unwrap();

    assert_eq!(t.phase, TournamentPhase::Knockout);
    assert_eq!(t.bracket.as_ref().unwrap().matches.len(), 16);
    let assignment = t.third_place_assignment.as_ref().unwrap();
    assert!(!assignment.relaxed);
    assert_eq!(slot_ids(&t, "R16-7"), (Some("arg".to_string()), Some("chi".to_string())));

    let teams = t.pool(PoolId::A).unwrap().teams.clone();
    assert_eq!(t.update_pool(PoolId::A, teams), Err(TournamentError::InvalidState));
    assert_eq!(finish_pools(&mut t), Err(TournamentError::InvalidState));
}

#[test]
fn update_pool_rejects_membership_changes() {
    let mut t = Tournament::default();
    let mut teams = t.pool(PoolId::B).unwrap().teams.clone();
    teams[0] = t.pool(PoolId::A).unwrap().teams[0].clone();
    assert!(matches!(
        t.update_pool(PoolId::B, teams),
        Err(TournamentError::InvalidPoolUpdate { pool: PoolId::B, .. })
    ));

    let mut short = t.pool(PoolId::B).unwrap().teams.clone();
    short.pop();
    assert!(t.update_pool(PoolId::B, short).is_err());
}

#[test]
fn update_pool_rejects_edited_team_details() {
    let mut t = Tournament::default();
    let mut teams = t.pool(PoolId::A).unwrap().teams.clone();
    teams[0].team.rating = i32::MAX;
    teams[1].team.rating = -10;
    assert!(matches!(
        t.update_pool(PoolId::A, teams),
        Err(TournamentError::InvalidPoolUpdate { pool: PoolId::A, .. })
    ));

    let mut renamed = t.pool(PoolId::A).unwrap().teams.clone();
    renamed[2].team.name = "Chile XV".to_string();
    assert!(t.update_pool(PoolId::A, renamed).is_err());

    assert_eq!(t.pool(PoolId::A).unwrap().teams, default_draw()[0].teams);
    simulate_single_pool(&mut t, PoolId::A, &mut StdRng::seed_from_u64(5)).unwrap();
}

#[test]
fn extreme_ratings_in_a_draw_simulate_without_overflow() {
    let mut pools = default_draw();
    pools[0].teams[0].team.rating = i32::MAX;
    pools[0].teams[3].team.rating = i32::MIN;
    let mut t = Tournament::new(pools).unwrap();

    simulate_single_pool(&mut t, PoolId::A, &mut StdRng::seed_from_u64(9)).unwrap();
    simulate_all_pools(&mut t, &mut StdRng::seed_from_u64(9)).unwrap();

    let pool = t.pool(PoolId::A).unwrap();
    assert!(pool.is_complete());
    assert_eq!(pool.teams[0].id(), "nzl");
    assert_eq!(pool.teams[0].won, 3);
    assert_eq!(pool.teams[3].id(), "hkg");
    assert_eq!(pool.teams[3].lost, 3);
    finish_pools(&mut t).unwrap();
}

#[test]
fn update_pool_accepts_new_stats() {
    let mut t = Tournament::default();
    let mut teams = t.pool(PoolId::C).unwrap().teams.clone();
    teams.reverse();
    teams[0].played = 3;
    teams[0].points = 12;
    t.update_pool(PoolId::C, teams.clone()).unwrap();
    assert_eq!(t.pool(PoolId::C).unwrap().teams, teams);
}

#[test]
fn results_are_rejected_before_the_knockout_stage() {
    let mut t = Tournament::default();
    let a = Team::new("nzl", "New Zealand", "", 92);
    let b = Team::new("tga", "Tonga", "", 74);
    let result = MatchResult::from_scores(&a, &b, 30, 10);
    assert_eq!(apply_match_result(&mut t, "R16-1", result), Err(TournamentError::InvalidState));
}

#[test]
fn simulated_pool_stage_always_yields_a_valid_bracket() {
    for seed in 0..50 {
        let mut t = Tournament::default();
        simulate_all_pools(&mut t, &mut StdRng::seed_from_u64(seed)).unwrap();
        finish_pools(&mut t).unwrap();
        let assignment = t.third_place_assignment.as_ref().unwrap();
        assert!(assignment.satisfies_constraints(), "seed {}", seed);
        let bracket = t.bracket.as_ref().unwrap();
        assert!(bracket.matches.iter().take(8).all(|m| m.is_ready()));
    }
}

#[tokio::test]
async fn higher_rated_teams_reach_the_final() {
    let session = RwLock::new(completed_tournament());
    finish_pools(&mut session.write().unwrap()).unwrap();

    let order: Vec<String> = {
        let t = session.read().unwrap();
        t.bracket.as_ref().unwrap().matches.iter().map(|m| m.id.clone()).collect()
    };
    for id in &order {
        simulate_match(&session, id, &HigherRatingWins).await.unwrap();
    }

    let t = session.read().unwrap();
    assert_eq!(slot_ids(&t, "QF1"), (Some("nzl".to_string()), Some("rsa".to_string())));
    assert_eq!(slot_ids(&t, "SF1"), (Some("rsa".to_string()), Some("fra".to_string())));
    assert_eq!(slot_ids(&t, "SF2"), (Some("eng".to_string()), Some("ire".to_string())));
    assert_eq!(slot_ids(&t, "Final"), (Some("rsa".to_string()), Some("ire".to_string())));
    assert_eq!(slot_ids(&t, "Bronze"), (Some("fra".to_string()), Some("eng".to_string())));
    assert_eq!(t.phase, TournamentPhase::Completed);
    assert_eq!(t.champion().unwrap().id, "rsa");
    assert_eq!(t.third_place().unwrap().id, "fra");
}

#[tokio::test]
async fn simulate_match_rejects_unready_match() {
    let session = RwLock::new(completed_tournament());
    finish_pools(&mut session.write().unwrap()).unwrap();
    assert_eq!(
        simulate_match(&session, "QF1", &HigherRatingWins).await,
        Err(TournamentError::MatchNotReady("QF1".to_string()))
    );
}

/// Waits before answering so concurrent simulations interleave.
struct SlowHigherRating(Duration);

#[async_trait]
impl MatchSimulationStrategy for SlowHigherRating {
    async fn simulate(&self, team_a: &Team, team_b: &Team, stage: &str) -> MatchResult {
        tokio::time::sleep(self.0).await;
        HigherRatingWins.simulate(team_a, team_b, stage).await
    }
}

#[tokio::test]
async fn sibling_results_do_not_overwrite_each_other() {
    let session = RwLock::new(completed_tournament());
    finish_pools(&mut session.write().unwrap()).unwrap();

    let slow = SlowHigherRating(Duration::from_millis(20));
    let (first, second) = tokio::join!(
        simulate_match(&session, "R16-1", &slow),
        simulate_match(&session, "R16-2", &slow),
    );
    first.unwrap();
    second.unwrap();

    let t = session.read().unwrap();
    assert_eq!(slot_ids(&t, "QF1"), (Some("nzl".to_string()), Some("rsa".to_string())));
}

#[tokio::test]
async fn abandoned_simulation_leaves_session_untouched() {
    let session = RwLock::new(completed_tournament());
    finish_pools(&mut session.write().unwrap()).unwrap();

    let slow = SlowHigherRating(Duration::from_secs(5));
    let outcome = tokio::time::timeout(
        Duration::from_millis(10),
        simulate_match(&session, "R16-1", &slow),
    )
    .await;
    assert!(outcome.is_err());

    let t = session.read().unwrap();
    assert!(t.bracket.as_ref().unwrap().get("R16-1").unwrap().result.is_none());
    assert_eq!(slot_ids(&t, "QF1"), (None, None));
}

/// Resets and rebuilds the session while "simulating".
struct ResetDuringSimulation(Arc<RwLock<Tournament>>);

#[async_trait]
impl MatchSimulationStrategy for ResetDuringSimulation {
    async fn simulate(&self, team_a: &Team, team_b: &Team, stage: &str) -> MatchResult {
        {
            let mut t = self.0.write().unwrap();
            t.reset();
            let pools = common::completed_draw();
            for pool in pools {
                t.update_pool(pool.id, pool.teams).unwrap();
            }
            finish_pools(&mut t).unwrap();
        }
        HigherRatingWins.simulate(team_a, team_b, stage).await
    }
}

#[tokio::test]
async fn result_for_a_replaced_bracket_is_discarded() {
    let session = Arc::new(RwLock::new(completed_tournament()));
    finish_pools(&mut session.write().unwrap()).unwrap();

    let strategy = ResetDuringSimulation(Arc::clone(&session));
    assert_eq!(
        simulate_match(&session, "R16-1", &strategy).await,
        Err(TournamentError::StaleBracket)
    );
    let t = session.read().unwrap();
    assert_eq!(t.phase, TournamentPhase::Knockout);
    assert!(t.bracket.as_ref().unwrap().matches.iter().all(|m| m.result.is_none()));
}

#[test]
fn reset_restores_the_draw() {
    let mut t = Tournament::default();
    simulate_all_pools(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    finish_pools(&mut t).unwrap();

    t.reset();
    assert_eq!(t.phase, TournamentPhase::Pools);
    assert!(t.bracket.is_none());
    assert!(t.qualifiers.is_none());
    assert!(t.third_place_assignment.is_none());
    assert_eq!(t.pools, default_draw());
}

#[test]
fn new_rejects_malformed_draw() {
    let mut pools = default_draw();
    pools.pop();
    assert!(matches!(Tournament::new(pools), Err(TournamentError::InvalidDraw(_))));

    let mut pools = default_draw();
    pools[1].teams[0] = pools[0].teams[0].clone();
    assert!(matches!(Tournament::new(pools), Err(TournamentError::InvalidDraw(_))));

    let mut pools = default_draw();
    pools.swap(0, 1);
    assert!(matches!(Tournament::new(pools), Err(TournamentError::InvalidDraw(_))));
}
