//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use rugby_knockout_web::models::default_draw;
use rugby_knockout_web::{
    MatchResult, MatchSimulationStrategy, Pool, PoolId, PoolTeam, QualifiedTeam, Team, Tournament,
};

pub fn team(id: &str, rating: i32) -> Team {
    Team::new(id, id.to_uppercase(), "", rating)
}

pub fn pool_team(id: &str, points: u32, diff: i32, rating: i32) -> PoolTeam {
    let mut t = PoolTeam::new(team(id, rating));
    t.played = 3;
    t.points = points;
    t.diff = diff;
    t
}

pub fn qualified(id: &str, pool_id: PoolId) -> QualifiedTeam {
    QualifiedTeam::new(team(id, 70), pool_id)
}

/// Give a pool finished stats that keep its current order: 12/8/4/0 points, +30/+10/-10/-30.
pub fn play_out(pool: &mut Pool) {
    for (i, t) in pool.teams.iter_mut().enumerate() {
        let rank = i as u32;
        t.played = 3;
        t.won = 3 - rank;
        t.lost = rank;
        t.points = 12 - 4 * rank;
        t.diff = 30 - 20 * rank as i32;
    }
}

/// Default draw, every pool finished in rating order. Chile's difference is
/// nudged to -5 so it is the best third; uru and esp are the eliminated thirds.
pub fn completed_draw() -> Vec<Pool> {
    let mut pools = default_draw();
    for pool in &mut pools {
        play_out(pool);
    }
    pools[0].teams[2].diff = -5;
    pools
}

pub fn completed_tournament() -> Tournament {
    Tournament::new(completed_draw()).expect("valid draw")
}

/// Higher rating always wins 20-10.
pub struct HigherRatingWins;

pub fn higher_rating_result(team_a: &Team, team_b: &Team) -> MatchResult {
    if team_a.rating >= team_b.rating {
        MatchResult::from_scores(team_a, team_b, 20, 10)
    } else {
        MatchResult::from_scores(team_a, team_b, 10, 20)
    }
}

#[async_trait]
impl MatchSimulationStrategy for HigherRatingWins {
    async fn simulate(&self, team_a: &Team, team_b: &Team, _stage: &str) -> MatchResult {
        higher_rating_result(team_a, team_b)
    }
}
