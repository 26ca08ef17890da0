//! Pool stage: round-robin simulation driven by team ratings.

use crate::logic::standings::rank;
use crate::models::{
    Pool, PoolId, Tournament, TournamentError, TournamentPhase, POOL_MATCHES_PER_TEAM,
};
use rand::Rng;

/// Table points for a pool match win.
pub const WIN_POINTS: u32 = 4;

/// Variance knobs for a simulated round robin.
///
/// Team A beats team B when `rating_diff + uniform(-spread/2, spread/2) > 0`.
/// The winning margin is
/// `floor(|rating_diff| * margin_rating_factor + uniform(0, margin_random) + margin_base)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolSimParams {
    pub spread: f64,
    pub margin_rating_factor: f64,
    pub margin_random: f64,
    pub margin_base: f64,
}

impl PoolSimParams {
    /// Single pool ("quick sim").
    pub const QUICK: PoolSimParams = PoolSimParams {
        spread: 10.0,
        margin_rating_factor: 1.0,
        margin_random: 10.0,
        margin_base: 0.0,
    };

    /// Whole pool stage at once.
    pub const FULL: PoolSimParams = PoolSimParams {
        spread: 12.0,
        margin_rating_factor: 0.5,
        margin_random: 15.0,
        margin_base: 3.0,
    };
}

/// Play every pairing in the pool once, overwriting previous stats.
///
/// Afterwards each team has played three matches and `pool.teams` is in standings order.
pub fn simulate_pool<R: Rng + ?Sized>(pool: &mut Pool, params: PoolSimParams, rng: &mut R) {
    for team in &mut pool.teams {
        team.reset_stats();
    }
    let n = pool.teams.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let rating_diff =
                f64::from(pool.teams[i].team.rating) - f64::from(pool.teams[j].team.rating);
            let random_factor = rng.gen::<f64>() * params.spread - params.spread / 2.0;
            let margin = (rating_diff.abs() * params.margin_rating_factor
                + rng.gen::<f64>() * params.margin_random
                + params.margin_base)
                .floor() as i32;
            let (winner, loser) = if rating_diff + random_factor > 0.0 { (i, j) } else { (j, i) };
            pool.teams[winner].record_win(WIN_POINTS, margin);
            pool.teams[loser].record_loss(margin);
        }
    }
    for team in &mut pool.teams {
        team.played = POOL_MATCHES_PER_TEAM;
    }
    pool.teams = rank(&pool.teams);
}

/// Simulate one pool (Pools phase only).
pub fn simulate_single_pool<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    pool_id: PoolId,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.phase != TournamentPhase::Pools {
        return Err(TournamentError::InvalidState);
    }
    let pool = tournament
        .pool_mut(pool_id)
        .ok_or(TournamentError::PoolNotFound(pool_id))?;
    simulate_pool(pool, PoolSimParams::QUICK, rng);
    log::info!("Simulated pool {}", pool_id);
    Ok(())
}

/// Simulate every pool (Pools phase only).
pub fn simulate_all_pools<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.phase != TournamentPhase::Pools {
        return Err(TournamentError::InvalidState);
    }
    for pool in &mut tournament.pools {
        simulate_pool(pool, PoolSimParams::FULL, rng);
    }
    log::info!("Simulated all {} pools", tournament.pools.len());
    Ok(())
}
