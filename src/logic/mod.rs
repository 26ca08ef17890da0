//! Tournament logic: pool play, standings, best-third placement, bracket and knockout results.

mod bracket;
mod knockout;
mod pool_play;
mod propagation;
mod standings;
mod third_place;

pub use bracket::{build_bracket, R16Seeding, Seed, R16_SEEDING};
pub use knockout::{
    apply_match_result, apply_simulated_result, finish_pools, pending_match, simulate_match,
    PendingMatch,
};
pub use pool_play::{
    simulate_all_pools, simulate_pool, simulate_single_pool, PoolSimParams, WIN_POINTS,
};
pub use propagation::apply_result;
pub use standings::{extract_qualifiers, pool_standing, rank, rank_third_places, PoolStanding};
pub use third_place::{permutations, solve_third_place_assignment};
