//! Rugby World Cup knockout simulator: models, tournament logic and simulation strategies.

pub mod config;
pub mod logic;
pub mod models;
pub mod simulation;

pub use logic::{
    apply_match_result, apply_result, build_bracket, extract_qualifiers, finish_pools, rank,
    rank_third_places, simulate_all_pools, simulate_match, simulate_single_pool,
    solve_third_place_assignment,
};
pub use models::{
    Bracket, KnockoutMatch, MatchId, MatchResult, Pool, PoolId, PoolTeam, QualifiedTeam, Round,
    Slot, Team, ThirdPlaceAssignment, ThirdPlaceSlot, Tournament, TournamentError,
    TournamentPhase,
};
pub use simulation::{BasicStrategy, ExternalStrategy, MatchSimulationStrategy};
