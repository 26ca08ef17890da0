//! Data structures for the knockout simulator: teams, pools, bracket, tournament session.

mod bracket;
mod draw;
mod game;
mod pool;
mod qualification;
mod team;
mod tournament;

pub use bracket::{Bracket, BracketId, BRONZE_ID, FINAL_ID};
pub use draw::{default_draw, load_draw, load_draw_file, DrawError};
pub use game::{KnockoutMatch, MatchId, MatchResult, Round, Slot, SlotTarget, POOL_STAGE};
pub use pool::{Pool, PoolId, POOL_MATCHES_PER_TEAM, POOL_SIZE};
pub use qualification::{
    Qualifiers, ThirdPlaceAssignment, ThirdPlaceRanking, ThirdPlaceSlot, QUALIFIED_THIRDS,
};
pub use team::{PoolTeam, QualifiedTeam, Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentPhase};
