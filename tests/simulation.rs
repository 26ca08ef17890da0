//! Integration tests for match simulation strategies.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rugby_knockout_web::models::POOL_STAGE;
use rugby_knockout_web::simulation::{
    parse_score_response, post_process, simulate_basic, ScoreResponse, ScoreSource,
    SimulationError, BASIC_SUMMARY,
};
use rugby_knockout_web::{BasicStrategy, ExternalStrategy, MatchSimulationStrategy, Team};
use std::time::Duration;

fn nzl() -> Team {
    Team::new("nzl", "New Zealand", "🇳🇿", 92)
}

fn tga() -> Team {
    Team::new("tga", "Tonga", "🇹🇴", 74)
}

fn aus() -> Team {
    Team::new("aus", "Australia", "🇦🇺", 82)
}

#[test]
fn basic_result_is_well_formed() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let r = simulate_basic(&aus(), &nzl(), &mut rng);
        assert_eq!(r.team_a_id, "aus");
        assert_eq!(r.team_b_id, "nzl");
        assert!(r.winner_id == "aus" || r.winner_id == "nzl");
        assert_ne!(r.score_a, r.score_b);
        let (win, lose) = if r.winner_id == "aus" {
            (r.score_a, r.score_b)
        } else {
            (r.score_b, r.score_a)
        };
        // base in [12, 36], margin in [1 + 5, 20 + 5]
        assert!((12..=36).contains(&lose), "loser scored {}", lose);
        assert!((6..=25).contains(&(win - lose)), "margin {}", win - lose);
        assert!(r.is_simulated);
        assert_eq!(r.summary.as_deref(), Some(BASIC_SUMMARY));
    }
}

#[test]
fn basic_win_probability_is_not_clamped() {
    // 18 points apart: 0.5 + 18 * 0.025 = 0.95 for nzl, and it can never exceed 1.
    let mut rng = StdRng::seed_from_u64(3);
    let nzl_wins = (0..2000)
        .filter(|_| simulate_basic(&nzl(), &tga(), &mut rng).winner_id == "nzl")
        .count();
    assert!(nzl_wins > 1800, "nzl won {} of 2000", nzl_wins);

    // 20+ points apart: the draw is always below 1.0, so the stronger team always wins.
    let strong = Team::new("a", "A", "", 95);
    let weak = Team::new("b", "B", "", 55);
    for _ in 0..200 {
        assert_eq!(simulate_basic(&strong, &weak, &mut rng).winner_id, "a");
        assert_eq!(simulate_basic(&weak, &strong, &mut rng).winner_id, "a");
    }
}

#[tokio::test]
async fn basic_strategy_never_draws() {
    let strategy = BasicStrategy::new();
    for _ in 0..100 {
        let r = strategy.simulate(&nzl(), &aus(), "Final").await;
        assert_ne!(r.score_a, r.score_b);
    }
}

#[test]
fn parse_strips_code_fences() {
    let text = "```json\n{\"scoreA\": 24, \"scoreB\": 17, \"summary\": \"Tight.\"}\n```";
    let parsed = parse_score_response(text).unwrap();
    assert_eq!(
        parsed,
        ScoreResponse {
            score_a: 24,
            score_b: 17,
            summary: Some("Tight.".to_string())
        }
    );
}

#[test]
fn parse_defaults_missing_scores_to_zero() {
    let parsed = parse_score_response("{\"scoreB\": 9}").unwrap();
    assert_eq!(parsed.score_a, 0);
    assert_eq!(parsed.score_b, 9);
    assert_eq!(parsed.summary, None);
}

#[test]
fn post_process_breaks_knockout_ties_for_team_a() {
    let tie = ScoreResponse {
        score_a: 15,
        score_b: 15,
        summary: None,
    };
    let r = post_process(&nzl(), &tga(), "QF", tie.clone()).unwrap();
    assert_eq!((r.score_a, r.score_b), (18, 15));
    assert_eq!(r.winner_id, "nzl");

    // Pool stage keeps the draw.
    let r = post_process(&nzl(), &tga(), POOL_STAGE, tie).unwrap();
    assert_eq!((r.score_a, r.score_b), (15, 15));
}

#[test]
fn post_process_rejects_negative_scores() {
    let bad = ScoreResponse {
        score_a: -3,
        score_b: 10,
        summary: None,
    };
    assert!(matches!(
        post_process(&nzl(), &tga(), "SF", bad),
        Err(SimulationError::InvalidScore(-3, 10))
    ));
}

#[test]
fn post_process_rejects_tie_break_past_u32_range() {
    let tie = ScoreResponse {
        score_a: i64::from(u32::MAX),
        score_b: i64::from(u32::MAX),
        summary: None,
    };
    assert!(matches!(
        post_process(&nzl(), &tga(), "R16", tie.clone()),
        Err(SimulationError::InvalidScore(a, b)) if a == i64::from(u32::MAX) && b == a
    ));
    // No tie-break at pool stage, so the scores stand.
    assert!(post_process(&nzl(), &tga(), POOL_STAGE, tie).is_ok());
}

#[test]
fn basic_result_handles_extreme_ratings() {
    let giant = Team::new("giant", "Giant", "", i32::MAX);
    let minnow = Team::new("minnow", "Minnow", "", i32::MIN);
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..50 {
        let r = simulate_basic(&giant, &minnow, &mut rng);
        assert_eq!(r.winner_id, "giant");
        assert!(r.score_a > r.score_b);
        let r = simulate_basic(&minnow, &giant, &mut rng);
        assert_eq!(r.winner_id, "giant");
    }
}

/// Answers with a fixed body, or fails.
struct CannedSource(Result<&'static str, &'static str>);

#[async_trait]
impl ScoreSource for CannedSource {
    async fn request_score(
        &self,
        _a: &Team,
        _b: &Team,
        _stage: &str,
    ) -> Result<String, SimulationError> {
        self.0
            .map(str::to_string)
            .map_err(|e| SimulationError::Source(e.to_string()))
    }
}

/// Never answers in time.
struct HangingSource;

#[async_trait]
impl ScoreSource for HangingSource {
    async fn request_score(
        &self,
        _a: &Team,
        _b: &Team,
        _stage: &str,
    ) -> Result<String, SimulationError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("{\"scoreA\": 1, \"scoreB\": 0}".to_string())
    }
}

#[tokio::test]
async fn external_strategy_uses_the_source_score() {
    let strategy = ExternalStrategy::new(CannedSource(Ok(
        "{\"scoreA\": 13, \"scoreB\": 13, \"summary\": \"Drama in extra time.\"}",
    )));
    let r = strategy.simulate(&tga(), &nzl(), "SF").await;
    assert_eq!((r.score_a, r.score_b), (16, 13));
    assert_eq!(r.winner_id, "tga");
    assert_eq!(r.summary.as_deref(), Some("Drama in extra time."));
    assert!(r.is_simulated);
}

#[tokio::test]
async fn external_strategy_falls_back_on_source_error() {
    let strategy = ExternalStrategy::new(CannedSource(Err("API key missing")));
    let r = strategy.simulate(&nzl(), &aus(), "R16").await;
    assert_eq!(r.summary.as_deref(), Some(BASIC_SUMMARY));
    assert_ne!(r.score_a, r.score_b);
}

#[tokio::test]
async fn external_strategy_falls_back_on_malformed_json() {
    let strategy = ExternalStrategy::new(CannedSource(Ok("New Zealand win 30-12")));
    let r = strategy.simulate(&nzl(), &aus(), "Final").await;
    assert_eq!(r.summary.as_deref(), Some(BASIC_SUMMARY));
}

#[tokio::test]
async fn external_strategy_falls_back_on_timeout() {
    let strategy = ExternalStrategy::new(HangingSource).with_timeout(Duration::from_millis(10));
    let r = strategy.simulate(&nzl(), &aus(), "QF").await;
    assert_eq!(r.summary.as_deref(), Some(BASIC_SUMMARY));
    assert!(r.winner_id == "nzl" || r.winner_id == "aus");
}

#[tokio::test]
async fn external_strategy_falls_back_on_unbreakable_tie() {
    let strategy = ExternalStrategy::new(CannedSource(Ok(
        "{\"scoreA\": 4294967295, \"scoreB\": 4294967295}",
    )));
    let r = strategy.simulate(&nzl(), &tga(), "SF").await;
    assert_eq!(r.summary.as_deref(), Some(BASIC_SUMMARY));
    assert_ne!(r.score_a, r.score_b);
}
