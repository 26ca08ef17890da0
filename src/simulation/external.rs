//! External scoring: ask an outside source for a JSON score and post-process it.
//! Any failure falls back to the basic strategy.

use crate::models::{MatchResult, Team, POOL_STAGE};
use crate::simulation::basic::simulate_basic;
use crate::simulation::MatchSimulationStrategy;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Points added to team A when an external source returns a knockout draw.
pub const KNOCKOUT_TIE_BREAK: u32 = 3;

/// Why an external simulation could not be used.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("score source failed: {0}")]
    Source(String),
    #[error("malformed score response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("score out of range in response ({0}, {1})")]
    InvalidScore(i64, i64),
    #[error("score source timed out")]
    Timeout,
}

/// The JSON object an external source must answer with.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[serde(default)]
    pub score_a: i64,
    #[serde(default)]
    pub score_b: i64,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Parse a response body, tolerating Markdown code fences around the JSON.
pub fn parse_score_response(text: &str) -> Result<ScoreResponse, SimulationError> {
    let json = text.replace("```json", "").replace("```", "");
    Ok(serde_json::from_str(json.trim())?)
}

/// Turn a parsed response into a result. Knockout draws go to team A by `KNOCKOUT_TIE_BREAK`.
pub fn post_process(
    team_a: &Team,
    team_b: &Team,
    stage: &str,
    response: ScoreResponse,
) -> Result<MatchResult, SimulationError> {
    let invalid = || SimulationError::InvalidScore(response.score_a, response.score_b);
    let (Ok(mut score_a), Ok(score_b)) =
        (u32::try_from(response.score_a), u32::try_from(response.score_b))
    else {
        return Err(invalid());
    };
    if stage != POOL_STAGE && score_a == score_b {
        score_a = score_a.checked_add(KNOCKOUT_TIE_BREAK).ok_or_else(invalid)?;
    }
    let mut result = MatchResult::from_scores(team_a, team_b, score_a, score_b).simulated();
    result.summary = response.summary;
    Ok(result)
}

/// An outside scorer (a model, a remote service) answering with raw JSON text.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    async fn request_score(
        &self,
        team_a: &Team,
        team_b: &Team,
        stage: &str,
    ) -> Result<String, SimulationError>;
}

/// Strategy backed by a `ScoreSource`. Never fails: any source error, timeout
/// or malformed answer is replaced by the basic strategy's result.
pub struct ExternalStrategy<S> {
    source: S,
    timeout: Option<Duration>,
}

impl<S: ScoreSource> ExternalStrategy<S> {
    pub fn new(source: S) -> Self {
        Self { source, timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn try_simulate(
        &self,
        team_a: &Team,
        team_b: &Team,
        stage: &str,
    ) -> Result<MatchResult, SimulationError> {
        let request = self.source.request_score(team_a, team_b, stage);
        let text = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| SimulationError::Timeout)??,
            None => request.await?,
        };
        let response = parse_score_response(&text)?;
        post_process(team_a, team_b, stage, response)
    }
}

#[async_trait]
impl<S: ScoreSource> MatchSimulationStrategy for ExternalStrategy<S> {
    async fn simulate(&self, team_a: &Team, team_b: &Team, stage: &str) -> MatchResult {
        match self.try_simulate(team_a, team_b, stage).await {
            Ok(result) => result,
            Err(e) => {
                log::warn!(
                    "External simulation of {} vs {} failed ({}); using basic simulation",
                    team_a.id,
                    team_b.id,
                    e
                );
                simulate_basic(team_a, team_b, &mut rand::thread_rng())
            }
        }
    }
}
