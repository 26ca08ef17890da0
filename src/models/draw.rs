//! Initial draw: the built-in RWC 2027 pools, or pools loaded from CSV.

use crate::models::pool::{Pool, PoolId, POOL_SIZE};
use crate::models::team::{PoolTeam, Team};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors loading a draw file.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid draw: {0}")]
    Invalid(String),
}

fn t(id: &str, name: &str, flag: &str, rating: i32) -> PoolTeam {
    PoolTeam::new(Team::new(id, name, flag, rating))
}

/// Official RWC 2027 draw, all stats zero.
pub fn default_draw() -> Vec<Pool> {
    vec![
        Pool::new(
            PoolId::A,
            vec![
                t("nzl", "New Zealand", "🇳🇿", 92),
                t("aus", "Australia", "🇦🇺", 82),
                t("chi", "Chile", "🇨🇱", 65),
                t("hkg", "Hong Kong China", "🇭🇰", 58),
            ],
        ),
        Pool::new(
            PoolId::B,
            vec![
                t("rsa", "South Africa", "🇿🇦", 94),
                t("ita", "Italy", "🇮🇹", 84),
                t("geo", "Georgia", "🇬🇪", 76),
                t("rom", "Romania", "🇷🇴", 64),
            ],
        ),
        Pool::new(
            PoolId::C,
            vec![
                t("arg", "Argentina", "🇦🇷", 86),
                t("fji", "Fiji", "🇫🇯", 81),
                t("esp", "Spain", "🇪🇸", 68),
                t("can", "Canada", "🇨🇦", 63),
            ],
        ),
        Pool::new(
            PoolId::D,
            vec![
                t("ire", "Ireland", "🇮🇪", 93),
                t("sco", "Scotland", "🏴\u{e0067}\u{e0062}\u{e0073}\u{e0063}\u{e0074}\u{e007f}", 85),
                t("uru", "Uruguay", "🇺🇾", 72),
                t("por", "Portugal", "🇵🇹", 70),
            ],
        ),
        Pool::new(
            PoolId::E,
            vec![
                t("fra", "France", "🇫🇷", 89),
                t("jpn", "Japan", "🇯🇵", 79),
                t("sam", "Samoa", "🇼🇸", 73),
                t("usa", "USA", "🇺🇸", 70),
            ],
        ),
        Pool::new(
            PoolId::F,
            vec![
                t("eng", "England", "🏴\u{e0067}\u{e0062}\u{e0065}\u{e006e}\u{e0067}\u{e007f}", 87),
                t("wal", "Wales", "🏴\u{e0067}\u{e0062}\u{e0077}\u{e006c}\u{e0073}\u{e007f}", 78),
                t("tga", "Tonga", "🇹🇴", 74),
                t("zim", "Zimbabwe", "🇿🇼", 55),
            ],
        ),
    ]
}

/// One row of a draw file: `pool,id,name,flag,rating`.
#[derive(Debug, Deserialize)]
struct DrawRecord {
    pool: String,
    id: String,
    name: String,
    flag: String,
    rating: i32,
}

/// Read a draw from CSV. Rows keep file order within each pool.
pub fn load_draw<R: Read>(reader: R) -> Result<Vec<Pool>, DrawError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut by_pool: BTreeMap<PoolId, Vec<PoolTeam>> = BTreeMap::new();
    let mut seen = HashSet::new();
    for record in rdr.deserialize() {
        let record: DrawRecord = record?;
        let pool_id: PoolId = record.pool.parse().map_err(DrawError::Invalid)?;
        if record.id.is_empty() {
            return Err(DrawError::Invalid("team id must not be empty".to_string()));
        }
        if !seen.insert(record.id.clone()) {
            return Err(DrawError::Invalid(format!("duplicate team id '{}'", record.id)));
        }
        by_pool
            .entry(pool_id)
            .or_default()
            .push(t(&record.id, &record.name, &record.flag, record.rating));
    }
    let mut pools = Vec::with_capacity(PoolId::ALL.len());
    for pool_id in PoolId::ALL {
        let teams = by_pool.remove(&pool_id).unwrap_or_default();
        if teams.len() != POOL_SIZE {
            return Err(DrawError::Invalid(format!(
                "pool {} has {} teams, expected {}",
                pool_id,
                teams.len(),
                POOL_SIZE
            )));
        }
        pools.push(Pool::new(pool_id, teams));
    }
    Ok(pools)
}

/// Read a draw from a CSV file on disk.
pub fn load_draw_file(path: impl AsRef<Path>) -> Result<Vec<Pool>, DrawError> {
    let file = std::fs::File::open(path.as_ref())?;
    load_draw(file)
}
