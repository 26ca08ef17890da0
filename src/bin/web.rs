//! Single binary web server: JSON API around one in-memory tournament session.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DRAW_CSV, SIM_DELAY_MS, SIM_CONCURRENCY.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rugby_knockout_web::config::ServerConfig;
use rugby_knockout_web::models::load_draw_file;
use rugby_knockout_web::{
    apply_match_result, finish_pools, simulate_all_pools, simulate_match, simulate_single_pool,
    BasicStrategy, MatchResult, PoolId, PoolTeam, Tournament, TournamentError,
};
use serde::Deserialize;
use std::sync::RwLock;
use tokio::sync::Semaphore;

/// The single tournament session. Every mutation takes the write lock, so writes
/// into a match (its own result, or a winner arriving from a sibling) never race.
type AppState = Data<RwLock<Tournament>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segment: pool id (e.g. /api/pools/{pool_id})
#[derive(Deserialize)]
struct PoolPath {
    pool_id: PoolId,
}

/// Path segment: bracket match id (e.g. /api/matches/{match_id})
#[derive(Deserialize)]
struct MatchPath {
    match_id: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::PoolNotFound(_) | TournamentError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::StaleBracket => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "rugby-knockout-web",
    })
}

/// Full session: phase, pools, qualifiers, third-place assignment, bracket.
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(t) => HttpResponse::Ok().json(&*t),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Flat list of bracket matches (404 before the knockout stage).
#[get("/api/bracket")]
async fn api_get_bracket(state: AppState) -> HttpResponse {
    let t = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match &t.bracket {
        Some(bracket) => HttpResponse::Ok().json(&bracket.matches),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No bracket yet" })),
    }
}

/// Replace a pool's teams and stats (Pools phase only).
#[put("/api/pools/{pool_id}")]
async fn api_update_pool(
    state: AppState,
    path: Path<PoolPath>,
    body: Json<Vec<PoolTeam>>,
) -> HttpResponse {
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match t.update_pool(path.pool_id, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Quick-simulate one pool.
#[post("/api/pools/{pool_id}/simulate")]
async fn api_simulate_pool(state: AppState, path: Path<PoolPath>) -> HttpResponse {
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match simulate_single_pool(&mut t, path.pool_id, &mut rand::thread_rng()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Simulate every pool.
#[post("/api/pools/simulate")]
async fn api_simulate_all_pools(state: AppState) -> HttpResponse {
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match simulate_all_pools(&mut t, &mut rand::thread_rng()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Finish pools and build the bracket (Pools -> Knockout).
#[post("/api/knockout/start")]
async fn api_start_knockout(state: AppState) -> HttpResponse {
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match finish_pools(&mut t) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Record a result entered by hand.
#[put("/api/matches/{match_id}/result")]
async fn api_set_match_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<MatchResult>,
) -> HttpResponse {
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match apply_match_result(&mut t, &path.match_id, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Simulate a knockout match and record its result. If the client goes away
/// first, the request future is dropped and nothing is applied.
#[post("/api/matches/{match_id}/simulate")]
async fn api_simulate_match(
    state: AppState,
    strategy: Data<BasicStrategy>,
    permits: Data<Semaphore>,
    path: Path<MatchPath>,
) -> HttpResponse {
    let _permit = match permits.acquire().await {
        Ok(permit) => permit,
        Err(_) => return HttpResponse::ServiceUnavailable().body("simulation closed"),
    };
    match simulate_match(&state, &path.match_id, strategy.get_ref()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(&e),
    }
}

/// Back to the pool stage with the original draw.
#[post("/api/tournament/reset")]
async fn api_reset_tournament(state: AppState) -> HttpResponse {
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    t.reset();
    log::info!("Tournament reset");
    HttpResponse::Ok().json(&*t)
}

fn invalid_data(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
}

fn load_tournament(config: &ServerConfig) -> std::io::Result<Tournament> {
    let Some(path) = &config.draw_csv else {
        return Ok(Tournament::default());
    };
    let pools = load_draw_file(path).map_err(invalid_data)?;
    log::info!("Loaded draw from {}", path.display());
    Tournament::new(pools).map_err(invalid_data)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let tournament = load_tournament(&config)?;
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(tournament));
    let strategy = Data::new(BasicStrategy::with_delay(config.simulation_delay));
    let permits = Data::new(Semaphore::new(config.simulation_concurrency));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(strategy.clone())
            .app_data(permits.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_get_bracket)
            .service(api_simulate_all_pools)
            .service(api_update_pool)
            .service(api_simulate_pool)
            .service(api_start_knockout)
            .service(api_set_match_result)
            .service(api_simulate_match)
            .service(api_reset_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
