//! Web API for one tournament, persisted to a JSON key-value file.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! State is kept in TOURNAMENT_DATA (default tournament.json).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tournament_manager::{
    clear_fixtures, clear_tournament, import_teams_csv, load_tournament, overview, record_score,
    reset_knockout, save_tournament, select_winner, standings, standings_to_csv, start_knockout,
    start_league, ErrorKind, FileStore, Mode, RandomShuffler, Side, TeamId, Tournament,
    TournamentError,
};

/// The tournament and the store it is saved to after every change.
struct AppData {
    tournament: Tournament,
    store: FileStore,
}

type AppState = Data<RwLock<AppData>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TeamNameBody {
    name: String,
}

#[derive(Deserialize)]
struct SetModeBody {
    mode: Mode,
}

#[derive(Deserialize)]
struct RecordScoreBody {
    side: Side,
    /// Score as typed; blank clears it.
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct SelectWinnerBody {
    round: usize,
    match_id: String,
    winner: String,
}

/// Destructive actions must pass `?confirm=true` when they would discard data.
#[derive(Deserialize)]
struct ConfirmQuery {
    #[serde(default)]
    confirm: bool,
}

enum ApiError {
    Tournament(TournamentError),
    NeedsConfirmation(&'static str),
}

impl From<TournamentError> for ApiError {
    fn from(e: TournamentError) -> Self {
        ApiError::Tournament(e)
    }
}

fn error_response(e: ApiError) -> HttpResponse {
    match e {
        ApiError::NeedsConfirmation(what) => HttpResponse::Conflict().json(serde_json::json!({
            "error": what,
            "confirm_required": true,
        })),
        ApiError::Tournament(e) => {
            let body = serde_json::json!({ "error": e.to_string() });
            match e.kind() {
                ErrorKind::Validation => HttpResponse::BadRequest().json(body),
                ErrorKind::Duplicate => HttpResponse::Conflict().json(body),
                ErrorKind::InsufficientTeams => HttpResponse::UnprocessableEntity().json(body),
                ErrorKind::NotFound => HttpResponse::NotFound().json(body),
            }
        }
    }
}

fn require_confirmation(discards: bool, query: &ConfirmQuery, what: &'static str) -> Result<(), ApiError> {
    if discards && !query.confirm {
        return Err(ApiError::NeedsConfirmation(what));
    }
    Ok(())
}

fn storage_error_response(store: &FileStore, e: std::io::Error) -> HttpResponse {
    log::error!("Failed to write tournament store {}: {}", store.path().display(), e);
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": format!("Change was applied but could not be saved: {}", e),
        "saved": false,
    }))
}

/// Run a mutation under the write lock and save the result. Failed operations change nothing.
/// A failed save is answered with 500 so clients know the change is not on disk.
fn mutate<T, F>(state: &AppState, f: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&mut AppData) -> Result<T, ApiError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match f(&mut *g) {
        Ok(body) => {
            let data = &mut *g;
            match save_tournament(&mut data.store, &data.tournament) {
                Ok(()) => HttpResponse::Ok().json(body),
                Err(e) => storage_error_response(&data.store, e),
            }
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-manager",
    })
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(&g.tournament),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Fixtures and standings in league mode, bracket in knockout mode.
#[get("/api/overview")]
async fn api_overview(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(overview(&g.tournament)),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[put("/api/mode")]
async fn api_set_mode(state: AppState, body: Json<SetModeBody>) -> HttpResponse {
    mutate(&state, |d| {
        d.tournament.set_mode(body.mode);
        Ok(d.tournament.clone())
    })
}

#[post("/api/teams")]
async fn api_add_team(state: AppState, body: Json<TeamNameBody>) -> HttpResponse {
    mutate(&state, |d| Ok(d.tournament.add_team(body.name.as_str())?))
}

/// Bulk add from CSV text (one name per row).
#[post("/api/teams/import")]
async fn api_import_teams(state: AppState, body: String) -> HttpResponse {
    mutate(&state, |d| Ok(import_teams_csv(&mut d.tournament, body.as_bytes())?))
}

/// Rename a team. Existing fixtures/bracket keep the old name; the response reports how many.
#[put("/api/teams/{id}")]
async fn api_rename_team(state: AppState, path: Path<String>, body: Json<TeamNameBody>) -> HttpResponse {
    let id = TeamId::from(path.into_inner());
    mutate(&state, |d| Ok(d.tournament.rename_team(&id, body.name.as_str())?))
}

/// Delete a team. Clears fixtures and bracket.
#[delete("/api/teams/{id}")]
async fn api_delete_team(state: AppState, path: Path<String>, query: Query<ConfirmQuery>) -> HttpResponse {
    let id = TeamId::from(path.into_inner());
    mutate(&state, |d| {
        let t = &mut d.tournament;
        if t.team(&id).is_none() {
            return Err(TournamentError::TeamNotFound(id.clone()).into());
        }
        require_confirmation(
            t.has_fixtures() || t.has_bracket(),
            &query,
            "Deleting a team resets all matches",
        )?;
        t.delete_team(&id)?;
        Ok(t.clone())
    })
}

/// Generate (or regenerate) league fixtures.
#[post("/api/league/fixtures")]
async fn api_generate_fixtures(state: AppState, query: Query<ConfirmQuery>) -> HttpResponse {
    mutate(&state, |d| {
        let t = &mut d.tournament;
        require_confirmation(t.has_fixtures(), &query, "This will overwrite current scores")?;
        start_league(t)?;
        Ok(t.clone())
    })
}

#[delete("/api/league/fixtures")]
async fn api_clear_fixtures(state: AppState, query: Query<ConfirmQuery>) -> HttpResponse {
    mutate(&state, |d| {
        let t = &mut d.tournament;
        require_confirmation(t.scored_fixture_count() > 0, &query, "This will discard entered scores")?;
        clear_fixtures(t);
        Ok(t.clone())
    })
}

#[put("/api/league/fixtures/{id}/score")]
async fn api_record_score(state: AppState, path: Path<String>, body: Json<RecordScoreBody>) -> HttpResponse {
    mutate(&state, |d| {
        record_score(&mut d.tournament, &path, body.side, &body.value)?;
        Ok(standings(&d.tournament))
    })
}

#[get("/api/league/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(standings(&g.tournament)),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/league/standings.csv")]
async fn api_standings_csv(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match standings_to_csv(&standings(&g.tournament)) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => error_response(e.into()),
    }
}

/// Draw the first knockout round from all teams.
#[post("/api/knockout")]
async fn api_start_knockout(state: AppState, query: Query<ConfirmQuery>) -> HttpResponse {
    mutate(&state, |d| {
        let t = &mut d.tournament;
        require_confirmation(t.has_bracket(), &query, "This will discard the current bracket")?;
        start_knockout(t, &mut RandomShuffler::new())?;
        Ok(t.clone())
    })
}

#[delete("/api/knockout")]
async fn api_reset_knockout(state: AppState, query: Query<ConfirmQuery>) -> HttpResponse {
    mutate(&state, |d| {
        let t = &mut d.tournament;
        require_confirmation(t.has_bracket(), &query, "This will discard the current bracket")?;
        reset_knockout(t);
        Ok(t.clone())
    })
}

#[put("/api/knockout/winner")]
async fn api_select_winner(state: AppState, body: Json<SelectWinnerBody>) -> HttpResponse {
    mutate(&state, |d| {
        let t = &mut d.tournament;
        let bracket = select_winner(t, body.round, &body.match_id, &body.winner, &mut RandomShuffler::new())?;
        Ok(serde_json::json!({ "bracket": bracket, "tournament": t }))
    })
}

/// Delete all data, including what is on disk.
#[post("/api/reset")]
async fn api_reset_all(state: AppState, query: Query<ConfirmQuery>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Err(e) = require_confirmation(!g.tournament.is_empty(), &query, "This will delete all data") {
        return error_response(e);
    }
    let data = &mut *g;
    data.tournament.reset_all();
    if let Err(e) = clear_tournament(&mut data.store) {
        return storage_error_response(&data.store, e);
    }
    HttpResponse::Ok().json(&data.tournament)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_path() -> String {
    "tournament.json".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_path = std::env::var("TOURNAMENT_DATA").unwrap_or_else(|_| default_data_path());

    let store = FileStore::open(&data_path);
    let tournament = load_tournament(&store);
    log::info!(
        "Loaded tournament from {}: {} team(s), {} fixture(s), {} knockout round(s)",
        data_path,
        tournament.teams.len(),
        tournament.matches.len(),
        tournament.knockout_rounds.len()
    );

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppData { tournament, store }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_overview)
            .service(api_set_mode)
            .service(api_add_team)
            .service(api_import_teams)
            .service(api_rename_team)
            .service(api_delete_team)
            .service(api_generate_fixtures)
            .service(api_clear_fixtures)
            .service(api_record_score)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_start_knockout)
            .service(api_reset_knockout)
            .service(api_select_winner)
            .service(api_reset_all)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn state_with_store(path: std::path::PathBuf) -> AppState {
        Data::new(RwLock::new(AppData {
            tournament: Tournament::new(),
            store: FileStore::open(path),
        }))
    }

    #[test]
    fn mutation_is_ok_when_saved() {
        let path = std::env::temp_dir().join(format!("tournament-manager-web-{}.json", std::process::id()));
        let state = state_with_store(path.clone());

        let res = mutate(&state, |d| Ok(d.tournament.add_team("A")?));

        assert_eq!(res.status(), StatusCode::OK);
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn failed_save_is_a_server_error() {
        let path = std::env::temp_dir()
            .join(format!("tournament-manager-missing-dir-{}", std::process::id()))
            .join("store.json");
        let state = state_with_store(path);

        let res = mutate(&state, |d| Ok(d.tournament.add_team("A")?));

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn failed_operation_keeps_its_status() {
        let path = std::env::temp_dir()
            .join(format!("tournament-manager-missing-dir-{}", std::process::id()))
            .join("store.json");
        let state = state_with_store(path);

        let res = mutate(&state, |d| Ok(d.tournament.add_team(" ")?));

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
