//! HTTP surface: JSON draft API plus asset delivery for everything else.
//!
//! Each browser session owns one draft, found through the draft id stored in its session.
//! The app must provide `Data<DraftStore>` and `Data<AssetRoot>` and wrap a `SessionMiddleware`.

use crate::assets::{self, AssetError};
use crate::logic::{next_pick, restart_draft, results_csv, start_draft};
use crate::models::{Draft, DraftError, DraftId, DraftStatus, ParticipantId, TeamId};
use actix_session::Session;
use actix_web::{
    delete, get,
    http::{header, Method},
    post, put,
    web::{self, Data, Json, Path},
    HttpRequest, HttpResponse, HttpResponseBuilder, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Session key holding the id of the browser's draft.
pub const DRAFT_SESSION_KEY: &str = "draft_id";

/// Per-draft entry: draft data + last activity time (for auto-cleanup).
pub struct DraftEntry {
    pub draft: Draft,
    pub last_activity: Instant,
}

/// In-memory drafts by id.
pub type DraftStore = RwLock<HashMap<DraftId, DraftEntry>>;

type AppState = Data<DraftStore>;

/// Directory assets are served from.
pub struct AssetRoot(pub PathBuf);

/// Drop drafts untouched for `timeout`. Returns how many were removed.
pub fn remove_idle_drafts(store: &DraftStore, timeout: Duration) -> usize {
    let mut g = match store.write() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
    before - g.len()
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Draft JSON plus the computed status.
#[derive(Serialize)]
struct DraftResponse<'a> {
    #[serde(flatten)]
    draft: &'a Draft,
    status: DraftStatus,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

/// Path segment: team id (e.g. /api/draft/teams/{team_id})
#[derive(Deserialize)]
struct TeamPath {
    team_id: TeamId,
}

/// Path segment: participant id (e.g. /api/draft/participants/{participant_id})
#[derive(Deserialize)]
struct ParticipantPath {
    participant_id: ParticipantId,
}

/// The session's stored draft, if it has one. Touching it refreshes last_activity.
fn existing_entry<'a>(
    drafts: &'a mut HashMap<DraftId, DraftEntry>,
    session: &Session,
) -> Option<&'a mut DraftEntry> {
    let id = session.get::<DraftId>(DRAFT_SESSION_KEY).ok().flatten()?;
    let entry = drafts.get_mut(&id)?;
    entry.last_activity = Instant::now();
    Some(entry)
}

/// The session's draft, created (and remembered in the session) if missing.
fn session_entry<'a>(
    drafts: &'a mut HashMap<DraftId, DraftEntry>,
    session: &Session,
) -> &'a mut DraftEntry {
    let id = session
        .get::<DraftId>(DRAFT_SESSION_KEY)
        .ok()
        .flatten()
        .filter(|id| drafts.contains_key(id))
        .unwrap_or_else(|| {
            let id = Uuid::new_v4();
            if let Err(e) = session.insert(DRAFT_SESSION_KEY, id) {
                log::warn!("Failed to store draft id in session: {}", e);
            }
            log::info!("Created draft {}", id);
            id
        });
    let entry = drafts.entry(id).or_insert_with(|| DraftEntry {
        draft: Draft::with_id(id),
        last_activity: Instant::now(),
    });
    entry.last_activity = Instant::now();
    entry
}

fn draft_json(draft: &Draft) -> HttpResponse {
    HttpResponse::Ok().json(DraftResponse {
        draft,
        status: draft.status(),
    })
}

fn error_json(e: &DraftError) -> HttpResponse {
    let mut builder: HttpResponseBuilder = match e {
        DraftError::EmptyName | DraftError::NotEnoughRoster { .. } => HttpResponse::BadRequest(),
        DraftError::TeamNotFound(_) | DraftError::ParticipantNotFound(_) => HttpResponse::NotFound(),
        DraftError::RosterLocked | DraftError::AlreadyStarted | DraftError::NotStarted => {
            HttpResponse::Conflict()
        }
    };
    builder.json(serde_json::json!({ "error": e.to_string() }))
}

fn plain_text(mut builder: HttpResponseBuilder, body: &'static str) -> HttpResponse {
    builder.content_type("text/plain").body(body)
}

/// Run one mutating operation on the session's draft under the write lock.
fn with_draft<F>(state: &AppState, session: &Session, op: F) -> HttpResponse
where
    F: FnOnce(&mut Draft) -> Result<(), DraftError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = session_entry(&mut g, session);
    match op(&mut entry.draft) {
        Ok(()) => draft_json(&entry.draft),
        Err(e) => error_json(&e),
    }
}

/// Read the session's draft without storing one: a session without a draft sees an empty one.
fn read_draft<F>(state: &AppState, session: &Session, read: F) -> HttpResponse
where
    F: FnOnce(&Draft) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match existing_entry(&mut g, session) {
        Some(entry) => read(&entry.draft),
        None => read(&Draft::new()),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-draft-web",
    })
}

/// Get the session's draft (empty if the session has none yet).
#[get("/api/draft")]
async fn api_get_draft(state: AppState, session: Session) -> HttpResponse {
    read_draft(&state, &session, draft_json)
}

/// Add a team (draft must not have started).
#[post("/api/draft/teams")]
async fn api_add_team(state: AppState, session: Session, body: Json<NameBody>) -> HttpResponse {
    with_draft(&state, &session, |d| d.add_team(&body.name).map(|_| ()))
}

/// Rename a team (draft must not have started).
#[put("/api/draft/teams/{team_id}")]
async fn api_rename_team(
    state: AppState,
    session: Session,
    path: Path<TeamPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    with_draft(&state, &session, |d| d.rename_team(path.team_id, &body.name))
}

/// Remove a team (draft must not have started).
#[delete("/api/draft/teams/{team_id}")]
async fn api_remove_team(state: AppState, session: Session, path: Path<TeamPath>) -> HttpResponse {
    with_draft(&state, &session, |d| d.remove_team(path.team_id))
}

/// Add a participant (draft must not have started).
#[post("/api/draft/participants")]
async fn api_add_participant(state: AppState, session: Session, body: Json<NameBody>) -> HttpResponse {
    with_draft(&state, &session, |d| d.add_participant(&body.name).map(|_| ()))
}

/// Rename a participant (draft must not have started).
#[put("/api/draft/participants/{participant_id}")]
async fn api_rename_participant(
    state: AppState,
    session: Session,
    path: Path<ParticipantPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    with_draft(&state, &session, |d| {
        d.rename_participant(path.participant_id, &body.name)
    })
}

/// Remove a participant (draft must not have started).
#[delete("/api/draft/participants/{participant_id}")]
async fn api_remove_participant(
    state: AppState,
    session: Session,
    path: Path<ParticipantPath>,
) -> HttpResponse {
    with_draft(&state, &session, |d| d.remove_participant(path.participant_id))
}

/// Start the draft (NotStarted -> InProgress), shuffling the pick order.
#[post("/api/draft/start")]
async fn api_start_draft(state: AppState, session: Session) -> HttpResponse {
    with_draft(&state, &session, start_draft)
}

/// Make the next pick. A no-op once the draft is complete.
#[post("/api/draft/next-pick")]
async fn api_next_pick(state: AppState, session: Session) -> HttpResponse {
    with_draft(&state, &session, |d| next_pick(d).map(|_| ()))
}

/// Restart: wipe teams, participants and progress.
#[post("/api/draft/restart")]
async fn api_restart_draft(state: AppState, session: Session) -> HttpResponse {
    with_draft(&state, &session, |d| {
        restart_draft(d);
        Ok(())
    })
}

/// Download the pick log as CSV.
#[get("/api/draft/export.csv")]
async fn api_export_results(state: AppState, session: Session) -> HttpResponse {
    read_draft(&state, &session, |draft| match results_csv(draft) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"draft-results.csv\"",
            ))
            .body(csv),
        Err(e) => {
            log::error!("Failed to export draft {}: {}", draft.id, e);
            plain_text(HttpResponse::InternalServerError(), "Server error")
        }
    })
}

/// Everything that is not an API route: a file under the asset root, GET only.
async fn serve_asset(req: HttpRequest, root: Data<AssetRoot>) -> HttpResponse {
    if req.method() != Method::GET {
        return HttpResponse::MethodNotAllowed()
            .insert_header((header::ALLOW, "GET"))
            .content_type("text/plain")
            .body("Method not allowed");
    }
    match assets::open(&root.0, req.path()).await {
        Ok(file) => file.into_response(&req),
        Err(AssetError::NotFound) => plain_text(HttpResponse::NotFound(), AssetError::NotFound.body()),
        Err(e) => {
            log::error!("Failed to read asset {}: {}", req.path(), e);
            plain_text(HttpResponse::InternalServerError(), e.body())
        }
    }
}

/// Register the API routes, then the asset catch-all.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_get_draft)
        .service(api_add_team)
        .service(api_rename_team)
        .service(api_remove_team)
        .service(api_add_participant)
        .service(api_rename_participant)
        .service(api_remove_participant)
        .service(api_start_draft)
        .service(api_next_pick)
        .service(api_restart_draft)
        .service(api_export_results)
        .service(web::resource("/{tail:.*}").to(serve_asset));
}
