//! Scheduler service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::{
    error::{SchedulerError, SchedulerResult},
    extract::AppJson,
    models::{
        CancelRequest, JoinRequest, PlayerQuery, SessionInput, SessionMessage, SportInput,
        parse_record_id,
    },
    state::AppState,
    store::{SessionStore, SportStore},
};

/// Create the router for the scheduler service
pub fn create_router<S, P>(state: AppState<S, P>) -> Router
where
    S: SessionStore + Clone + 'static,
    P: SportStore + Clone + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/sessions", post(create_session::<S, P>))
        .route("/api/sessions/join", patch(join_session::<S, P>))
        .route("/api/sessions/cancel", patch(cancel_session::<S, P>))
        .route("/api/sessions/player", get(player_sessions::<S, P>))
        .route("/api/sessions/admin", get(all_sessions::<S, P>))
        .route(
            "/api/sessions/cancelled-by-players",
            get(cancelled_sessions::<S, P>),
        )
        .route(
            "/api/sessions/:id",
            put(edit_session::<S, P>).delete(delete_session::<S, P>),
        )
        .route(
            "/api/sports",
            get(list_sports::<S, P>).post(add_sport::<S, P>),
        )
        .route(
            "/api/sports/:id",
            put(rename_sport::<S, P>).delete(delete_sport::<S, P>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "scheduler-service"
    }))
}

fn session_id(raw: &str) -> SchedulerResult<Uuid> {
    parse_record_id(raw).ok_or(SchedulerError::SessionNotFound)
}

fn sport_id(raw: &str) -> SchedulerResult<Uuid> {
    parse_record_id(raw).ok_or(SchedulerError::SportNotFound)
}

/// Admin: create a session
pub async fn create_session<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    AppJson(input): AppJson<SessionInput>,
) -> SchedulerResult<impl IntoResponse> {
    let session = state.sessions.create(input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Player: join a session
pub async fn join_session<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    AppJson(payload): AppJson<JoinRequest>,
) -> SchedulerResult<impl IntoResponse> {
    let id = session_id(&payload.session_id)?;
    let session = state.sessions.join(id, &payload.player_email).await?;

    Ok(Json(SessionMessage {
        message: "Joined session",
        session,
    }))
}

/// Player: cancel participation, optionally with a reason
pub async fn cancel_session<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    AppJson(payload): AppJson<CancelRequest>,
) -> SchedulerResult<impl IntoResponse> {
    let id = session_id(&payload.session_id)?;
    let session = state
        .sessions
        .cancel(id, &payload.player_email, payload.reason.as_deref())
        .await?;

    Ok(Json(SessionMessage {
        message: "Session cancelled",
        session,
    }))
}

/// Player: sessions that list the given email
pub async fn player_sessions<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    Query(query): Query<PlayerQuery>,
) -> SchedulerResult<impl IntoResponse> {
    Ok(Json(state.sessions.list_for_player(&query.email).await?))
}

/// Admin: every session
pub async fn all_sessions<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
) -> SchedulerResult<impl IntoResponse> {
    Ok(Json(state.sessions.list_all().await?))
}

/// Admin: sessions with player cancellations and their reasons
pub async fn cancelled_sessions<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
) -> SchedulerResult<impl IntoResponse> {
    Ok(Json(state.sessions.list_cancellations().await?))
}

/// Admin: edit a session
pub async fn edit_session<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<SessionInput>,
) -> SchedulerResult<impl IntoResponse> {
    let session = state.sessions.edit(session_id(&id)?, input).await?;
    Ok(Json(session))
}

/// Admin: delete a session
pub async fn delete_session<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> SchedulerResult<impl IntoResponse> {
    state.sessions.delete(session_id(&id)?).await?;
    Ok(Json(json!({ "message": "Session deleted" })))
}

pub async fn list_sports<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
) -> SchedulerResult<impl IntoResponse> {
    Ok(Json(state.sports.list().await?))
}

pub async fn add_sport<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    AppJson(input): AppJson<SportInput>,
) -> SchedulerResult<impl IntoResponse> {
    let sport = state.sports.add(input).await?;
    Ok((StatusCode::CREATED, Json(sport)))
}

pub async fn rename_sport<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<SportInput>,
) -> SchedulerResult<impl IntoResponse> {
    let sport = state.sports.rename(sport_id(&id)?, input).await?;
    Ok(Json(sport))
}

pub async fn delete_sport<S: SessionStore, P: SportStore>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> SchedulerResult<impl IntoResponse> {
    state.sports.delete(sport_id(&id)?).await?;
    Ok(Json(json!({ "message": "Sport deleted" })))
}
