//! Identity service routes

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    clock::Clock,
    codes::CodeStore,
    error::IdentityResult,
    extract::AppJson,
    mailer::Mailer,
    models::{
        ForgotPasswordRequest, LoginRequest, PublicProfile, ResetPasswordRequest, SignupRequest,
        VerifyEmailRequest,
    },
    state::AppState,
    store::UserStore,
};

/// Response for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: PublicProfile,
}

/// Create the router for the identity service
pub fn create_router<U, C, M, K>(state: AppState<U, C, M, K>) -> Router
where
    U: UserStore + Clone + 'static,
    C: CodeStore + Clone + 'static,
    M: Mailer + Clone + 'static,
    K: Clock + Clone + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/signup", post(signup::<U, C, M, K>))
        .route("/verify-email", post(verify_email::<U, C, M, K>))
        .route("/login", post(login::<U, C, M, K>))
        .route("/forgot-password", post(forgot_password::<U, C, M, K>))
        .route("/reset-password", post(reset_password::<U, C, M, K>))
        .route("/api/users/players", get(list_players::<U, C, M, K>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "identity-service"
    }))
}

fn message(text: &str) -> Json<serde_json::Value> {
    Json(json!({ "message": text }))
}

pub async fn signup<U: UserStore, C: CodeStore, M: Mailer, K: Clock>(
    State(state): State<AppState<U, C, M, K>>,
    AppJson(payload): AppJson<SignupRequest>,
) -> IdentityResult<impl IntoResponse> {
    state.identity.signup(payload).await?;
    Ok(message("Signup successful, verification email sent"))
}

pub async fn verify_email<U: UserStore, C: CodeStore, M: Mailer, K: Clock>(
    State(state): State<AppState<U, C, M, K>>,
    AppJson(payload): AppJson<VerifyEmailRequest>,
) -> IdentityResult<impl IntoResponse> {
    state.identity.verify_email(payload).await?;
    Ok(message("Email verified successfully"))
}

pub async fn login<U: UserStore, C: CodeStore, M: Mailer, K: Clock>(
    State(state): State<AppState<U, C, M, K>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> IdentityResult<impl IntoResponse> {
    let user = state.identity.login(payload).await?;
    Ok(Json(LoginResponse {
        message: "Login successful",
        user,
    }))
}

pub async fn forgot_password<U: UserStore, C: CodeStore, M: Mailer, K: Clock>(
    State(state): State<AppState<U, C, M, K>>,
    AppJson(payload): AppJson<ForgotPasswordRequest>,
) -> IdentityResult<impl IntoResponse> {
    state.identity.forgot_password(payload).await?;
    Ok(message("Password reset link sent to your email"))
}

pub async fn reset_password<U: UserStore, C: CodeStore, M: Mailer, K: Clock>(
    State(state): State<AppState<U, C, M, K>>,
    AppJson(payload): AppJson<ResetPasswordRequest>,
) -> IdentityResult<impl IntoResponse> {
    state.identity.reset_password(payload).await?;
    Ok(message("Password reset successful"))
}

/// Player directory
pub async fn list_players<U: UserStore, C: CodeStore, M: Mailer, K: Clock>(
    State(state): State<AppState<U, C, M, K>>,
) -> IdentityResult<impl IntoResponse> {
    Ok(Json(state.identity.list_players().await?))
}
