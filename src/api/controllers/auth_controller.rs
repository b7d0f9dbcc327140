use crate::api::controllers::dto::auth_dto::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
};
use crate::api::controllers::dto::user_dto::UserResponse;
use crate::api::errors::APIErrors;
use crate::api::extractors::TOKEN_COOKIE;
use crate::api::request::ValidatedJson;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let user = state.auth.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log in; the token is returned in the body and as an HttpOnly cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    let (token, user) = state.auth.login(&payload.email, &payload.password).await?;

    let cookie = Cookie::build((TOKEN_COOKIE, token.clone()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/");

    let body = LoginResponse {
        token,
        expires_in: state.auth.token_lifetime_seconds(),
        user: user.into(),
    };

    Ok((jar.add(cookie), Json(body)))
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(Cookie::build(TOKEN_COOKIE).path("/")),
        Json(MessageResponse::new("Logged out")),
    )
}

pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    state.auth.forgot_password(&payload.email).await?;
    Ok(Json(MessageResponse::new("Password reset link sent")))
}

pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, APIErrors> {
    state
        .auth
        .reset_password(&payload.token, &payload.email, &payload.password)
        .await?;
    Ok(Json(MessageResponse::new("Password has been reset")))
}
