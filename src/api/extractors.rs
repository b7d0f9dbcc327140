use crate::api::errors::APIErrors;
use crate::api::state::AppState;
use crate::security::errors::AuthError;
use crate::security::jwt::AccessClaims;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::extract::CookieJar;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

/// Name of the cookie that carries the access token.
pub const TOKEN_COOKIE: &str = "token";

impl FromRequestParts<AppState> for AccessClaims {
    type Rejection = APIErrors;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_request_part(parts).await?;

        state.jwt.decode_token(&token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            match e {
                AuthError::TokenExpired => APIErrors::TokenExpired(e.to_string()),
                _ => APIErrors::Unauthorized,
            }
        })
    }
}

/// Bearer header first, then the `token` cookie.
async fn token_from_request_part(parts: &mut Parts) -> Result<String, APIErrors> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        parts.extract::<TypedHeader<Authorization<Bearer>>>().await
    {
        return Ok(bearer.token().to_string());
    }

    let jar = parts
        .extract::<CookieJar>()
        .await
        .map_err(|_| APIErrors::Unauthorized)?;

    jar.get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            tracing::debug!("Missing access token");
            APIErrors::Unauthorized
        })
}

/// Claims of an authenticated `ADMIN`.
#[derive(Debug, Clone)]
pub struct AdminClaims(pub AccessClaims);

impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = APIErrors;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = AccessClaims::from_request_parts(parts, state).await?;

        if !claims.is_admin() {
            tracing::warn!(user_id = claims.sub, "Admin route refused");
            return Err(APIErrors::Forbidden);
        }

        Ok(AdminClaims(claims))
    }
}

/// Fails with 403 unless the caller is `user_id` or an admin.
pub fn ensure_access(claims: &AccessClaims, user_id: i32) -> Result<(), APIErrors> {
    if claims.can_access(user_id) {
        Ok(())
    } else {
        Err(APIErrors::Forbidden)
    }
}
