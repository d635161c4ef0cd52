//! Bearer-token extractors. `AdminUser` rejects before the handler body runs.

use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").or_else(|| s.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Claims of a valid token, or `None` for anonymous or invalid tokens.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<Claims>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = bearer_token(parts).and_then(|token| match state.tokens.verify(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!(error = %e, "invalid bearer token");
                None
            }
        });
        Ok(MaybeUser(claims))
    }
}

/// A caller whose token carries `isAdmin: true`.
#[derive(Clone, Debug)]
pub struct AdminUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let MaybeUser(claims) = MaybeUser::from_request_parts(parts, state)
            .await
            .unwrap_or(MaybeUser(None));
        match claims {
            Some(claims) if claims.is_admin => Ok(AdminUser(claims)),
            Some(claims) => {
                tracing::warn!(username = %claims.username, "admin required");
                Err(AppError::Unauthorized)
            }
            None => Err(AppError::Unauthorized),
        }
    }
}
