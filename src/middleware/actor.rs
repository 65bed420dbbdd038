use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::{
    error::AppError,
    models::auth::{ActorQuery, AuthContext},
};

/// Reads the actor from `?username=`. A missing or blank username is
/// rejected the same way as an unknown one.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ActorQuery>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::Unauthorized)?;

        query
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .map(AuthContext::new)
            .ok_or(AppError::Unauthorized)
    }
}
