use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use rndm_model::UserId;

use crate::infra::errors::AppError;

/// Header carrying the authenticated subject's user id.
///
/// Issuing and verifying the value is the deployment perimeter's job; the
/// handlers only consume it. Every mutating operation requires it, viewer-
/// aware reads use it opportunistically.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Required subject identity for mutating operations.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub UserId);

/// Optional viewer identity for reads that personalize enrichment.
#[derive(Debug, Clone, Copy)]
pub struct MaybeIdentity(pub Option<UserId>);

fn user_from_parts(parts: &Parts) -> Result<Option<UserId>, AppError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::bad_request("Malformed user id header"))?;
    let id = Uuid::parse_str(value)
        .map_err(|_| AppError::bad_request("Malformed user id header"))?;
    Ok(Some(UserId(id)))
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        match user_from_parts(parts)? {
            Some(user) => Ok(Identity(user)),
            None => Err(AppError::unauthorized("User identity required")),
        }
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(user_from_parts(parts)?))
    }
}
