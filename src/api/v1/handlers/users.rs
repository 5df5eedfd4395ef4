/*
 * Responsibility
 * - GET /users/me
 * - caller は毎回 claims から解決する (キャッシュしない)
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{dto::users::UserResponse, extractors::CallerClaims},
    error::AppError,
    services::access::{
        policy, principal,
        types::{ROLE_ADMIN, ROLE_CLIENT},
    },
    state::AppState,
};

pub async fn find_me(
    State(state): State<AppState>,
    CallerClaims(claims): CallerClaims,
) -> Result<Json<UserResponse>, AppError> {
    let me = principal::resolve(&claims, state.identities.as_ref()).await?;
    policy::require_any_role(&me, &[ROLE_ADMIN, ROLE_CLIENT])?;

    Ok(Json(UserResponse::from(me)))
}
