/*
 * Responsibility
 * - 検証済み Claims を handler に渡す extractor
 * - middleware (middleware::auth::access) が request.extensions() に insert 済みである前提
 * - 見つからない場合は 401 (認証がかかってない・ミドルウェア未設定)
 */
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::access::Claims;
use crate::state::AppState;

pub struct CallerClaims(pub Claims);

impl FromRequestParts<AppState> for CallerClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(CallerClaims)
            .ok_or(AppError::Unauthorized)
    }
}
