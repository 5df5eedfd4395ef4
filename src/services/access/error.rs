/*
 * Responsibility
 * - access core が上位 (handler) に伝える失敗の意味
 * - HTTP status への変換は crate::error 側で行う
 */
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("unauthenticated")]
    Unauthenticated,

    // Order store fault. Not an access outcome; surfaces as 500.
    #[error("store error")]
    Store(#[from] RepoError),
}

impl AccessError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}
