/*
 * Responsibility
 * - 認可の判定だけを行う (I/O なし)
 * - self-or-admin: admin は所有者チェックより先に通す
 */
use crate::services::access::error::AccessError;
use crate::services::access::types::{Identity, ROLE_ADMIN};

pub const SELF_OR_ADMIN_DENIED: &str = "Access denied. Should be self or admin";

pub fn validate_self_or_admin(caller: &Identity, target_id: i64) -> Result<(), AccessError> {
    if caller.has_role(ROLE_ADMIN) {
        return Ok(());
    }
    if caller.id != target_id {
        tracing::debug!(caller_id = caller.id, target_id, "self-or-admin check denied");
        return Err(AccessError::forbidden(SELF_OR_ADMIN_DENIED));
    }
    Ok(())
}

/// Route-level gate: the caller must hold at least one of `authorities`.
pub fn require_any_role(caller: &Identity, authorities: &[&str]) -> Result<(), AccessError> {
    if authorities.iter().any(|a| caller.has_role(a)) {
        return Ok(());
    }
    tracing::debug!(caller_id = caller.id, ?authorities, "required role missing");
    Err(AccessError::forbidden("Access denied. Missing required role"))
}
