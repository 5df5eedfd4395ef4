//! Collapses the rows of the credential query into one [`Identity`].
//!
//! The query yields one row per (identity, role) pair. Rows are not checked
//! for agreement: identity fields and the password hash come from the first
//! row, and roles are merged by authority.

use std::collections::BTreeSet;

use crate::services::access::error::AccessError;
use crate::services::access::types::{Identity, Role, RoleRow};

pub fn aggregate(rows: &[RoleRow], email: &str) -> Result<Identity, AccessError> {
    let first = rows
        .first()
        .ok_or_else(|| AccessError::not_found(email.to_string()))?;

    let roles: BTreeSet<Role> = rows
        .iter()
        .map(|row| Role::new(row.role_id, row.authority.clone()))
        .collect();

    Ok(Identity {
        id: first.identity_id,
        display_name: first.display_name.clone(),
        email: email.to_string(),
        password_hash: first.password_hash.clone(),
        roles,
    })
}
