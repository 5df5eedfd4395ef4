/*
 * Responsibility
 * - core が扱う型 (Identity / Role / RoleRow / Order / OrderLine)
 * - repo の Row 型や HTTP の DTO とは分けておく
 */
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_CLIENT: &str = "ROLE_CLIENT";

/// Verified token payload. Only `"username"` is read by the core.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// A permission grant such as `ROLE_ADMIN`.
///
/// Equality, ordering and hashing look at `authority` only, so a role set
/// never holds the same authority twice even when the ids disagree.
#[derive(Debug, Clone)]
pub struct Role {
    pub id: i64,
    pub authority: String,
}

impl Role {
    pub fn new(id: i64, authority: impl Into<String>) -> Self {
        Self {
            id,
            authority: authority.into(),
        }
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.authority == other.authority
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.authority.hash(state);
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.authority.cmp(&other.authority)
    }
}

/// The resolved caller (or any user loaded for authentication).
///
/// `email` is the external lookup key, `id` the internal one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: BTreeSet<Role>,
}

impl Identity {
    /// Exact, case-sensitive authority match.
    pub fn has_role(&self, authority: &str) -> bool {
        self.roles.iter().any(|r| r.authority == authority)
    }
}

/// One (identity, role) pair as returned by the credential query.
///
/// Every row of one identity carries the same id, name, email and hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRow {
    pub identity_id: i64,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i64,
    pub authority: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i64,
    pub name: String,
    pub img_url: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub owning_identity_id: i64,
    pub items: Vec<OrderLine>,
}
