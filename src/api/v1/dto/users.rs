/*
 * Responsibility
 * - Users の response DTO (password hash は載せない)
 */
use serde::Serialize;

use crate::services::access::Identity;
use crate::services::access::types::Role;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RoleResponse {
    pub id: i64,
    pub authority: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            authority: role.authority,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleResponse>,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.display_name,
            email: identity.email,
            roles: identity.roles.into_iter().map(RoleResponse::from).collect(),
        }
    }
}
