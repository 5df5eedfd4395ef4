/*
 * Responsibility
 * - tb_user / tb_user_role / tb_role 向け SQLx 操作
 * - 認証用の credential rows (1 row = 1 user x 1 role) を返す
 * - rows → Identity の集約は core (role_aggregator) の責務
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;
use crate::services::access::{RoleRow, RoleRowLookup};

#[derive(Debug, FromRow)]
pub struct UserRoleRow {
    pub user_id: i64,
    pub name: String,
    pub username: String,
    pub password: String,
    #[sqlx(rename = "roleId")]
    pub role_id: i64,
    pub authority: String,
}

impl From<UserRoleRow> for RoleRow {
    fn from(row: UserRoleRow) -> Self {
        RoleRow {
            identity_id: row.user_id,
            display_name: row.name,
            email: row.username,
            password_hash: row.password,
            role_id: row.role_id,
            authority: row.authority,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn search_user_and_roles_by_email(
        &self,
        email: &str,
    ) -> RepoResult<Vec<UserRoleRow>> {
        // INNER JOIN: a user without any role yields no rows
        let rows = sqlx::query_as::<_, UserRoleRow>(
            r#"
            SELECT
                tb_user.id AS user_id,
                tb_user.name,
                tb_user.email AS username,
                tb_user.password,
                tb_role.id AS "roleId",
                tb_role.authority
            FROM tb_user
            INNER JOIN tb_user_role ON tb_user.id = tb_user_role.user_id
            INNER JOIN tb_role ON tb_role.id = tb_user_role.role_id
            WHERE tb_user.email = $1
            ORDER BY tb_role.id
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl RoleRowLookup for UserRepo {
    async fn search_role_rows(&self, email: &str) -> RepoResult<Vec<RoleRow>> {
        let rows = self.search_user_and_roles_by_email(email).await?;
        Ok(rows.into_iter().map(RoleRow::from).collect())
    }
}
