/*
 * Responsibility
 * - core が外部ストアに求める能力 (キーによる単発の point lookup) だけを trait で定義
 * - 実装は repos (Postgres) / テスト用の in-memory fake
 */
use async_trait::async_trait;

use crate::repos::error::RepoResult;
use crate::services::access::role_aggregator;
use crate::services::access::types::{Identity, Order, RoleRow};

/// Point lookup of an identity (with roles) by its unique email.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Identity>>;
}

/// All credential rows for an email; empty when the email is unknown.
#[async_trait]
pub trait RoleRowLookup: Send + Sync {
    async fn search_role_rows(&self, email: &str) -> RepoResult<Vec<RoleRow>>;
}

#[async_trait]
pub trait OrderLookup: Send + Sync {
    async fn find_order(&self, order_id: i64) -> RepoResult<Option<Order>>;
}

/// [`IdentityLookup`] backed by the credential rows of a [`RoleRowLookup`].
///
/// Rows are fetched and aggregated on every call; nothing is cached. An email
/// with no rows resolves to `None`.
#[derive(Debug, Clone)]
pub struct RoleRowIdentityLookup<L> {
    rows: L,
}

impl<L> RoleRowIdentityLookup<L> {
    pub fn new(rows: L) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl<L: RoleRowLookup> IdentityLookup for RoleRowIdentityLookup<L> {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Identity>> {
        let rows = self.rows.search_role_rows(email).await?;
        Ok(role_aggregator::aggregate(&rows, email).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::access::fake::{self, InMemoryStore};
    use crate::services::access::types::{ROLE_ADMIN, ROLE_CLIENT};

    #[tokio::test]
    async fn identity_is_rebuilt_from_rows() {
        let stored = fake::identity(2, "alex@gmail.com", &[ROLE_CLIENT, ROLE_ADMIN]);
        let store = InMemoryStore::new().with_identity(stored.clone());
        let lookup = RoleRowIdentityLookup::new(store);

        let found = lookup.find_by_email("alex@gmail.com").await.unwrap();

        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn unknown_email_is_none() {
        let lookup = RoleRowIdentityLookup::new(InMemoryStore::new());

        let found = lookup.find_by_email("nobody@gmail.com").await.unwrap();

        assert!(found.is_none());
    }
}
