//! In-memory lookups for tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::repos::error::{RepoError, RepoResult};
use crate::services::access::lookup::{IdentityLookup, OrderLookup, RoleRowLookup};
use crate::services::access::types::{Identity, Order, OrderLine, Role, RoleRow};

pub fn identity(id: i64, email: &str, authorities: &[&str]) -> Identity {
    Identity {
        id,
        display_name: format!("user-{id}"),
        email: email.to_string(),
        password_hash: "$2a$10$lqd02dKURKX/h.XIQrdcYem5EUWfmYAseJGlnkP1qWYYLVUxLX2nG".to_string(),
        roles: authorities
            .iter()
            .enumerate()
            .map(|(i, a)| Role::new(i as i64 + 1, *a))
            .collect::<BTreeSet<_>>(),
    }
}

pub fn order(id: i64, owner: i64) -> Order {
    Order {
        id,
        owning_identity_id: owner,
        items: vec![OrderLine {
            product_id: 1,
            name: "The Lord of the Rings".to_string(),
            img_url: None,
            unit_price: Decimal::new(1000, 2),
            quantity: 2,
        }],
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    identities: HashMap<String, Identity>,
    orders: HashMap<i64, Order>,
    fail_identities: bool,
    fail_orders: bool,
    identity_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identities.insert(identity.email.clone(), identity);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.insert(order.id, order);
        self
    }

    pub fn failing_identities(mut self) -> Self {
        self.fail_identities = true;
        self
    }

    pub fn failing_orders(mut self) -> Self {
        self.fail_orders = true;
        self
    }

    pub fn identity_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityLookup for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Identity>> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_identities {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.identities.get(email).cloned())
    }
}

#[async_trait]
impl RoleRowLookup for InMemoryStore {
    async fn search_role_rows(&self, email: &str) -> RepoResult<Vec<RoleRow>> {
        let Some(identity) = self.identities.get(email) else {
            return Ok(Vec::new());
        };

        Ok(identity
            .roles
            .iter()
            .map(|role| RoleRow {
                identity_id: identity.id,
                display_name: identity.display_name.clone(),
                email: identity.email.clone(),
                password_hash: identity.password_hash.clone(),
                role_id: role.id,
                authority: role.authority.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl OrderLookup for InMemoryStore {
    async fn find_order(&self, order_id: i64) -> RepoResult<Option<Order>> {
        if self.fail_orders {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.orders.get(&order_id).cloned())
    }
}
