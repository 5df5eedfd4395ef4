/*
 * Responsibility
 * - 注文の閲覧可否を判定して、許可された場合のみ Order を返す
 * - 順序は固定: 存在チェック → principal 解決 → self-or-admin
 *   (存在しない注文は admin でも NotFound、他人の注文は存在する場合のみ Forbidden)
 */
use std::sync::Arc;

use crate::services::access::error::AccessError;
use crate::services::access::lookup::{IdentityLookup, OrderLookup};
use crate::services::access::types::{Claims, Order};
use crate::services::access::{policy, principal};

#[derive(Clone)]
pub struct OrderAccessGuard {
    orders: Arc<dyn OrderLookup>,
    identities: Arc<dyn IdentityLookup>,
}

impl std::fmt::Debug for OrderAccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderAccessGuard").finish_non_exhaustive()
    }
}

impl OrderAccessGuard {
    pub fn new(orders: Arc<dyn OrderLookup>, identities: Arc<dyn IdentityLookup>) -> Self {
        Self { orders, identities }
    }

    /// Load `order_id` and return it only if the caller behind `claims` is
    /// its owner or an admin.
    pub async fn authorize_view(
        &self,
        order_id: i64,
        claims: &Claims,
    ) -> Result<Order, AccessError> {
        let order = self
            .orders
            .find_order(order_id)
            .await?
            .ok_or_else(|| AccessError::not_found(format!("order {order_id}")))?;

        let caller = principal::resolve(claims, self.identities.as_ref()).await?;

        policy::validate_self_or_admin(&caller, order.owning_identity_id)?;

        tracing::debug!(order_id, caller_id = caller.id, "order view authorized");
        Ok(order)
    }
}
