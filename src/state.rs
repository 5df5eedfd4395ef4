/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthService, guard: OrderAccessGuard, identities: IdentityLookup
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - リクエストごとの caller はここに持たない (Claims として request extensions で渡す)
 */
use std::sync::Arc;

use crate::services::access::{IdentityLookup, OrderAccessGuard, OrderLookup};
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub guard: OrderAccessGuard,
    pub identities: Arc<dyn IdentityLookup>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        orders: Arc<dyn OrderLookup>,
        identities: Arc<dyn IdentityLookup>,
    ) -> Self {
        Self {
            auth,
            guard: OrderAccessGuard::new(orders, identities.clone()),
            identities,
        }
    }
}
