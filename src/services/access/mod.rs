/*!
 * Identity resolution and order ownership authorization.
 *
 * Public API:
 * - role_aggregator::aggregate
 * - principal::resolve
 * - policy::{validate_self_or_admin, require_any_role}
 * - OrderAccessGuard::authorize_view
 * - totals::{subtotal, total}
 */

pub mod error;
pub mod guard;
pub mod lookup;
pub mod policy;
pub mod principal;
pub mod role_aggregator;
pub mod totals;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use error::AccessError;
pub use guard::OrderAccessGuard;
pub use lookup::{IdentityLookup, OrderLookup, RoleRowIdentityLookup, RoleRowLookup};
pub use types::{Claims, Identity, Order, OrderLine, RoleRow};
