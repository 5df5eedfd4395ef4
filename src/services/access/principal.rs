//! Resolve the caller from verified token claims.
//!
//! Every failure (missing claim, wrong claim type, unknown user, store fault)
//! is reported as [`AccessError::Unauthenticated`]. The concrete cause only
//! goes to the log, without the caller's email.

use crate::services::access::error::AccessError;
use crate::services::access::lookup::IdentityLookup;
use crate::services::access::types::{Claims, Identity};

pub const USERNAME_CLAIM: &str = "username";

pub async fn resolve(
    claims: &Claims,
    identities: &dyn IdentityLookup,
) -> Result<Identity, AccessError> {
    let Some(username) = claims.get(USERNAME_CLAIM).and_then(|v| v.as_str()) else {
        tracing::warn!("token has no string '{USERNAME_CLAIM}' claim");
        return Err(AccessError::Unauthenticated);
    };

    match identities.find_by_email(username).await {
        Ok(Some(identity)) => Ok(identity),
        Ok(None) => {
            tracing::debug!("no identity for token subject");
            Err(AccessError::Unauthenticated)
        }
        Err(err) => {
            tracing::warn!(error = ?err, "identity lookup failed");
            Err(AccessError::Unauthenticated)
        }
    }
}
