mod caller_claims;

pub use caller_claims::CallerClaims;
