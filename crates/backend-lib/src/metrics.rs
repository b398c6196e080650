// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const LOGIN_SUCCESS: &str = "auth.login.success";
pub const LOGIN_FAILURE: &str = "auth.login.failure";
pub const REFRESH_SUCCESS: &str = "auth.refresh.success";
pub const REFRESH_FAILURE: &str = "auth.refresh.failure";
pub const BEARER_REJECTED: &str = "auth.bearer.rejected";
pub const REFRESH_TOKENS_ACTIVE: &str = "auth.refresh_tokens.active";
pub const REFRESH_TOKENS_PURGED: &str = "auth.refresh_tokens.purged";
