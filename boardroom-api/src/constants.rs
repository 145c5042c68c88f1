//! Constants for the Boardroom API
//!
//! Defaults for every setting [`ApiConfig`](crate::ApiConfig) reads from the
//! environment.

// ============================================================================
// SERVER
// ============================================================================

/// Default bind host
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

// ============================================================================
// LLM COLLABORATOR
// ============================================================================

/// Default client-side request budget against the provider (per minute)
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;

// ============================================================================
// DEBATE
// ============================================================================

/// Turn cap used when a debate request does not name one
pub const DEFAULT_MAX_TURNS: u32 = 3;

/// Largest turn cap a caller may ask for
pub const DEFAULT_MAX_TURNS_LIMIT: u32 = 10;

// ============================================================================
// CORS
// ============================================================================

/// Default CORS max age in seconds (24 hours)
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 86400;

// ============================================================================
// LOGGING
// ============================================================================

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str =
    "boardroom_api=debug,boardroom_agents=debug,tower_http=info,info";
