//! Redis-backed cache stores.
//!
//! Key namespaces owned by this module:
//! - `reg_session:{session_id}` - registration sessions (sliding TTL)
//! - `revoked_jti:{jti}` - revoked access-token ids

pub mod redis_client;
pub mod revocation_store;
pub mod session_store;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use vf_shared::config::cache::CacheConfig;
