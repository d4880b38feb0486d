//! Configuration for the token service.

/// Tunables for access-token issuance
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret for HS256 signing
    pub jwt_secret: String,
    /// Issuer claim stamped on and required of every token
    pub issuer: String,
    /// Access token lifetime in minutes
    pub access_token_minutes: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            issuer: "veriflow".to_string(),
            access_token_minutes: 60,
        }
    }
}
