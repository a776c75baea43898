use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// Field names follow the wire format `{userId, email, role, iat, exp}`
/// so tokens stay readable by clients that decode them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Numeric user identifier
    pub user_id: i64,

    /// Normalized email of the user
    pub email: String,

    /// Role name (`user` or `admin`)
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email
    /// * `role` - User role name
    /// * `ttl` - Time until the token expires
    pub fn for_user(
        user_id: i64,
        email: impl Into<String>,
        role: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            email: email.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(7, "ana@x.com", "user", Duration::hours(24));

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.role, "user");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let claims = Claims::for_user(7, "ana@x.com", "admin", Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["userId"], 7);
        assert_eq!(json["role"], "admin");
        assert!(json.get("user_id").is_none());
    }
}
