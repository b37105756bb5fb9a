//! HS256 admin session tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in every admin token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The admin's database id.
    pub sub: i32,
    pub username: String,
    pub email: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Signs a token for the given admin identity.
pub fn issue(
    id: i32,
    username: &str,
    email: &str,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: id,
        username: username.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + expiry_hours * 3600,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validates signature and expiry, returning the embedded [`Claims`].
pub fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-long-enough-for-hmac";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = issue(7, "admin", "admin@wayline.travel", SECRET, 24)
            .expect("token generation should succeed");

        let claims = verify(&token, SECRET).expect("token validation should succeed");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.email, "admin@wayline.travel");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_fails() {
        // Expired well past the default 60-second leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "admin".to_string(),
            email: "admin@wayline.travel".to_string(),
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(verify(&token, SECRET).is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = issue(1, "admin", "admin@wayline.travel", SECRET, 24).unwrap();
        assert!(verify(&token, "a-different-secret").is_err());
    }
}
