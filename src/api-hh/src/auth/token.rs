use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the user row this session asserts.
    pub sub: Uuid,
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: u64,
    /// Expiration, seconds since the Unix epoch.
    pub exp: u64,
    /// Random nonce so two tokens minted within the same second still differ.
    pub jti: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token format")]
    InvalidFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("HMAC error: {0}")]
    HmacError(String),

    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Claims encoding error: {0}")]
    ClaimsError(#[from] serde_json::Error),
}

/// Generate a session token with format: claims.signature
/// The claims are base64url-encoded JSON; the signature is
/// HMAC-SHA256(encoded claims, secret).
pub fn generate_token(user_id: Uuid, email: &str, secret: &str, ttl_seconds: u64) -> Result<String, TokenError> {
    let iat = unix_now()?;

    // Cryptographically secure random nonce
    let nonce: [u8; 16] = rand::random();

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat,
        exp: iat + ttl_seconds,
        jti: general_purpose::URL_SAFE_NO_PAD.encode(nonce),
    };

    let payload = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
    let signature = sign_payload(&payload, secret)?;

    Ok(format!("{}.{}", payload, signature))
}

/// Verify a session token's signature and expiry, returning the decoded claims.
/// Any failure mode means the caller must treat the request as unauthenticated.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let (payload, provided_signature) = token.split_once('.').ok_or(TokenError::InvalidFormat)?;
    if payload.is_empty() || provided_signature.is_empty() || provided_signature.contains('.') {
        return Err(TokenError::InvalidFormat);
    }

    // Verify the signature before trusting any of the claims. Mac::verify_slice
    // is a constant-time comparison.
    let mut mac = new_mac(secret)?;
    mac.update(payload.as_bytes());
    let signature_bytes = general_purpose::URL_SAFE_NO_PAD.decode(provided_signature)?;
    mac.verify_slice(&signature_bytes).map_err(|_| TokenError::InvalidSignature)?;

    let claims: Claims = serde_json::from_slice(&general_purpose::URL_SAFE_NO_PAD.decode(payload)?)?;

    if unix_now()? > claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

fn unix_now() -> Result<u64, TokenError> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

fn new_mac(secret: &str) -> Result<HmacSha256, TokenError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| TokenError::HmacError(e.to_string()))
}

/// Sign a payload using HMAC-SHA256
fn sign_payload(payload: &str, secret: &str) -> Result<String, TokenError> {
    let mut mac = new_mac(secret)?;

    mac.update(payload.as_bytes());
    let code_bytes = mac.finalize().into_bytes();

    Ok(general_purpose::URL_SAFE_NO_PAD.encode(code_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    const TEST_SECRET: &str = "test_secret_key_for_hmac_signing";

    #[test]
    fn test_generate_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, "a@b.com", TEST_SECRET, 3600).unwrap();

        let claims = verify_token(&token, TEST_SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let token = generate_token(Uuid::new_v4(), "a@b.com", TEST_SECRET, 3600).unwrap();
        let result = verify_token(&token, "wrong_secret");
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_verify_token_expired() {
        let token = generate_token(Uuid::new_v4(), "a@b.com", TEST_SECRET, 0).unwrap();
        sleep(Duration::from_secs(2));
        let result = verify_token(&token, TEST_SECRET);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_token_tampered_claims() {
        let token = generate_token(Uuid::new_v4(), "a@b.com", TEST_SECRET, 3600).unwrap();
        let (_, signature) = token.split_once('.').unwrap();

        // Re-encode different claims under the original signature
        let forged_payload = general_purpose::URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims {
                sub: Uuid::new_v4(),
                email: "attacker@evil.com".to_string(),
                iat: 0,
                exp: u64::MAX,
                jti: "forged".to_string(),
            })
            .unwrap(),
        );
        let forged = format!("{}.{}", forged_payload, signature);

        let result = verify_token(&forged, TEST_SECRET);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_verify_token_invalid_format() {
        let result = verify_token("not-a-token", TEST_SECRET);
        assert!(matches!(result, Err(TokenError::InvalidFormat)));
    }

    #[test]
    fn test_tokens_are_unique_per_mint() {
        let user_id = Uuid::new_v4();
        let first = generate_token(user_id, "a@b.com", TEST_SECRET, 3600).unwrap();
        let second = generate_token(user_id, "a@b.com", TEST_SECRET, 3600).unwrap();
        assert_ne!(first, second);
    }
}
