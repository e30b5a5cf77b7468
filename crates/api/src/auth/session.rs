//! Signed session cookie codec.
//!
//! A session token is an HS256 JWT carrying the participant identity
//! minted at registration. Verification failure of any kind (malformed
//! token, bad signature, expired) is reported as "no session": callers
//! never learn why a token was rejected.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime in days. There is no refresh or rotation: a token is
/// valid for its full fixed lifetime.
const SESSION_TTL_DAYS: i64 = 30;

const SESSION_TTL_SECS: i64 = SESSION_TTL_DAYS * 24 * 60 * 60;

/// Identity of a registered participant, embedded verbatim in the token.
///
/// Created once at registration and immutable thereafter; its only
/// durable existence is the signed token held by the client and the
/// registration row in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub participant_id: String,
    pub full_name: String,
    pub email: String,
}

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject -- the opaque participant id.
    sub: String,
    name: String,
    email: String,
    /// Issued-at time (UTC Unix timestamp).
    iat: i64,
    /// Expiration time (UTC Unix timestamp).
    exp: i64,
}

/// Configuration for session signing and cookie transport.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify session tokens.
    pub secret: String,
    /// Set the `Secure` cookie attribute (enable behind HTTPS).
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var          | Required | Default |
    /// |------------------|----------|---------|
    /// | `SESSION_SECRET` | **yes**  | --      |
    /// | `COOKIE_SECURE`  | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            secret,
            cookie_secure,
        }
    }
}

/// Sign `identity` into a session token valid for 30 days.
pub fn issue(
    identity: &SessionIdentity,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: identity.participant_id.clone(),
        name: identity.full_name.clone(),
        email: identity.email.clone(),
        iat: now,
        exp: now + SESSION_TTL_SECS,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a session token and return the embedded identity.
///
/// Returns `None` for malformed, tampered, or expired tokens.
pub fn verify(token: &str, config: &SessionConfig) -> Option<SessionIdentity> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .ok()?;

    Some(SessionIdentity {
        participant_id: data.claims.sub,
        full_name: data.claims.name,
        email: data.claims.email,
    })
}

/// Build the `Set-Cookie` header value carrying a session token.
///
/// Scoped to path `/`, http-only, same-site-lax, 30-day max-age, and
/// `Secure` when configured for production.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={SESSION_TTL_SECS}; HttpOnly; SameSite=Lax"
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extract the session token from a `Cookie` header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            cookie_secure: false,
        }
    }

    fn test_identity() -> SessionIdentity {
        SessionIdentity {
            participant_id: "a1b2c3d4e5f6g7".to_string(),
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
        }
    }

    #[test]
    fn issue_and_verify_round_trips_the_identity() {
        let config = test_config();
        let token = issue(&test_identity(), &config).expect("issue should succeed");

        let identity = verify(&token, &config).expect("verify should succeed");
        assert_eq!(identity, test_identity());
    }

    #[test]
    fn expired_token_is_treated_as_no_session() {
        let config = test_config();

        // Manually create an already-expired token, well beyond the
        // default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "p".to_string(),
            name: "n".to_string(),
            email: "e@example.com".to_string(),
            iat: now - SESSION_TTL_SECS - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(verify(&token, &config).is_none());
    }

    #[test]
    fn token_signed_with_a_different_secret_is_rejected() {
        let config_a = test_config();
        let config_b = SessionConfig {
            secret: "a-completely-different-secret".to_string(),
            cookie_secure: false,
        };

        let token = issue(&test_identity(), &config_a).expect("issue should succeed");
        assert!(verify(&token, &config_b).is_none());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let config = test_config();
        let token = issue(&test_identity(), &config).expect("issue should succeed");

        // Flip a character in the payload segment; the signature no
        // longer matches.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let payload = &mut parts[1];
        let flipped = if payload.ends_with('A') { "B" } else { "A" };
        payload.truncate(payload.len() - 1);
        payload.push_str(flipped);
        let tampered = parts.join(".");

        assert!(verify(&tampered, &config).is_none());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let config = test_config();
        assert!(verify("", &config).is_none());
        assert!(verify("not-a-jwt", &config).is_none());
        assert!(verify("a.b.c", &config).is_none());
    }

    #[test]
    fn cookie_carries_the_expected_attributes() {
        let config = test_config();
        let cookie = session_cookie("tok", &config);
        assert!(cookie.starts_with("session=tok; "));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));

        let secure = SessionConfig {
            cookie_secure: true,
            ..config
        };
        assert!(session_cookie("tok", &secure).ends_with("; Secure"));
    }

    #[test]
    fn token_is_extracted_from_cookie_header() {
        assert_eq!(token_from_cookie_header("session=abc"), Some("abc"));
        assert_eq!(
            token_from_cookie_header("theme=dark; session=abc; lang=en"),
            Some("abc")
        );
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header(""), None);
    }
}
