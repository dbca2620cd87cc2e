//! Embedded-app session tokens and the [`ShopSession`] extractor.
//!
//! The admin frontend sends `Authorization: Bearer <token>`, an HS256 JWT
//! signed with the app's API secret. The shop a request acts for is the host
//! of the token's `dest` claim.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use qrcodes_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Default clock skew tolerated on `exp`/`nbf`, in seconds.
const DEFAULT_LEEWAY_SECS: u64 = 5;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Shop admin URL, e.g. `https://demo.myshopify.com/admin`.
    pub iss: String,
    /// Shop URL, e.g. `https://demo.myshopify.com`.
    pub dest: String,
    /// The app's API key.
    pub aud: String,
    /// Staff user id.
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub jti: String,
    /// Admin session id.
    #[serde(default)]
    pub sid: Option<String>,
}

/// Configuration for session token verification.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The app's API key, expected in `aud`.
    pub api_key: String,
    /// HMAC-SHA256 secret used to verify tokens.
    pub api_secret: String,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `SHOPIFY_API_KEY`     | **yes**  | --      |
    /// | `SHOPIFY_API_SECRET`  | **yes**  | --      |
    /// | `SESSION_LEEWAY_SECS` | no       | `5`     |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty.
    pub fn from_env() -> Self {
        let api_key = std::env::var("SHOPIFY_API_KEY").expect("SHOPIFY_API_KEY must be set");
        assert!(!api_key.is_empty(), "SHOPIFY_API_KEY must not be empty");

        let api_secret =
            std::env::var("SHOPIFY_API_SECRET").expect("SHOPIFY_API_SECRET must be set");
        assert!(!api_secret.is_empty(), "SHOPIFY_API_SECRET must not be empty");

        let leeway_secs: u64 = std::env::var("SESSION_LEEWAY_SECS")
            .unwrap_or_else(|_| DEFAULT_LEEWAY_SECS.to_string())
            .parse()
            .expect("SESSION_LEEWAY_SECS must be a valid u64");

        Self {
            api_key,
            api_secret,
            leeway_secs,
        }
    }
}

/// Why a session token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("session token destination or issuer is not a shop URL: {0}")]
    Destination(String),

    #[error("session token issuer does not match its destination")]
    Issuer,
}

/// Verify a session token and return its claims.
///
/// Checks the signature, `exp`, `nbf`, and that `aud` is the app's API key.
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.api_key.as_str()]);
    validation.validate_nbf = true;
    validation.leeway = config.leeway_secs;

    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.api_secret.as_bytes()),
        &validation,
    )?
    .claims;

    if shop_from_dest(&claims.iss)? != shop_from_dest(&claims.dest)? {
        return Err(SessionError::Issuer);
    }
    Ok(claims)
}

/// Host of a `dest` (or `iss`) URL, e.g. `https://demo.myshopify.com` -> `demo.myshopify.com`.
pub fn shop_from_dest(dest: &str) -> Result<String, SessionError> {
    let host = dest
        .strip_prefix("https://")
        .map(|rest| rest.split('/').next().unwrap_or_default())
        .filter(|host| !host.is_empty() && !host.contains([':', '@', '?', '#']))
        .ok_or_else(|| SessionError::Destination(dest.to_string()))?;
    Ok(host.to_ascii_lowercase())
}

/// The shop (and staff user) a request acts for, extracted from the
/// `Authorization` header.
///
/// ```ignore
/// async fn my_handler(session: ShopSession) -> AppResult<Json<()>> {
///     tracing::info!(shop = %session.shop, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ShopSession {
    /// Shop domain, e.g. `demo.myshopify.com`.
    pub shop: String,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
}

impl FromRequestParts<AppState> for ShopSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_session_token(token, &state.config.session)
            .and_then(|claims| shop_from_dest(&claims.dest).map(|shop| (shop, claims)));

        match claims {
            Ok((shop, claims)) => Ok(ShopSession {
                shop,
                user_id: claims.sub,
                session_id: claims.sid,
            }),
            Err(err) => {
                tracing::debug!(error = %err, "Rejected session token");
                Err(AppError::Core(CoreError::Unauthorized(
                    "Invalid or expired session token".into(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            api_key: "test-api-key".to_string(),
            api_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            leeway_secs: 0,
        }
    }

    fn claims(dest: &str, aud: &str, exp_offset: i64) -> SessionClaims {
        let now = chrono::Utc::now().timestamp();
        SessionClaims {
            iss: format!("{dest}/admin"),
            dest: dest.to_string(),
            aud: aud.to_string(),
            sub: Some("42".to_string()),
            exp: now + exp_offset,
            nbf: now - 10,
            iat: now - 10,
            jti: "jti-1".to_string(),
            sid: Some("sid-1".to_string()),
        }
    }

    fn sign(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn valid_token_is_accepted() {
        let config = test_config();
        let token = sign(
            &claims("https://demo.myshopify.com", "test-api-key", 60),
            &config.api_secret,
        );
        let claims = validate_session_token(&token, &config).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(shop_from_dest(&claims.dest).unwrap(), "demo.myshopify.com");
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let config = test_config();
        let token = sign(
            &claims("https://demo.myshopify.com", "another-app", 60),
            &config.api_secret,
        );
        assert_matches!(
            validate_session_token(&token, &config),
            Err(SessionError::Token(_))
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = sign(
            &claims("https://demo.myshopify.com", "test-api-key", 60),
            "some-other-secret-of-similar-length!",
        );
        assert!(validate_session_token(&token, &config).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let token = sign(
            &claims("https://demo.myshopify.com", "test-api-key", -300),
            &config.api_secret,
        );
        assert!(validate_session_token(&token, &config).is_err());
    }

    #[test]
    fn issuer_must_match_destination() {
        let config = test_config();
        let mut forged = claims("https://demo.myshopify.com", "test-api-key", 60);
        forged.iss = "https://evil.myshopify.com/admin".to_string();
        let token = sign(&forged, &config.api_secret);
        assert_matches!(
            validate_session_token(&token, &config),
            Err(SessionError::Issuer)
        );
    }

    #[test]
    fn issuer_on_lookalike_host_is_rejected() {
        let config = test_config();
        let mut forged = claims("https://demo.myshopify.com", "test-api-key", 60);
        forged.iss = "https://demo.myshopify.com.evil.test/admin".to_string();
        let token = sign(&forged, &config.api_secret);
        assert_matches!(
            validate_session_token(&token, &config),
            Err(SessionError::Issuer)
        );
    }

    #[test]
    fn shop_is_host_of_destination() {
        assert_eq!(
            shop_from_dest("https://Demo.myshopify.com/").unwrap(),
            "demo.myshopify.com"
        );
        assert!(shop_from_dest("http://demo.myshopify.com").is_err());
        assert!(shop_from_dest("https://").is_err());
        assert!(shop_from_dest("https://user@demo.myshopify.com").is_err());
    }
}
