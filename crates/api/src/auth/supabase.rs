//! Verification of Supabase-issued access tokens.
//!
//! Supabase signs session JWTs with the project's HS256 secret. The `sub`
//! claim is the auth user's UUID and `aud` is `"authenticated"` for signed-in
//! users. This server never issues tokens in production; [`issue_token`]
//! exists for local tooling and tests.

use charasphere_core::types::UserId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Audience Supabase stamps on tokens for signed-in users.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Claims read from a Supabase access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the Supabase auth user id.
    pub sub: UserId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Postgres role the token maps to (`"authenticated"`, `"anon"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Configuration for token verification.
#[derive(Debug, Clone)]
pub struct SupabaseJwtConfig {
    /// HS256 secret from the Supabase project settings.
    pub secret: String,
    /// Expected `aud` claim.
    pub audience: String,
}

impl SupabaseJwtConfig {
    /// Load token settings from environment variables.
    ///
    /// | Env Var                 | Required | Default         |
    /// |-------------------------|----------|-----------------|
    /// | `SUPABASE_JWT_SECRET`   | **yes**  | --              |
    /// | `SUPABASE_JWT_AUDIENCE` | no       | `authenticated` |
    ///
    /// # Panics
    ///
    /// Panics if `SUPABASE_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SUPABASE_JWT_SECRET")
            .expect("SUPABASE_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SUPABASE_JWT_SECRET must not be empty");

        let audience =
            std::env::var("SUPABASE_JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        Self { secret, audience }
    }
}

/// Validate a token's signature, expiry and audience, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    config: &SupabaseJwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Sign a token shaped like a Supabase session token.
pub fn issue_token(
    user_id: UserId,
    email: Option<&str>,
    ttl_secs: i64,
    config: &SupabaseJwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + ttl_secs,
        iat: Some(now),
        aud: Some(config.audience.clone()),
        email: email.map(str::to_string),
        role: Some(DEFAULT_AUDIENCE.to_string()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
