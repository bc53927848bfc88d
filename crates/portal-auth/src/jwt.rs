//! JWT session token generation and validation
//!
//! This module issues and validates portal session tokens using the
//! jsonwebtoken crate. HMAC algorithms are the default; RS256 and ES256 are
//! available for deployments that sign with a key pair.

use crate::claims::{PortalClaims, TokenType};
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use chrono::Duration;
use portal_rbac::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};

/// JWT configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HMAC algorithms
    pub secret: Option<String>,

    /// Private key (PEM) for RSA/EC algorithms
    pub private_key: Option<String>,

    /// Public key (PEM) for RSA/EC algorithms
    pub public_key: Option<String>,

    /// Algorithm to use
    pub algorithm: JwtAlgorithm,

    /// Token issuer
    pub issuer: String,

    /// Token audience
    pub audience: Vec<String>,

    /// Access token duration
    pub access_token_duration: Duration,

    /// Refresh token duration
    pub refresh_token_duration: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for JwtConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            private_key: None,
            public_key: None,
            algorithm: JwtAlgorithm::HS256,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_duration: config.access_token_duration(),
            refresh_token_duration: config.refresh_token_duration(),
        }
    }
}

/// Supported JWT algorithms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum JwtAlgorithm {
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// ECDSA using P-256 and SHA-256
    ES256,
}

impl From<JwtAlgorithm> for Algorithm {
    fn from(alg: JwtAlgorithm) -> Self {
        match alg {
            JwtAlgorithm::HS256 => Algorithm::HS256,
            JwtAlgorithm::HS384 => Algorithm::HS384,
            JwtAlgorithm::HS512 => Algorithm::HS512,
            JwtAlgorithm::RS256 => Algorithm::RS256,
            JwtAlgorithm::ES256 => Algorithm::ES256,
        }
    }
}

/// JWT service for session tokens.
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &self.config.algorithm)
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration.
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        let (encoding_key, decoding_key) = Self::create_keys(&config)?;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Create with a simple secret (HS256).
    pub fn with_secret(secret: impl Into<String>) -> AuthResult<Self> {
        let config = JwtConfig {
            secret: Some(secret.into()),
            ..Default::default()
        };
        Self::new(config)
    }

    /// Create from validated portal configuration.
    pub fn from_config(config: &AuthConfig) -> AuthResult<Self> {
        config
            .validate()
            .map_err(|e| AuthError::ConfigError(e.to_string()))?;
        Self::new(JwtConfig::from(config))
    }

    fn create_keys(config: &JwtConfig) -> AuthResult<(EncodingKey, DecodingKey)> {
        match config.algorithm {
            JwtAlgorithm::HS256 | JwtAlgorithm::HS384 | JwtAlgorithm::HS512 => {
                let secret = config
                    .secret
                    .as_ref()
                    .ok_or_else(|| AuthError::ConfigError("Secret required for HMAC".to_string()))?;
                Ok((
                    EncodingKey::from_secret(secret.as_bytes()),
                    DecodingKey::from_secret(secret.as_bytes()),
                ))
            }
            JwtAlgorithm::RS256 => {
                let (private, public) = Self::key_pair(config, "RSA")?;
                let encoding = EncodingKey::from_rsa_pem(private.as_bytes())
                    .map_err(|e| AuthError::ConfigError(format!("Invalid RSA private key: {}", e)))?;
                let decoding = DecodingKey::from_rsa_pem(public.as_bytes())
                    .map_err(|e| AuthError::ConfigError(format!("Invalid RSA public key: {}", e)))?;
                Ok((encoding, decoding))
            }
            JwtAlgorithm::ES256 => {
                let (private, public) = Self::key_pair(config, "EC")?;
                let encoding = EncodingKey::from_ec_pem(private.as_bytes())
                    .map_err(|e| AuthError::ConfigError(format!("Invalid EC private key: {}", e)))?;
                let decoding = DecodingKey::from_ec_pem(public.as_bytes())
                    .map_err(|e| AuthError::ConfigError(format!("Invalid EC public key: {}", e)))?;
                Ok((encoding, decoding))
            }
        }
    }

    fn key_pair<'a>(config: &'a JwtConfig, kind: &str) -> AuthResult<(&'a str, &'a str)> {
        let private = config
            .private_key
            .as_deref()
            .ok_or_else(|| AuthError::ConfigError(format!("Private key required for {}", kind)))?;
        let public = config
            .public_key
            .as_deref()
            .ok_or_else(|| AuthError::ConfigError(format!("Public key required for {}", kind)))?;
        Ok((private, public))
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, user_id: Uuid, email: impl Into<String>, role: Role) -> AuthResult<String> {
        let claims = self.claims_for(user_id, email, role, self.config.access_token_duration);
        self.encode_claims(&claims)
    }

    /// Generate an access/refresh token pair for a user.
    pub fn generate_token_pair(&self, user_id: Uuid, email: impl Into<String>, role: Role) -> AuthResult<TokenPair> {
        let email = email.into();
        let access = self.claims_for(user_id, email.clone(), role, self.config.access_token_duration);
        let refresh = self
            .claims_for(user_id, email, role, self.config.refresh_token_duration)
            .with_token_type(TokenType::Refresh);

        Ok(TokenPair::new(
            self.encode_claims(&access)?,
            self.encode_claims(&refresh)?,
            self.config.access_token_duration.num_seconds(),
        ))
    }

    fn claims_for(&self, user_id: Uuid, email: impl Into<String>, role: Role, duration: Duration) -> PortalClaims {
        PortalClaims::new(user_id, email, role, duration)
            .with_issuer(self.config.issuer.clone(), self.config.audience.clone())
    }

    /// Encode existing claims.
    pub fn encode_claims(&self, claims: &PortalClaims) -> AuthResult<String> {
        let header = Header::new(self.config.algorithm.into());
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Validate and decode a token.
    ///
    /// Checks signature, expiry, issuer and audience. A token whose role is
    /// not a portal role is rejected as invalid.
    pub fn validate_token(&self, token: &str) -> AuthResult<PortalClaims> {
        let mut validation = Validation::new(self.config.algorithm.into());
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&self.config.audience);

        let token_data: TokenData<PortalClaims> =
            decode(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AuthError::InvalidToken("Malformed token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AuthError::InvalidToken("Invalid signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AuthError::InvalidToken("Invalid issuer".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AuthError::InvalidToken("Invalid audience".to_string())
                }
                jsonwebtoken::errors::ErrorKind::Json(_) => {
                    AuthError::InvalidToken(format!("Invalid claims: {}", e))
                }
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Validate a refresh token and issue a fresh access token for it.
    ///
    /// The role is carried over from the refresh token unchanged.
    pub fn refresh_access_token(&self, refresh_token: &str) -> AuthResult<String> {
        let claims = self.validate_token(refresh_token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AuthError::InvalidToken("Not a refresh token".to_string()));
        }
        let user_id = claims
            .user_id()
            .ok_or_else(|| AuthError::InvalidToken("Subject is not a user id".to_string()))?;
        self.generate_access_token(user_id, claims.email, claims.role)
    }

    /// Get the configuration.
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }
}

/// Token pair containing access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived)
    pub access_token: String,

    /// Refresh token (long-lived)
    pub refresh_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Access token expiration in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Create a new token pair.
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
