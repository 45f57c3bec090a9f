use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use tracing::{debug, warn};

use crate::config::{ConfigError, ValidationConfig};
use crate::error::ValidationError;
use crate::identity::ClaimsPrincipal;

/// Bearer token validator.
///
/// Holds the derived decoding key plus the immutable [`ValidationConfig`].
/// Each call is stateless and side-effect-free, so a single validator can be
/// shared across any number of concurrent request workers.
///
/// # Example
///
/// ```ignore
/// let config = ValidationConfig::single_tenant("api.example", SigningKey::from_secret("s3cr3t"));
/// let validator = TokenValidator::new(config)?;
///
/// let principal = validator.validate(token)?;
/// println!("hello {}", principal.sub);
/// ```
#[derive(Debug)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    config: ValidationConfig,
}

impl TokenValidator {
    /// Create a validator, enforcing the startup invariants.
    ///
    /// Fails with a [`ConfigError`] when signature verification is disabled,
    /// the key is empty, the algorithm allow-list is empty, or an enabled
    /// issuer/audience check has no value to compare against. These are fatal
    /// misconfigurations; the process must not accept traffic with them.
    pub fn new(config: ValidationConfig) -> Result<Self, ConfigError> {
        if !config.validate_signature {
            return Err(ConfigError::SignatureCheckDisabled);
        }
        if config.key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if config.allowed_algorithms.is_empty() {
            return Err(ConfigError::NoAllowedAlgorithms);
        }
        if config.validate_issuer && config.issuer.is_empty() {
            return Err(ConfigError::EmptyIssuer);
        }
        if config.validate_audience && config.audience.is_empty() {
            return Err(ConfigError::EmptyAudience);
        }

        let decoding_key = DecodingKey::from_secret(config.key.as_bytes());
        Ok(Self {
            decoding_key,
            config,
        })
    }

    /// Returns the validation configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a token against the system clock.
    pub fn validate(&self, token: &str) -> Result<ClaimsPrincipal, ValidationError> {
        self.validate_at(token, unix_now())
    }

    /// Validate a token at the given time (seconds since the Unix epoch).
    ///
    /// This is the deterministic core: a pure function of `(token, config,
    /// now)`, so identical inputs always produce identical results. Checks, in
    /// order:
    ///
    /// 1. Header decoding and algorithm allow-list
    /// 2. Signature verification (never skipped)
    /// 3. Issuer, audience and lifetime claims, each only when its switch is
    ///    enabled, with `clock_skew_secs` as tolerance on both lifetime bounds
    ///
    /// A token is accepted only if every enabled check passes.
    pub fn validate_at(
        &self,
        token: &str,
        now_secs: u64,
    ) -> Result<ClaimsPrincipal, ValidationError> {
        let header = decode_header(token).map_err(|e| {
            ValidationError::MalformedToken(format!("failed to decode header: {e}"))
        })?;

        let algorithm = header.alg;
        debug!(?algorithm, "decoded token header");

        if !self.config.allowed_algorithms.contains(&algorithm) {
            warn!(?algorithm, "token algorithm not in allow-list");
            return Err(ValidationError::InvalidSignature);
        }

        // Signature verification only; issuer, audience and lifetime are
        // compared below against the caller-supplied clock.
        let mut validation = Validation::new(algorithm);
        validation.algorithms = self.config.allowed_algorithms.clone();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<serde_json::Value>(token, &self.decoding_key, &validation).map_err(|e| {
                let err = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        ValidationError::InvalidSignature
                    }
                    _ => ValidationError::MalformedToken(e.to_string()),
                };
                warn!(error = %err, "token rejected");
                err
            })?;
        let claims = token_data.claims;

        if self.config.validate_issuer {
            let iss = claims.get("iss").and_then(|v| v.as_str());
            if iss != Some(self.config.issuer.as_str()) {
                warn!("token issuer mismatch");
                return Err(ValidationError::IssuerMismatch);
            }
        }

        if self.config.validate_audience && !audience_matches(&claims, &self.config.audience) {
            warn!("token audience mismatch");
            return Err(ValidationError::AudienceMismatch);
        }

        if self.config.validate_lifetime {
            let skew = self.config.clock_skew_secs;
            match claims.get("exp").and_then(|v| v.as_u64()) {
                Some(exp) if !expired(now_secs, exp, skew) => {}
                // A token without an expiry is not provably live.
                _ => {
                    warn!("token expired");
                    return Err(ValidationError::Expired);
                }
            }
            if let Some(iat) = claims.get("iat").and_then(|v| v.as_u64()) {
                if premature(now_secs, iat, skew) {
                    warn!("token not yet valid");
                    return Err(ValidationError::NotYetValid);
                }
            }
        }

        let principal = ClaimsPrincipal::from_claims(claims);
        debug!(sub = %principal.sub, "token validated");
        Ok(principal)
    }
}

/// `aud` may be a single string or an array of strings.
fn audience_matches(claims: &serde_json::Value, expected: &str) -> bool {
    match claims.get("aud") {
        Some(serde_json::Value::String(aud)) => aud == expected,
        Some(serde_json::Value::Array(auds)) => {
            auds.iter().any(|aud| aud.as_str() == Some(expected))
        }
        _ => false,
    }
}

/// Processing on or after the expiry, past the skew tolerance, is invalid.
fn expired(now: u64, exp: u64, skew: u64) -> bool {
    now >= exp.saturating_add(skew)
}

fn premature(now: u64, iat: u64, skew: u64) -> bool {
    now.saturating_add(skew) < iat
}

/// Current system time in seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
