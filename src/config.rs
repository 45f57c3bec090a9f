use jsonwebtoken::Algorithm;

/// Symmetric signing key material derived from a shared-secret string.
///
/// Loaded once at startup and never mutated. The `Debug` impl redacts the
/// bytes so the key cannot leak through logging.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Derive key material from a shared secret.
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Self {
        Self(secret.as_ref().to_vec())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Immutable validation parameters for bearer tokens.
///
/// Constructed once at process start and passed explicitly to
/// [`TokenValidator::new`](crate::jwt::TokenValidator::new); read-only
/// thereafter. Defaults mirror a strict single-service deployment: every
/// check enabled, zero clock-skew tolerance, HS256 only.
#[derive(Clone, Debug)]
pub struct ValidationConfig {
    /// Expected value of the "iss" claim.
    pub issuer: String,

    /// Expected value of the "aud" claim.
    pub audience: String,

    /// Key used to verify token signatures.
    pub key: SigningKey,

    /// Tolerance in seconds applied to both lifetime bounds.
    pub clock_skew_secs: u64,

    /// Check the "iss" claim against `issuer`.
    pub validate_issuer: bool,

    /// Check the "aud" claim against `audience`.
    pub validate_audience: bool,

    /// Check "exp" and "iat" against the current time.
    pub validate_lifetime: bool,

    /// Verify the token signature. Disabling this is a startup error, not a
    /// skipped check; the flag exists so the misconfiguration is representable
    /// and rejected before the process accepts traffic.
    pub validate_signature: bool,

    /// Allowed JWT algorithms. Tokens using other algorithms are rejected.
    /// Default: HS256 only, matching a key derived from a shared secret.
    pub allowed_algorithms: Vec<Algorithm>,
}

impl ValidationConfig {
    /// Create a config with independent issuer and audience values.
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, key: SigningKey) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            key,
            clock_skew_secs: 0,
            validate_issuer: true,
            validate_audience: true,
            validate_lifetime: true,
            validate_signature: true,
            allowed_algorithms: vec![Algorithm::HS256],
        }
    }

    /// Create a config where the audience is the issuer.
    ///
    /// Single-tenant deployments commonly issue tokens to themselves and
    /// validate both claims against one configured value. Use [`new`] when the
    /// two differ.
    ///
    /// [`new`]: ValidationConfig::new
    pub fn single_tenant(issuer: impl Into<String>, key: SigningKey) -> Self {
        let issuer = issuer.into();
        let audience = issuer.clone();
        Self::new(issuer, audience, key)
    }

    /// Load the config from the environment.
    ///
    /// Reads `TOKENS_ISSUER` and `TOKENS_KEY` (required), `TOKENS_AUDIENCE`
    /// (optional, falls back to the issuer) and `TOKENS_CLOCK_SKEW_SECS`
    /// (optional, default 0).
    pub fn from_env() -> Result<Self, ConfigError> {
        let issuer = require_var("TOKENS_ISSUER")?;
        let key = require_var("TOKENS_KEY")?;
        let audience = std::env::var("TOKENS_AUDIENCE").unwrap_or_else(|_| issuer.clone());
        let clock_skew_secs = match std::env::var("TOKENS_CLOCK_SKEW_SECS") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidVar("TOKENS_CLOCK_SKEW_SECS"))?,
            Err(_) => 0,
        };
        Ok(Self::new(issuer, audience, SigningKey::from_secret(key))
            .with_clock_skew(clock_skew_secs))
    }

    /// Set the clock-skew tolerance in seconds.
    pub fn with_clock_skew(mut self, secs: u64) -> Self {
        self.clock_skew_secs = secs;
        self
    }

    /// Enable or disable the issuer check.
    pub fn with_issuer_check(mut self, enabled: bool) -> Self {
        self.validate_issuer = enabled;
        self
    }

    /// Enable or disable the audience check.
    pub fn with_audience_check(mut self, enabled: bool) -> Self {
        self.validate_audience = enabled;
        self
    }

    /// Enable or disable the lifetime check.
    pub fn with_lifetime_check(mut self, enabled: bool) -> Self {
        self.validate_lifetime = enabled;
        self
    }

    /// Enable or disable signature verification. A config with this disabled
    /// is rejected at validator construction.
    pub fn with_signature_check(mut self, enabled: bool) -> Self {
        self.validate_signature = enabled;
        self
    }

    /// Set the allowed JWT algorithms. An empty list is rejected at validator
    /// construction.
    pub fn with_allowed_algorithms(
        mut self,
        algorithms: impl IntoIterator<Item = Algorithm>,
    ) -> Self {
        self.allowed_algorithms = algorithms.into_iter().collect();
        self
    }

    /// Convenience method to allow a single algorithm.
    pub fn with_allowed_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.allowed_algorithms = vec![algorithm];
        self
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

/// Fatal startup misconfiguration.
///
/// Distinct from [`ValidationError`](crate::error::ValidationError): these are
/// raised once, before the process accepts traffic, never per request.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    MissingVar(&'static str),

    /// An environment variable is set but unparseable.
    InvalidVar(&'static str),

    /// The signing key is empty.
    EmptyKey,

    /// The issuer check is enabled but the configured issuer is empty.
    EmptyIssuer,

    /// The audience check is enabled but the configured audience is empty.
    EmptyAudience,

    /// Signature verification was turned off.
    SignatureCheckDisabled,

    /// The algorithm allow-list is empty.
    NoAllowedAlgorithms,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "Missing environment variable: {name}"),
            ConfigError::InvalidVar(name) => write!(f, "Invalid environment variable: {name}"),
            ConfigError::EmptyKey => write!(f, "Signing key is empty"),
            ConfigError::EmptyIssuer => write!(f, "Issuer is empty but the issuer check is enabled"),
            ConfigError::EmptyAudience => {
                write!(f, "Audience is empty but the audience check is enabled")
            }
            ConfigError::SignatureCheckDisabled => {
                write!(f, "Signature verification must not be disabled")
            }
            ConfigError::NoAllowedAlgorithms => write!(f, "No allowed JWT algorithms configured"),
        }
    }
}

impl std::error::Error for ConfigError {}
