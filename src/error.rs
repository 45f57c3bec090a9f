/// Per-request rejection kinds for bearer token validation.
///
/// Every rejection carries exactly one specific kind; there is no generic
/// catch-all. Callers are expected to respond uniformly (401) regardless of
/// kind, but the kind is preserved for logging and diagnostics.
#[derive(Debug)]
pub enum ValidationError {
    /// The token is not three well-formed base64url segments, or the payload
    /// does not decode to a claim set.
    MalformedToken(String),

    /// The signature does not verify under the configured key, or the header
    /// names an algorithm outside the allow-list.
    InvalidSignature,

    /// The "iss" claim is missing or differs from the configured issuer.
    IssuerMismatch,

    /// The "aud" claim is missing or does not cover the configured audience.
    AudienceMismatch,

    /// The token's expiry is in the past, beyond the clock-skew tolerance.
    Expired,

    /// The token's issued-at time is in the future, beyond the clock-skew
    /// tolerance.
    NotYetValid,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MalformedToken(msg) => write!(f, "Malformed token: {msg}"),
            ValidationError::InvalidSignature => write!(f, "Invalid token signature"),
            ValidationError::IssuerMismatch => write!(f, "Issuer mismatch"),
            ValidationError::AudienceMismatch => write!(f, "Audience mismatch"),
            ValidationError::Expired => write!(f, "Token expired"),
            ValidationError::NotYetValid => write!(f, "Token not yet valid"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Message safe to return to the caller. The specific kind stays internal.
    pub fn public_message(&self) -> &'static str {
        "Unauthorized"
    }
}
