//! Parsing of the `Authorization: Bearer <token>` header value.
//!
//! The surrounding request layer owns header lookup; it hands the raw value
//! (or its absence) to [`bearer_token`] and maps any error to 401.

/// Errors raised while extracting a bearer token from request headers.
#[derive(Debug)]
pub enum BearerError {
    /// The Authorization header is missing from the request.
    MissingHeader,

    /// The authorization scheme is not "Bearer".
    InvalidScheme,
}

impl std::fmt::Display for BearerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BearerError::MissingHeader => write!(f, "Missing Authorization header"),
            BearerError::InvalidScheme => write!(f, "Invalid authorization scheme"),
        }
    }
}

impl std::error::Error for BearerError {}

impl BearerError {
    /// Message safe to return to the caller.
    pub fn public_message(&self) -> &'static str {
        "Unauthorized"
    }
}

/// Extract the token from an Authorization header value, if one was present.
pub fn bearer_token(header: Option<&str>) -> Result<&str, BearerError> {
    let value = header.ok_or(BearerError::MissingHeader)?;
    parse_bearer(value)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header_value: &str) -> Result<&str, BearerError> {
    let parts: Vec<&str> = header_value.splitn(2, ' ').collect();
    if parts.len() != 2 {
        return Err(BearerError::InvalidScheme);
    }
    if !parts[0].eq_ignore_ascii_case("Bearer") {
        return Err(BearerError::InvalidScheme);
    }
    Ok(parts[1])
}
