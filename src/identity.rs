use serde::{Deserialize, Serialize};

use crate::roles::{Composite, NestedRoleExtractor, RoleExtractor, StandardRoleExtractor};

/// Default role extractor: top-level `roles`, then `realm_access.roles`.
pub type DefaultRoleExtractor = Composite<StandardRoleExtractor, NestedRoleExtractor>;

/// Build the default role extractor.
pub fn default_role_extractor() -> DefaultRoleExtractor {
    Composite(
        StandardRoleExtractor,
        NestedRoleExtractor::new(["realm_access", "roles"]),
    )
}

/// The verified identity extracted from a validated token.
///
/// Lifetime is one request: built from the decoded claims after every enabled
/// check has passed, then dropped with the request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClaimsPrincipal {
    /// Subject claim ("sub") - unique caller identifier.
    pub sub: String,

    /// Email claim ("email"), if present in the token.
    pub email: Option<String>,

    /// Issuer claim ("iss"), if present in the token.
    pub issuer: Option<String>,

    /// Audience claim ("aud"); for an array audience, the first entry.
    pub audience: Option<String>,

    /// Roles extracted from the claims.
    pub roles: Vec<String>,

    /// Raw claims for advanced access.
    pub claims: serde_json::Value,
}

impl ClaimsPrincipal {
    /// Build a principal from validated claims.
    ///
    /// Uses the default role extractor. For custom role extraction, use
    /// [`from_claims_with`](ClaimsPrincipal::from_claims_with).
    pub fn from_claims(claims: serde_json::Value) -> Self {
        Self::from_claims_with(claims, &default_role_extractor())
    }

    /// Build a principal from validated claims with a custom role extractor.
    pub fn from_claims_with(claims: serde_json::Value, extractor: &impl RoleExtractor) -> Self {
        let sub = claims
            .get("sub")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let email = claims
            .get("email")
            .and_then(|v| v.as_str())
            .map(String::from);

        let issuer = claims.get("iss").and_then(|v| v.as_str()).map(String::from);

        let audience = match claims.get("aud") {
            Some(serde_json::Value::String(aud)) => Some(aud.clone()),
            Some(serde_json::Value::Array(auds)) => {
                auds.first().and_then(|a| a.as_str()).map(String::from)
            }
            _ => None,
        };

        let roles = extractor.extract_roles(&claims);

        ClaimsPrincipal {
            sub,
            email,
            issuer,
            audience,
            roles,
            claims,
        }
    }

    /// Check whether the principal has a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check whether the principal has any of the specified roles.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }
}
