//! Role extraction from token claims.
//!
//! Different token issuers store roles in different claim locations. The
//! [`RoleExtractor`] trait abstracts over that; combinators cover issuers that
//! spread roles across several claims.

/// Trait for extracting roles from token claims.
pub trait RoleExtractor: Send + Sync {
    /// Extract roles from the given claims.
    fn extract_roles(&self, claims: &serde_json::Value) -> Vec<String>;
}

/// Extractor that reads the top-level `roles` claim.
///
/// This covers the common pattern where roles are a simple string array at the
/// root of the claim set.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRoleExtractor;

impl RoleExtractor for StandardRoleExtractor {
    fn extract_roles(&self, claims: &serde_json::Value) -> Vec<String> {
        extract_string_array(claims, &["roles"])
    }
}

/// Extractor that reads a string array at a configurable claim path.
///
/// # Example
///
/// ```ignore
/// // Keycloak stores realm roles under `realm_access.roles`
/// let extractor = NestedRoleExtractor::new(["realm_access", "roles"]);
/// ```
#[derive(Debug, Clone)]
pub struct NestedRoleExtractor {
    path: Vec<String>,
}

impl NestedRoleExtractor {
    /// Create an extractor for the given claim path.
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }
}

impl RoleExtractor for NestedRoleExtractor {
    fn extract_roles(&self, claims: &serde_json::Value) -> Vec<String> {
        let path: Vec<&str> = self.path.iter().map(String::as_str).collect();
        extract_string_array(claims, &path)
    }
}

/// Composite extractor that tries two extractors in order.
///
/// Returns the first non-empty result. For more than two extractors, nest
/// multiple `Composite` instances.
#[derive(Debug, Clone, Copy)]
pub struct Composite<A, B>(pub A, pub B);

impl<A: RoleExtractor, B: RoleExtractor> RoleExtractor for Composite<A, B> {
    fn extract_roles(&self, claims: &serde_json::Value) -> Vec<String> {
        let roles = self.0.extract_roles(claims);
        if !roles.is_empty() {
            roles
        } else {
            self.1.extract_roles(claims)
        }
    }
}

/// Merge extractor that combines roles from two extractors.
///
/// Unlike [`Composite`] which returns the first non-empty result, this
/// extractor merges roles from both extractors and deduplicates them.
#[derive(Debug, Clone, Copy)]
pub struct Merge<A, B>(pub A, pub B);

impl<A: RoleExtractor, B: RoleExtractor> RoleExtractor for Merge<A, B> {
    fn extract_roles(&self, claims: &serde_json::Value) -> Vec<String> {
        let mut roles = self.0.extract_roles(claims);
        let other = self.1.extract_roles(claims);

        // Deduplicate while preserving order
        let mut seen: std::collections::HashSet<_> = roles.iter().cloned().collect();
        for role in other {
            if seen.insert(role.clone()) {
                roles.push(role);
            }
        }

        roles
    }
}

/// Extract a string array from a nested JSON path.
///
/// Returns an empty vec when any key along the path is missing or the final
/// value is not an array.
pub fn extract_string_array(value: &serde_json::Value, path: &[&str]) -> Vec<String> {
    let mut current = value;

    for key in path {
        match current.get(*key) {
            Some(v) => current = v,
            None => return Vec::new(),
        }
    }

    current
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
