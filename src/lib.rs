pub mod bearer;
pub mod config;
pub mod error;
pub mod identity;
pub mod jwt;
pub mod roles;

// Re-export primary public types for convenience.
pub use bearer::{bearer_token, parse_bearer, BearerError};
pub use config::{ConfigError, SigningKey, ValidationConfig};
pub use error::ValidationError;
pub use identity::{ClaimsPrincipal, DefaultRoleExtractor};
pub use jwt::TokenValidator;

// Re-export the base RoleExtractor trait at crate root for convenience.
pub use roles::RoleExtractor;

pub mod prelude {
    //! Re-exports of the most commonly used types.
    pub use crate::{ClaimsPrincipal, SigningKey, TokenValidator, ValidationConfig, ValidationError};
}
