use jsonwebtoken::Algorithm;
use tokenward::config::{ConfigError, SigningKey, ValidationConfig};
use tokenward::jwt::TokenValidator;

#[test]
fn config_new_defaults() {
    let config = ValidationConfig::new("iss", "aud", SigningKey::from_secret("k"));
    assert_eq!(config.issuer, "iss");
    assert_eq!(config.audience, "aud");
    assert_eq!(config.clock_skew_secs, 0); // no grace window by default
    assert!(config.validate_issuer);
    assert!(config.validate_audience);
    assert!(config.validate_lifetime);
    assert!(config.validate_signature);
    assert_eq!(config.allowed_algorithms, vec![Algorithm::HS256]);
}

#[test]
fn single_tenant_shares_issuer_and_audience() {
    let config = ValidationConfig::single_tenant("api.example", SigningKey::from_secret("k"));
    assert_eq!(config.issuer, "api.example");
    assert_eq!(config.audience, "api.example");
}

#[test]
fn builder_methods() {
    let config = ValidationConfig::new("i", "a", SigningKey::from_secret("k"))
        .with_clock_skew(30)
        .with_issuer_check(false)
        .with_audience_check(false)
        .with_lifetime_check(false)
        .with_allowed_algorithms([Algorithm::HS256, Algorithm::HS384]);
    assert_eq!(config.clock_skew_secs, 30);
    assert!(!config.validate_issuer);
    assert!(!config.validate_audience);
    assert!(!config.validate_lifetime);
    assert_eq!(
        config.allowed_algorithms,
        vec![Algorithm::HS256, Algorithm::HS384]
    );

    let config = config.with_allowed_algorithm(Algorithm::HS512);
    assert_eq!(config.allowed_algorithms, vec![Algorithm::HS512]);
}

#[test]
fn debug_output_redacts_key() {
    let config = ValidationConfig::single_tenant("api.example", SigningKey::from_secret("s3cr3t"));
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("s3cr3t"), "key leaked: {rendered}");
    assert!(rendered.contains("redacted"));
}

// ── startup invariants ──

#[test]
fn validator_rejects_empty_key() {
    let config = ValidationConfig::single_tenant("iss", SigningKey::from_secret(""));
    let err = TokenValidator::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyKey));
}

#[test]
fn validator_rejects_disabled_signature_check() {
    let config = ValidationConfig::single_tenant("iss", SigningKey::from_secret("k"))
        .with_signature_check(false);
    let err = TokenValidator::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::SignatureCheckDisabled));
}

#[test]
fn validator_rejects_empty_algorithm_list() {
    let config = ValidationConfig::single_tenant("iss", SigningKey::from_secret("k"))
        .with_allowed_algorithms(std::iter::empty::<Algorithm>());
    let err = TokenValidator::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::NoAllowedAlgorithms));
}

#[test]
fn validator_rejects_empty_issuer_when_checked() {
    let config = ValidationConfig::new("", "aud", SigningKey::from_secret("k"));
    let err = TokenValidator::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyIssuer));
}

#[test]
fn validator_rejects_empty_audience_when_checked() {
    let config = ValidationConfig::new("iss", "", SigningKey::from_secret("k"));
    let err = TokenValidator::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyAudience));
}

#[test]
fn validator_accepts_empty_issuer_when_check_disabled() {
    let config =
        ValidationConfig::new("", "aud", SigningKey::from_secret("k")).with_issuer_check(false);
    assert!(TokenValidator::new(config).is_ok());
}

// ── environment loading ──
//
// Sequential scenarios inside one test: env mutation is process-global and
// tests within a binary run in parallel.
#[test]
fn from_env_scenarios() {
    unsafe { std::env::remove_var("TOKENS_ISSUER") };
    unsafe { std::env::remove_var("TOKENS_AUDIENCE") };
    unsafe { std::env::remove_var("TOKENS_KEY") };
    unsafe { std::env::remove_var("TOKENS_CLOCK_SKEW_SECS") };

    // Missing issuer
    let err = ValidationConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar("TOKENS_ISSUER")));

    // Missing key
    unsafe { std::env::set_var("TOKENS_ISSUER", "api.example") };
    let err = ValidationConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar("TOKENS_KEY")));

    // Audience falls back to the issuer; skew defaults to zero
    unsafe { std::env::set_var("TOKENS_KEY", "env-secret") };
    let config = ValidationConfig::from_env().unwrap();
    assert_eq!(config.issuer, "api.example");
    assert_eq!(config.audience, "api.example");
    assert_eq!(config.clock_skew_secs, 0);
    assert!(TokenValidator::new(config).is_ok());

    // Explicit audience and skew
    unsafe { std::env::set_var("TOKENS_AUDIENCE", "mobile.example") };
    unsafe { std::env::set_var("TOKENS_CLOCK_SKEW_SECS", "30") };
    let config = ValidationConfig::from_env().unwrap();
    assert_eq!(config.audience, "mobile.example");
    assert_eq!(config.clock_skew_secs, 30);

    // Unparseable skew
    unsafe { std::env::set_var("TOKENS_CLOCK_SKEW_SECS", "soon") };
    let err = ValidationConfig::from_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidVar("TOKENS_CLOCK_SKEW_SECS")
    ));

    unsafe { std::env::remove_var("TOKENS_ISSUER") };
    unsafe { std::env::remove_var("TOKENS_AUDIENCE") };
    unsafe { std::env::remove_var("TOKENS_KEY") };
    unsafe { std::env::remove_var("TOKENS_CLOCK_SKEW_SECS") };
}
