//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::application::handlers::account::LoginRetryPolicy;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Token signing and login configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: SecretString,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// Emails granted admin rights (comma-separated)
    pub admin_emails: Option<String>,

    #[serde(default = "default_login_max_attempts")]
    pub login_max_attempts: u32,

    #[serde(default = "default_login_attempt_timeout")]
    pub login_attempt_timeout_ms: u64,

    #[serde(default = "default_login_retry_delay")]
    pub login_retry_delay_ms: u64,
}

impl AuthConfig {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl_secs)
    }

    pub fn admin_emails_list(&self) -> Vec<String> {
        self.admin_emails
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn login_retry(&self) -> LoginRetryPolicy {
        LoginRetryPolicy {
            max_attempts: self.login_max_attempts,
            attempt_timeout: Duration::from_millis(self.login_attempt_timeout_ms),
            retry_delay: Duration::from_millis(self.login_retry_delay_ms),
        }
    }

    /// Validate authentication configuration
    ///
    /// Short secrets are tolerated outside production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret_len = self.jwt_secret.expose_secret().len();
        if secret_len == 0 {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if *environment == Environment::Production && secret_len < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.token_ttl_secs <= 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.login_max_attempts == 0 || self.login_attempt_timeout_ms == 0 {
            return Err(ValidationError::InvalidLoginRetry);
        }
        Ok(())
    }
}

fn default_token_ttl() -> i64 {
    24 * 60 * 60
}

fn default_login_max_attempts() -> u32 {
    3
}

fn default_login_attempt_timeout() -> u64 {
    5_000
}

fn default_login_retry_delay() -> u64 {
    1_000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            token_ttl_secs: default_token_ttl(),
            admin_emails: None,
            login_max_attempts: default_login_max_attempts(),
            login_attempt_timeout_ms: default_login_attempt_timeout(),
            login_retry_delay_ms: default_login_retry_delay(),
        }
    }

    #[test]
    fn default_retry_policy_matches_handler_default() {
        assert_eq!(config("s").login_retry(), LoginRetryPolicy::default());
    }

    #[test]
    fn token_ttl_defaults_to_a_day() {
        assert_eq!(config("s").token_ttl(), chrono::Duration::hours(24));
    }

    #[test]
    fn admin_emails_are_split_and_trimmed() {
        let config = AuthConfig {
            admin_emails: Some("root@academy.test, ops@academy.test ,".to_string()),
            ..config("s")
        };
        assert_eq!(
            config.admin_emails_list(),
            vec!["root@academy.test", "ops@academy.test"]
        );
    }

    #[test]
    fn empty_secret_is_missing() {
        assert_eq!(
            config("").validate(&Environment::Development),
            Err(ValidationError::MissingRequired("JWT_SECRET"))
        );
    }

    #[test]
    fn short_secret_only_rejected_in_production() {
        let config = config("dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = AuthConfig {
            login_max_attempts: 0,
            ..config("dev-secret")
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidLoginRetry)
        );
    }
}
