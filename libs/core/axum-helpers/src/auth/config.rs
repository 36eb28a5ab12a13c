use core_config::{ConfigError, FromEnv, env_required};

/// JWT verification configuration.
///
/// - `JWT_SECRET` (required, at least 32 characters)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
}

const MIN_SECRET_LEN: usize = 32;

impl JwtConfig {
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self { secret }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        Ok(Self { secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_jwt_config_from_env() {
        temp_env::with_var(
            "JWT_SECRET",
            Some("gostay-local-secret-with-enough-length"),
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, "gostay-local-secret-with-enough-length");
            },
        );
        temp_env::with_var_unset("JWT_SECRET", || {
            assert!(JwtConfig::from_env().unwrap_err().to_string().contains("JWT_SECRET"));
        });
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            assert!(JwtConfig::from_env().unwrap_err().to_string().contains("32 characters"));
        });
    }
}
