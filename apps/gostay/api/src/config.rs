use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_bookings::NotificationConfig;
use domain_payments::StripeConfig;
use email::SmtpConfig;

pub use core_config::Environment;

/// Which mail transport delivers booking confirmations
#[derive(Clone, Debug)]
pub enum EmailBackend {
    Smtp(SmtpConfig),
    /// Captures messages in memory (`EMAIL_PROVIDER=mock`)
    Mock,
}

impl EmailBackend {
    pub fn from_env() -> eyre::Result<Self> {
        match env_or_default("EMAIL_PROVIDER", "smtp").as_str() {
            "mock" => Ok(Self::Mock),
            "smtp" => Ok(Self::Smtp(SmtpConfig::from_env()?)),
            other => Err(eyre::eyre!("Unknown EMAIL_PROVIDER '{}'", other)),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub email: EmailBackend,
    pub notifications: NotificationConfig,
    pub stripe: StripeConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            jwt,
            email: EmailBackend::from_env()?,
            notifications: NotificationConfig::from_env()?,
            stripe: StripeConfig::from_env()?,
        })
    }
}
