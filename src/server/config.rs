use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_API_TIMEOUT_MS: u64 = 7000;
const DEFAULT_MAX_ROLE_OPERATIONS: usize = 24;
const DEFAULT_ROLE_ASSIGN_CONCURRENCY: usize = 8;
const DEFAULT_REGISTRATION_URL: &str = "mcgillaerohacks.com";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

pub struct Config {
    pub database_url: String,

    pub discord_token: String,
    pub discord_public_key: String,
    pub discord_application_id: u64,

    pub api_timeout_ms: u64,
    pub max_role_operations: usize,
    pub role_assign_concurrency: usize,

    pub verified_role_name: Option<String>,
    pub registration_url: String,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Legacy variable names used by earlier deployments (`DISCORD_BOT_TOKEN`,
    /// `PUBLIC_KEY`) are accepted when the primary name is unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and every tunable parsed
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let discord_token = lookup("DISCORD_TOKEN")
            .or_else(|| lookup("DISCORD_BOT_TOKEN"))
            .ok_or_else(|| {
                ConfigError::MissingEnvVar("DISCORD_TOKEN (or DISCORD_BOT_TOKEN)".to_string())
            })?;
        let discord_public_key = lookup("DISCORD_PUBLIC_KEY")
            .or_else(|| lookup("PUBLIC_KEY"))
            .ok_or_else(|| {
                ConfigError::MissingEnvVar("DISCORD_PUBLIC_KEY (or PUBLIC_KEY)".to_string())
            })?;
        let discord_application_id = parse_var(
            "DISCORD_APP_ID",
            &lookup("DISCORD_APP_ID")
                .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_APP_ID".to_string()))?,
        )?;
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let api_timeout_ms = optional_var(&lookup, "DISCORD_API_TIMEOUT_MS")?
            .unwrap_or(DEFAULT_API_TIMEOUT_MS);
        let max_role_operations = optional_var(&lookup, "MAX_ROLE_OPERATIONS")?
            .unwrap_or(DEFAULT_MAX_ROLE_OPERATIONS);
        let role_assign_concurrency: usize = optional_var(&lookup, "ROLE_ASSIGN_CONCURRENCY")?
            .unwrap_or(DEFAULT_ROLE_ASSIGN_CONCURRENCY);

        if api_timeout_ms == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "DISCORD_API_TIMEOUT_MS".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        if role_assign_concurrency == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "ROLE_ASSIGN_CONCURRENCY".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        Ok(Self {
            database_url,
            discord_token,
            discord_public_key,
            discord_application_id,
            api_timeout_ms,
            max_role_operations,
            role_assign_concurrency,
            verified_role_name: lookup("VERIFIED_ROLE_NAME"),
            registration_url: lookup("REGISTRATION_URL")
                .unwrap_or_else(|| DEFAULT_REGISTRATION_URL.to_string()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }
}

fn optional_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).map(|value| parse_var(name, &value)).transpose()
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: format!("'{}': {}", value, e),
        })
}
