mod file_config;

pub use file_config::FileConfig;

use crate::catalog::SpotifyCredentials;
use crate::mailer::EmailCredentials;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Context, Result};
use clap::ValueEnum;

/// CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub market: String,
    pub classifier_command: Option<String>,
    pub classifier_timeout_sec: u64,
    pub smtp_host: String,
    pub smtp_port: u16,
}

/// Resolved, immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub market: String,
    pub classifier_command: Option<String>,
    pub classifier_timeout_sec: u64,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present.
    pub fn resolve(cli: CliConfig, file: Option<FileConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let logging_level = match file.logging_level {
            Some(value) => RequestsLoggingLevel::from_str(&value, true)
                .map_err(|e| anyhow::anyhow!("Invalid logging_level in config file: {}", e))?,
            None => cli.logging_level,
        };

        Ok(AppConfig {
            port: file.port.unwrap_or(cli.port),
            logging_level,
            frontend_dir_path: file.frontend_dir_path.or(cli.frontend_dir_path),
            market: file.market.unwrap_or(cli.market),
            classifier_command: file.classifier_command.or(cli.classifier_command),
            classifier_timeout_sec: file
                .classifier_timeout_sec
                .unwrap_or(cli.classifier_timeout_sec),
            smtp_host: file.smtp_host.unwrap_or(cli.smtp_host),
            smtp_port: file.smtp_port.unwrap_or(cli.smtp_port),
        })
    }
}

/// Catalog API credentials from the environment. Missing or blank values
/// abort startup: a server without catalog access would silently serve
/// nothing but the static fallback list.
pub fn catalog_credentials_from_env() -> Result<SpotifyCredentials> {
    let client_id =
        std::env::var("CLIENT_ID").context("CLIENT_ID environment variable is not set")?;
    let client_secret =
        std::env::var("CLIENT_SECRET").context("CLIENT_SECRET environment variable is not set")?;

    if client_id.trim().is_empty() || client_secret.trim().is_empty() {
        bail!("CLIENT_ID and CLIENT_SECRET must not be empty");
    }

    Ok(SpotifyCredentials {
        client_id,
        client_secret,
    })
}

/// Sender credentials from the environment, or `None` when the mail path
/// is not configured. The recommendation endpoints keep working either way.
pub fn email_credentials_from_env() -> Option<EmailCredentials> {
    let address = std::env::var("EMAIL_ADDRESS").ok()?;
    let app_password = std::env::var("EMAIL_PASSWORD").ok()?;

    if address.trim().is_empty() || app_password.trim().is_empty() {
        return None;
    }

    Some(EmailCredentials {
        address,
        app_password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> CliConfig {
        CliConfig {
            port: 5000,
            logging_level: RequestsLoggingLevel::Path,
            frontend_dir_path: None,
            market: "IN".to_string(),
            classifier_command: None,
            classifier_timeout_sec: 10,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
        }
    }

    #[test]
    fn cli_values_survive_without_file_config() {
        let config = AppConfig::resolve(cli(), None).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.market, "IN");
        assert_eq!(config.smtp_port, 587);
    }

    #[test]
    fn file_values_override_cli_values() {
        let file: FileConfig = toml::from_str(
            r#"
            port = 9000
            market = "US"
            logging_level = "headers"
            "#,
        )
        .unwrap();

        let config = AppConfig::resolve(cli(), Some(file)).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.market, "US");
        assert_eq!(config.logging_level, RequestsLoggingLevel::Headers);
        // Untouched fields keep the CLI value.
        assert_eq!(config.smtp_host, "smtp.gmail.com");
    }

    #[test]
    fn bad_logging_level_in_file_is_rejected() {
        let file: FileConfig = toml::from_str(r#"logging_level = "verbose""#).unwrap();
        assert!(AppConfig::resolve(cli(), Some(file)).is_err());
    }
}
