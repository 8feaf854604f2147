use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,

    /// Catalog market code the searches are biased toward.
    pub market: Option<String>,

    // Classifier settings
    pub classifier_command: Option<String>,
    pub classifier_timeout_sec: Option<u64>,

    // Mail settings
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_partial_config() {
        let config: FileConfig = toml::from_str(
            r#"
            port = 8080
            market = "US"
            smtp_host = "smtp.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, Some(8080));
        assert_eq!(config.market.as_deref(), Some("US"));
        assert_eq!(config.smtp_host.as_deref(), Some("smtp.example.com"));
        assert_eq!(config.classifier_command, None);
    }
}
