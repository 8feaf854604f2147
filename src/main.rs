use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodstream_server::catalog::{CatalogSearch, SpotifyClient};
use moodstream_server::classifier::{CommandClassifier, EmotionClassifier, UnavailableClassifier};
use moodstream_server::config::{
    catalog_credentials_from_env, email_credentials_from_env, AppConfig, CliConfig, FileConfig,
};
use moodstream_server::emotion::EmotionProfiles;
use moodstream_server::mailer::{Mailer, SmtpMailer};
use moodstream_server::recommend::{Recommender, SelectionPolicy};
use moodstream_server::server::{run_server, RequestsLoggingLevel};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to an optional TOML config file. Values in the file override
    /// the CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Catalog market code that search results are biased toward.
    #[clap(long, default_value = "IN")]
    pub market: String,

    /// Shell command that runs the camera emotion classifier and prints
    /// the detected emotion index (0-6) on stdout.
    #[clap(long)]
    pub classifier_command: Option<String>,

    /// Timeout in seconds for the classifier command.
    #[clap(long, default_value_t = 10)]
    pub classifier_timeout_sec: u64,

    /// SMTP relay host used for playlist emails.
    #[clap(long, default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP relay port.
    #[clap(long, default_value_t = 587)]
    pub smtp_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = cli_args
        .config
        .as_ref()
        .map(|path| FileConfig::load(path))
        .transpose()?;

    let config = AppConfig::resolve(
        CliConfig {
            port: cli_args.port,
            logging_level: cli_args.logging_level,
            frontend_dir_path: cli_args.frontend_dir_path,
            market: cli_args.market,
            classifier_command: cli_args.classifier_command,
            classifier_timeout_sec: cli_args.classifier_timeout_sec,
            smtp_host: cli_args.smtp_host,
            smtp_port: cli_args.smtp_port,
        },
        file_config,
    )?;

    let catalog_credentials = catalog_credentials_from_env()?;
    let catalog: Arc<dyn CatalogSearch> = Arc::new(SpotifyClient::new(catalog_credentials)?);

    let recommender = Arc::new(Recommender::new(
        catalog,
        EmotionProfiles::default(),
        SelectionPolicy::default(),
        config.market.clone(),
    ));

    let classifier: Arc<dyn EmotionClassifier> = match &config.classifier_command {
        Some(command) => {
            info!("Emotion classifier command configured");
            Arc::new(CommandClassifier::new(
                command.clone(),
                Duration::from_secs(config.classifier_timeout_sec),
            ))
        }
        None => {
            warn!("No classifier command configured; emotion auto-detection is disabled");
            Arc::new(UnavailableClassifier)
        }
    };

    let mailer: Option<Arc<dyn Mailer>> = match email_credentials_from_env() {
        Some(credentials) => {
            info!("Email delivery configured via {}", config.smtp_host);
            Some(Arc::new(SmtpMailer::new(
                &config.smtp_host,
                config.smtp_port,
                credentials,
            )?))
        }
        None => {
            warn!("EMAIL_ADDRESS/EMAIL_PASSWORD not set; the email playlist endpoint is disabled");
            None
        }
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(
        recommender,
        classifier,
        mailer,
        config.logging_level,
        config.port,
        config.frontend_dir_path,
    )
    .await
}
