//! User Service - operator CLI for user management.

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use user_service_lib::cli::{self, Cli};
use user_service_lib::config::UserServiceConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = UserServiceConfig::from_env();
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let service = user_service_lib::build_service(&config).await?;

    match cli::execute(service.as_ref(), cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            if err.is_client_error() {
                warn!(code = err.code(), "{}", err.user_message());
            } else {
                error!(code = err.code(), "{}", err.user_message());
            }
            std::process::exit(cli::exit_code(&err));
        }
    }
}
