mod config;
mod database;
mod entities;
mod http_server;
mod logging;
mod ports;
mod seed;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config,
    database::Database,
    http_server::{
        app::{start_content_service, start_gateway},
        state::{ContentState, GatewayState},
    },
    logging::init_tracing,
    services::{
        downstream::{
            catalog::ContentServiceHttpAdapter, interactions::InteractionServiceHttpAdapter,
            users::UserServiceHttpAdapter,
        },
        main_screen::MainScreenService,
        pages::ShellPageRenderer,
    },
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "STREAMFLIX_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter directives (default: info)
    #[arg(long, default_value = "info", global = true, env = "RUST_LOG")]
    log_level: String,

    /// OTLP gRPC endpoint to export spans to
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the catalog API, initializing the store on first start
    ContentService {
        /// The port to run the server on
        #[arg(short, long, env = "CONTENT_SERVICE_PORT")]
        port: Option<u16>,

        /// Path to the SQLite store
        #[arg(long, env = "DB_PATH")]
        database_path: Option<String>,
    },
    /// Serve the browser-facing gateway
    Gateway {
        /// The port to run the server on
        #[arg(short, long, env = "GATEWAY_PORT")]
        port: Option<u16>,

        /// Base URL of the user service
        #[arg(long, env = "USERS_SERVICE_URL")]
        users_url: Option<String>,

        /// Base URL of the interaction service
        #[arg(long, env = "INTERACTIONS_SERVICE_URL")]
        interactions_url: Option<String>,

        /// Base URL of the content service
        #[arg(long, env = "CONTENT_SERVICE_URL")]
        content_url: Option<String>,
    },
    /// Create and seed the store if it does not exist, then exit
    InitDb {
        /// Path to the SQLite store
        #[arg(long, env = "DB_PATH")]
        database_path: Option<String>,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Commands {
    fn service_name(&self) -> &'static str {
        match self {
            Commands::ContentService { .. } => "streamflix-content-service",
            Commands::Gateway { .. } => "streamflix-gateway",
            Commands::InitDb { .. } => "streamflix-init-db",
            Commands::Config(_) => "streamflix-config",
        }
    }
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _tracing_guard = init_tracing(
        args.command.service_name(),
        args.otlp_endpoint.as_deref(),
        &args.log_level,
    )?;

    log::debug!("Loading configuration");
    let mut config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load streamflix config")?;

    match args.command {
        Commands::ContentService {
            port,
            database_path,
        } => {
            if let Some(port) = port {
                config.content_service.port = port;
            }
            if let Some(path) = database_path {
                config.database.path = path;
            }

            let database = Arc::new(Database::open(&config.database_path()).await?);
            let state = Arc::new(ContentState::new(database));
            start_content_service(config.content_service.port, state).await?;
        }
        Commands::Gateway {
            port,
            users_url,
            interactions_url,
            content_url,
        } => {
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(url) = users_url {
                config.gateway.users_url = url;
            }
            if let Some(url) = interactions_url {
                config.gateway.interactions_url = url;
            }
            if let Some(url) = content_url {
                config.gateway.content_url = url;
            }

            let endpoints = config.gateway.endpoints()?;
            log::debug!("Downstream services: {:?}", endpoints);

            let http = reqwest::Client::new();
            let main_screen = MainScreenService::new(
                Arc::new(InteractionServiceHttpAdapter::new(
                    endpoints.interactions,
                    http.clone(),
                )),
                Arc::new(ContentServiceHttpAdapter::new(
                    endpoints.content,
                    http.clone(),
                )),
            );
            let state = Arc::new(GatewayState {
                users: Arc::new(UserServiceHttpAdapter::new(endpoints.users, http)),
                main_screen,
                pages: Arc::new(ShellPageRenderer::new("Streamflix")),
            });
            start_gateway(config.gateway.port, state).await?;
        }
        Commands::InitDb { database_path } => {
            if let Some(path) = database_path {
                config.database.path = path;
            }
            Database::open(&config.database_path()).await?;
            log::info!("Store ready");
        }
        Commands::Config(ConfigCommands::CreateDefault) => {
            let path = Config::create_default()?;
            println!("Config file created at: {}", path.display());
        }
        Commands::Config(ConfigCommands::Path) => match Config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("No config directory on this platform"),
        },
    }

    Ok(())
}
