use anyhow::Context;
use clap::{Parser, Subcommand};

use bookstore_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "bookstore")]
#[command(about = "Bookstore catalog API administration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Override the configured listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create any missing tables and exit
    InitDb,

    /// Print the merged OpenAPI document
    Openapi {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().context("failed to load bookstore settings")?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            bookstore_telemetry::init(&settings.telemetry);
            if let Some(port) = port {
                settings.server.port = port;
            }
            bookstore_app::run(settings).await
        }
        Commands::InitDb => {
            bookstore_telemetry::init(&settings.telemetry);
            bookstore_app::init_database(&settings).await?;
            tracing::info!(db = %settings.database.url, "database initialized");
            Ok(())
        }
        Commands::Openapi { pretty } => {
            let document = bookstore_app::openapi_document(&settings)?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{rendered}");
            Ok(())
        }
    }
}
