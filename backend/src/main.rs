//! Cost of living CLI
//!
//! ```bash
//! costliving serve                         # Start HTTP server (port 8000)
//! costliving country Japan                 # All rows for a country
//! costliving city Tokyo Japan -l de        # One city, German labels
//! costliving labels --language de          # Print the label table
//! costliving health                        # Dataset status
//! ```

use clap::{Parser, Subcommand};
use costliving::{label_table, Language, LookupService, ServiceConfig};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "costliving")]
#[command(about = "Cost of living lookup API", long_about = None)]
struct Cli {
    /// Dataset CSV (overrides COL_DATASET_PATH)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides COL_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Look up every row for a country
    Country {
        country: String,

        /// Label language (en, de)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Look up a city within a country
    City {
        city: String,
        country: String,

        /// Label language (en, de)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print indicator labels
    Labels {
        /// Label language (en, de)
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Report whether the dataset is present and loadable
    Health,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServiceConfig::from_env()?;
    if let Some(dataset) = cli.dataset {
        config = config.with_dataset(dataset)?;
    }

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config = config.with_port(port);
            }
            costliving::server::start_server(config).await
        }

        Commands::Country { country, language } => {
            let service = LookupService::from_config(&config);
            let body = json!({ "country": country, "language": language });
            let records = service.country_data(&body).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }

        Commands::City {
            city,
            country,
            language,
        } => {
            let service = LookupService::from_config(&config);
            let body = json!({ "city": city, "country": country, "language": language });
            let records = service.city_data(&body).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }

        Commands::Labels { language } => {
            let language: Language = language.parse()?;
            for (key, label) in label_table(language) {
                println!("{:>4}  {}", key.to_string(), label);
            }
            Ok(())
        }

        Commands::Health => {
            let service = LookupService::from_config(&config);
            let report = service.health().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.dataset_loadable {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
