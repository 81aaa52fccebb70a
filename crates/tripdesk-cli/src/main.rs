//! Tripdesk CLI — command-line client for the Tripdesk API.
//!
//! Set TRIPDESK_API_URL (defaults to http://localhost:3000) and, for write
//! commands, TRIPDESK_TOKEN with a bearer token.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tripdesk_cli::{content_type_for, init_tracing};
use tripdesk_client::{ApiClient, FileSelection};
use tripdesk_core::Trip;

#[derive(Parser)]
#[command(name = "tripdesk", about = "Tripdesk API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trip operations
    Trips {
        #[command(subcommand)]
        sub: TripCommands,
    },
    /// Upload a trip image, printing progress to stderr
    Upload {
        /// Path to the image file (jpeg, jpg, png, or gif)
        file: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
enum TripCommands {
    /// List all trips
    List,
    /// Get a single trip by code
    Get {
        /// Trip code
        code: String,
    },
    /// Create a trip from a JSON document (requires TRIPDESK_TOKEN)
    Add {
        /// Path to a JSON file with the trip fields
        file: std::path::PathBuf,
    },
    /// Replace a trip from a JSON document (requires TRIPDESK_TOKEN)
    Update {
        /// Trip code
        code: String,
        /// Path to a JSON file with the trip fields
        file: std::path::PathBuf,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn read_trip(path: &std::path::Path) -> anyhow::Result<Trip> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid trip JSON in {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client = ApiClient::from_env().context("Failed to create API client")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Trips { sub } => match sub {
            TripCommands::List => {
                let trips = client.list_trips().await?;
                print_json(&trips)?;
            }
            TripCommands::Get { code } => {
                let trip = client.get_trip(&code).await?;
                print_json(&trip)?;
            }
            TripCommands::Add { file } => {
                let trip = read_trip(&file)?;
                let created = client.add_trip(&trip).await?;
                print_json(&created)?;
            }
            TripCommands::Update { code, file } => {
                let trip = read_trip(&file)?;
                let updated = client.update_trip(&code, &trip).await?;
                print_json(&updated)?;
            }
        },
        Commands::Upload { file } => {
            let content_type = content_type_for(&file).with_context(|| {
                format!(
                    "{} is not an accepted image type (jpeg, jpg, png, gif)",
                    file.display()
                )
            })?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload")
                .to_string();
            let data = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let selection = FileSelection {
                filename,
                content_type: content_type.to_string(),
                data,
            };
            let uploaded = client
                .uploader()
                .upload(&selection, |pct| eprintln!("Uploading... {}%", pct))
                .await?;
            print_json(&uploaded)?;
        }
    }

    Ok(())
}
