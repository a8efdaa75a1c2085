use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use geogate_access::AccessEngine;
use geogate_cli::commands::{render_summary, show_access, sync_cities};
use geogate_config::{AccessConfig, DatabaseConfig};
use geogate_db::{PgAccessStore, init_db_pool};

#[derive(Parser)]
#[command(name = "geogate-cli")]
#[command(about = "Geogate CLI - Access administration for Geogate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the set of cities a user may access
    SyncCities {
        /// User whose grants are replaced
        #[arg(short = 'u', long)]
        user: i64,

        /// Comma-separated city ids; pass an empty value to revoke every city
        #[arg(short = 'c', long, value_delimiter = ',', num_args = 0..)]
        cities: Vec<i64>,

        /// User recorded as the grantor
        #[arg(long)]
        granted_by: Option<i64>,
    },
    /// Print the permissions and scopes resolved for a user
    ShowAccess {
        /// User to inspect
        #[arg(short = 'u', long)]
        user: i64,

        /// Role the user acts with
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_config = DatabaseConfig {
        max_connections: 5,
        ..DatabaseConfig::from_env()
    };
    let pool = init_db_pool(&db_config).await?;
    let engine = AccessEngine::new(Arc::new(PgAccessStore::new(pool)), AccessConfig::from_env());

    match cli.command {
        Commands::SyncCities {
            user,
            cities,
            granted_by,
        } => {
            let synced = sync_cities(&engine, user, &cities, granted_by).await?;
            println!("\n✅ City access updated for user {}", user);
            println!("   Cities: {:?}", synced);
        }
        Commands::ShowAccess { user, role } => {
            let summary = show_access(&engine, user, role).await?;
            println!("{}", render_summary(&summary)?);
        }
    }

    Ok(())
}
