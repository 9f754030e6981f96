//! # Chronika — Historical Leaders Content API
//!
//! Biographical records of historical political leaders with keyword and
//! semantic search, generated facts, JWT auth and activity logging.
//!
//! Usage:
//!   chronika serve                       # Start the HTTP API
//!   chronika serve --port 9090           # Custom port
//!   chronika init-db                     # Create tables, seed the dataset
//!   chronika create-admin --username a --email a@x --password secret

use std::fs;
use std::path::Path;

use anyhow::Result;
use chronika_core::config::ChronikaConfig;
use chronika_db::LeadersDb;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chronika", version, about = "📖 Chronika — historical leaders content API")]
struct Cli {
    /// Path to config file (default ~/.chronika/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Initialize the database and seed the leader dataset
    InitDb,
    /// Create an admin user
    CreateAdmin {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        full_name: Option<String>,
    },
}

fn expand_path(p: &str) -> String {
    shellexpand::tilde(p).to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "chronika=debug,chronika_gateway=debug,tower_http=debug"
    } else {
        "chronika=info,chronika_gateway=info,chronika_db=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => ChronikaConfig::load_from(Path::new(&expand_path(path)))?,
        None => ChronikaConfig::load()?,
    };

    // Expand paths and make sure the data directory exists
    config.database.path = expand_path(&config.database.path);
    config.ai.cache_dir = expand_path(&config.ai.cache_dir);
    if let Some(parent) = Path::new(&config.database.path).parent() {
        fs::create_dir_all(parent)?;
    }

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            chronika_gateway::server::start(config).await?;
        }
        Command::InitDb => {
            let db = LeadersDb::open(Path::new(&config.database.path))?;
            let seeded = db.seed_leaders_if_empty()?;
            if seeded > 0 {
                println!("Database initialized — {seeded} leaders seeded.");
            } else {
                println!("Database already initialized.");
            }
        }
        Command::CreateAdmin { username, email, password, full_name } => {
            let db = LeadersDb::open(Path::new(&config.database.path))?;
            if db.get_user_by_username(&username)?.is_some() {
                println!("⚠️  User '{username}' already exists.");
                return Ok(());
            }
            let hash = chronika_auth::hash_password(&password)?;
            let user = db.create_user(&username, &email, &hash, full_name.as_deref(), "admin")?;
            println!("✅ Admin user created:");
            println!("   Username: {}", user.username);
            println!("   Email:    {}", user.email);
            println!("   Role:     {}", user.role);
        }
    }

    Ok(())
}
