//! Vitrine CLI - Storage initialization and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the upload folder, tables, seeded admin, and session table
//! vitrine-cli init
//!
//! # Change an admin password
//! vitrine-cli admin set-password --username admin --password 'a long passphrase'
//!
//! # Crop an existing image to a 600x600 square in place
//! vitrine-cli image crop static/uploads/shoe.png
//! ```
//!
//! # Commands
//!
//! - `init` - Prepare storage (same steps the server runs on start)
//! - `admin set-password` - Replace an admin user's password
//! - `image crop` - Apply the product image crop to a file
//!
//! Reads the same `CATALOG_*` variables (and `.env`) as the server, but does
//! not need `CATALOG_SESSION_SECRET`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine-cli")]
#[command(author, version, about = "Vitrine catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the upload folder, database tables, and seeded admin user
    Init,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Process image files
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Replace the password of an existing admin user
    SetPassword {
        /// Login name
        #[arg(short, long, default_value = "admin")]
        username: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum ImageAction {
    /// Crop an image to a centered 600x600 square, overwriting it
    Crop {
        /// Image file to crop
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::SetPassword { username, password } => {
                commands::admin::set_password(&username, &password).await?;
            }
        },
        Commands::Image { action } => match action {
            ImageAction::Crop { path } => commands::image::crop(path).await?,
        },
    }
    Ok(())
}
