//! Hubsite CLI - build a hub of static projects and preview it.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "hubsite")]
#[command(about = "Build a hub of static projects and preview it locally")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to hub.toml config file
    #[arg(short, long, default_value = "hub.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and metadata catalog
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build every project and generate the hub page
    Build {
        /// Projects directory (defaults to config or "Projects")
        #[arg(short, long)]
        projects: Option<PathBuf>,

        /// Output directory (defaults to config or "docs")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Metadata catalog (defaults to config or "projects.json")
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Skip CSS minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview the published hub
    Serve {
        /// Port to listen on (defaults to config or 8080)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Directory to serve (defaults to the build output)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Open the hub in a browser
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build {
            projects,
            output,
            metadata,
            no_minify,
        } => {
            let options = commands::build::BuildOptions {
                projects,
                output,
                metadata,
                minify: if no_minify { Some(false) } else { None },
            };
            commands::build::run(&cli.config, options).await?;
        }
        Commands::Serve { port, dir, open } => {
            commands::serve::run(&cli.config, port, dir, open).await?;
        }
    }

    Ok(())
}
