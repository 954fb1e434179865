//! modforge CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{MakeCommand, RemoveCommand, ReplayCommand};

#[derive(Parser)]
#[command(name = "modforge")]
#[command(version)]
#[command(about = "Convention-driven module scaffolding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one or more modules from their database tables
    Make {
        /// Module names (`PascalCase`, optionally nested, e.g., `Blog/Post`)
        #[arg(required = true)]
        modules: Vec<String>,
        /// Comma-separated components to generate (e.g., `model,controller`)
        #[arg(long)]
        only: Option<String>,
        /// Comma-separated components to skip
        #[arg(long)]
        except: Option<String>,
        /// Table name override (single module only)
        #[arg(long)]
        table: Option<String>,
        /// Skip schema introspection entirely
        #[arg(long)]
        skip_table: bool,
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,
    },
    /// Remove previously generated module trees
    Remove {
        /// Module names to remove
        #[arg(required = true)]
        modules: Vec<String>,
    },
    /// Replay a generation that was parked behind a missing table
    Replay {
        /// Table name the component filter was recorded under
        table: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Make {
            modules,
            only,
            except,
            table,
            skip_table,
            force,
        } => {
            let cmd = MakeCommand::new(modules, only, except, table, skip_table, force);
            cmd.execute().await?;
        }
        Commands::Remove { modules } => {
            let cmd = RemoveCommand::new(modules);
            cmd.execute()?;
        }
        Commands::Replay { table } => {
            let cmd = ReplayCommand::new(table);
            cmd.execute().await?;
        }
    }

    Ok(())
}
