use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod build;
mod commands;
mod config;
mod logging;
mod util;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    command: ReadyblogCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the blog in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file (defaults to readyblog.yaml, if present)
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Root content path, overriding the config file
    #[arg(long)]
    root: Option<PathBuf>,

    /// Output directory, overriding the config file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Public base URL, overriding the config file
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum ReadyblogCommand {
    /// Initialize a new blog with a config file and sample content
    Init(InitArgs),

    /// Build the blog into the output directory
    Build(BuildArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    match args.command {
        ReadyblogCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        ReadyblogCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
    }

    Ok(())
}
