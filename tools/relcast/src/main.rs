mod commands;
mod format;
mod input;
mod writer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{convert::ConvertArgs, schema::SchemaArgs};
use env_logger::{Builder, Env};

#[derive(Parser)]
#[command(
    name = "relcast",
    about = "Convert JSON-lines records into schema-typed tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert records to jsonl/csv/parquet
    Convert(ConvertArgs),
    /// Print the inferred schema
    Schema(SchemaArgs),
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => args.run(),
        Commands::Schema(args) => args.run(),
    }
}
