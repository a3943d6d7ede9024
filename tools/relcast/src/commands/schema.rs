use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::Args;
use localrel::{SchemaDescriptor, core::format_field_defs};

use super::SourceArgs;

#[derive(Args)]
pub struct SchemaArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print Spark JSON instead of the readable tree
    #[arg(long)]
    json: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let converted = self.source.convert()?;
        let text = if self.json {
            SchemaDescriptor::Struct(converted.fields).to_json()
        } else {
            format_field_defs(&converted.fields)?
        };

        match self.output {
            Some(path) => fs::write(path, format!("{text}\n"))?,
            None => println!("{text}"),
        }
        Ok(())
    }
}
