//! Profiler CLI: degree-mention extraction from biography pages.
//!
//! Builds section trees from heading-tagged markup, matches them against a
//! keyword vocabulary that learns new section titles, and classifies degree
//! sentences.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
