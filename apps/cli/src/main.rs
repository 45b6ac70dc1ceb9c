//! fivelist CLI — word list tooling for a five-letter guessing game.
//!
//! Generates the accepted-word list from a public frequency list, keeps the
//! solution list contained in it, and emits the embedded client data.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
