use anyhow::Result;
use clap::Parser;
use duwatch::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
