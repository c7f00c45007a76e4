use anyhow::Result;
use clap::Parser;
use env_logger::init;
use fontaxis_cli::cli::Cli;

fn main() -> Result<()> {
    init();
    Cli::parse().command.run()
}
