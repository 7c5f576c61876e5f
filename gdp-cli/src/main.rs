//! GDP CLI - impute quarterly GDP paths from annual average growth forecasts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "gdp-cli",
    version,
    about = "Quarterly GDP imputation from annual growth forecasts"
)]
struct Cli {
    #[command(subcommand)]
    command: gdp_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    gdp_cmd::run(cli.command)
}
