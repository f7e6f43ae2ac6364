//! WDI CLI - Command line tool for inspecting country indicator data.

use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(
    name = "wdi-cli",
    version,
    about = "World development indicator dashboard data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    commands::run(cli.command)
}
