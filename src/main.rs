use clap::Parser;

mod cli;
mod commands;
mod dialect;
mod domain;
mod services;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    commands::dispatch(&cli)
}
