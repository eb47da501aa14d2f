//! gatelog library root.
//! Exposes the CLI parser, the high-level run() function and the archive
//! building blocks (record model, dedup engine, source client, sinks).

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod sink;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli) -> AppResult<()> {
    match &cli.command {
        // `init` writes the config file, so it must not load one.
        Some(Commands::Init { .. }) => commands::init::handle(cli),
        Some(cmd @ Commands::Config { .. }) => commands::config::handle(cmd, &load_config(cli)?),
        Some(cmd @ Commands::Fetch { .. }) => commands::fetch::handle(cmd, &load_config(cli)?),
        Some(cmd @ Commands::Archive { .. }) => commands::archive::handle(cmd, &load_config(cli)?),
        None => commands::archive::run(&load_config(cli)?, false, None),
    }
}

fn load_config(cli: &Cli) -> AppResult<Config> {
    Config::load(cli.config.as_deref())
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    dispatch(&cli)
}
