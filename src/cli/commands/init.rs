use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Writes a configuration template to `--config` or `~/.palgate.yaml`.
/// Secrets are meant to come from the environment, so the template leaves
/// them empty.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let force = matches!(cli.command, Some(Commands::Init { force: true }));

    let path = cli.config.clone().unwrap_or_else(Config::default_file);
    Config::init_file(&path, force)?;

    success(format!("Config file: {}", path.display()));
    info("Fill in gate_id and the archive settings, or export PALGATE_GATE_ID / PALGATE_AUTH_TOKEN");
    Ok(())
}
