use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if !*print_config && !*check {
            warning("Nothing to do: use --print or --check");
            return Ok(());
        }

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Effective configuration:\n");
            println!("{}", serde_yaml::to_string(&cfg.redacted())?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            cfg.validate()?;
            success("Configuration is complete");
        }
    }

    Ok(())
}
