use crate::cli::commands::fetch::print_rows;
use crate::cli::parser::Commands;
use crate::client::{FileSource, LogSource, PalGateClient};
use crate::config::Config;
use crate::core::ArchiveLogic;
use crate::errors::AppResult;
use crate::sink::{SheetBackend, SheetSink};
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Handle the `archive` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Archive { dry_run, from_file } = cmd {
        run(cfg, *dry_run, from_file.as_deref())?;
    }
    Ok(())
}

/// Fetch the gate log and archive the new records.
pub fn run(cfg: &Config, dry_run: bool, from_file: Option<&Path>) -> AppResult<()> {
    cfg.validate()?;

    let source: Box<dyn LogSource> = match from_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(PalGateClient::from_config(cfg)?),
    };

    let backend = ArchiveLogic::open_backend(cfg)?;
    let target = backend.describe();
    let mut sink = SheetSink::new(backend, cfg.timezone);

    if dry_run {
        info(format!("Acquiring log records from {}", source.describe()));
        let records = ArchiveLogic::fetch(source.as_ref())?;
        let rows = sink.plan(&records)?;
        if rows.is_empty() {
            warning(format!("Dry run: {target} is up to date"));
        } else {
            print_rows(&rows);
            info(format!(
                "Dry run: {} new log records would be archived in {target}",
                rows.len()
            ));
        }
        return Ok(());
    }

    info(format!(
        "Archiving log records from {} into {target}",
        source.describe()
    ));
    let written = ArchiveLogic::run(source.as_ref(), &mut sink)?;
    success(format!("Archived {written} new log records"));
    Ok(())
}
