use crate::cli::parser::Commands;
use crate::client::{LogSource, PalGateClient};
use crate::config::Config;
use crate::core::dedup::sort_newest_first;
use crate::errors::AppResult;
use crate::models::{HEADERS, Row};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;
use std::fs;

/// Handle the `fetch` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Fetch { output } = cmd {
        cfg.validate_source()?;

        let client = PalGateClient::from_config(cfg)?;
        info(format!("Acquiring log records from {}", client.describe()));

        let response = client.fetch_log()?;
        response.ensure_success()?;

        // ---- SAVE RAW RESPONSE ----
        if let Some(path) = output {
            let json = serde_json::to_string_pretty(&response)?;
            fs::write(path, json)?;
            success(format!(
                "Saved {} log records to {}",
                response.records.len(),
                path.display()
            ));
            return Ok(());
        }

        // ---- PRINT TABLE ----
        if response.records.is_empty() {
            warning("No log records returned");
            return Ok(());
        }

        let mut rows = Row::from_records(&response.records, cfg.timezone)?;
        sort_newest_first(&mut rows);
        print_rows(&rows);
    }
    Ok(())
}

pub(crate) fn print_rows(rows: &[Row]) {
    let mut table = Table::with_headers(&HEADERS);
    for row in rows {
        table.add_row(row.to_cells());
    }
    print!("{}", table.render());
}
