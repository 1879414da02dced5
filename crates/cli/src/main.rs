mod config;
mod export;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use gridview_tui::DataTable;
use gridview_types::LoadError;
use tracing::info;

use crate::export::TextReportExporter;

/// Browse, filter and export tabular data in the terminal.
#[derive(Debug, Parser)]
#[command(name = "gridview", version)]
struct Cli {
    /// JSON or YAML file holding an array of row objects.
    data: PathBuf,

    /// Title of the table, also used as the export file name.
    #[arg(long, short = 'n')]
    report_name: String,

    /// Column descriptors (JSON or YAML). Inferred from the data when omitted.
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Table options (JSON or YAML).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Theme name; overrides the options file and GRIDVIEW_THEME.
    #[arg(long)]
    theme: Option<String>,

    /// Directory exported reports are written to. Defaults to the download directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut options = config::load_options(cli.options.as_deref())?;
    if let Some(theme) = config::theme_override(cli.theme.as_deref()) {
        options.theme = theme;
    }
    let columns = match cli.columns.as_deref() {
        Some(path) => config::load_columns(path)?,
        None => Vec::new(),
    };

    let out_dir = cli.out_dir.unwrap_or_else(default_out_dir);
    info!(out_dir = %out_dir.display(), theme = %options.theme, "Starting gridview");
    let exporter = TextReportExporter::new(out_dir);

    let table = DataTable::new(cli.report_name, columns).with_options(options);
    let data_path = cli.data;
    gridview_tui::run(
        table,
        move || config::load_rows(&data_path).map_err(|err| LoadError::new(err.to_string())),
        &exporter,
    )
}

fn default_out_dir() -> PathBuf {
    dirs_next::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Logs go to `log_file` at `info` when given, otherwise to stderr at `warn`
/// so they do not tear the alternate screen. `RUST_LOG` overrides both.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let default_level = if log_file.is_some() { "info" } else { "warn" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into());
    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_and_optional_arguments() {
        let cli = Cli::try_parse_from(["gridview", "users.json", "-n", "Users", "--theme", "dark"]).expect("parse");
        assert_eq!(cli.data, PathBuf::from("users.json"));
        assert_eq!(cli.report_name, "Users");
        assert_eq!(cli.theme.as_deref(), Some("dark"));
        assert!(cli.columns.is_none());
    }

    #[test]
    fn report_name_is_required() {
        assert!(Cli::try_parse_from(["gridview", "users.json"]).is_err());
    }
}
