mod bootstrap;
mod commands;
mod report;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use dashboard_core::settings::Settings;
use dashboard_data::loader::{CsvFileSource, RawTextSource};
use dashboard_runtime::coordinator::{DashboardCommand, DashboardCoordinator};
use dashboard_runtime::engine::DashboardSnapshot;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::commands::{parse_command, Input, HELP};
use crate::report::{render, ReportFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    let _log_guard = bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("AG1 dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    let data = settings.data.clone().unwrap_or_else(|| PathBuf::from("."));
    tracing::info!("Data source: {}", data.display());

    let source: Arc<dyn RawTextSource> =
        Arc::new(CsvFileSource::new(data, settings.export_name.clone()));
    let coordinator = DashboardCoordinator::new(
        source,
        settings.filter_config(),
        Duration::from_millis(settings.debounce_ms),
    );
    let (commands, mut snapshots, handle) = coordinator.start();
    let format = ReportFormat::from_setting(&settings.format);

    let first = snapshots
        .recv()
        .await
        .ok_or_else(|| anyhow!("dashboard stopped before the first report"))?;
    print_report(&first, format)?;

    if settings.interactive {
        tokio::select! {
            result = run_interactive(&commands, &mut snapshots, format) => result?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received; shutting down");
            }
        }
    }

    // The loop may already be gone after `quit`.
    let _ = commands.send(DashboardCommand::Shutdown).await;
    handle.wait().await;

    Ok(())
}

/// Forward stdin commands to the coordinator and print every snapshot.
///
/// Returns on `quit`, end of input, or when the coordinator stops.
async fn run_interactive(
    commands: &mpsc::Sender<DashboardCommand>,
    snapshots: &mut mpsc::Receiver<DashboardSnapshot>,
    format: ReportFormat,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("{}", HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    return Ok(());
                };
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Input::Help)) => eprintln!("{}", HELP),
                    Ok(Some(Input::Command(DashboardCommand::Shutdown))) => return Ok(()),
                    Ok(Some(Input::Command(command))) => {
                        if commands.send(command).await.is_err() {
                            return Ok(());
                        }
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            snapshot = snapshots.recv() => match snapshot {
                Some(snapshot) => print_report(&snapshot, format)?,
                None => return Ok(()),
            },
        }
    }
}

fn print_report(snapshot: &DashboardSnapshot, format: ReportFormat) -> Result<()> {
    println!("{}", render(snapshot, format)?);
    Ok(())
}
