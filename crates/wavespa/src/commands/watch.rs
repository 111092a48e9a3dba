//! `wavespa watch`: run the poll driver and stream snapshots.

use futures_util::StreamExt;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use wavespa_core::config::DEFAULT_POLL_INTERVAL_SECS;
use wavespa_core::{Controller, ControllerConfig};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::status;

pub async fn handle(
    args: WatchArgs,
    mut config: ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    config.poll_interval_secs = args.interval.unwrap_or(match config.poll_interval_secs {
        0 => DEFAULT_POLL_INTERVAL_SECS,
        secs => secs,
    });

    let controller = Controller::new(config);
    // Subscribe first so the initial cycle's diagnostics are not missed
    let mut diagnostics = controller.diagnostics();
    controller.connect().await?;

    let mut snapshots = controller.snapshots().into_stream();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            _ = &mut shutdown => break Ok(()),
            snapshot = snapshots.next() => {
                let Some(snapshot) = snapshot else { break Ok(()) };
                let views = status::collect(&controller, &snapshot, None);
                if let Err(e) = print_snapshot(&views, snapshot.taken_at, global) {
                    break Err(e);
                }
            }
            diagnostic = diagnostics.recv() => match diagnostic {
                Ok(diagnostic) => {
                    if !global.quiet {
                        eprintln!("! {diagnostic}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "diagnostics lagged"),
                Err(RecvError::Closed) => break Ok(()),
            },
        }
    };

    controller.disconnect().await;
    result
}

fn print_snapshot(
    views: &[status::StatusView],
    taken_at: Option<chrono::DateTime<chrono::Utc>>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // JSON: one snapshot per line
    let rendered = match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact => {
            serde_json::to_string(views).map_err(|e| CliError::Render(e.to_string()))?
        }
        OutputFormat::Table => {
            let header = taken_at.map_or_else(
                || "── snapshot ──".to_owned(),
                |t| format!("── {} ──", t.format("%Y-%m-%d %H:%M:%S UTC")),
            );
            format!("{header}\n{}", status::render(views, global)?)
        }
        _ => status::render(views, global)?,
    };
    output::print_output(&rendered, global.quiet);
    Ok(())
}
