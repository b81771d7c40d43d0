//! One-shot run command.

use super::OutputFormat;
use glean::{GleanConfig, GleanResult, JsonError, RunOptions, RunReport};
use tracing::info;

/// Execute one orchestrator run and print its report.
pub async fn run_once(
    config: &GleanConfig,
    force: bool,
    format: OutputFormat,
) -> GleanResult<RunReport> {
    let orchestrator = config.orchestrator()?;
    info!(?orchestrator, force, "Starting one-shot run");

    let options = RunOptions {
        force_reprocess: force,
    };
    let report = orchestrator.run(&options).await;

    println!("{}", render(&report, format)?);
    Ok(report)
}

fn render(report: &RunReport, format: OutputFormat) -> GleanResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| JsonError::new("run report", e).into()),
        OutputFormat::Human => {
            let elapsed = report.finished_at - report.started_at;
            let mut out = format!(
                "{} ({} pages, {} ms)",
                report.stats,
                report.pages,
                elapsed.num_milliseconds()
            );
            if let Some(reason) = report.abort_reason() {
                out.push_str(&format!("\naborted: {}", reason));
            }
            Ok(out)
        }
    }
}
