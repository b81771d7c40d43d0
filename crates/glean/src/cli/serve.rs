//! Trigger server command.

use glean::{GleanConfig, GleanResult, GleanServer};

/// Build the orchestrator from `config` and serve until Ctrl-C.
pub async fn serve(config: GleanConfig) -> GleanResult<()> {
    let orchestrator = config.orchestrator()?;
    let server = GleanServer::new(config, orchestrator);

    tracing::info!("Trigger server starting. Press Ctrl+C to stop.");
    server.start().await?;
    Ok(())
}
