use anyhow::Result;
use apodetl::{load, logging, transform, Config, RpcClient};
use reqwest::Client;
use tokio::time::Instant;
use tracing::info;

/// Full pipeline in one process: stage the latest raw snapshot, then load it.
#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging + config ────────────────────────────────────
    logging::init();
    let cfg = Config::from_env()?;
    let client = RpcClient::new(Client::new(), cfg.remote()?)?;
    info!(endpoint = %client.endpoint(), "startup");

    // ─── 2) transform ────────────────────────────────────────────────
    let start = Instant::now();
    let row = transform(&cfg)?;
    info!(date = ?row.date, elapsed = ?start.elapsed(), "staged");

    // ─── 3) load ─────────────────────────────────────────────────────
    let summary = load(&client, &cfg).await?;
    info!(rows = summary.rows, batches = summary.batches, elapsed = ?start.elapsed(), "all done");
    Ok(())
}
