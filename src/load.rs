use crate::{
    config::Config,
    error::Result,
    record::STAGED_COLUMNS,
    remote::SqlExecutor,
    sql, staged,
};
use tracing::{debug, info};

/// What a finished load pushed to the remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub rows: usize,
    pub batches: usize,
}

/// Insert every staged row into `cfg.table`, `cfg.batch_size` rows per statement.
///
/// The first failing batch aborts the run; batches already sent stay committed.
#[tracing::instrument(level = "info", skip(executor, cfg), fields(staged = %cfg.staged_path.display(), table = %cfg.table))]
pub async fn load<E: SqlExecutor>(executor: &E, cfg: &Config) -> Result<LoadSummary> {
    let mut table = staged::read_staged(&cfg.staged_path)?;

    if table.has_extracted_at {
        for row in &mut table.rows {
            row.normalize_extracted_at()?;
        }
    }

    let total = table.rows.len();
    let batch_size = cfg.batch_size.max(1);
    let batch_count = total.div_ceil(batch_size);
    let mut summary = LoadSummary::default();

    for (idx, batch) in table.rows.chunks(batch_size).enumerate() {
        let first = idx * batch_size + 1;
        let last = first + batch.len() - 1;

        let statement = sql::build_insert(&cfg.table, &STAGED_COLUMNS, batch);
        debug!(batch = idx + 1, bytes = statement.len(), "built insert");
        executor.execute(&statement).await?;

        summary.rows += batch.len();
        summary.batches += 1;
        info!("inserted rows {} → {}", first, last);

        if idx + 1 < batch_count && !cfg.batch_pause.is_zero() {
            tokio::time::sleep(cfg.batch_pause).await;
        }
    }

    info!(rows = summary.rows, batches = summary.batches, "finished loading NASA data");
    Ok(summary)
}
