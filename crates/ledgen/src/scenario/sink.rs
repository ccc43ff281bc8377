//! Single-consumer output sink.

use tokio::sync::mpsc;

use crate::error::Result;
use crate::output::{DistributionFile, SecretsFile};
use crate::types::DistributionRecord;

/// Drains completed recipient records and writes each to both output files.
///
/// Records are written in completion order, secrets first, and both files
/// flush after every record: a crash after N records leaves all N durably
/// recorded in both destinations. Terminates only once the channel is closed
/// (every worker sender dropped) and empty, returning the records it wrote so
/// they become the scenario result's recipient list.
///
/// A write failure ends the sink immediately; the dropped receiver then fails
/// the workers' sends, which cancels the batch.
pub(crate) async fn drain_records(
    mut records: mpsc::UnboundedReceiver<DistributionRecord>,
    mut secrets: SecretsFile,
    mut distribution: DistributionFile,
) -> Result<Vec<DistributionRecord>> {
    let mut written = Vec::new();
    while let Some(record) = records.recv().await {
        secrets.write_recipient(&record.account)?;
        distribution.write_recipient(&record)?;
        written.push(record);
    }
    tracing::debug!(records = written.len(), "output sink drained");
    Ok(written)
}
