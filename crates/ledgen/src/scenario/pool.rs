//! Worker pool lifecycle.

use futures::future::join_all;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::ledger::LedgerClient;
use crate::scenario::worker::{WorkerContext, worker_loop};

/// Default number of concurrent provisioning workers.
pub const DEFAULT_POOL_SIZE: usize = 6;

/// A fixed-size pool of recipient workers.
///
/// Workers share the index counter, sampler, and cancellation token carried
/// by the [`WorkerContext`]; the pool itself only spawns and joins them.
pub(crate) struct RecipientPool {
    handles: Vec<JoinHandle<Result<()>>>,
}

impl RecipientPool {
    /// Spawns `size` workers over clones of `ctx`.
    pub fn spawn<C: LedgerClient>(size: usize, ctx: &WorkerContext<C>) -> Self {
        let handles = (0..size)
            .map(|worker_id| tokio::spawn(worker_loop(worker_id, ctx.clone())))
            .collect();
        Self { handles }
    }

    /// Waits for every worker to finish and returns the first failure.
    ///
    /// Additional failures are logged and suppressed: by the time a second
    /// worker errors, the batch is already cancelled by the first.
    pub async fn join(self) -> Option<Error> {
        let mut first = None;
        for (worker_id, outcome) in join_all(self.handles).await.into_iter().enumerate() {
            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(err),
                Err(join_err) => Some(Error::Task {
                    context: format!("worker {worker_id} aborted: {join_err}"),
                }),
            };
            if let Some(err) = failure {
                if first.is_none() {
                    first = Some(err);
                } else {
                    tracing::warn!(worker_id, error = %err, "additional worker failure");
                }
            }
        }
        first
    }
}
