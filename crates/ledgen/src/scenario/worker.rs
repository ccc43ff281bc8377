//! Recipient provisioning workers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::amount::AmountSampler;
use crate::error::{Error, Result};
use crate::keys::Keypair;
use crate::ledger::{CreateAccountParams, LedgerClient};
use crate::retry::submit_with_retry;
use crate::types::{AccountRecord, Address, DistributionRecord};

/// State shared by every worker in the pool.
///
/// The index counter and the amount sampler are the only cross-worker shared
/// mutable state; everything else is read-only or owned per recipient.
pub(crate) struct WorkerContext<C> {
    pub client: Arc<C>,
    pub token: Address,
    pub recipient_count: usize,
    pub recipient_balance: u64,
    pub sampler: Arc<AmountSampler>,
    /// Next recipient slot to claim. Each index in `[0, recipient_count)` is
    /// claimed by exactly one worker, exactly once.
    pub next_index: Arc<AtomicUsize>,
    /// Recipients completed so far, across the whole pool.
    pub completed: Arc<AtomicUsize>,
    /// Cooperative batch cancellation: set on the first permanent failure.
    pub cancel: CancellationToken,
    pub records: mpsc::UnboundedSender<DistributionRecord>,
}

impl<C> Clone for WorkerContext<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            token: self.token,
            recipient_count: self.recipient_count,
            recipient_balance: self.recipient_balance,
            sampler: Arc::clone(&self.sampler),
            next_index: Arc::clone(&self.next_index),
            completed: Arc::clone(&self.completed),
            cancel: self.cancel.clone(),
            records: self.records.clone(),
        }
    }
}

/// Claims recipient indices until the pool drains, the batch is cancelled,
/// or a permanent failure stops the run.
///
/// Designed to be spawned as a tokio task, one per pool slot. Completed
/// records are handed to the sink through the result channel; the worker's
/// sender clone keeps the channel open until the worker exits.
pub(crate) async fn worker_loop<C: LedgerClient>(
    worker_id: usize,
    ctx: WorkerContext<C>,
) -> Result<()> {
    tracing::trace!(worker_id, "worker started");
    loop {
        // Checked before each claim so the pool stops issuing new work after
        // a cancellation, while in-flight items elsewhere resolve on their
        // own.
        if ctx.cancel.is_cancelled() {
            tracing::debug!(worker_id, "worker exiting after batch cancellation");
            return Ok(());
        }

        let index = ctx.next_index.fetch_add(1, Ordering::Relaxed);
        if index >= ctx.recipient_count {
            tracing::trace!(worker_id, "worker drained");
            return Ok(());
        }

        match provision_recipient(&ctx).await {
            Ok(record) => {
                let address = record.account.address;
                if ctx.records.send(record).is_err() {
                    // The sink is gone; nothing more can be durably recorded.
                    ctx.cancel.cancel();
                    return Err(Error::Channel {
                        context: format!("record sink closed before recipient {index}"),
                    });
                }
                let completed = ctx.completed.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::info!(
                    worker_id,
                    %address,
                    completed,
                    "recipient account created and associated"
                );
            }
            Err(err) => {
                ctx.cancel.cancel();
                tracing::error!(
                    worker_id,
                    index,
                    error = %err,
                    "recipient provisioning failed, stopping batch"
                );
                return Err(err);
            }
        }
    }
}

/// Provisions one recipient: fresh keypair, account creation, token
/// association, and a drawn distribution amount.
///
/// Network calls go through the retry policy; the sampler lock is taken only
/// after both calls succeed.
async fn provision_recipient<C: LedgerClient>(
    ctx: &WorkerContext<C>,
) -> Result<DistributionRecord> {
    let keypair = Keypair::generate();
    let params = CreateAccountParams {
        public_keys: vec![keypair.public_key()],
        threshold: 1,
        initial_balance: ctx.recipient_balance,
    };
    let receipt = submit_with_retry("account create", || ctx.client.create_account(&params))
        .await?
        .applied("account create")?;

    let account = AccountRecord {
        address: receipt.address,
        keys: vec![keypair],
        threshold: 1,
        initial_balance: ctx.recipient_balance,
    };
    submit_with_retry("token associate", || {
        ctx.client.associate_token(ctx.token, &account)
    })
    .await?;

    let amount = ctx.sampler.draw();
    Ok(DistributionRecord { account, amount })
}
