//! Scenario sequencing.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::amount::AmountSampler;
use crate::error::{Error, Result};
use crate::keys::Keypair;
use crate::ledger::{CreateAccountParams, CreateTokenParams, LedgerClient};
use crate::output::{DistributionFile, SecretsFile};
use crate::retry::submit_with_retry;
use crate::scenario::config::ScenarioConfig;
use crate::scenario::pool::RecipientPool;
use crate::scenario::sink::drain_records;
use crate::scenario::worker::WorkerContext;
use crate::types::{AccountRecord, ScenarioResult, TokenRecord};

/// Runs the full scenario: sequential setup, then the concurrent recipient
/// pipeline, then drain-and-close.
///
/// Setup failures abort the run before any recipient work starts. A permanent
/// failure during recipient provisioning cancels the batch cooperatively but
/// still returns `Ok`: the result carries the recipients that completed plus
/// the failure that stopped the rest. Output I/O failures are always fatal.
///
/// `shutdown` is the batch cancellation token; callers may cancel it (e.g.
/// from a signal handler) to stop issuing new recipient work while in-flight
/// items resolve and the sink drains.
#[tracing::instrument(skip_all, fields(recipients = config.recipient_count))]
pub async fn run_scenario<C: LedgerClient>(
    client: Arc<C>,
    config: &ScenarioConfig,
    shutdown: CancellationToken,
) -> Result<ScenarioResult> {
    // Setup is strictly sequential: the token needs the treasury, and each
    // subsequent account bills the same operator.
    tracing::info!("creating treasury account");
    let treasury = create_account(
        &client,
        "treasury create",
        config.treasury_key_count,
        config.treasury_threshold,
        config.treasury_balance,
    )
    .await?;
    tracing::info!(address = %treasury.address, "treasury account created");

    let token = create_token(&client, config, &treasury).await?;
    tracing::info!(address = %token.address, symbol = %token.symbol, "token created");

    let distribution_payer = create_account(
        &client,
        "distribution payer create",
        1,
        1,
        config.distribution_payer_balance,
    )
    .await?;
    tracing::info!(address = %distribution_payer.address, "distribution payer account created");

    let scheduling_payer = create_account(
        &client,
        "scheduling payer create",
        1,
        1,
        config.scheduling_payer_balance,
    )
    .await?;
    tracing::info!(address = %scheduling_payer.address, "scheduling payer account created");

    // Both outputs must open before any recipient exists: the files are the
    // only durable record of generated key material.
    let secrets = SecretsFile::create(
        &config.secrets_path,
        &token,
        &treasury,
        &distribution_payer,
        &scheduling_payer,
    )?;
    let distribution = DistributionFile::create(&config.distribution_path)?;

    let (record_tx, record_rx) = mpsc::unbounded_channel();
    let sink = tokio::spawn(drain_records(record_rx, secrets, distribution));

    let sampler = match config.rng_seed {
        Some(seed) => AmountSampler::with_seed(
            config.min_distribution,
            config.max_distribution,
            config.token_decimals,
            seed,
        ),
        None => AmountSampler::new(
            config.min_distribution,
            config.max_distribution,
            config.token_decimals,
        ),
    };

    let ctx = WorkerContext {
        client: Arc::clone(&client),
        token: token.address,
        recipient_count: config.recipient_count,
        recipient_balance: config.recipient_balance,
        sampler: Arc::new(sampler),
        next_index: Arc::new(AtomicUsize::new(0)),
        completed: Arc::new(AtomicUsize::new(0)),
        cancel: shutdown,
        records: record_tx,
    };
    let pool = RecipientPool::spawn(config.workers, &ctx);
    // The workers now hold the only senders; the channel closes when the
    // last worker exits, which is the sink's signal to finish draining.
    drop(ctx);

    let failure = pool.join().await;

    let recipients = sink.await.map_err(|err| Error::Task {
        context: format!("output sink aborted: {err}"),
    })??;

    match &failure {
        Some(err) => tracing::warn!(
            completed = recipients.len(),
            requested = config.recipient_count,
            error = %err,
            "scenario completed partially"
        ),
        None => tracing::info!(
            completed = recipients.len(),
            "recipient accounts created and associated"
        ),
    }

    Ok(ScenarioResult {
        token,
        treasury,
        distribution_payer,
        scheduling_payer,
        recipients,
        requested: config.recipient_count,
        failure,
    })
}

/// Creates one setup account through the retry policy.
async fn create_account<C: LedgerClient>(
    client: &Arc<C>,
    op: &'static str,
    key_count: u32,
    threshold: u32,
    initial_balance: u64,
) -> Result<AccountRecord> {
    let keys = Keypair::generate_many(key_count);
    let params = CreateAccountParams {
        public_keys: keys.iter().map(Keypair::public_key).collect(),
        threshold,
        initial_balance,
    };
    let receipt = submit_with_retry(op, || client.create_account(&params))
        .await?
        .applied(op)?;
    Ok(AccountRecord {
        address: receipt.address,
        keys,
        threshold,
        initial_balance,
    })
}

/// Creates the scenario token with the treasury as owner and supply
/// authority.
async fn create_token<C: LedgerClient>(
    client: &Arc<C>,
    config: &ScenarioConfig,
    treasury: &AccountRecord,
) -> Result<TokenRecord> {
    let params = CreateTokenParams {
        symbol: config.token_symbol.clone(),
        name: config.token_name.clone(),
        memo: config.token_memo.clone(),
        circulation: config.token_circulation,
        decimals: config.token_decimals,
        treasury: treasury.address,
    };
    let receipt = submit_with_retry("token create", || client.create_token(&params, treasury))
        .await?
        .applied("token create")?;
    Ok(TokenRecord {
        address: receipt.token,
        symbol: params.symbol,
        name: params.name,
        memo: params.memo,
        circulation: params.circulation,
        decimals: params.decimals,
    })
}
