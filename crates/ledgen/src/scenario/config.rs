//! Scenario parameters.

use std::path::PathBuf;

use crate::scenario::pool::DEFAULT_POOL_SIZE;

/// Fully validated configuration for one scenario run.
///
/// The orchestrator assumes a coherent configuration; validation happens at
/// the boundary that builds it (the CLI's `TryFrom<CliArgs>`, or test code).
#[derive(Clone, Debug)]
pub struct ScenarioConfig {
    /// Symbol of the token to create.
    pub token_symbol: String,
    /// Display name of the token.
    pub token_name: String,
    /// Memo attached to the token.
    pub token_memo: String,
    /// Initial minted supply, in the smallest token denomination.
    pub token_circulation: u64,
    /// Decimal places of the token.
    pub token_decimals: u32,
    /// Total keys generated for the treasury account.
    pub treasury_key_count: u32,
    /// Keys required to sign a treasury transaction.
    pub treasury_threshold: u32,
    /// Initial crypto balance of the treasury.
    pub treasury_balance: u64,
    /// Initial crypto balance of the distribution payer.
    pub distribution_payer_balance: u64,
    /// Initial crypto balance of the scheduling payer.
    pub scheduling_payer_balance: u64,
    /// Number of recipient accounts to create.
    pub recipient_count: usize,
    /// Initial crypto balance of each recipient.
    pub recipient_balance: u64,
    /// Minimum distribution amount, in the smallest token denomination.
    pub min_distribution: u64,
    /// Maximum distribution amount, in the smallest token denomination.
    pub max_distribution: u64,
    /// Concurrent provisioning workers. Independent of the recipient count.
    pub workers: usize,
    /// Seed for the distribution-amount generator; `None` uses OS entropy.
    pub rng_seed: Option<u64>,
    /// Output path of the secrets ledger.
    pub secrets_path: PathBuf,
    /// Output path of the distribution plan.
    pub distribution_path: PathBuf,
}

impl Default for ScenarioConfig {
    /// A small test-network scenario: an 8-decimal token with a
    /// 3-key/2-signature treasury and 20 recipients.
    fn default() -> Self {
        Self {
            token_symbol: "TDST".into(),
            token_name: "Test Distribution Token".into(),
            token_memo: "synthetic distribution scenario".into(),
            token_circulation: 100_000_000_00_000_000,
            token_decimals: 8,
            treasury_key_count: 3,
            treasury_threshold: 2,
            treasury_balance: 100_00_000_000,
            distribution_payer_balance: 100_00_000_000,
            scheduling_payer_balance: 100_00_000_000,
            recipient_count: 20,
            recipient_balance: 0,
            min_distribution: 500_000,
            max_distribution: 10_000_00_000_000,
            workers: DEFAULT_POOL_SIZE,
            rng_seed: None,
            secrets_path: PathBuf::from("test-distribution-secrets.csv"),
            distribution_path: PathBuf::from("test-distribution.csv"),
        }
    }
}
