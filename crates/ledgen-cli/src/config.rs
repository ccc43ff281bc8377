//! CLI configuration.
//!
//! Flags cover the same fields the original interactive editor exposed; every
//! flag has an environment fallback (prefix `LEDGEN_`) so scenario runs can
//! be scripted. Validation happens in the `TryFrom` conversion into
//! [`ScenarioConfig`], which is what the rest of the pipeline consumes.

use std::path::PathBuf;

use clap::Parser;
use ledgen::scenario::{DEFAULT_POOL_SIZE, ScenarioConfig};

/// Command-line arguments, unvalidated.
#[derive(Clone, Debug, Parser)]
#[command(
    name = "ledgen",
    version,
    about = "Generate a token-distribution test scenario"
)]
pub struct CliArgs {
    /// Symbol of the token to create.
    #[arg(long, env = "LEDGEN_TOKEN_SYMBOL", default_value = "TDST")]
    pub token_symbol: String,

    /// Display name of the token.
    #[arg(long, env = "LEDGEN_TOKEN_NAME", default_value = "Test Distribution Token")]
    pub token_name: String,

    /// Memo attached to the token.
    #[arg(long, env = "LEDGEN_TOKEN_MEMO", default_value = "synthetic distribution scenario")]
    pub token_memo: String,

    /// Initial minted supply, in the smallest token denomination.
    #[arg(long, env = "LEDGEN_TOKEN_CIRCULATION", default_value_t = 100_000_000_00_000_000)]
    pub token_circulation: u64,

    /// Number of decimal places of the token.
    #[arg(long, env = "LEDGEN_TOKEN_DECIMALS", default_value_t = 8)]
    pub token_decimals: u32,

    /// Total keys generated for the treasury account.
    #[arg(long, env = "LEDGEN_TREASURY_KEYS", default_value_t = 3)]
    pub treasury_keys: u32,

    /// Keys required to sign a treasury transaction.
    #[arg(long, env = "LEDGEN_TREASURY_THRESHOLD", default_value_t = 2)]
    pub treasury_threshold: u32,

    /// Initial crypto balance of the treasury, in the smallest denomination.
    #[arg(long, env = "LEDGEN_TREASURY_BALANCE", default_value_t = 100_00_000_000)]
    pub treasury_balance: u64,

    /// Initial crypto balance of the distribution payer.
    #[arg(long, env = "LEDGEN_DISTRIBUTION_PAYER_BALANCE", default_value_t = 100_00_000_000)]
    pub distribution_payer_balance: u64,

    /// Initial crypto balance of the scheduling payer.
    #[arg(long, env = "LEDGEN_SCHEDULING_PAYER_BALANCE", default_value_t = 100_00_000_000)]
    pub scheduling_payer_balance: u64,

    /// Number of recipient accounts to create.
    #[arg(long, env = "LEDGEN_RECIPIENTS", default_value_t = 20)]
    pub recipients: usize,

    /// Initial crypto balance of each recipient.
    #[arg(long, env = "LEDGEN_RECIPIENT_BALANCE", default_value_t = 0)]
    pub recipient_balance: u64,

    /// Minimum distribution amount, in the smallest token denomination.
    #[arg(long, env = "LEDGEN_MIN_DISTRIBUTION", default_value_t = 500_000)]
    pub min_distribution: u64,

    /// Maximum distribution amount, in the smallest token denomination.
    #[arg(long, env = "LEDGEN_MAX_DISTRIBUTION", default_value_t = 10_000_00_000_000)]
    pub max_distribution: u64,

    /// Concurrent provisioning workers.
    #[arg(long, env = "LEDGEN_WORKERS", default_value_t = DEFAULT_POOL_SIZE)]
    pub workers: usize,

    /// Seed for the distribution-amount generator (omit for OS entropy).
    #[arg(long, env = "LEDGEN_SEED")]
    pub seed: Option<u64>,

    /// Output path of the secrets ledger.
    #[arg(long, env = "LEDGEN_SECRETS_FILE", default_value = "test-distribution-secrets.csv")]
    pub secrets_file: PathBuf,

    /// Output path of the distribution plan.
    #[arg(long, env = "LEDGEN_DISTRIBUTION_FILE", default_value = "test-distribution.csv")]
    pub distribution_file: PathBuf,
}

impl TryFrom<CliArgs> for ScenarioConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.token_symbol.trim().is_empty() {
            anyhow::bail!("token symbol must not be empty");
        }
        if args.token_name.trim().is_empty() {
            anyhow::bail!("token name must not be empty");
        }
        if args.token_decimals > 18 {
            anyhow::bail!("token decimals must be at most 18");
        }
        if args.treasury_keys == 0 {
            anyhow::bail!("the treasury needs at least one key");
        }
        if args.treasury_threshold == 0 || args.treasury_threshold > args.treasury_keys {
            anyhow::bail!(
                "treasury threshold must be between 1 and the key count ({})",
                args.treasury_keys
            );
        }
        if args.min_distribution > args.max_distribution {
            anyhow::bail!(
                "minimum distribution ({}) exceeds maximum ({})",
                args.min_distribution,
                args.max_distribution
            );
        }
        if args.workers == 0 {
            anyhow::bail!("the worker pool needs at least one worker");
        }

        Ok(ScenarioConfig {
            token_symbol: args.token_symbol,
            token_name: args.token_name,
            token_memo: args.token_memo,
            token_circulation: args.token_circulation,
            token_decimals: args.token_decimals,
            treasury_key_count: args.treasury_keys,
            treasury_threshold: args.treasury_threshold,
            treasury_balance: args.treasury_balance,
            distribution_payer_balance: args.distribution_payer_balance,
            scheduling_payer_balance: args.scheduling_payer_balance,
            recipient_count: args.recipients,
            recipient_balance: args.recipient_balance,
            min_distribution: args.min_distribution,
            max_distribution: args.max_distribution,
            workers: args.workers,
            rng_seed: args.seed,
            secrets_path: args.secrets_file,
            distribution_path: args.distribution_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["ledgen"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn defaults_convert_into_a_valid_config() {
        let config = ScenarioConfig::try_from(parse(&[])).unwrap();
        assert_eq!(config.recipient_count, 20);
        assert_eq!(config.workers, DEFAULT_POOL_SIZE);
        assert_eq!(config.treasury_key_count, 3);
        assert_eq!(config.treasury_threshold, 2);
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn rejects_inverted_distribution_bounds() {
        let args = parse(&["--min-distribution", "10", "--max-distribution", "5"]);
        assert!(ScenarioConfig::try_from(args).is_err());
    }

    #[test]
    fn rejects_threshold_above_key_count() {
        let args = parse(&["--treasury-keys", "2", "--treasury-threshold", "3"]);
        assert!(ScenarioConfig::try_from(args).is_err());
    }

    #[test]
    fn rejects_an_empty_worker_pool() {
        let args = parse(&["--workers", "0"]);
        assert!(ScenarioConfig::try_from(args).is_err());
    }

    #[test]
    fn rejects_excessive_decimals() {
        let args = parse(&["--token-decimals", "19"]);
        assert!(ScenarioConfig::try_from(args).is_err());
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let args = parse(&["--min-distribution", "100", "--max-distribution", "100"]);
        assert!(ScenarioConfig::try_from(args).is_ok());
    }
}
