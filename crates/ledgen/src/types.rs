//! Records describing the entities a scenario run creates.

use crate::error::Error;
use crate::keys::Keypair;
use core::fmt;

/// A `shard.realm.num` entity id on the target network.
///
/// Accounts and tokens share the same id space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl Address {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

/// Identity of one provisioned account.
///
/// Created by whoever submitted the creation call, immediately after the
/// network hands back an address; immutable thereafter. Recipient records are
/// owned by a single worker until handed to the result channel, at which point
/// ownership transfers to the sink.
#[derive(Clone, Debug)]
pub struct AccountRecord {
    /// Network-assigned address of the account.
    pub address: Address,
    /// Keypairs generated for the account, one or more for multi-signature
    /// policies.
    pub keys: Vec<Keypair>,
    /// How many of the keys must sign a transaction.
    pub threshold: u32,
    /// Starting crypto balance requested at creation, in the network's
    /// smallest denomination.
    pub initial_balance: u64,
}

/// The scenario token: its network address plus the creation parameters the
/// output files report.
#[derive(Clone, Debug)]
pub struct TokenRecord {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub memo: String,
    /// Initial minted supply, in the smallest token denomination.
    pub circulation: u64,
    pub decimals: u32,
}

/// One recipient account paired with its randomly drawn distribution amount,
/// in whole-token units. Consumed exactly once by the output sink.
#[derive(Clone, Debug)]
pub struct DistributionRecord {
    pub account: AccountRecord,
    pub amount: f64,
}

/// Everything a scenario run created.
///
/// Partial completion is a valid, reported outcome: if the recipient batch
/// aborted early, `recipients` holds whatever completed before the abort and
/// `failure` carries the error that stopped it.
#[derive(Debug)]
pub struct ScenarioResult {
    pub token: TokenRecord,
    pub treasury: AccountRecord,
    pub distribution_payer: AccountRecord,
    pub scheduling_payer: AccountRecord,
    /// Completed recipients, in completion order (the order the sink wrote
    /// them, not index order).
    pub recipients: Vec<DistributionRecord>,
    /// How many recipients were requested.
    pub requested: usize,
    /// The first permanent failure of the recipient batch, if it aborted.
    pub failure: Option<Error>,
}

impl ScenarioResult {
    /// Number of recipients fully created, associated, and durably recorded.
    pub fn completed(&self) -> usize {
        self.recipients.len()
    }

    /// Whether every requested recipient completed.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.recipients.len() == self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_displays_as_shard_realm_num() {
        assert_eq!(Address::new(0, 0, 1001).to_string(), "0.0.1001");
        assert_eq!(Address::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn result_completion_accounting() {
        let account = AccountRecord {
            address: Address::new(0, 0, 1005),
            keys: vec![Keypair::generate()],
            threshold: 1,
            initial_balance: 0,
        };
        let mut result = ScenarioResult {
            token: TokenRecord {
                address: Address::new(0, 0, 1002),
                symbol: "TDST".into(),
                name: "Test Distribution Token".into(),
                memo: String::new(),
                circulation: 1_000,
                decimals: 2,
            },
            treasury: account.clone(),
            distribution_payer: account.clone(),
            scheduling_payer: account.clone(),
            recipients: vec![DistributionRecord {
                account,
                amount: 1.25,
            }],
            requested: 2,
            failure: None,
        };
        assert_eq!(result.completed(), 1);
        assert!(!result.is_complete());

        result.requested = 1;
        assert!(result.is_complete());
    }
}
