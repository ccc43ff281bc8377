//! Contract with the remote ledger network.
//!
//! The network client is an external collaborator: account creation, token
//! creation, and token association are opaque calls that either return a
//! receipt or a failure already classified into the [`LedgerError`] taxonomy.
//! Retry and idempotency handling live above this trait, in
//! [`crate::retry`]; implementations only classify.
//!
//! [`local::LocalLedger`] is the in-process implementation used by offline
//! runs, tests, and benches. A network-backed client plugs in at the same
//! seam.

pub mod local;

use async_trait::async_trait;

use crate::types::{AccountRecord, Address};

/// Failure classification for a single remote call.
///
/// Which remote status codes map to `Transient` is the implementation's
/// decision; the rest of the pipeline consumes only this three-way split.
#[derive(Clone, thiserror::Error, Debug)]
pub enum LedgerError {
    /// The network rejected the request before executing it (node busy, rate
    /// limiting). Resubmitting the identical request is safe.
    #[error("transient rejection: {reason}")]
    Transient { reason: String },

    /// The account is already associated with the token: the requested end
    /// state already holds.
    #[error("already associated")]
    AlreadyAssociated,

    /// Any other failure. Fatal to the unit of work it applies to.
    #[error("permanent failure: {reason}")]
    Permanent { reason: String },
}

/// Request to create an account under an m-of-n key policy.
#[derive(Clone, Debug)]
pub struct CreateAccountParams {
    /// Public keys endorsing the new account.
    pub public_keys: Vec<[u8; 32]>,
    /// How many of the keys must sign a transaction.
    pub threshold: u32,
    /// Starting balance, in the network's smallest crypto denomination.
    pub initial_balance: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct CreateAccountReceipt {
    /// Network-assigned address of the new account.
    pub address: Address,
}

/// Request to create the scenario token.
#[derive(Clone, Debug)]
pub struct CreateTokenParams {
    pub symbol: String,
    pub name: String,
    pub memo: String,
    /// Initial minted supply, in the smallest token denomination.
    pub circulation: u64,
    pub decimals: u32,
    /// Treasury account receiving the initial supply. Its key policy doubles
    /// as the supply authority, so an exhausted treasury can mint more
    /// instead of forcing a fresh scenario.
    pub treasury: Address,
}

#[derive(Clone, Copy, Debug)]
pub struct CreateTokenReceipt {
    /// Network-assigned address of the new token.
    pub token: Address,
}

/// Opaque client for the target ledger network.
#[async_trait]
pub trait LedgerClient: Send + Sync + 'static {
    /// Creates an account, returning the network-assigned address.
    async fn create_account(
        &self,
        params: &CreateAccountParams,
    ) -> Result<CreateAccountReceipt, LedgerError>;

    /// Creates the scenario token, signed by the treasury keys.
    async fn create_token(
        &self,
        params: &CreateTokenParams,
        treasury: &AccountRecord,
    ) -> Result<CreateTokenReceipt, LedgerError>;

    /// Associates `account` with `token`, signed by the account's own keys.
    async fn associate_token(
        &self,
        token: Address,
        account: &AccountRecord,
    ) -> Result<(), LedgerError>;
}
