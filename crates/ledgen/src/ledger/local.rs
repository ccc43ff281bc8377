//! In-process ledger backend.
//!
//! Assigns sequential entity numbers the way a freshly provisioned test
//! network would, and tracks token associations so a duplicate association
//! reports [`LedgerError::AlreadyAssociated`]. An optional fault hook is
//! consulted before every call, letting tests script transient and permanent
//! rejections at exact points in the call sequence.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{
    CreateAccountParams, CreateAccountReceipt, CreateTokenParams, CreateTokenReceipt,
    LedgerClient, LedgerError,
};
use crate::types::{AccountRecord, Address};

/// Decides whether a call fails before it is applied.
///
/// Receives the operation label and the 1-based global call sequence number.
/// Returning `None` lets the call through.
pub type FaultHook = dyn Fn(&'static str, u64) -> Option<LedgerError> + Send + Sync;

/// In-memory stand-in for the remote network.
pub struct LocalLedger {
    next_entity: AtomicU64,
    calls: AtomicU64,
    associations: Mutex<HashSet<(Address, Address)>>,
    fault_hook: Option<Box<FaultHook>>,
}

impl LocalLedger {
    /// First entity number handed out, matching common test-network layouts.
    const FIRST_ENTITY: u64 = 1001;

    pub fn new() -> Self {
        Self {
            next_entity: AtomicU64::new(Self::FIRST_ENTITY),
            calls: AtomicU64::new(0),
            associations: Mutex::new(HashSet::new()),
            fault_hook: None,
        }
    }

    /// Installs a hook consulted before every call.
    pub fn with_fault_hook(
        hook: impl Fn(&'static str, u64) -> Option<LedgerError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            fault_hook: Some(Box::new(hook)),
            ..Self::new()
        }
    }

    /// Number of calls observed, fault-rejected ones included.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn precheck(&self, op: &'static str) -> Result<(), LedgerError> {
        let seq = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(hook) = &self.fault_hook {
            if let Some(err) = hook(op, seq) {
                return Err(err);
            }
        }
        Ok(())
    }

    fn assign_address(&self) -> Address {
        Address::new(0, 0, self.next_entity.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for LocalLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for LocalLedger {
    async fn create_account(
        &self,
        params: &CreateAccountParams,
    ) -> Result<CreateAccountReceipt, LedgerError> {
        self.precheck("account create")?;
        if params.public_keys.is_empty()
            || params.threshold == 0
            || params.threshold as usize > params.public_keys.len()
        {
            return Err(LedgerError::Permanent {
                reason: "invalid key policy".into(),
            });
        }
        Ok(CreateAccountReceipt {
            address: self.assign_address(),
        })
    }

    async fn create_token(
        &self,
        params: &CreateTokenParams,
        _treasury: &AccountRecord,
    ) -> Result<CreateTokenReceipt, LedgerError> {
        self.precheck("token create")?;
        if params.symbol.is_empty() {
            return Err(LedgerError::Permanent {
                reason: "empty token symbol".into(),
            });
        }
        Ok(CreateTokenReceipt {
            token: self.assign_address(),
        })
    }

    async fn associate_token(
        &self,
        token: Address,
        account: &AccountRecord,
    ) -> Result<(), LedgerError> {
        self.precheck("token associate")?;
        let mut associations = self.associations.lock();
        if !associations.insert((token, account.address)) {
            return Err(LedgerError::AlreadyAssociated);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Keypair;

    fn account(address: Address) -> AccountRecord {
        AccountRecord {
            address,
            keys: vec![Keypair::generate()],
            threshold: 1,
            initial_balance: 0,
        }
    }

    fn single_key_params() -> CreateAccountParams {
        CreateAccountParams {
            public_keys: vec![Keypair::generate().public_key()],
            threshold: 1,
            initial_balance: 10,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_addresses() {
        let ledger = LocalLedger::new();
        let first = ledger.create_account(&single_key_params()).await.unwrap();
        let second = ledger.create_account(&single_key_params()).await.unwrap();
        assert_eq!(first.address, Address::new(0, 0, 1001));
        assert_eq!(second.address, Address::new(0, 0, 1002));
        assert_eq!(ledger.calls(), 2);
    }

    #[tokio::test]
    async fn duplicate_association_reports_already_associated() {
        let ledger = LocalLedger::new();
        let token = Address::new(0, 0, 2000);
        let holder = account(Address::new(0, 0, 1001));

        ledger.associate_token(token, &holder).await.unwrap();
        let err = ledger.associate_token(token, &holder).await.unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyAssociated));
    }

    #[tokio::test]
    async fn rejects_incoherent_key_policy() {
        let ledger = LocalLedger::new();
        let params = CreateAccountParams {
            public_keys: vec![Keypair::generate().public_key()],
            threshold: 2,
            initial_balance: 0,
        };
        let err = ledger.create_account(&params).await.unwrap_err();
        assert!(matches!(err, LedgerError::Permanent { .. }));
    }

    #[tokio::test]
    async fn fault_hook_rejects_scripted_calls() {
        let ledger = LocalLedger::with_fault_hook(|op, seq| {
            (op == "account create" && seq == 1).then(|| LedgerError::Transient {
                reason: "node busy".into(),
            })
        });

        let err = ledger.create_account(&single_key_params()).await.unwrap_err();
        assert!(matches!(err, LedgerError::Transient { .. }));

        // The second call passes the hook untouched.
        ledger.create_account(&single_key_params()).await.unwrap();
        assert_eq!(ledger.calls(), 2);
    }
}
