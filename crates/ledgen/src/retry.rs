//! Bounded resubmission for remote calls.
//!
//! Wraps one logical operation (one account creation, one association) with
//! the pipeline's retry policy: transient rejections are resubmitted up to a
//! fixed attempt ceiling, idempotent successes short-circuit, permanent
//! failures propagate immediately. The policy is identical for every wrapped
//! operation; no backoff is applied between attempts.

use core::future::Future;

use crate::error::{Error, Result};
use crate::ledger::LedgerError;

/// Maximum submissions of one logical operation before a transient rejection
/// is treated as permanent.
pub const MAX_ATTEMPTS: u32 = 1000;

/// Outcome of a retried call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retried<T> {
    /// The network applied the request.
    Applied(T),
    /// The requested end state already held; nothing was resubmitted.
    AlreadyHeld,
}

impl<T> Retried<T> {
    /// Unwraps an applied result for operations that create fresh entities
    /// and therefore have no idempotent short-circuit.
    pub fn applied(self, op: &'static str) -> Result<T> {
        match self {
            Retried::Applied(value) => Ok(value),
            Retried::AlreadyHeld => Err(Error::Ledger {
                op,
                source: LedgerError::Permanent {
                    reason: "network reported an already-applied state for a fresh request"
                        .into(),
                },
            }),
        }
    }
}

/// Submits `call` until it succeeds, reports an idempotent success, fails
/// permanently, or exhausts [`MAX_ATTEMPTS`].
///
/// Transient rejections never escape: they resolve into a success or convert
/// to [`Error::RetriesExhausted`] once the ceiling is hit.
pub async fn submit_with_retry<T, F, Fut>(op: &'static str, mut call: F) -> Result<Retried<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = core::result::Result<T, LedgerError>>,
{
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        match call().await {
            Ok(value) => return Ok(Retried::Applied(value)),
            Err(LedgerError::AlreadyAssociated) => return Ok(Retried::AlreadyHeld),
            Err(LedgerError::Transient { reason }) => {
                if attempts >= MAX_ATTEMPTS {
                    return Err(Error::RetriesExhausted {
                        op,
                        attempts,
                        reason,
                    });
                }
                tracing::trace!(op, attempts, %reason, "transient rejection, resubmitting");
            }
            Err(source @ LedgerError::Permanent { .. }) => {
                return Err(Error::Ledger { op, source });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> LedgerError {
        LedgerError::Transient {
            reason: "node busy".into(),
        }
    }

    #[tokio::test]
    async fn transient_rejections_convert_to_permanent_at_the_ceiling() {
        let calls = AtomicU32::new(0);
        let result = submit_with_retry("account create", || {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Err::<(), _>(transient()) }
        })
        .await;

        assert_eq!(calls.load(Ordering::Relaxed), MAX_ATTEMPTS);
        match result {
            Err(Error::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, MAX_ATTEMPTS),
            other => panic!("expected retries to exhaust, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transient_rejections_resolve_into_success() {
        let calls = AtomicU32::new(0);
        let result = submit_with_retry("account create", || {
            let attempt = calls.fetch_add(1, Ordering::Relaxed) + 1;
            async move {
                if attempt <= 3 {
                    Err(transient())
                } else {
                    Ok(attempt)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, Retried::Applied(4));
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn already_associated_short_circuits_without_resubmission() {
        let calls = AtomicU32::new(0);
        let result = submit_with_retry("token associate", || {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Err::<(), _>(LedgerError::AlreadyAssociated) }
        })
        .await
        .unwrap();

        assert_eq!(result, Retried::AlreadyHeld);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn permanent_failures_propagate_immediately() {
        let calls = AtomicU32::new(0);
        let result = submit_with_retry("token associate", || {
            let attempt = calls.fetch_add(1, Ordering::Relaxed) + 1;
            async move {
                if attempt == 1 {
                    Err::<(), _>(transient())
                } else {
                    Err(LedgerError::Permanent {
                        reason: "insufficient payer balance".into(),
                    })
                }
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert!(matches!(result, Err(Error::Ledger { .. })));
    }

    #[tokio::test]
    async fn applied_rejects_unexpected_idempotent_outcomes() {
        let result = submit_with_retry("account create", || async {
            Err::<u32, _>(LedgerError::AlreadyAssociated)
        })
        .await
        .unwrap()
        .applied("account create");

        assert!(matches!(result, Err(Error::Ledger { .. })));
    }
}
