//! Error types for scenario generation.
//!
//! This module defines the central `Error` enum, which captures every
//! reportable failure in the provisioning pipeline. Remote-call failures
//! arrive already classified as [`LedgerError`] (see [`crate::ledger`]); this
//! enum records where they struck and what they abort.
//!
//! ## Error cases
//! - `Ledger`: a remote call failed permanently.
//! - `RetriesExhausted`: a transient rejection persisted through every
//!   allowed attempt and was converted to a permanent failure.
//! - `Channel`: an internal send/receive failure between workers and the sink.
//! - `Task`: a spawned worker or sink task aborted without reporting a result.
//! - `Csv` / `Io`: writing one of the output files failed. Output failures
//!   are always fatal to the run, since the files are the scenario's sole
//!   durable record of generated key material.

use crate::ledger::LedgerError;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for scenario generation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A remote call failed permanently.
    #[error("{op} failed: {source}")]
    Ledger {
        op: &'static str,
        #[source]
        source: LedgerError,
    },

    /// A remote call was rejected as transient on every allowed attempt.
    #[error("{op} rejected {attempts} times, giving up: {reason}")]
    RetriesExhausted {
        op: &'static str,
        attempts: u32,
        reason: String,
    },

    /// Internal channel failure between workers and the output sink.
    #[error("channel error: {context}")]
    Channel { context: String },

    /// A spawned task aborted without producing a result.
    #[error("task failed: {context}")]
    Task { context: String },

    /// Formatting or writing a CSV record failed.
    #[error("output write failed")]
    Csv(#[from] csv::Error),

    /// An output file could not be created, written, or flushed.
    #[error("output i/o failed")]
    Io(#[from] std::io::Error),
}
