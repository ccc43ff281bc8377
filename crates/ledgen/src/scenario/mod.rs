//! The concurrent recipient-provisioning pipeline.
//!
//! This module contains the core of the crate: the orchestrator that
//! sequences one-off setup, the fixed-size worker pool that claims recipient
//! indices and provisions accounts against the ledger client, and the single
//! output sink that drains completed records into the scenario's files.
//!
//! ## Structure
//!
//! - `orchestrator` - setup sequencing, pool/sink lifecycle, final result.
//! - `worker` - the per-worker claim loop.
//! - `pool` - spawning and joining the workers.
//! - `sink` - drain-and-close consumer feeding the output writers.

mod config;
mod orchestrator;
mod pool;
mod sink;
mod worker;

pub use config::ScenarioConfig;
pub use orchestrator::run_scenario;
pub use pool::DEFAULT_POOL_SIZE;
