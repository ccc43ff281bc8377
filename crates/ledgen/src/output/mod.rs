//! Durable CSV outputs.
//!
//! Two files record a generated scenario: the secrets ledger, holding ids,
//! balances, and key material for every participant account, and the
//! distribution plan consumed by the downstream transfer tool. Both writers
//! flush after every record so a crash mid-run leaves a usable file pair.

mod distribution;
mod secrets;

pub use distribution::DistributionFile;
pub use secrets::SecretsFile;
