#![doc = include_str!("../README.md")]

mod amount;
mod error;
mod keys;
pub mod ledger;
pub mod output;
mod retry;
pub mod scenario;
mod types;

pub use crate::amount::*;
pub use crate::error::*;
pub use crate::keys::*;
pub use crate::retry::*;
pub use crate::types::*;
