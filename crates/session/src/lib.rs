//! Stateful session façade over the pure delta algorithms and their wire
//! codec.
//!
//! [`Differ`] and [`Patcher`] are the two halves of a sync exchange: a
//! `Differ` turns received signature bytes into an outgoing delta stream for
//! a modified source; a `Patcher` turns a reference stream into signature
//! bytes, then replays a received delta stream to reconstruct the modified
//! stream. Both are driven incrementally — callers feed whatever chunks a
//! transport hands them, in whatever sizes it hands them, and the decoder
//! underneath tolerates arbitrary fragmentation.

mod differ;
mod error;
mod patcher;
mod strategy;

pub use differ::Differ;
pub use error::{Error, Result};
pub use patcher::Patcher;
pub use strategy::strategy_for;
