#![deny(unsafe_code)]

//! Pure, in-memory rsync-style signature, delta, and patch algorithms.
//!
//! This crate has no notion of wire framing or sessions: given a reference
//! stream it builds a [`BlockHash`] signature; given a source stream and a
//! signature it produces an [`Operation`] delta program; given a reference
//! stream and a delta program it reconstructs the modified stream. Callers
//! that need to carry these values across an unreliable transport compose
//! this crate with `protocol` (framing) and `session` (the stateful
//! `Differ`/`Patcher` façade).
//!
//! # Invariants
//!
//! - Neither the whole reference stream nor the whole modified stream is
//!   ever buffered in memory; reads happen in bounded `block_size` (or
//!   smaller) chunks.
//! - [`block_size::block_size_for_length`] is the single canonical formula
//!   both the signature side and the delta side must use to agree on a
//!   block size.
//! - Weak-hash collisions are only resolved by a strong-hash comparison;
//!   ties among multiple weak matches are broken by the insertion order of
//!   the signature's `BlockHash` records.

mod block_size;
mod differ;
mod error;
mod patcher;
mod signature;
mod types;

pub use block_size::{MAX_BLOCK_SIZE, MIN_BLOCK_SIZE, block_size_for_length};
pub use differ::{MAX_LITERAL_LEN, generate_delta};
pub use error::{CoreError, Result};
pub use patcher::{PatchCursor, apply_delta};
pub use signature::generate_signature;
pub use types::{BlockHash, Operation};
