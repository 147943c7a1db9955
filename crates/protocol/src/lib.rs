#![deny(unsafe_code)]

//! Chunk-safe framed byte codec for rsync-style signatures and deltas.
//!
//! Every value on the wire is a **frame**: a single tag byte followed by a
//! payload whose length the tag determines. [`FrameDecoder`] is chunk-safe —
//! feeding it any prefix of a valid stream yields every complete frame
//! contained in that prefix and silently retains the unparsed tail for the
//! next call. The `encode_*` functions are push-style producers: they write
//! directly into any [`std::io::Write`] sink.
//!
//! This crate only serialises the data model defined in `rsync_core`; it has
//! no opinion about session state (see `session` for the `Differ`/`Patcher`
//! façade that drives this codec against real transports).

mod algorithm;
mod decode;
mod encode;
mod error;
mod frame;
mod header;

pub use algorithm::{from_wire_id, wire_id};
pub use decode::FrameDecoder;
pub use encode::{encode_block_hash, encode_end, encode_operation, encode_signature_header};
pub use error::ProtocolError;
pub use frame::{
    Frame, MAX_DATA_OP_LEN, TAG_BLOCK_HASH, TAG_BLOCK_OP, TAG_DATA_OP, TAG_END, TAG_SIGNATURE_HEADER,
};
pub use header::SignatureHeader;
