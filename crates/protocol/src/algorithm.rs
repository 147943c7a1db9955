use checksums::strong::strategy::ChecksumAlgorithmKind;

use crate::error::ProtocolError;

/// Maps a strong-hash algorithm to the single byte carried by
/// `SIGNATURE_HEADER`.
///
/// The byte is the sole version-negotiation mechanism this protocol has: a
/// decoder that does not recognise the id MUST abort with
/// [`ProtocolError::UnknownAlgorithmId`] rather than guess a digest width.
#[must_use]
pub fn wire_id(kind: ChecksumAlgorithmKind) -> u8 {
    match kind {
        ChecksumAlgorithmKind::Md4 => 0,
        ChecksumAlgorithmKind::Md5 => 1,
        ChecksumAlgorithmKind::Sha1 => 2,
        ChecksumAlgorithmKind::Sha256 => 3,
        ChecksumAlgorithmKind::Sha512 => 4,
        ChecksumAlgorithmKind::Xxh64 => 5,
        ChecksumAlgorithmKind::Xxh3 => 6,
        ChecksumAlgorithmKind::Xxh3_128 => 7,
    }
}

/// Inverse of [`wire_id`].
pub fn from_wire_id(id: u8) -> Result<ChecksumAlgorithmKind, ProtocolError> {
    match id {
        0 => Ok(ChecksumAlgorithmKind::Md4),
        1 => Ok(ChecksumAlgorithmKind::Md5),
        2 => Ok(ChecksumAlgorithmKind::Sha1),
        3 => Ok(ChecksumAlgorithmKind::Sha256),
        4 => Ok(ChecksumAlgorithmKind::Sha512),
        5 => Ok(ChecksumAlgorithmKind::Xxh64),
        6 => Ok(ChecksumAlgorithmKind::Xxh3),
        7 => Ok(ChecksumAlgorithmKind::Xxh3_128),
        other => Err(ProtocolError::UnknownAlgorithmId(other)),
    }
}
