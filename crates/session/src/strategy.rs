use checksums::strong::strategy::{ChecksumAlgorithmKind, ChecksumStrategy, ChecksumStrategySelector};

/// Builds the [`ChecksumStrategy`] a session needs for a given wire
/// algorithm id.
///
/// This protocol has no seed negotiation, so every strategy is constructed
/// with a seed of `0`.
#[must_use]
pub fn strategy_for(algorithm: ChecksumAlgorithmKind) -> Box<dyn ChecksumStrategy> {
    ChecksumStrategySelector::for_algorithm(algorithm, 0)
}
