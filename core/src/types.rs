//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one aging step for every resident.
pub type Tick = u64;

/// A stable, unique resident identifier (hyphenated UUID text).
pub type ResidentId = String;

/// A catalog item identifier, e.g. `"apple"`.
pub type ItemId = String;

/// Whole coins in the shared money pool. Never negative.
pub type Money = u64;
