//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Shopping list entries are entities: quantity, vendor and cost change over
/// time while the id stays stable.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
