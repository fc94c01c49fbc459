//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A vendor offer or a set of list totals has no identity of its own; two
/// instances with the same fields are interchangeable. To "modify" a value
/// object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
