//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A value object has no identity of its own. Two parties with the same name,
/// address and state are the same party as far as an invoice is concerned; two
/// line items with identical fields are indistinguishable apart from their
/// position in the item list.
///
/// Amounts are `f64`, so implementors only need `PartialEq`.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
