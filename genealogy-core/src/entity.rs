//! The caller-supplied value stored in every node.

use std::fmt::Debug;
use std::hash::Hash;

/// An immutable, identifier-bearing value held by a genealogy node.
///
/// The graph builds one entity per node from its identifier and never
/// mutates it afterwards. Identifiers must be totally ordered (children and
/// parents are reported in ascending order) and hashable (the node store is
/// a hash map).
///
/// # Example
///
/// ```rust
/// use genealogy_core::Entity;
///
/// struct Virus {
///     id: u32,
/// }
///
/// impl Entity for Virus {
///     type Id = u32;
///
///     fn from_id(id: u32) -> Self {
///         Self { id }
///     }
///
///     fn id(&self) -> u32 {
///         self.id
///     }
/// }
/// ```
pub trait Entity {
    /// Identifier type naming a node.
    type Id: Ord + Hash + Clone + Debug;

    /// Construct the entity for a freshly created node.
    fn from_id(id: Self::Id) -> Self;

    /// The identifier this entity was built from.
    fn id(&self) -> Self::Id;
}
