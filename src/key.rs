use core::fmt::Debug;
use core::hash::Hash;

/// Identifier of a revealable.
///
/// Keys must be unique per [`RevealState`](crate::RevealState) and are compared structurally.
/// Enums and strings make good keys. The same key is used to register an element and to reveal
/// it.
///
/// Implemented for every type that satisfies the bounds.
pub trait Key: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Key for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
