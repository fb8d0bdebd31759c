//! The [`Kind`] marker trait for entity classification.

use std::fmt::Debug;
use std::hash::Hash;

/// Classifies entities on a surface.
///
/// A simulation supplies a closed enumeration of its entity kinds and
/// the surface is instantiated once per simulation with that type. The
/// query engine is generic over `Kind`, so a query and its filter are
/// guaranteed at compile time to talk about the same kind space — there
/// are no string labels to mistype.
///
/// The trait is blanket-implemented for any `Copy + Eq + Hash + Debug`
/// type, so a plain derive is all that is needed:
///
/// ```
/// use veldt_core::Kind;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Critter {
///     Sheep,
///     Wolf,
/// }
///
/// fn assert_kind<K: Kind>(_k: K) {}
/// assert_kind(Critter::Sheep);
/// ```
pub trait Kind: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> Kind for T {}
