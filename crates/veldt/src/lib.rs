//! Veldt: a spatial-indexing layer for agent-based simulations.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Veldt sub-crates. For most users, adding `veldt` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use veldt::prelude::*;
//!
//! // Entity kinds are any small Copy + Eq + Hash type.
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Agent {
//!     Sheep,
//!     Wolf,
//! }
//!
//! // A 20×20 torus with a Manhattan metric and a fixed RNG seed.
//! let mut surface = Surface::new(
//!     SurfaceConfig::new(20, 20)
//!         .wrap(WrapConfig::TORUS)
//!         .metric(Metric::Manhattan)
//!         .seed(42),
//! )
//! .unwrap();
//!
//! let sheep = surface.register(Agent::Sheep, 2.0, 2.0).unwrap();
//! let wolf = surface.register(Agent::Wolf, 18.0, 18.0).unwrap();
//!
//! // The seam makes them neighbors: 2 + 2 on each axis.
//! assert_eq!(surface.distance(sheep, wolf).unwrap(), 8.0);
//!
//! // The wolf hunts the nearest sheep.
//! let prey = surface
//!     .closest(wolf, &NeighborQuery::of(Agent::Sheep))
//!     .unwrap();
//! assert_eq!(prey, Some(sheep));
//!
//! // And closes in, wrapping across the edge.
//! surface.step_toward(wolf, surface.position(sheep).unwrap()).unwrap();
//! assert_eq!(surface.position(wolf).unwrap(), (19.0, 19.0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `veldt-core` | Entity ids, the `Kind` trait, attribute conditions |
//! | [`space`] | `veldt-space` | Wrap configuration, metrics, topology, directions |
//! | [`surface`] | `veldt-surface` | The surface index, queries, lattice bridge |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Entity ids, the `Kind` marker trait, and attribute conditions
/// (`veldt-core`).
pub use veldt_core as types;

/// Pure geometry: wrap configuration, distance metrics, the grid
/// topology, and compass directions (`veldt-space`).
pub use veldt_space as space;

/// The spatial index and its neighbor query engine (`veldt-surface`).
pub use veldt_surface as surface;

/// Common imports for typical Veldt usage.
///
/// ```rust
/// use veldt::prelude::*;
/// ```
pub mod prelude {
    pub use veldt_core::{AttrReader, CmpOp, Condition, EntityId, Kind};
    pub use veldt_space::{Direction, Metric, SpaceError, Topology, WrapConfig};
    pub use veldt_surface::{
        LatticeBridge, NeighborQuery, Surface, SurfaceConfig, SurfaceError, TieMode,
    };
}
