//! Bucket-grid spatial index for agent-based simulations.
//!
//! A [`Surface`] tracks entities of a user-defined [`Kind`](veldt_core::Kind)
//! at continuous positions on a bounded, optionally wrapping 2-D grid.
//! Each entity lives in the bucket of the cell its coordinates truncate
//! to; all movement goes through the surface, so bucket membership and
//! positions never drift apart.
//!
//! On top of the index sits the neighbor query engine
//! ([`NeighborQuery`]): fixed-radius scans, incremental closest and
//! k-closest searches with selectable tie handling, and a per-entity
//! result buffer with cursor iteration. An optional [`LatticeBridge`]
//! mirrors cell colors to a display.
//!
//! ```
//! use veldt_surface::{NeighborQuery, Surface, SurfaceConfig};
//! use veldt_space::WrapConfig;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Agent { Firm }
//!
//! # fn main() -> Result<(), veldt_surface::SurfaceError> {
//! let mut surface = Surface::new(
//!     SurfaceConfig::new(10, 10).wrap(WrapConfig::TORUS),
//! )?;
//! let a = surface.register(Agent::Firm, 1.0, 1.0)?;
//! let b = surface.register(Agent::Firm, 9.0, 9.0)?;
//! // across the torus seam these are close
//! assert!(surface.distance(a, b)? < 3.0);
//! assert_eq!(surface.closest(a, &NeighborQuery::of(Agent::Firm))?, Some(b));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod checks;
pub mod config;
pub mod error;
mod handle;
pub mod lattice;
pub mod query;
pub mod surface;

pub use config::SurfaceConfig;
pub use error::SurfaceError;
pub use lattice::LatticeBridge;
pub use query::{NeighborQuery, TieMode};
pub use surface::Surface;
