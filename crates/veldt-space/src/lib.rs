//! Wrap-aware grid topology and distance metrics for Veldt surfaces.
//!
//! This crate is pure geometry: it knows the dimensions of a bounded
//! 2-D surface, which of its four edges wrap around, and how to measure
//! distance under a selected [`Metric`]. It holds no entity state — the
//! bucket index and the query engine live in `veldt-surface` and drive
//! everything through [`Topology`].
//!
//! # Coordinate model
//!
//! Positions are continuous `(x, y)` pairs constrained to
//! `[0, width) × [0, height)`; integer truncation maps a position to its
//! grid cell. `(0, 0)` is the bottom-left corner and north is `+y`.
//!
//! # Wrapping
//!
//! Each of the four sides wraps independently (see [`WrapConfig`]).
//! Movement honors single-sided wrap; distance shortcuts around an axis
//! only when both of its sides wrap; interpolation refuses mixed wrap
//! on an axis outright.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod geometry;
pub mod metric;
pub mod wrap;

pub use direction::Direction;
pub use error::SpaceError;
pub use geometry::{BoundingBox, Topology};
pub use metric::Metric;
pub use wrap::WrapConfig;
