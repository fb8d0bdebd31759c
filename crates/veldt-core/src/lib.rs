//! Core types and traits for the Veldt spatial index.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared across the Veldt workspace:
//! entity and surface identifiers, the [`Kind`] marker trait, and the
//! attribute-condition surface through which an embedding runtime
//! filters neighbor queries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attr;
pub mod id;
pub mod kind;

pub use attr::{AttrReader, CmpOp, Condition};
pub use id::{EntityId, SurfaceInstanceId};
pub use kind::Kind;
