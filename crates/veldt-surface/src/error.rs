//! Error types for surface operations.

use std::fmt;
use veldt_core::EntityId;
use veldt_space::SpaceError;

/// Errors produced by [`Surface`](crate::Surface) operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The entity id does not name a live registration: its slot was
    /// freed or its generation is stale.
    NotRegistered {
        /// The rejected id.
        id: EntityId,
    },
    /// The entity id was minted by a different surface instance.
    ForeignSurface {
        /// The rejected id.
        id: EntityId,
    },
    /// A caller-supplied argument is out of contract.
    InvalidArgument {
        /// What was wrong with it.
        reason: String,
    },
    /// The handle arena has no slots left.
    CapacityExhausted,
    /// A geometric precondition failed.
    Space(SpaceError),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered { id } => {
                write!(f, "entity {id} is not registered on this surface")
            }
            Self::ForeignSurface { id } => {
                write!(f, "entity {id} belongs to a different surface")
            }
            Self::InvalidArgument { reason } => {
                write!(f, "invalid argument: {reason}")
            }
            Self::CapacityExhausted => {
                write!(f, "surface handle arena is exhausted")
            }
            Self::Space(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for SurfaceError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}
