//! Strongly-typed entity and surface identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`SurfaceInstanceId`] allocation.
static SURFACE_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a `Surface` object.
///
/// Allocated from a monotonic atomic counter via
/// [`SurfaceInstanceId::next`]. Two distinct surface instances always
/// have different IDs, even if they were built from identical
/// configurations. Every [`EntityId`] embeds the id of the surface that
/// minted it, so a handle presented to the wrong surface is rejected
/// instead of silently resolving to an unrelated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceInstanceId(u64);

impl SurfaceInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns an ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(SURFACE_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SurfaceInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable, generation-scoped handle to a registered entity.
///
/// Entities live in a slot arena owned by their surface. An `EntityId`
/// names `(surface, slot, generation)`; the generation is bumped when a
/// slot is freed, so an ID held across an unregister can be detected as
/// stale in O(1) without any pointer chasing.
///
/// IDs are minted by `Surface::register` and remain valid until the
/// entity unregisters. They are plain `Copy` data and may be stored
/// freely by the embedding runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    surface: SurfaceInstanceId,
    slot: u32,
    generation: u32,
}

impl EntityId {
    /// Assemble an ID from its parts.
    ///
    /// Normally only a surface mints IDs; this constructor exists so
    /// the arena crate can do so across the crate boundary.
    pub fn new(surface: SurfaceInstanceId, slot: u32, generation: u32) -> Self {
        Self {
            surface,
            slot,
            generation,
        }
    }

    /// The surface instance that minted this ID.
    pub fn surface(&self) -> SurfaceInstanceId {
        self.surface
    }

    /// Index of the entity's slot in the handle arena.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation of the slot when this ID was minted.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}v{}", self.surface, self.slot, self.generation)
    }
}
