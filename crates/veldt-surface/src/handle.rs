//! Generational handle arena backing entity registrations.
//!
//! Every registration lives in a slot; unregistering bumps the slot's
//! generation and recycles it through a free list. A stale [`EntityId`]
//! therefore misses on the generation check instead of aliasing a later
//! occupant.

use crate::error::SurfaceError;
use veldt_core::{EntityId, SurfaceInstanceId};

/// Per-entity state stored in the arena.
#[derive(Debug, Clone)]
pub(crate) struct EntityRecord<K> {
    pub(crate) kind: K,
    pub(crate) x: f64,
    pub(crate) y: f64,
    /// Free-form altitude value, not used by the index itself.
    pub(crate) z: f64,
    pub(crate) color: i32,
    /// Negative priority means not drawn on the lattice.
    pub(crate) priority: i32,
    /// Result buffer of the entity's most recent neighbor query,
    /// `(true distance, id)` pairs sorted ascending.
    pub(crate) buffer: Vec<(f64, EntityId)>,
    /// Read position within `buffer`.
    pub(crate) cursor: usize,
}

impl<K> EntityRecord<K> {
    pub(crate) fn new(kind: K, x: f64, y: f64, color: i32, priority: i32) -> Self {
        Self {
            kind,
            x,
            y,
            z: 0.0,
            color,
            priority,
            buffer: Vec::new(),
            cursor: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<K> {
    generation: u32,
    record: Option<EntityRecord<K>>,
}

/// Slot storage with generation tracking and a free list.
#[derive(Debug, Clone)]
pub(crate) struct EntityArena<K> {
    surface: SurfaceInstanceId,
    slots: Vec<Slot<K>>,
    free: Vec<u32>,
    live: usize,
}

impl<K> EntityArena<K> {
    pub(crate) fn new(surface: SurfaceInstanceId) -> Self {
        Self {
            surface,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn surface_id(&self) -> SurfaceInstanceId {
        self.surface
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Store a record, reusing a freed slot when one exists.
    pub(crate) fn insert(&mut self, record: EntityRecord<K>) -> Result<EntityId, SurfaceError> {
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize].record = Some(record);
                slot
            }
            None => {
                if self.slots.len() >= u32::MAX as usize {
                    return Err(SurfaceError::CapacityExhausted);
                }
                self.slots.push(Slot {
                    generation: 0,
                    record: Some(record),
                });
                (self.slots.len() - 1) as u32
            }
        };
        self.live += 1;
        let generation = self.slots[slot as usize].generation;
        Ok(EntityId::new(self.surface, slot, generation))
    }

    pub(crate) fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_ok()
    }

    pub(crate) fn get(&self, id: EntityId) -> Result<&EntityRecord<K>, SurfaceError> {
        if id.surface() != self.surface {
            return Err(SurfaceError::ForeignSurface { id });
        }
        match self.slots.get(id.slot() as usize) {
            Some(Slot {
                generation,
                record: Some(record),
            }) if *generation == id.generation() => Ok(record),
            _ => Err(SurfaceError::NotRegistered { id }),
        }
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Result<&mut EntityRecord<K>, SurfaceError> {
        if id.surface() != self.surface {
            return Err(SurfaceError::ForeignSurface { id });
        }
        match self.slots.get_mut(id.slot() as usize) {
            Some(Slot {
                generation,
                record: Some(record),
            }) if *generation == id.generation() => Ok(record),
            _ => Err(SurfaceError::NotRegistered { id }),
        }
    }

    /// Free the slot, bumping its generation so the id goes stale.
    pub(crate) fn remove(&mut self, id: EntityId) -> Result<EntityRecord<K>, SurfaceError> {
        self.get(id)?;
        let slot = &mut self.slots[id.slot() as usize];
        let record = match slot.record.take() {
            Some(record) => record,
            None => return Err(SurfaceError::NotRegistered { id }),
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.slot());
        self.live -= 1;
        Ok(record)
    }

    /// Live ids in slot order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.record
                .as_ref()
                .map(|_| EntityId::new(self.surface, i as u32, slot.generation))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> EntityArena<char> {
        EntityArena::new(SurfaceInstanceId::next())
    }

    #[test]
    fn insert_get_remove_roundtrip() {
        let mut a = arena();
        let id = a.insert(EntityRecord::new('x', 1.5, 2.5, 0, -1)).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(id).unwrap().kind, 'x');
        let rec = a.remove(id).unwrap();
        assert_eq!(rec.x, 1.5);
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn stale_id_is_rejected_after_slot_reuse() {
        let mut a = arena();
        let old = a.insert(EntityRecord::new('x', 0.0, 0.0, 0, -1)).unwrap();
        a.remove(old).unwrap();
        let new = a.insert(EntityRecord::new('y', 0.0, 0.0, 0, -1)).unwrap();
        assert_eq!(new.slot(), old.slot());
        assert!(matches!(
            a.get(old),
            Err(SurfaceError::NotRegistered { .. })
        ));
        assert!(a.get(new).is_ok());
    }

    #[test]
    fn double_remove_is_rejected() {
        let mut a = arena();
        let id = a.insert(EntityRecord::new('x', 0.0, 0.0, 0, -1)).unwrap();
        a.remove(id).unwrap();
        assert!(matches!(
            a.remove(id),
            Err(SurfaceError::NotRegistered { .. })
        ));
    }

    #[test]
    fn foreign_id_is_rejected() {
        let mut a = arena();
        let b = arena();
        let id = a.insert(EntityRecord::new('x', 0.0, 0.0, 0, -1)).unwrap();
        assert!(matches!(
            b.get(id),
            Err(SurfaceError::ForeignSurface { .. })
        ));
    }

    #[test]
    fn ids_iterates_live_slots_in_order() {
        let mut a = arena();
        let e1 = a.insert(EntityRecord::new('a', 0.0, 0.0, 0, -1)).unwrap();
        let e2 = a.insert(EntityRecord::new('b', 0.0, 0.0, 0, -1)).unwrap();
        let e3 = a.insert(EntityRecord::new('c', 0.0, 0.0, 0, -1)).unwrap();
        a.remove(e2).unwrap();
        let ids: Vec<_> = a.ids().collect();
        assert_eq!(ids, vec![e1, e3]);
    }
}
