//! The spatial index: a bucket grid over a wrap-aware topology.

use std::cell::Cell;

use indexmap::IndexSet;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use veldt_core::{EntityId, Kind};
use veldt_space::{Direction, Metric, SpaceError, Topology, WrapConfig};

use crate::config::SurfaceConfig;
use crate::error::SurfaceError;
use crate::handle::{EntityArena, EntityRecord};
use crate::lattice::LatticeState;

/// A bounded 2-D surface indexing entities of kind `K` by grid cell.
///
/// Entities occupy continuous positions; each lives in exactly one
/// bucket, the cell its coordinates truncate to. All mutation goes
/// through the surface, so bucket membership and stored coordinates
/// never drift apart, and a failed operation leaves the index
/// untouched.
///
/// Randomized operations (random tie modes, random placement, shuffled
/// scans) draw from a seeded [`ChaCha8Rng`] owned by the surface;
/// everything else is deterministic and never advances it.
#[derive(Debug)]
pub struct Surface<K: Kind> {
    pub(crate) topology: Topology,
    pub(crate) metric: Metric,
    /// Cached `max_distance`, cleared on metric change.
    pub(crate) max_dist: Cell<Option<f64>>,
    /// One bucket per cell, x-major. Insertion order is meaningful:
    /// stable queries report the earliest-inserted of tied candidates.
    pub(crate) buckets: Vec<IndexSet<EntityId>>,
    pub(crate) arena: EntityArena<K>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) lattice: Option<LatticeState>,
}

impl<K: Kind> Surface<K> {
    /// Build a surface from a configuration.
    pub fn new(config: SurfaceConfig) -> Result<Self, SurfaceError> {
        let topology = Topology::new(config.width, config.height, config.wrap)?;
        let buckets = vec![IndexSet::new(); topology.cell_count()];
        Ok(Self {
            topology,
            metric: config.metric,
            max_dist: Cell::new(None),
            buckets,
            arena: EntityArena::new(veldt_core::SurfaceInstanceId::next()),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            lattice: None,
        })
    }

    // ── Geometry accessors ──────────────────────────────────────

    /// Number of cells along x.
    pub fn width(&self) -> u32 {
        self.topology.width()
    }

    /// Number of cells along y.
    pub fn height(&self) -> u32 {
        self.topology.height()
    }

    /// The wrap configuration.
    pub fn wrap(&self) -> WrapConfig {
        self.topology.wrap()
    }

    /// The active distance metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Switch the distance metric. This is reconfiguration: it clears
    /// the cached maximum distance and affects all later queries.
    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
        self.max_dist.set(None);
    }

    /// The underlying topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub(crate) fn cell_index(&self, cx: u32, cy: u32) -> usize {
        cx as usize * self.topology.height() as usize + cy as usize
    }

    pub(crate) fn cell_of(x: f64, y: f64) -> (u32, u32) {
        (x as u32, y as u32)
    }

    pub(crate) fn bucket(&self, cx: u32, cy: u32) -> &IndexSet<EntityId> {
        &self.buckets[self.cell_index(cx, cy)]
    }

    fn out_of_range(&self, x: f64, y: f64) -> SurfaceError {
        SurfaceError::Space(SpaceError::OutOfRange {
            x,
            y,
            bounds: self.topology.bounds(),
        })
    }

    /// Wrap-correct a position, or fail if it crossed a hard border.
    pub fn resolve_position(&self, x: f64, y: f64) -> Result<(f64, f64), SurfaceError> {
        self.topology
            .wrap_position(x, y)
            .ok_or_else(|| self.out_of_range(x, y))
    }

    // ── Registration ────────────────────────────────────────────

    /// Register an entity at `(x, y)` with no lattice presence
    /// (color 0, priority -1).
    ///
    /// The position is wrap-corrected first; crossing a non-wrapping
    /// edge is an error.
    pub fn register(&mut self, kind: K, x: f64, y: f64) -> Result<EntityId, SurfaceError> {
        self.register_with(kind, x, y, 0, -1)
    }

    /// Register an entity with an explicit lattice color and priority.
    pub fn register_with(
        &mut self,
        kind: K,
        x: f64,
        y: f64,
        color: i32,
        priority: i32,
    ) -> Result<EntityId, SurfaceError> {
        let (x, y) = self.resolve_position(x, y)?;
        let id = self
            .arena
            .insert(EntityRecord::new(kind, x, y, color, priority))?;
        let (cx, cy) = Self::cell_of(x, y);
        let idx = self.cell_index(cx, cy);
        self.buckets[idx].insert(id);
        self.notify_cell(cx, cy);
        Ok(id)
    }

    /// Register an entity on the shortest path between two points.
    /// `rel` is the relative position from `a` (negative means the
    /// midpoint); axes with mixed wrap sides are rejected.
    pub fn register_between(
        &mut self,
        kind: K,
        a: (f64, f64),
        b: (f64, f64),
        rel: f64,
    ) -> Result<EntityId, SurfaceError> {
        let a = self.resolve_position(a.0, a.1)?;
        let b = self.resolve_position(b.0, b.1)?;
        let (x, y) = self.topology.position_between(a, b, rel)?;
        self.register(kind, x, y)
    }

    /// Register an entity at a uniformly random position, drawing the
    /// surface RNG. With `snap_to_grid` the position is an integer cell
    /// corner.
    pub fn register_random(&mut self, kind: K, snap_to_grid: bool) -> Result<EntityId, SurfaceError> {
        let (x, y) = if snap_to_grid {
            let x = self.rng.random_range(0..self.topology.width()) as f64;
            let y = self.rng.random_range(0..self.topology.height()) as f64;
            (x, y)
        } else {
            let x = self.rng.random_range(0.0..self.topology.width() as f64);
            let y = self.rng.random_range(0.0..self.topology.height() as f64);
            (x, y)
        };
        self.register(kind, x, y)
    }

    /// Register `n` entities on `n` distinct random cells.
    ///
    /// Fails with [`SurfaceError::InvalidArgument`] if `n` exceeds the
    /// number of cells.
    pub fn scatter(&mut self, kind: K, n: usize) -> Result<Vec<EntityId>, SurfaceError> {
        let cells = self.topology.cell_count();
        if n > cells {
            return Err(SurfaceError::InvalidArgument {
                reason: format!("cannot scatter {n} entities on {cells} cells"),
            });
        }
        let height = self.topology.height() as usize;
        let mut order: Vec<usize> = (0..cells).collect();
        order.shuffle(&mut self.rng);
        order.truncate(n);
        let mut ids = Vec::with_capacity(n);
        for idx in order {
            let x = (idx / height) as f64;
            let y = (idx % height) as f64;
            ids.push(self.register(kind, x, y)?);
        }
        Ok(ids)
    }

    /// Register one entity per cell, row by row from the bottom.
    pub fn populate(&mut self, kind: K) -> Result<Vec<EntityId>, SurfaceError> {
        let mut ids = Vec::with_capacity(self.topology.cell_count());
        for y in 0..self.topology.height() {
            for x in 0..self.topology.width() {
                ids.push(self.register(kind, x as f64, y as f64)?);
            }
        }
        Ok(ids)
    }

    /// Remove an entity from the surface. Its id goes stale; using it
    /// afterwards yields [`SurfaceError::NotRegistered`].
    pub fn unregister(&mut self, id: EntityId) -> Result<(), SurfaceError> {
        let record = self.arena.remove(id)?;
        let (cx, cy) = Self::cell_of(record.x, record.y);
        let idx = self.cell_index(cx, cy);
        self.buckets[idx].shift_remove(&id);
        self.notify_cell(cx, cy);
        Ok(())
    }

    // ── Movement ────────────────────────────────────────────────

    /// Move an entity to `(x, y)`, wrap-corrected.
    ///
    /// Remove-then-reinsert: the entity is never in two buckets, and a
    /// failed move leaves it exactly where it was.
    pub fn change_position(&mut self, id: EntityId, x: f64, y: f64) -> Result<(), SurfaceError> {
        let (ox, oy) = {
            let record = self.arena.get(id)?;
            (record.x, record.y)
        };
        let (x, y) = self.resolve_position(x, y)?;
        let (old_cx, old_cy) = Self::cell_of(ox, oy);
        let (new_cx, new_cy) = Self::cell_of(x, y);
        if (old_cx, old_cy) != (new_cx, new_cy) {
            let old_idx = self.cell_index(old_cx, old_cy);
            self.buckets[old_idx].shift_remove(&id);
            let new_idx = self.cell_index(new_cx, new_cy);
            self.buckets[new_idx].insert(id);
        }
        let record = self.arena.get_mut(id)?;
        record.x = x;
        record.y = y;
        if (old_cx, old_cy) != (new_cx, new_cy) {
            self.notify_cell(old_cx, old_cy);
            self.notify_cell(new_cx, new_cy);
        }
        Ok(())
    }

    /// Step one unit in `dir`, wrapping across wrapping edges.
    ///
    /// Returns `Ok(false)` without moving when the step would cross a
    /// non-wrapping edge.
    pub fn step(&mut self, id: EntityId, dir: Direction) -> Result<bool, SurfaceError> {
        let (x, y) = self.position(id)?;
        match self.topology.step(x, y, dir) {
            Some((nx, ny)) => {
                self.change_position(id, nx, ny)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn axis_sign(from: f64, to: f64, n: f64, full_wrap: bool) -> i8 {
        let mut d = to - from;
        if full_wrap {
            let half = n / 2.0;
            if d > half {
                d -= n;
            } else if d < -half {
                d += n;
            }
        }
        // below half a step, moving a full unit would overshoot
        if d >= 0.5 {
            1
        } else if d <= -0.5 {
            -1
        } else {
            0
        }
    }

    /// Take one greedy step toward `target`, diagonal when both axes
    /// are off. On a fully wrapped axis the step may go through the
    /// edge when that way is shorter.
    ///
    /// Returns `Ok(false)` when already close enough on both axes or
    /// when the chosen step is blocked by a hard border.
    pub fn step_toward(
        &mut self,
        id: EntityId,
        target: (f64, f64),
    ) -> Result<bool, SurfaceError> {
        let (x, y) = self.position(id)?;
        let (tx, ty) = self.resolve_position(target.0, target.1)?;
        let wrap = self.topology.wrap();
        let sx = Self::axis_sign(x, tx, self.topology.width() as f64, wrap.full_x());
        let sy = Self::axis_sign(y, ty, self.topology.height() as f64, wrap.full_y());
        let dir = Direction::from_signs(sx, sy);
        if dir == Direction::Stay {
            return Ok(false);
        }
        self.step(id, dir)
    }

    /// Directions the entity can step in without crossing a hard
    /// border, in the fixed order of [`Direction::ALL`].
    pub fn possible_moves(
        &self,
        id: EntityId,
        include_stay: bool,
    ) -> Result<SmallVec<[Direction; 9]>, SurfaceError> {
        let (x, y) = self.position(id)?;
        let mut out = SmallVec::new();
        for dir in Direction::ALL {
            if dir == Direction::Stay && !include_stay {
                continue;
            }
            if self.topology.step(x, y, dir).is_some() {
                out.push(dir);
            }
        }
        Ok(out)
    }

    // ── Entity accessors ────────────────────────────────────────

    /// Whether `id` names a live registration on this surface.
    pub fn contains(&self, id: EntityId) -> bool {
        self.arena.contains(id)
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether no entities are registered.
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Current position of an entity.
    pub fn position(&self, id: EntityId) -> Result<(f64, f64), SurfaceError> {
        let record = self.arena.get(id)?;
        Ok((record.x, record.y))
    }

    /// The entity's kind.
    pub fn kind(&self, id: EntityId) -> Result<K, SurfaceError> {
        Ok(self.arena.get(id)?.kind)
    }

    /// The entity's altitude value. Not interpreted by the index.
    pub fn z(&self, id: EntityId) -> Result<f64, SurfaceError> {
        Ok(self.arena.get(id)?.z)
    }

    /// Set the entity's altitude value.
    pub fn set_z(&mut self, id: EntityId, z: f64) -> Result<(), SurfaceError> {
        self.arena.get_mut(id)?.z = z;
        Ok(())
    }

    /// Live entity ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.arena.ids()
    }

    // ── Distances ───────────────────────────────────────────────

    /// Wrap-aware distance between two registered entities.
    pub fn distance(&self, a: EntityId, b: EntityId) -> Result<f64, SurfaceError> {
        let pa = self.position(a)?;
        let pb = self.position(b)?;
        Ok(self.topology.distance(self.metric, pa, pb))
    }

    /// Wrap-aware distance from an entity to a point.
    pub fn distance_to(&self, id: EntityId, x: f64, y: f64) -> Result<f64, SurfaceError> {
        let p = self.position(id)?;
        let q = self.resolve_position(x, y)?;
        Ok(self.topology.distance(self.metric, p, q))
    }

    /// Pseudo-distance between two registered entities. Preserves the
    /// ordering of true distances at lower cost.
    pub fn pseudo_distance(&self, a: EntityId, b: EntityId) -> Result<f64, SurfaceError> {
        let pa = self.position(a)?;
        let pb = self.position(b)?;
        Ok(self.topology.pseudo_distance(self.metric, pa, pb))
    }

    /// Wrap-aware distance between two points.
    pub fn distance_between(
        &self,
        p1: (f64, f64),
        p2: (f64, f64),
    ) -> Result<f64, SurfaceError> {
        let p1 = self.resolve_position(p1.0, p1.1)?;
        let p2 = self.resolve_position(p2.0, p2.1)?;
        Ok(self.topology.distance(self.metric, p1, p2))
    }

    /// Largest possible distance on this surface under the active
    /// metric. Computed once and cached until the metric changes.
    pub fn max_distance(&self) -> f64 {
        if let Some(d) = self.max_dist.get() {
            return d;
        }
        let d = self.topology.max_distance(self.metric);
        self.max_dist.set(Some(d));
        d
    }

    /// A distance as a fraction of the surface maximum.
    pub fn relative_distance(&self, d: f64) -> f64 {
        d / self.max_distance()
    }

    /// A fraction of the surface maximum as an absolute distance.
    pub fn absolute_distance(&self, rel: f64) -> f64 {
        rel * self.max_distance()
    }

    // ── Cell lookups ────────────────────────────────────────────

    fn at_position(
        &self,
        kind: K,
        x: f64,
        y: f64,
    ) -> Result<Vec<EntityId>, SurfaceError> {
        let (x, y) = self.resolve_position(x, y)?;
        let (cx, cy) = Self::cell_of(x, y);
        let mut out = Vec::new();
        for &id in self.bucket(cx, cy) {
            let record = self.arena.get(id)?;
            if record.kind == kind && record.x == x && record.y == y {
                out.push(id);
            }
        }
        Ok(out)
    }

    /// Number of entities of `kind` at exactly `(x, y)`.
    pub fn count_at(&self, kind: K, x: f64, y: f64) -> Result<usize, SurfaceError> {
        Ok(self.at_position(kind, x, y)?.len())
    }

    /// The sole entity of `kind` at exactly `(x, y)`, if any.
    ///
    /// More than one match is [`SurfaceError::InvalidArgument`]; use
    /// [`Self::pick_at`] when several can share a position.
    pub fn find_at(&self, kind: K, x: f64, y: f64) -> Result<Option<EntityId>, SurfaceError> {
        let matches = self.at_position(kind, x, y)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            n => Err(SurfaceError::InvalidArgument {
                reason: format!("{n} entities of the requested kind at ({x}, {y})"),
            }),
        }
    }

    /// A uniformly random entity of `kind` at exactly `(x, y)`, if
    /// any. Draws the surface RNG only when there are matches.
    pub fn pick_at(&mut self, kind: K, x: f64, y: f64) -> Result<Option<EntityId>, SurfaceError> {
        let matches = self.at_position(kind, x, y)?;
        if matches.is_empty() {
            return Ok(None);
        }
        let i = self.rng.random_range(0..matches.len());
        Ok(Some(matches[i]))
    }

    /// The first entity of `kind` in the cell one step from `id` in
    /// `dir` (the entity's own cell for [`Direction::Stay`], excluding
    /// itself). `None` when the step is blocked or the cell has no
    /// match.
    pub fn find_toward(
        &self,
        id: EntityId,
        dir: Direction,
        kind: K,
    ) -> Result<Option<EntityId>, SurfaceError> {
        let (x, y) = self.position(id)?;
        let (cx, cy) = Self::cell_of(x, y);
        let (dx, dy) = dir.offset();
        let target = match self
            .topology
            .wrap_cell(cx as i64 + dx as i64, cy as i64 + dy as i64)
        {
            Some(cell) => cell,
            None => return Ok(None),
        };
        for &other in self.bucket(target.0, target.1) {
            if other == id {
                continue;
            }
            if self.arena.get(other)?.kind == kind {
                return Ok(Some(other));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::assert_index_consistent;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Animal {
        Sheep,
        Wolf,
    }

    fn torus(w: u32, h: u32) -> Surface<Animal> {
        Surface::new(SurfaceConfig::new(w, h).wrap(WrapConfig::TORUS)).unwrap()
    }

    fn bounded(w: u32, h: u32) -> Surface<Animal> {
        Surface::new(SurfaceConfig::new(w, h)).unwrap()
    }

    #[test]
    fn register_places_entity_in_its_cell() {
        let mut s = bounded(10, 10);
        let id = s.register(Animal::Sheep, 3.7, 4.2).unwrap();
        assert_eq!(s.position(id).unwrap(), (3.7, 4.2));
        assert_eq!(s.kind(id).unwrap(), Animal::Sheep);
        assert!(s.bucket(3, 4).contains(&id));
        assert_eq!(s.len(), 1);
        assert_index_consistent(&s);
    }

    #[test]
    fn register_wrap_corrects_on_torus() {
        let mut s = torus(10, 10);
        let id = s.register(Animal::Sheep, -1.5, 11.0).unwrap();
        assert_eq!(s.position(id).unwrap(), (8.5, 1.0));
        assert_index_consistent(&s);
    }

    #[test]
    fn register_out_of_range_fails_on_bounded() {
        let mut s = bounded(10, 10);
        assert!(matches!(
            s.register(Animal::Sheep, -0.5, 2.0),
            Err(SurfaceError::Space(SpaceError::OutOfRange { .. }))
        ));
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn unregister_makes_id_stale_and_slot_reusable() {
        let mut s = bounded(10, 10);
        let id = s.register(Animal::Sheep, 1.0, 1.0).unwrap();
        s.unregister(id).unwrap();
        assert!(!s.contains(id));
        assert!(matches!(
            s.position(id),
            Err(SurfaceError::NotRegistered { .. })
        ));
        let id2 = s.register(Animal::Wolf, 1.0, 1.0).unwrap();
        assert_ne!(id, id2);
        assert!(!s.contains(id));
        assert_index_consistent(&s);
    }

    #[test]
    fn change_position_moves_between_buckets() {
        let mut s = bounded(10, 10);
        let id = s.register(Animal::Sheep, 1.5, 1.5).unwrap();
        s.change_position(id, 7.25, 2.75).unwrap();
        assert_eq!(s.position(id).unwrap(), (7.25, 2.75));
        assert!(!s.bucket(1, 1).contains(&id));
        assert!(s.bucket(7, 2).contains(&id));
        assert_index_consistent(&s);
    }

    #[test]
    fn failed_move_leaves_entity_in_place() {
        let mut s = bounded(10, 10);
        let id = s.register(Animal::Sheep, 1.5, 1.5).unwrap();
        assert!(s.change_position(id, 12.0, 1.0).is_err());
        assert_eq!(s.position(id).unwrap(), (1.5, 1.5));
        assert!(s.bucket(1, 1).contains(&id));
        assert_index_consistent(&s);
    }

    #[test]
    fn step_wraps_on_torus_and_blocks_on_bounded() {
        let mut t = torus(5, 5);
        let id = t.register(Animal::Sheep, 0.5, 4.5).unwrap();
        assert!(t.step(id, Direction::North).unwrap());
        assert_eq!(t.position(id).unwrap(), (0.5, 0.5));

        let mut b = bounded(5, 5);
        let id = b.register(Animal::Sheep, 0.5, 4.5).unwrap();
        assert!(!b.step(id, Direction::North).unwrap());
        assert_eq!(b.position(id).unwrap(), (0.5, 4.5));
    }

    #[test]
    fn step_toward_moves_diagonally_first() {
        let mut s = bounded(10, 10);
        let id = s.register(Animal::Sheep, 1.0, 1.0).unwrap();
        assert!(s.step_toward(id, (4.0, 3.0)).unwrap());
        assert_eq!(s.position(id).unwrap(), (2.0, 2.0));
        assert!(s.step_toward(id, (4.0, 3.0)).unwrap());
        assert_eq!(s.position(id).unwrap(), (3.0, 3.0));
        assert!(s.step_toward(id, (4.0, 3.0)).unwrap());
        assert_eq!(s.position(id).unwrap(), (4.0, 3.0));
        assert!(!s.step_toward(id, (4.0, 3.0)).unwrap());
    }

    #[test]
    fn step_toward_goes_through_torus_edge() {
        let mut s = torus(10, 10);
        let id = s.register(Animal::Sheep, 1.0, 5.0).unwrap();
        assert!(s.step_toward(id, (9.0, 5.0)).unwrap());
        assert_eq!(s.position(id).unwrap(), (0.0, 5.0));
    }

    #[test]
    fn possible_moves_in_corner() {
        let mut s = bounded(5, 5);
        let id = s.register(Animal::Sheep, 0.5, 0.5).unwrap();
        let moves = s.possible_moves(id, false).unwrap();
        assert_eq!(moves.len(), 3);
        assert!(moves.contains(&Direction::North));
        assert!(moves.contains(&Direction::NorthEast));
        assert!(moves.contains(&Direction::East));
        let with_stay = s.possible_moves(id, true).unwrap();
        assert_eq!(with_stay.len(), 4);

        let mut t = torus(5, 5);
        let id = t.register(Animal::Sheep, 0.5, 0.5).unwrap();
        assert_eq!(t.possible_moves(id, false).unwrap().len(), 8);
    }

    #[test]
    fn scatter_uses_distinct_cells() {
        let mut s = bounded(4, 4);
        let ids = s.scatter(Animal::Sheep, 16).unwrap();
        assert_eq!(ids.len(), 16);
        let mut cells: Vec<(u32, u32)> = ids
            .iter()
            .map(|&id| {
                let (x, y) = s.position(id).unwrap();
                Surface::<Animal>::cell_of(x, y)
            })
            .collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 16);
        assert!(s.scatter(Animal::Wolf, 17).is_err());
        assert_index_consistent(&s);
    }

    #[test]
    fn populate_fills_every_cell() {
        let mut s = bounded(3, 2);
        let ids = s.populate(Animal::Sheep).unwrap();
        assert_eq!(ids.len(), 6);
        assert_eq!(s.position(ids[0]).unwrap(), (0.0, 0.0));
        assert_eq!(s.position(ids[1]).unwrap(), (1.0, 0.0));
        assert_eq!(s.position(ids[5]).unwrap(), (2.0, 1.0));
        assert_index_consistent(&s);
    }

    #[test]
    fn register_random_is_seed_deterministic() {
        let mut a =
            Surface::<Animal>::new(SurfaceConfig::new(10, 10).seed(7)).unwrap();
        let mut b =
            Surface::<Animal>::new(SurfaceConfig::new(10, 10).seed(7)).unwrap();
        for _ in 0..5 {
            let ia = a.register_random(Animal::Sheep, false).unwrap();
            let ib = b.register_random(Animal::Sheep, false).unwrap();
            assert_eq!(a.position(ia).unwrap(), b.position(ib).unwrap());
        }
    }

    #[test]
    fn register_between_interpolates() {
        let mut s = bounded(10, 10);
        let id = s
            .register_between(Animal::Sheep, (0.0, 0.0), (4.0, 2.0), -1.0)
            .unwrap();
        assert_eq!(s.position(id).unwrap(), (2.0, 1.0));
    }

    #[test]
    fn distances_follow_the_active_metric() {
        let mut s = torus(10, 10);
        let a = s.register(Animal::Sheep, 0.0, 0.0).unwrap();
        let b = s.register(Animal::Wolf, 9.0, 9.0).unwrap();
        let d = s.distance(a, b).unwrap();
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
        s.set_metric(Metric::Manhattan);
        assert_eq!(s.distance(a, b).unwrap(), 2.0);
    }

    #[test]
    fn max_distance_cache_tracks_metric() {
        let s = bounded(3, 4);
        assert!((s.max_distance() - 5.0).abs() < 1e-12);
        let mut s = s;
        s.set_metric(Metric::Manhattan);
        assert_eq!(s.max_distance(), 7.0);
        assert_eq!(s.relative_distance(3.5), 0.5);
        assert_eq!(s.absolute_distance(0.5), 3.5);
    }

    #[test]
    fn exact_position_lookups() {
        let mut s = bounded(10, 10);
        let a = s.register(Animal::Sheep, 2.0, 2.0).unwrap();
        let _b = s.register(Animal::Sheep, 2.5, 2.5).unwrap();
        assert_eq!(s.count_at(Animal::Sheep, 2.0, 2.0).unwrap(), 1);
        assert_eq!(s.count_at(Animal::Wolf, 2.0, 2.0).unwrap(), 0);
        assert_eq!(s.find_at(Animal::Sheep, 2.0, 2.0).unwrap(), Some(a));
        assert_eq!(s.find_at(Animal::Sheep, 3.0, 3.0).unwrap(), None);

        let c = s.register(Animal::Sheep, 2.0, 2.0).unwrap();
        assert_eq!(s.count_at(Animal::Sheep, 2.0, 2.0).unwrap(), 2);
        assert!(s.find_at(Animal::Sheep, 2.0, 2.0).is_err());
        let picked = s.pick_at(Animal::Sheep, 2.0, 2.0).unwrap();
        assert!(picked == Some(a) || picked == Some(c));
    }

    #[test]
    fn find_toward_looks_one_cell_over() {
        let mut s = bounded(10, 10);
        let a = s.register(Animal::Sheep, 2.5, 2.5).unwrap();
        let b = s.register(Animal::Wolf, 3.5, 2.5).unwrap();
        assert_eq!(s.find_toward(a, Direction::East, Animal::Wolf).unwrap(), Some(b));
        assert_eq!(s.find_toward(a, Direction::West, Animal::Wolf).unwrap(), None);
        // Stay looks in the own cell, excluding the entity itself
        assert_eq!(s.find_toward(a, Direction::Stay, Animal::Sheep).unwrap(), None);
        let c = s.register(Animal::Sheep, 2.25, 2.25).unwrap();
        assert_eq!(s.find_toward(a, Direction::Stay, Animal::Sheep).unwrap(), Some(c));
    }
}
