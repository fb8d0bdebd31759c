//! Neighbor queries: fixed-radius scans, incremental closest search,
//! and the per-entity result buffer.
//!
//! All queries write the origin entity's result buffer (ascending true
//! distance) and rewind its cursor; the buffer persists until the
//! entity's next query. Candidate cells come from wrap-folded bounding
//! boxes, deduplicated by canonical cell so a box that overlaps itself
//! around a wrapped axis never yields the same entity twice.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use veldt_core::{AttrReader, Condition, EntityId, Kind};
use veldt_space::BoundingBox;

use crate::error::SurfaceError;
use crate::surface::Surface;

/// How equidistant candidates are ordered in query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieMode {
    /// Deterministic: candidates stay in discovery order. Never draws
    /// the surface RNG.
    #[default]
    Stable,
    /// Runs of equal distance are shuffled; distinct distances keep
    /// their order.
    RandomWithinTies,
    /// The whole result is shuffled, discarding distance order.
    RandomAll,
}

/// Parameters of a neighbor search, built by chaining.
///
/// ```
/// use veldt_surface::{NeighborQuery, TieMode};
///
/// let query = NeighborQuery::of('a').radius(5.0).tie(TieMode::RandomWithinTies);
/// # let _ = query;
/// ```
#[derive(Clone, Copy)]
pub struct NeighborQuery<'a, K: Kind> {
    pub(crate) kind: K,
    /// `None` means unbounded: the surface maximum distance.
    pub(crate) radius: Option<f64>,
    pub(crate) tie: TieMode,
    pub(crate) filter: Option<(&'a dyn AttrReader, Condition)>,
}

impl<'a, K: Kind> NeighborQuery<'a, K> {
    /// Search for entities of `kind`, unbounded, stable, unfiltered.
    pub fn of(kind: K) -> Self {
        Self {
            kind,
            radius: None,
            tie: TieMode::Stable,
            filter: None,
        }
    }

    /// Bound the search radius. A negative radius means unbounded.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = (radius >= 0.0).then_some(radius);
        self
    }

    /// Select the tie handling mode.
    pub fn tie(mut self, tie: TieMode) -> Self {
        self.tie = tie;
        self
    }

    /// Keep only candidates whose attribute satisfies `condition`,
    /// read through `reader`.
    pub fn filter(mut self, reader: &'a dyn AttrReader, condition: Condition) -> Self {
        self.filter = Some((reader, condition));
        self
    }
}

/// Call `f` for every cell in `new` that is not in `old`.
fn belt_cells(new: BoundingBox, old: Option<BoundingBox>, mut f: impl FnMut(i64, i64)) {
    match old {
        None => {
            for cy in new.bottom..=new.top {
                for cx in new.left..=new.right {
                    f(cx, cy);
                }
            }
        }
        Some(old) => {
            for cy in new.bottom..=new.top {
                if cy < old.bottom || cy > old.top {
                    for cx in new.left..=new.right {
                        f(cx, cy);
                    }
                } else {
                    for cx in new.left..old.left {
                        f(cx, cy);
                    }
                    for cx in (old.right + 1)..=new.right {
                        f(cx, cy);
                    }
                }
            }
        }
    }
}

impl<K: Kind> Surface<K> {
    fn normalized_radius(&self, radius: Option<f64>) -> f64 {
        radius.unwrap_or_else(|| self.max_distance())
    }

    /// Append candidates from one canonical cell: right kind, not the
    /// origin, within the pseudo radius, passing the filter.
    fn scan_cell(
        &self,
        cell: (u32, u32),
        origin: EntityId,
        origin_pos: (f64, f64),
        pseudo_radius: f64,
        query: &NeighborQuery<'_, K>,
        hits: &mut Vec<(f64, EntityId)>,
    ) {
        for &id in self.bucket(cell.0, cell.1) {
            if id == origin {
                continue;
            }
            let record = match self.arena.get(id) {
                Ok(record) => record,
                Err(_) => continue,
            };
            if record.kind != query.kind {
                continue;
            }
            let pd = self
                .topology
                .pseudo_distance(self.metric, origin_pos, (record.x, record.y));
            if pd > pseudo_radius {
                continue;
            }
            if let Some((reader, condition)) = &query.filter {
                if !condition.eval(*reader, id) {
                    continue;
                }
            }
            hits.push((pd, id));
        }
    }

    /// Grow the search radius one unit at a time, scanning only the
    /// belt of newly covered cells, until `need` candidates are
    /// certified or the bound is reached.
    ///
    /// Certification: after scanning the box of radius `r`, every
    /// entity at true distance <= `r` has been seen, so a candidate
    /// whose true distance is <= `r` cannot be beaten by a later one.
    fn expanding_search(
        &self,
        origin: EntityId,
        origin_pos: (f64, f64),
        query: &NeighborQuery<'_, K>,
        need: usize,
        radius: f64,
    ) -> Vec<(f64, EntityId)> {
        let (x, y) = origin_pos;
        let pseudo_radius = self.metric.pseudo_from_true(radius);
        let bound = radius.min(self.topology.complete_radius(x, y));
        let total_cells = self.topology.cell_count();

        let mut visited: HashSet<(u32, u32)> = HashSet::new();
        let mut hits: Vec<(f64, EntityId)> = Vec::new();
        let mut prev_box: Option<BoundingBox> = None;
        let mut cur = 0.0f64;
        loop {
            let bbox = self.topology.bounding_box(x, y, cur);
            belt_cells(bbox, prev_box, |cx, cy| {
                if let Some(cell) = self.topology.wrap_cell(cx, cy) {
                    if visited.insert(cell) {
                        self.scan_cell(cell, origin, origin_pos, pseudo_radius, query, &mut hits);
                    }
                }
            });
            if hits.len() >= need {
                hits.sort_by(|a, b| a.0.total_cmp(&b.0));
                let kth_true = self.metric.true_from_pseudo(hits[need - 1].0);
                if kth_true <= cur {
                    break;
                }
            }
            if cur >= bound || visited.len() >= total_cells {
                break;
            }
            prev_box = Some(bbox);
            cur = (cur + 1.0).min(bound);
        }
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits
    }

    /// Reorder equidistant candidates per the tie mode. Only the
    /// random modes draw the surface RNG.
    fn apply_tie(&mut self, hits: &mut [(f64, EntityId)], tie: TieMode) {
        match tie {
            TieMode::Stable => {}
            TieMode::RandomAll => hits.shuffle(&mut self.rng),
            TieMode::RandomWithinTies => {
                let mut i = 0;
                while i < hits.len() {
                    let mut j = i + 1;
                    while j < hits.len() && hits[j].0 == hits[i].0 {
                        j += 1;
                    }
                    if j - i > 1 {
                        hits[i..j].shuffle(&mut self.rng);
                    }
                    i = j;
                }
            }
        }
    }

    /// Convert pseudo-distances to true distances and install the
    /// buffer on the origin, cursor rewound.
    fn store_buffer(
        &mut self,
        origin: EntityId,
        hits: Vec<(f64, EntityId)>,
    ) -> Result<usize, SurfaceError> {
        let metric = self.metric;
        let record = self.arena.get_mut(origin)?;
        record.buffer = hits
            .into_iter()
            .map(|(pd, id)| (metric.true_from_pseudo(pd), id))
            .collect();
        record.cursor = 0;
        Ok(record.buffer.len())
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Fill the origin's buffer with every other entity of `kind`, in
    /// slot order or shuffled. Returns the number found.
    pub fn all_of_kind(
        &mut self,
        origin: EntityId,
        kind: K,
        shuffled: bool,
    ) -> Result<usize, SurfaceError> {
        let origin_pos = self.position(origin)?;
        let mut hits: Vec<(f64, EntityId)> = Vec::new();
        for id in self.arena.ids() {
            if id == origin {
                continue;
            }
            let record = match self.arena.get(id) {
                Ok(record) => record,
                Err(_) => continue,
            };
            if record.kind != kind {
                continue;
            }
            let pd = self
                .topology
                .pseudo_distance(self.metric, origin_pos, (record.x, record.y));
            hits.push((pd, id));
        }
        if shuffled {
            hits.shuffle(&mut self.rng);
        }
        self.store_buffer(origin, hits)
    }

    /// Fill the origin's buffer with entities matching `query` within
    /// its radius, sorted ascending by distance. Returns the number
    /// found. A kind with no entities gives an empty result, not an
    /// error.
    pub fn within_radius(
        &mut self,
        origin: EntityId,
        query: &NeighborQuery<'_, K>,
    ) -> Result<usize, SurfaceError> {
        let origin_pos = self.position(origin)?;
        let radius = self.normalized_radius(query.radius);
        let pseudo_radius = self.metric.pseudo_from_true(radius);
        let bbox = self.topology.bounding_box(origin_pos.0, origin_pos.1, radius);

        let mut visited: HashSet<(u32, u32)> = HashSet::new();
        let mut hits: Vec<(f64, EntityId)> = Vec::new();
        belt_cells(bbox, None, |cx, cy| {
            if let Some(cell) = self.topology.wrap_cell(cx, cy) {
                if visited.insert(cell) {
                    self.scan_cell(cell, origin, origin_pos, pseudo_radius, query, &mut hits);
                }
            }
        });
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.apply_tie(&mut hits, query.tie);
        self.store_buffer(origin, hits)
    }

    /// The closest entity matching `query`, or `None`.
    ///
    /// Stable mode returns the earliest-found of the nearest
    /// candidates; the random modes pick uniformly among them. The
    /// chosen entity also lands alone in the origin's buffer.
    pub fn closest(
        &mut self,
        origin: EntityId,
        query: &NeighborQuery<'_, K>,
    ) -> Result<Option<EntityId>, SurfaceError> {
        let origin_pos = self.position(origin)?;
        let radius = self.normalized_radius(query.radius);
        let hits = self.expanding_search(origin, origin_pos, query, 1, radius);
        if hits.is_empty() {
            self.store_buffer(origin, Vec::new())?;
            return Ok(None);
        }
        let chosen = match query.tie {
            TieMode::Stable => hits[0],
            TieMode::RandomWithinTies | TieMode::RandomAll => {
                let ties = hits.iter().take_while(|h| h.0 == hits[0].0).count();
                hits[self.rng.random_range(0..ties)]
            }
        };
        self.store_buffer(origin, vec![chosen])?;
        Ok(Some(chosen.1))
    }

    /// The `k` closest entities matching `query`, into the origin's
    /// buffer. Returns the number found, which is less than `k` when
    /// fewer match; candidates tied with the k-th are all kept.
    pub fn k_closest(
        &mut self,
        origin: EntityId,
        k: usize,
        query: &NeighborQuery<'_, K>,
    ) -> Result<usize, SurfaceError> {
        if k < 1 {
            return Err(SurfaceError::InvalidArgument {
                reason: "k_closest requires k >= 1".into(),
            });
        }
        let origin_pos = self.position(origin)?;
        let radius = self.normalized_radius(query.radius);
        let mut hits = self.expanding_search(origin, origin_pos, query, k, radius);
        if hits.len() > k {
            let kth = hits[k - 1].0;
            let cut = hits.partition_point(|h| h.0 <= kth);
            hits.truncate(cut);
        }
        self.apply_tie(&mut hits, query.tie);
        self.store_buffer(origin, hits)
    }

    // ── Buffer iteration ────────────────────────────────────────

    /// Next entity from the origin's buffer, advancing the cursor.
    pub fn next_neighbour(&mut self, origin: EntityId) -> Result<Option<EntityId>, SurfaceError> {
        let record = self.arena.get_mut(origin)?;
        match record.buffer.get(record.cursor) {
            Some(&(_, id)) => {
                record.cursor += 1;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Whether the origin's buffer has unread entries.
    pub fn has_next(&self, origin: EntityId) -> Result<bool, SurfaceError> {
        let record = self.arena.get(origin)?;
        Ok(record.cursor < record.buffer.len())
    }

    /// Rewind the origin's buffer cursor to the start.
    pub fn rewind_neighbours(&mut self, origin: EntityId) -> Result<(), SurfaceError> {
        self.arena.get_mut(origin)?.cursor = 0;
        Ok(())
    }

    /// Number of entries in the origin's buffer.
    pub fn neighbour_count(&self, origin: EntityId) -> Result<usize, SurfaceError> {
        Ok(self.arena.get(origin)?.buffer.len())
    }

    /// The origin's buffer as `(distance, id)` pairs, without moving
    /// the cursor.
    pub fn neighbours(
        &self,
        origin: EntityId,
    ) -> Result<impl Iterator<Item = (f64, EntityId)> + '_, SurfaceError> {
        Ok(self.arena.get(origin)?.buffer.iter().copied())
    }
}
