//! Visualization bridge: per-cell color notifications for an attached
//! lattice display.
//!
//! The surface knows nothing about rendering. A caller that wants a
//! live picture attaches a [`LatticeBridge`]; from then on every cell
//! whose resolved color may have changed gets a `cell_changed` call.
//! With no bridge attached the whole layer is a no-op.

use std::fmt;

use veldt_core::{EntityId, Kind};

use crate::error::SurfaceError;
use crate::surface::Surface;

/// Receiver for cell color updates.
pub trait LatticeBridge {
    /// The resolved color of cell `(x, y)` changed (or may have).
    fn cell_changed(&mut self, x: u32, y: u32, color: i32);
}

pub(crate) struct LatticeState {
    pub(crate) bridge: Box<dyn LatticeBridge>,
    /// Color shown for a cell with no drawable occupant, per cell in
    /// the bucket grid's x-major order.
    pub(crate) background: Vec<i32>,
}

impl fmt::Debug for LatticeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatticeState")
            .field("cells", &self.background.len())
            .finish()
    }
}

impl<K: Kind> Surface<K> {
    /// Attach a lattice bridge, painting every cell once.
    ///
    /// `background_color` is the initial color of all cells without a
    /// drawable occupant. Attaching twice is an error; detach first.
    pub fn attach_lattice(
        &mut self,
        bridge: Box<dyn LatticeBridge>,
        background_color: i32,
    ) -> Result<(), SurfaceError> {
        if self.lattice.is_some() {
            return Err(SurfaceError::InvalidArgument {
                reason: "a lattice bridge is already attached".into(),
            });
        }
        self.lattice = Some(LatticeState {
            bridge,
            background: vec![background_color; self.buckets.len()],
        });
        for cx in 0..self.width() {
            for cy in 0..self.height() {
                self.notify_cell(cx, cy);
            }
        }
        Ok(())
    }

    /// Detach and return the current bridge, if any.
    pub fn detach_lattice(&mut self) -> Option<Box<dyn LatticeBridge>> {
        self.lattice.take().map(|state| state.bridge)
    }

    /// Whether a lattice bridge is attached.
    pub fn has_lattice(&self) -> bool {
        self.lattice.is_some()
    }

    /// Resolved color of a cell: among occupants with priority >= 0
    /// the highest priority wins (latest inserted on a tie), else the
    /// cell's background color.
    fn resolved_color(&self, cx: u32, cy: u32) -> Option<i32> {
        let state = self.lattice.as_ref()?;
        let mut best: Option<(i32, i32)> = None;
        for &id in self.bucket(cx, cy) {
            if let Ok(record) = self.arena.get(id) {
                if record.priority >= 0
                    && best.map_or(true, |(p, _)| record.priority >= p)
                {
                    best = Some((record.priority, record.color));
                }
            }
        }
        let idx = self.cell_index(cx, cy);
        Some(best.map_or(state.background[idx], |(_, color)| color))
    }

    pub(crate) fn notify_cell(&mut self, cx: u32, cy: u32) {
        if let Some(color) = self.resolved_color(cx, cy) {
            if let Some(state) = self.lattice.as_mut() {
                state.bridge.cell_changed(cx, cy, color);
            }
        }
    }

    /// The entity's lattice color.
    pub fn color(&self, id: EntityId) -> Result<i32, SurfaceError> {
        Ok(self.arena.get(id)?.color)
    }

    /// Set the entity's lattice color and repaint its cell.
    pub fn set_color(&mut self, id: EntityId, color: i32) -> Result<(), SurfaceError> {
        let record = self.arena.get_mut(id)?;
        record.color = color;
        let (cx, cy) = Self::cell_of(record.x, record.y);
        self.notify_cell(cx, cy);
        Ok(())
    }

    /// The entity's draw priority. Negative means not drawn.
    pub fn priority(&self, id: EntityId) -> Result<i32, SurfaceError> {
        Ok(self.arena.get(id)?.priority)
    }

    /// Set the entity's draw priority and repaint its cell.
    pub fn set_priority(&mut self, id: EntityId, priority: i32) -> Result<(), SurfaceError> {
        let record = self.arena.get_mut(id)?;
        record.priority = priority;
        let (cx, cy) = Self::cell_of(record.x, record.y);
        self.notify_cell(cx, cy);
        Ok(())
    }

    /// The entity's color if it is drawable.
    ///
    /// An entity with negative priority has no visible color; asking
    /// for one is an error.
    pub fn visible_color(&self, id: EntityId) -> Result<i32, SurfaceError> {
        let record = self.arena.get(id)?;
        if record.priority < 0 {
            return Err(SurfaceError::InvalidArgument {
                reason: format!("entity {id} has negative priority and is not drawn"),
            });
        }
        Ok(record.color)
    }

    /// Set the background color of cell `(x, y)` and repaint it.
    /// Requires an attached lattice.
    pub fn paint_background(&mut self, x: u32, y: u32, color: i32) -> Result<(), SurfaceError> {
        self.check_cell(x, y)?;
        let idx = self.cell_index(x, y);
        match self.lattice.as_mut() {
            Some(state) => state.background[idx] = color,
            None => {
                return Err(SurfaceError::InvalidArgument {
                    reason: "no lattice bridge attached".into(),
                })
            }
        }
        self.notify_cell(x, y);
        Ok(())
    }

    /// The background color of cell `(x, y)`. Requires an attached
    /// lattice.
    pub fn background(&self, x: u32, y: u32) -> Result<i32, SurfaceError> {
        self.check_cell(x, y)?;
        let idx = self.cell_index(x, y);
        match self.lattice.as_ref() {
            Some(state) => Ok(state.background[idx]),
            None => Err(SurfaceError::InvalidArgument {
                reason: "no lattice bridge attached".into(),
            }),
        }
    }

    fn check_cell(&self, x: u32, y: u32) -> Result<(), SurfaceError> {
        if x >= self.width() || y >= self.height() {
            return Err(SurfaceError::Space(veldt_space::SpaceError::OutOfRange {
                x: x as f64,
                y: y as f64,
                bounds: self.topology().bounds(),
            }));
        }
        Ok(())
    }
}
