//! The [`Topology`]: bounds, wrap correction, distances, bounding
//! boxes, and interpolation on a bounded 2-D surface.

use crate::direction::Direction;
use crate::error::SpaceError;
use crate::metric::Metric;
use crate::wrap::WrapConfig;

/// Integer cell bounds covering a square neighborhood of a point.
///
/// Produced by [`Topology::bounding_box`]. On non-wrapping sides the
/// bounds are clipped to the grid; on wrapping sides they may run past
/// it (negative or `>= dim`), and cell access re-applies
/// [`Topology::wrap_cell`] to fold them back in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// Smallest x cell (inclusive).
    pub left: i64,
    /// Largest x cell (inclusive).
    pub right: i64,
    /// Smallest y cell (inclusive).
    pub bottom: i64,
    /// Largest y cell (inclusive).
    pub top: i64,
}

/// Dimensions and wrap configuration of a surface, plus every pure
/// geometric operation defined on it.
///
/// Positions are `(x, y)` with `0 <= x < width`, `0 <= y < height`;
/// cell `(i, j)` holds positions truncating to `(i, j)`. The topology
/// is immutable after construction — the owning surface treats any
/// change as reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topology {
    width: u32,
    height: u32,
    wrap: WrapConfig,
}

impl Topology {
    /// Maximum size of either dimension.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a topology, validating dimensions.
    ///
    /// Returns [`SpaceError::EmptySurface`] if either dimension is 0,
    /// or [`SpaceError::DimensionTooLarge`] past [`Self::MAX_DIM`].
    pub fn new(width: u32, height: u32, wrap: WrapConfig) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySurface);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self {
            width,
            height,
            wrap,
        })
    }

    /// Width (`xn`): number of cells along x.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height (`yn`): number of cells along y.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The wrap configuration.
    pub fn wrap(&self) -> WrapConfig {
        self.wrap
    }

    /// Total number of grid cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Center of the surface extent.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Whether `(x, y)` is inside `[0, width) × [0, height)`.
    pub fn in_range(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width as f64 && y >= 0.0 && y < self.height as f64
    }

    /// Describe the valid position range, for error messages.
    pub fn bounds(&self) -> String {
        format!("[0, {}) x [0, {})", self.width, self.height)
    }

    fn wrap_axis(v: f64, n: f64, wrap_low: bool, wrap_high: bool) -> Option<f64> {
        if !v.is_finite() {
            return None;
        }
        if v >= 0.0 && v < n {
            return Some(v);
        }
        if v < 0.0 && !wrap_low {
            return None;
        }
        if v >= n && !wrap_high {
            return None;
        }
        let folded = v.rem_euclid(n);
        // rem_euclid of a tiny negative can round up to n itself.
        Some(if folded >= n { 0.0 } else { folded })
    }

    /// Fold a position into range along any wrapping side it crossed.
    ///
    /// Returns `None` when the position is out of range and the crossed
    /// side does not wrap. In-range positions pass through unchanged.
    pub fn wrap_position(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let w = self.width as f64;
        let h = self.height as f64;
        let x = Self::wrap_axis(x, w, self.wrap.left, self.wrap.right)?;
        let y = Self::wrap_axis(y, h, self.wrap.bottom, self.wrap.top)?;
        Some((x, y))
    }

    fn wrap_cell_axis(c: i64, n: i64, wrap_low: bool, wrap_high: bool) -> Option<i64> {
        if (0..n).contains(&c) {
            Some(c)
        } else if c < 0 {
            wrap_low.then(|| c.rem_euclid(n))
        } else {
            wrap_high.then(|| c.rem_euclid(n))
        }
    }

    /// Fold an integer cell index pair into the grid, as
    /// [`Self::wrap_position`] does for continuous positions.
    ///
    /// Bounding boxes on wrapping sides run past the grid on purpose;
    /// every cell access goes through this fold.
    pub fn wrap_cell(&self, cx: i64, cy: i64) -> Option<(u32, u32)> {
        let cx = Self::wrap_cell_axis(cx, self.width as i64, self.wrap.left, self.wrap.right)?;
        let cy = Self::wrap_cell_axis(cy, self.height as i64, self.wrap.bottom, self.wrap.top)?;
        Some((cx as u32, cy as u32))
    }

    fn axis_abs_delta(a: f64, b: f64, n: f64, wrapped: bool) -> f64 {
        let d = (a - b).abs();
        if wrapped {
            d.min(n - d)
        } else {
            d
        }
    }

    /// Pseudo-distance between two in-range points under `metric`,
    /// taking the around-the-edge shortcut on any fully wrapped axis.
    pub fn pseudo_distance(&self, metric: Metric, a: (f64, f64), b: (f64, f64)) -> f64 {
        let dx = Self::axis_abs_delta(a.0, b.0, self.width as f64, self.wrap.full_x());
        let dy = Self::axis_abs_delta(a.1, b.1, self.height as f64, self.wrap.full_y());
        metric.pseudo(dx, dy)
    }

    /// Pseudo-distance ignoring wrap entirely — the direct path.
    pub fn pseudo_distance_nowrap(metric: Metric, a: (f64, f64), b: (f64, f64)) -> f64 {
        metric.pseudo((a.0 - b.0).abs(), (a.1 - b.1).abs())
    }

    /// True (wrap-aware) distance between two in-range points.
    pub fn distance(&self, metric: Metric, a: (f64, f64), b: (f64, f64)) -> f64 {
        metric.true_from_pseudo(self.pseudo_distance(metric, a, b))
    }

    /// The largest possible distance between two points on the surface.
    ///
    /// Without wrap this is the full diagonal. With wrap the corners
    /// fold onto each other, so the candidates are center-to-corner and
    /// the four corner pairings; the overall maximum wins.
    pub fn max_distance(&self, metric: Metric) -> f64 {
        let w = self.width as f64;
        let h = self.height as f64;
        if !self.wrap.any() {
            return metric.true_from_pseudo(Self::pseudo_distance_nowrap(
                metric,
                (0.0, 0.0),
                (w, h),
            ));
        }
        let center = self.center();
        [
            self.distance(metric, center, (w, h)),
            self.distance(metric, (0.0, 0.0), (w, h)),
            self.distance(metric, (0.0, h), (w, 0.0)),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    /// Radius guaranteed to cover the whole surface from `(x, y)`:
    /// the largest per-axis distance to any edge. Bounds the expanding
    /// neighbor search.
    pub fn complete_radius(&self, x: f64, y: f64) -> f64 {
        let w = self.width as f64;
        let h = self.height as f64;
        x.max(w - x).max(y.max(h - y))
    }

    /// Integer cell bounds of the square of `radius` around `(x, y)`.
    ///
    /// `radius` must be non-negative (callers normalize "unbounded"
    /// beforehand). Non-wrapping sides are clipped to the grid;
    /// wrapping sides are left unclipped for [`Self::wrap_cell`] to
    /// fold during traversal.
    pub fn bounding_box(&self, x: f64, y: f64, radius: f64) -> BoundingBox {
        debug_assert!(radius >= 0.0, "bounding_box radius must be normalized");
        let mut left = (x - radius).floor() as i64;
        let mut right = (x + radius).ceil() as i64;
        let mut bottom = (y - radius).floor() as i64;
        let mut top = (y + radius).ceil() as i64;
        if !self.wrap.left {
            left = left.max(0);
        }
        if !self.wrap.right {
            right = right.min(self.width as i64 - 1);
        }
        if !self.wrap.bottom {
            bottom = bottom.max(0);
        }
        if !self.wrap.top {
            top = top.min(self.height as i64 - 1);
        }
        BoundingBox {
            left,
            right,
            bottom,
            top,
        }
    }

    fn axis_between(
        v1: f64,
        v2: f64,
        rel: f64,
        n: f64,
        wrap_low: bool,
        wrap_high: bool,
        axis: &'static str,
    ) -> Result<f64, SpaceError> {
        if wrap_low != wrap_high {
            return Err(SpaceError::AsymmetricWrap { axis });
        }
        let (lo, hi, rel) = if v1 > v2 {
            (v2, v1, 1.0 - rel)
        } else {
            (v1, v2, rel)
        };
        let mut dist = hi - lo;
        if wrap_low {
            let around = lo + (n - hi);
            if around < dist {
                // shorter to travel the other way, through the edge
                dist = -around;
            }
        }
        Ok(lo + dist * rel)
    }

    /// The point at relative position `rel` on the shortest path from
    /// `a` to `b` (`rel = 0` is `a`, `1` is `b`, negative defaults to
    /// the midpoint).
    ///
    /// On an axis where both sides wrap, the interpolation may run
    /// through the edge when that way is shorter. An axis with mixed
    /// wrap sides fails fast with [`SpaceError::AsymmetricWrap`]; the
    /// shorter path would depend on travel direction.
    pub fn position_between(
        &self,
        a: (f64, f64),
        b: (f64, f64),
        rel: f64,
    ) -> Result<(f64, f64), SpaceError> {
        let rel = if rel < 0.0 { 0.5 } else { rel };
        if rel > 1.0 {
            return Err(SpaceError::InvalidRelativePosition { value: rel });
        }
        let x = Self::axis_between(
            a.0,
            b.0,
            rel,
            self.width as f64,
            self.wrap.left,
            self.wrap.right,
            "x",
        )?;
        let y = Self::axis_between(
            a.1,
            b.1,
            rel,
            self.height as f64,
            self.wrap.bottom,
            self.wrap.top,
            "y",
        )?;
        self.wrap_position(x, y).ok_or(SpaceError::OutOfRange {
            x,
            y,
            bounds: self.bounds(),
        })
    }

    /// Position after one step from `(x, y)` in `dir`, wrap-corrected.
    ///
    /// `None` means the step crosses a non-wrapping edge and is not
    /// possible.
    pub fn step(&self, x: f64, y: f64, dir: Direction) -> Option<(f64, f64)> {
        let (dx, dy) = dir.offset();
        self.wrap_position(x + dx, y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn torus(w: u32, h: u32) -> Topology {
        Topology::new(w, h, WrapConfig::TORUS).unwrap()
    }

    fn bounded(w: u32, h: u32) -> Topology {
        Topology::new(w, h, WrapConfig::NONE).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn new_rejects_empty_and_oversized() {
        assert!(matches!(
            Topology::new(0, 5, WrapConfig::NONE),
            Err(SpaceError::EmptySurface)
        ));
        assert!(matches!(
            Topology::new(5, 0, WrapConfig::NONE),
            Err(SpaceError::EmptySurface)
        ));
        let big = Topology::MAX_DIM + 1;
        assert!(matches!(
            Topology::new(big, 5, WrapConfig::NONE),
            Err(SpaceError::DimensionTooLarge { name: "width", .. })
        ));
    }

    // ── Wrap correction ─────────────────────────────────────────

    #[test]
    fn wrap_position_folds_wrapping_sides() {
        let t = torus(10, 10);
        assert_eq!(t.wrap_position(-1.0, 3.0), Some((9.0, 3.0)));
        assert_eq!(t.wrap_position(10.5, 3.0), Some((0.5, 3.0)));
        assert_eq!(t.wrap_position(3.0, -0.25), Some((3.0, 9.75)));
        // several full turns
        assert_eq!(t.wrap_position(-21.0, 25.0), Some((9.0, 5.0)));
    }

    #[test]
    fn wrap_position_rejects_hard_borders() {
        let t = bounded(10, 10);
        assert_eq!(t.wrap_position(-0.1, 5.0), None);
        assert_eq!(t.wrap_position(10.0, 5.0), None);
        assert_eq!(t.wrap_position(5.0, 5.0), Some((5.0, 5.0)));
    }

    #[test]
    fn wrap_position_respects_single_sided_wrap() {
        let east_only = Topology::new(
            10,
            10,
            WrapConfig {
                left: false,
                right: true,
                top: false,
                bottom: false,
            },
        )
        .unwrap();
        assert_eq!(east_only.wrap_position(10.5, 1.0), Some((0.5, 1.0)));
        assert_eq!(east_only.wrap_position(-0.5, 1.0), None);
    }

    #[test]
    fn wrap_cell_folds_like_positions() {
        let t = torus(5, 5);
        assert_eq!(t.wrap_cell(-1, 0), Some((4, 0)));
        assert_eq!(t.wrap_cell(5, 7), Some((0, 2)));
        let b = bounded(5, 5);
        assert_eq!(b.wrap_cell(-1, 0), None);
        assert_eq!(b.wrap_cell(4, 4), Some((4, 4)));
    }

    // ── Distance ────────────────────────────────────────────────

    #[test]
    fn toroidal_euclidean_corner_distance() {
        // Key wrap property: (0,0) to (9,9) across the seam is √2.
        let t = torus(10, 10);
        let d = t.distance(Metric::Euclidean, (0.0, 0.0), (9.0, 9.0));
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn toroidal_manhattan_distance() {
        let t = torus(3, 3);
        let d = t.distance(Metric::Manhattan, (0.0, 0.0), (2.0, 2.0));
        assert_eq!(d, 2.0);
    }

    #[test]
    fn bounded_distance_has_no_shortcut() {
        let t = bounded(10, 10);
        let d = t.distance(Metric::Euclidean, (0.0, 0.0), (9.0, 9.0));
        assert!((d - 162.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn partial_wrap_shortcut_requires_both_sides() {
        let left_only = Topology::new(
            10,
            10,
            WrapConfig {
                left: true,
                right: false,
                top: false,
                bottom: false,
            },
        )
        .unwrap();
        let d = left_only.distance(Metric::Euclidean, (0.0, 0.0), (9.0, 0.0));
        assert_eq!(d, 9.0);
    }

    #[test]
    fn chebyshev_uses_max_axis() {
        let t = bounded(10, 10);
        assert_eq!(t.distance(Metric::Chebyshev, (0.0, 0.0), (3.0, 7.0)), 7.0);
    }

    #[test]
    fn max_distance_bounded_is_diagonal() {
        let t = bounded(3, 4);
        let d = t.max_distance(Metric::Euclidean);
        assert!((d - 25.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn max_distance_torus_is_center_to_corner() {
        let t = torus(10, 10);
        let d = t.max_distance(Metric::Euclidean);
        assert!((d - 50.0_f64.sqrt()).abs() < 1e-12);
    }

    // ── Bounding boxes ──────────────────────────────────────────

    #[test]
    fn bounding_box_clips_hard_borders() {
        let t = bounded(10, 10);
        let b = t.bounding_box(1.0, 8.5, 3.0);
        assert_eq!(b.left, 0);
        assert_eq!(b.right, 4);
        assert_eq!(b.bottom, 5);
        assert_eq!(b.top, 9);
    }

    #[test]
    fn bounding_box_overhangs_wrapping_sides() {
        let t = torus(10, 10);
        let b = t.bounding_box(1.0, 8.5, 3.0);
        assert_eq!(b.left, -2);
        assert_eq!(b.right, 4);
        assert_eq!(b.bottom, 5);
        assert_eq!(b.top, 12);
    }

    // ── Interpolation ───────────────────────────────────────────

    #[test]
    fn position_between_midpoint_default() {
        let t = bounded(10, 10);
        let p = t.position_between((0.0, 0.0), (4.0, 2.0), -1.0).unwrap();
        assert_eq!(p, (2.0, 1.0));
    }

    #[test]
    fn position_between_relative_position() {
        let t = bounded(10, 10);
        let p = t.position_between((0.0, 0.0), (4.0, 2.0), 0.25).unwrap();
        assert_eq!(p, (1.0, 0.5));
        // orientation-independent: rel is measured from the first point
        let q = t.position_between((4.0, 2.0), (0.0, 0.0), 0.25).unwrap();
        assert_eq!(q, (3.0, 1.5));
    }

    #[test]
    fn position_between_takes_wrapped_shortcut() {
        let t = torus(10, 10);
        // shortest path from 1 to 9 runs through the left edge
        let (x, y) = t.position_between((1.0, 5.0), (9.0, 5.0), 0.5).unwrap();
        assert_eq!(y, 5.0);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn position_between_rejects_mixed_wrap() {
        let mixed = Topology::new(
            10,
            10,
            WrapConfig {
                left: true,
                right: false,
                top: false,
                bottom: false,
            },
        )
        .unwrap();
        assert!(matches!(
            mixed.position_between((1.0, 1.0), (2.0, 2.0), 0.5),
            Err(SpaceError::AsymmetricWrap { axis: "x" })
        ));
    }

    #[test]
    fn position_between_rejects_rel_above_one() {
        let t = bounded(10, 10);
        assert!(matches!(
            t.position_between((0.0, 0.0), (1.0, 1.0), 1.5),
            Err(SpaceError::InvalidRelativePosition { .. })
        ));
    }

    // ── Movement ────────────────────────────────────────────────

    #[test]
    fn step_blocked_at_hard_border() {
        let t = bounded(5, 5);
        assert_eq!(t.step(0.5, 4.5, Direction::North), None);
        assert_eq!(t.step(0.5, 4.5, Direction::South), Some((0.5, 3.5)));
    }

    #[test]
    fn step_wraps_across_torus_edge() {
        let t = torus(5, 5);
        assert_eq!(t.step(0.5, 4.5, Direction::North), Some((0.5, 0.5)));
        assert_eq!(t.step(0.0, 0.0, Direction::SouthWest), Some((4.0, 4.0)));
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_wrap() -> impl Strategy<Value = WrapConfig> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, top, bottom)| WrapConfig {
                left,
                right,
                top,
                bottom,
            },
        )
    }

    fn arb_metric() -> impl Strategy<Value = Metric> {
        prop_oneof![
            Just(Metric::Euclidean),
            Just(Metric::Manhattan),
            Just(Metric::Chebyshev),
        ]
    }

    proptest! {
        #[test]
        fn distance_is_reflexive_and_symmetric(
            w in 1u32..20, h in 1u32..20,
            wrap in arb_wrap(),
            metric in arb_metric(),
            ax in 0.0f64..1.0, ay in 0.0f64..1.0,
            bx in 0.0f64..1.0, by in 0.0f64..1.0,
        ) {
            let t = Topology::new(w, h, wrap).unwrap();
            let a = (ax * w as f64 * 0.999, ay * h as f64 * 0.999);
            let b = (bx * w as f64 * 0.999, by * h as f64 * 0.999);
            prop_assert!(t.distance(metric, a, a).abs() < 1e-12);
            prop_assert!((t.distance(metric, a, b) - t.distance(metric, b, a)).abs() < 1e-9);
        }

        #[test]
        fn distance_satisfies_triangle_inequality(
            w in 1u32..20, h in 1u32..20,
            wrap in arb_wrap(),
            metric in arb_metric(),
            ax in 0.0f64..1.0, ay in 0.0f64..1.0,
            bx in 0.0f64..1.0, by in 0.0f64..1.0,
            cx in 0.0f64..1.0, cy in 0.0f64..1.0,
        ) {
            let t = Topology::new(w, h, wrap).unwrap();
            let scale = |p: (f64, f64)| (p.0 * w as f64 * 0.999, p.1 * h as f64 * 0.999);
            let a = scale((ax, ay));
            let b = scale((bx, by));
            let c = scale((cx, cy));
            let dac = t.distance(metric, a, c);
            let dab = t.distance(metric, a, b);
            let dbc = t.distance(metric, b, c);
            prop_assert!(dac <= dab + dbc + 1e-9);
        }

        #[test]
        fn wrap_position_is_idempotent(
            w in 1u32..20, h in 1u32..20,
            wrap in arb_wrap(),
            x in -50.0f64..50.0, y in -50.0f64..50.0,
        ) {
            let t = Topology::new(w, h, wrap).unwrap();
            if let Some((fx, fy)) = t.wrap_position(x, y) {
                prop_assert!(t.in_range(fx, fy));
                prop_assert_eq!(t.wrap_position(fx, fy), Some((fx, fy)));
            }
        }
    }
}
