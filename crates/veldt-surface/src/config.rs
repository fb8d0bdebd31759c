//! Surface construction parameters.

use veldt_space::{Metric, WrapConfig};

/// Parameters for building a [`Surface`](crate::Surface).
///
/// Dimensions are mandatory; everything else has a default (no wrap,
/// Euclidean metric, seed 0). Setters chain:
///
/// ```
/// use veldt_surface::SurfaceConfig;
/// use veldt_space::{Metric, WrapConfig};
///
/// let config = SurfaceConfig::new(20, 10)
///     .wrap(WrapConfig::TORUS)
///     .metric(Metric::Manhattan)
///     .seed(42);
/// assert_eq!(config.width, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// Number of cells along x.
    pub width: u32,
    /// Number of cells along y.
    pub height: u32,
    /// Which edges wrap.
    pub wrap: WrapConfig,
    /// Distance metric used by queries.
    pub metric: Metric,
    /// Seed for the surface's deterministic RNG.
    pub seed: u64,
}

impl SurfaceConfig {
    /// Start a configuration with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            wrap: WrapConfig::NONE,
            metric: Metric::Euclidean,
            seed: 0,
        }
    }

    /// Set the wrap configuration.
    pub fn wrap(mut self, wrap: WrapConfig) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the distance metric.
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
