//! Instrumentation hooks for the ray march.
//!
//! The tracer is generic over a [`TraceObserver`]; the default
//! [`NoopObserver`] compiles away entirely.

use zoidberg_math::Point3;

use crate::heightfield::GridTriangle;

/// Receives events from a single ray trace. All methods default to no-ops.
pub trait TraceObserver {
    /// The ray never reaches the footprint.
    fn on_no_entry(&mut self) {}

    /// The march starts at `entry`.
    fn on_entry(&mut self, _entry: &Point3) {}

    /// A sub-triangle was visited; `tested` is false when the height band
    /// rejected it without running the intersection test.
    fn on_triangle(&mut self, _triangle: &GridTriangle, _tested: bool) {}

    /// The march moved to the next triangle. `forced` marks a minimum step
    /// taken because no edge crossing was usable.
    fn on_advance(&mut self, _from: &Point3, _to: &Point3, _forced: bool) {}

    /// The ray struck the surface.
    fn on_hit(&mut self, _hit: &Point3) {}

    /// The ray left the grid without a hit.
    fn on_exit(&mut self, _last: &Point3) {}

    /// The iteration cap was reached.
    fn on_exhausted(&mut self, _steps: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TraceObserver for NoopObserver {}

/// Observer that forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl TraceObserver for LogObserver {
    fn on_no_entry(&mut self) {
        log::trace!("ray misses footprint");
    }

    fn on_entry(&mut self, entry: &Point3) {
        log::trace!("enter at ({:.4}, {:.4}, {:.4})", entry.x, entry.y, entry.z);
    }

    fn on_triangle(&mut self, triangle: &GridTriangle, tested: bool) {
        log::trace!(
            "cell ({}, {}) triangle <{:?}, {:?}> tested={}",
            triangle.cell.x,
            triangle.cell.y,
            triangle.p1.xy(),
            triangle.p2.xy(),
            tested
        );
    }

    fn on_advance(&mut self, _from: &Point3, to: &Point3, forced: bool) {
        log::trace!("advance to ({:.4}, {:.4}, {:.4}) forced={}", to.x, to.y, to.z, forced);
    }

    fn on_hit(&mut self, hit: &Point3) {
        log::trace!("hit at ({:.4}, {:.4}, {:.4})", hit.x, hit.y, hit.z);
    }

    fn on_exit(&mut self, last: &Point3) {
        log::trace!("exit grid at ({:.4}, {:.4})", last.x, last.y);
    }

    fn on_exhausted(&mut self, steps: usize) {
        log::warn!("ray march gave up after {steps} steps");
    }
}

/// Observer that counts march events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Triangles whose intersection test ran.
    pub tested: usize,
    /// Triangles skipped by the height band.
    pub rejected: usize,
    /// Edge-crossing advances.
    pub advances: usize,
    /// Minimum-step advances.
    pub forced: usize,
    /// Whether the iteration cap was hit.
    pub exhausted: bool,
}

impl TraceStats {
    /// Total triangles visited.
    pub fn visited(&self) -> usize {
        self.tested + self.rejected
    }
}

impl TraceObserver for TraceStats {
    fn on_triangle(&mut self, _triangle: &GridTriangle, tested: bool) {
        if tested {
            self.tested += 1;
        } else {
            self.rejected += 1;
        }
    }

    fn on_advance(&mut self, _from: &Point3, _to: &Point3, forced: bool) {
        if forced {
            self.forced += 1;
        } else {
            self.advances += 1;
        }
    }

    fn on_exhausted(&mut self, _steps: usize) {
        self.exhausted = true;
    }
}
