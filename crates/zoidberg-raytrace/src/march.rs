//! Triangle-to-triangle ray march over the heightfield mesh.
//!
//! The ray's projection is walked across the grid one sub-triangle at a
//! time. In each triangle the ray's height band is compared with the cell's
//! corner heights; only when they overlap is the exact ray-triangle test run.
//! Without a hit the march moves to the edge where the projection leaves the
//! triangle. When no usable crossing exists (the ray grazes a vertex or lies
//! along an edge) a fixed minimum step is forced instead, so every iteration
//! makes progress.

use zoidberg_math::{Point3, Vec3};

use crate::entry::first_entry_point;
use crate::heightfield::{GridTriangle, Heightfield};
use crate::intersect::{intersect_segment_2d, intersect_triangle_3d};
use crate::observe::{NoopObserver, TraceObserver};
use crate::{Ray, TraceSettings};

/// Position of the march along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchState {
    /// Current point on the ray.
    pub position: Point3,
    /// Number of advances taken so far.
    pub steps: usize,
}

/// Outcome of a single march iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchStep {
    /// The ray strikes the surface at this point.
    Hit(Point3),
    /// No hit in the current triangle; continue from the new state.
    Advance(MarchState),
    /// The position left the grid domain.
    Exit,
    /// The iteration cap was reached.
    Exhausted,
}

/// Ray march over one heightfield for one ray.
#[derive(Debug, Clone, Copy)]
pub struct Marcher<'a> {
    ray: Ray,
    field: &'a Heightfield,
    settings: &'a TraceSettings,
    max_steps: usize,
}

impl<'a> Marcher<'a> {
    /// Prepare a march of `ray` over `field`.
    pub fn new(ray: Ray, field: &'a Heightfield, settings: &'a TraceSettings) -> Self {
        Self {
            ray,
            field,
            settings,
            max_steps: settings.step_limit(field),
        }
    }

    /// The ray being marched.
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Starting state on the grid, or `None` when the ray never enters it.
    ///
    /// The entry into the footprint `[0, w] × [0, h]` may land on the band
    /// beyond the last row or column of samples. Such entries are carried
    /// forward to the mesh rectangle `[0, w-1] × [0, h-1]`.
    pub fn start(&self) -> Option<MarchState> {
        let tol = &self.settings.tolerance;
        let mut entry = first_entry_point(&self.ray, self.field.footprint(), tol)?;

        if !self.field.in_domain(&entry.xy()) {
            let inner = Ray::new(entry, self.ray.direction);
            entry = first_entry_point(&inner, self.field.mesh_extent(), tol)?;
            if !self.field.in_domain(&entry.xy()) {
                entry += self.forced_step()?;
            }
        }

        self.field.in_domain(&entry.xy()).then_some(MarchState {
            position: entry,
            steps: 0,
        })
    }

    /// Run one iteration from `state`.
    pub fn step<O: TraceObserver>(&self, state: &MarchState, observer: &mut O) -> MarchStep {
        if state.steps >= self.max_steps {
            return MarchStep::Exhausted;
        }
        let Some(triangle) = self.field.triangle(&state.position.xy()) else {
            return MarchStep::Exit;
        };

        // A vertical ray stays over this triangle for its whole length.
        let Some(forced) = self.forced_step() else {
            observer.on_triangle(&triangle, true);
            return match self.intersect(&triangle) {
                Some(hit) => MarchStep::Hit(hit),
                None => MarchStep::Exit,
            };
        };

        let (next, was_forced) = match self.exit_parameter(state, &triangle) {
            Some(k) => (state.position + k * self.ray.direction, false),
            None => (state.position + forced, true),
        };

        let z_lo = state.position.z.min(next.z);
        let z_hi = state.position.z.max(next.z);
        let overlaps = z_hi >= triangle.cell.min_height() && z_lo <= triangle.cell.max_height();
        observer.on_triangle(&triangle, overlaps);

        if overlaps {
            if let Some(hit) = self.intersect(&triangle) {
                return MarchStep::Hit(hit);
            }
        }

        observer.on_advance(&state.position, &next, was_forced);
        MarchStep::Advance(MarchState {
            position: next,
            steps: state.steps + 1,
        })
    }

    /// March until the ray hits the surface or leaves the grid.
    pub fn run<O: TraceObserver>(&self, observer: &mut O) -> Option<Point3> {
        let Some(mut state) = self.start() else {
            observer.on_no_entry();
            return None;
        };
        observer.on_entry(&state.position);

        loop {
            match self.step(&state, observer) {
                MarchStep::Hit(hit) => {
                    observer.on_hit(&hit);
                    return Some(hit);
                }
                MarchStep::Advance(next) => state = next,
                MarchStep::Exit => {
                    observer.on_exit(&state.position);
                    return None;
                }
                MarchStep::Exhausted => {
                    observer.on_exhausted(state.steps);
                    return None;
                }
            }
        }
    }

    /// Exact intersection of the full ray with a grid triangle.
    fn intersect(&self, triangle: &GridTriangle) -> Option<Point3> {
        intersect_triangle_3d(
            &self.ray.origin,
            &self.ray.direction,
            &triangle.p0,
            &triangle.p1,
            &triangle.p2,
            &self.settings.tolerance,
        )
        .map(|k| self.ray.at(k))
    }

    /// Smallest edge crossing ahead of `state`, measured from its position.
    fn exit_parameter(&self, state: &MarchState, triangle: &GridTriangle) -> Option<f64> {
        let tol = &self.settings.tolerance;
        let origin = state.position.xy();
        let direction = self.ray.direction_2d();
        triangle
            .edges_2d()
            .iter()
            .filter_map(|(a, b)| intersect_segment_2d(&origin, &direction, a, b, tol))
            .filter(|&k| k > tol.advance)
            .min_by(f64::total_cmp)
    }

    /// Displacement covering `min_step` grid units in the plane, if the ray
    /// moves in the plane at all.
    fn forced_step(&self) -> Option<Vec3> {
        let planar = self.ray.direction_2d().norm();
        (planar > 0.0 && planar.is_finite())
            .then(|| self.ray.direction * (self.settings.min_step / planar))
    }
}

/// Height of the first surface hit along `ray`, or `None` if it misses.
pub fn trace(ray: &Ray, field: &Heightfield, settings: &TraceSettings) -> Option<f64> {
    trace_hit(ray, field, settings).map(|p| p.z)
}

/// First surface hit along `ray`.
pub fn trace_hit(ray: &Ray, field: &Heightfield, settings: &TraceSettings) -> Option<Point3> {
    trace_with(ray, field, settings, &mut NoopObserver)
}

/// First surface hit along `ray`, reporting march events to `observer`.
pub fn trace_with<O: TraceObserver>(
    ray: &Ray,
    field: &Heightfield,
    settings: &TraceSettings,
    observer: &mut O,
) -> Option<Point3> {
    Marcher::new(*ray, field, settings).run(observer)
}
