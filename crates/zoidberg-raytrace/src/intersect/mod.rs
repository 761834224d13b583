//! Ray-segment and ray-triangle intersection.
//!
//! Both tests express the intersection as a small linear system and solve it
//! in closed form. A miss (parallel geometry, parameters out of range, hit
//! behind the origin) is `None`; `Some(0.0)` is a valid hit at the origin.

mod segment;
mod triangle;

pub use segment::intersect_segment_2d;
pub use triangle::intersect_triangle_3d;
