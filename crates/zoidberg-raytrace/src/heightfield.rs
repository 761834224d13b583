//! Heightfield grid and its implicit triangulation.
//!
//! Each unit cell `[x, x+1] × [y, y+1]` is split into four triangles that
//! share the cell center. The center height is the mean of the four corner
//! samples, so every cell becomes a small pyramid. Neighboring cells share
//! their corner vertices exactly, so the mesh has no cracks.

use zoidberg_math::{Point2, Point3};

use crate::error::{Result, TraceError};

/// A regular grid of height samples, stored row-major.
///
/// `height(x, y)` is defined for `x in 0..width` and `y in 0..height`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    width: usize,
    height: usize,
    heights: Vec<f64>,
}

impl Heightfield {
    /// Build a heightfield from row-major samples.
    pub fn new(width: usize, height: usize, heights: Vec<f64>) -> Result<Self> {
        if heights.is_empty() {
            return Err(TraceError::EmptySurface);
        }
        if heights.len() != width * height {
            return Err(TraceError::SizeMismatch {
                width,
                height,
                found: heights.len(),
            });
        }
        if width < 2 || height < 2 {
            return Err(TraceError::SurfaceTooSmall { width, height });
        }
        if let Some(i) = heights.iter().position(|h| !h.is_finite()) {
            return Err(TraceError::NonFiniteSample {
                x: i % width,
                y: i / width,
            });
        }
        Ok(Self {
            width,
            height,
            heights,
        })
    }

    /// Build a heightfield from a list of rows (`rows[y][x]`).
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let expected = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if expected == 0 {
            return Err(TraceError::EmptySurface);
        }
        let mut heights = Vec::with_capacity(expected * rows.len());
        for (row, samples) in rows.iter().enumerate() {
            let samples = samples.as_ref();
            if samples.len() != expected {
                return Err(TraceError::NonRectangular {
                    row,
                    expected,
                    found: samples.len(),
                });
            }
            heights.extend_from_slice(samples);
        }
        Self::new(expected, rows.len(), heights)
    }

    /// Build a heightfield by sampling `f(x, y)` at every grid point.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self> {
        let mut heights = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                heights.push(f(x, y));
            }
        }
        Self::new(width, height, heights)
    }

    /// The bowl-shaped demo surface `((x - n/2)² + (y - n/2)²) / 2` on an `n × n` grid.
    pub fn paraboloid(n: usize) -> Result<Self> {
        let c = n as f64 / 2.0;
        Self::from_fn(n, n, |x, y| {
            let (dx, dy) = (x as f64 - c, y as f64 - c);
            (dx * dx + dy * dy) / 2.0
        })
    }

    /// Number of samples along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of samples along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Height sample at integer grid coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn height_at(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.width && y < self.height, "grid index ({x}, {y}) out of range");
        self.heights[y * self.width + x]
    }

    /// Row-major samples.
    pub fn samples(&self) -> &[f64] {
        &self.heights
    }

    /// Iterate over rows (`rows()[y][x]`).
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.heights.chunks(self.width)
    }

    /// Lowest and highest sample.
    pub fn bounds(&self) -> (f64, f64) {
        self.heights
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    /// Extent of the rectangle `[0, w] × [0, h]` the entry finder clips against.
    pub fn footprint(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    /// Extent of the triangulated mesh, `[0, w-1] × [0, h-1]`.
    pub fn mesh_extent(&self) -> (f64, f64) {
        ((self.width - 1) as f64, (self.height - 1) as f64)
    }

    /// Whether the march may continue at `p`: `0 <= x < w-1` and `0 <= y < h-1`.
    #[inline]
    pub fn in_domain(&self, p: &Point2) -> bool {
        let (w, h) = self.mesh_extent();
        0.0 <= p.x && p.x < w && 0.0 <= p.y && p.y < h
    }

    /// The unit cell enclosing `p`.
    ///
    /// Returns `None` outside the march domain.
    pub fn cell(&self, p: &Point2) -> Option<Cell> {
        if !self.in_domain(p) {
            return None;
        }
        let (x, y) = (p.x.floor() as usize, p.y.floor() as usize);
        Some(Cell {
            x,
            y,
            corners: [
                self.height_at(x, y),
                self.height_at(x + 1, y),
                self.height_at(x, y + 1),
                self.height_at(x + 1, y + 1),
            ],
        })
    }

    /// The sub-triangle of the mesh containing `p`, with vertex heights.
    ///
    /// Returns `None` outside the march domain.
    pub fn triangle(&self, p: &Point2) -> Option<GridTriangle> {
        let cell = self.cell(p)?;
        let center = Point2::new(cell.x as f64 + 0.5, cell.y as f64 + 0.5);
        let (p1, p2) = enclosing_triangle_vertices(p);
        Some(GridTriangle {
            p0: Point3::new(center.x, center.y, cell.center_height()),
            p1: self.lift(&p1),
            p2: self.lift(&p2),
            cell,
        })
    }

    fn lift(&self, p: &Point2) -> Point3 {
        Point3::new(p.x, p.y, self.height_at(p.x as usize, p.y as usize))
    }
}

/// Two outer corners of the sub-triangle containing `pos`.
///
/// The third vertex is always the cell center `floor(pos) + 0.5`. The cell is
/// split by both diagonals: `a = fy > fx` and `b = fy > 1 - fx` select the
/// bottom, right, left or top triangle, whose outer edge runs from
/// `floor + (!a, a)` to `floor + (b, b)`.
pub fn enclosing_triangle_vertices(pos: &Point2) -> (Point2, Point2) {
    let (ix, iy) = (pos.x.floor(), pos.y.floor());
    let (fx, fy) = (pos.x - ix, pos.y - iy);
    let a = fy > fx;
    let b = fy > 1.0 - fx;
    let unit = |flag: bool| if flag { 1.0 } else { 0.0 };
    (
        Point2::new(ix + unit(!a), iy + unit(a)),
        Point2::new(ix + unit(b), iy + unit(b)),
    )
}

/// A unit grid cell with its four corner heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Column of the lower-left corner.
    pub x: usize,
    /// Row of the lower-left corner.
    pub y: usize,
    /// Corner heights: `(x, y)`, `(x+1, y)`, `(x, y+1)`, `(x+1, y+1)`.
    pub corners: [f64; 4],
}

impl Cell {
    /// Lowest corner.
    pub fn min_height(&self) -> f64 {
        self.corners.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Highest corner.
    pub fn max_height(&self) -> f64 {
        self.corners.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Mean of the corners, used as the height of the cell center.
    pub fn center_height(&self) -> f64 {
        self.corners.iter().sum::<f64>() / 4.0
    }
}

/// One of the four triangles of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTriangle {
    /// Cell center.
    pub p0: Point3,
    /// First outer corner.
    pub p1: Point3,
    /// Second outer corner.
    pub p2: Point3,
    /// The enclosing cell.
    pub cell: Cell,
}

impl GridTriangle {
    /// Edges projected onto the grid plane: `(p0, p1)`, `(p1, p2)`, `(p2, p0)`.
    pub fn edges_2d(&self) -> [(Point2, Point2); 3] {
        let (a, b, c) = (self.p0.xy(), self.p1.xy(), self.p2.xy());
        [(a, b), (b, c), (c, a)]
    }
}
