//! Fixed-dimension grid layout.
//!
//! A grid has a fixed number of columns and rows. Each track is either a
//! percentage of the grid's size or `Auto`, which shares whatever the
//! percentage tracks leave over equally. Cells are placed at an integer
//! position with an integer span and never overlap.

use marquee_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::ops::{Add, BitOr, BitOrAssign};

/// Integer grid position (column `x`, row `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridCoord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the coordinate lies inside a grid of `size`.
    #[must_use]
    pub const fn in_bounds(self, size: Self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < size.x && self.y < size.y
    }

    /// Wrap into a grid of `size` using euclidean modulo.
    #[must_use]
    pub const fn wrapped(self, size: Self) -> Self {
        Self::new(self.x.rem_euclid(size.x), self.y.rem_euclid(size.y))
    }
}

impl Add for GridCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A rectangular block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridArea {
    /// Top-left cell
    pub pos: GridCoord,
    /// Columns and rows covered (each at least 1)
    pub span: GridCoord,
}

impl GridArea {
    /// Create a new grid area.
    #[must_use]
    pub const fn new(pos: GridCoord, span: GridCoord) -> Self {
        Self { pos, span }
    }

    /// Create a single-cell area.
    #[must_use]
    pub const fn cell(x: i32, y: i32) -> Self {
        Self::new(GridCoord::new(x, y), GridCoord::new(1, 1))
    }

    /// Set the span.
    #[must_use]
    pub const fn spanning(mut self, columns: i32, rows: i32) -> Self {
        self.span = GridCoord::new(columns, rows);
        self
    }

    /// Whether the area covers `coord`.
    #[must_use]
    pub const fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= self.pos.x
            && coord.y >= self.pos.y
            && coord.x < self.pos.x + self.span.x
            && coord.y < self.pos.y + self.span.y
    }

    /// Whether two areas share at least one cell.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.pos.x < other.pos.x + other.span.x
            && other.pos.x < self.pos.x + self.span.x
            && self.pos.y < other.pos.y + other.span.y
            && other.pos.y < self.pos.y + self.span.y
    }

    /// Whether the area lies inside a grid of `size`.
    #[must_use]
    pub const fn fits(&self, size: GridCoord) -> bool {
        self.span.x >= 1
            && self.span.y >= 1
            && self.pos.x >= 0
            && self.pos.y >= 0
            && self.pos.x + self.span.x <= size.x
            && self.pos.y + self.span.y <= size.y
    }
}

/// A track size specification.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TrackSize {
    /// Fraction of the grid size in `[0, 1]`
    Percent(f32),
    /// Equal share of the space left by percentage tracks
    #[default]
    Auto,
}

/// Resolve track sizes to `(start, size)` pairs.
#[must_use]
pub fn compute_track_sizes(tracks: &[TrackSize], available: f32) -> Vec<(f32, f32)> {
    let mut free = 1.0f32;
    let mut auto_count = 0usize;
    for track in tracks {
        match track {
            TrackSize::Percent(p) => free -= p,
            TrackSize::Auto => auto_count += 1,
        }
    }
    let auto_size = if auto_count == 0 {
        0.0
    } else {
        free.max(0.0) * available / auto_count as f32
    };

    let mut position = 0.0;
    tracks
        .iter()
        .map(|track| {
            let size = match track {
                TrackSize::Percent(p) => p * available,
                TrackSize::Auto => auto_size,
            };
            let start = position;
            position += size;
            (start, size)
        })
        .collect()
}

/// Computed column and row positions for a grid of a given pixel size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    /// Column positions and sizes (start, size)
    pub columns: Vec<(f32, f32)>,
    /// Row positions and sizes (start, size)
    pub rows: Vec<(f32, f32)>,
}

impl GridLayout {
    /// Resolve both axes.
    #[must_use]
    pub fn compute(columns: &[TrackSize], rows: &[TrackSize], size: Size) -> Self {
        Self {
            columns: compute_track_sizes(columns, size.width),
            rows: compute_track_sizes(rows, size.height),
        }
    }

    /// Pixel bounds of an area, relative to the grid's origin.
    #[must_use]
    pub fn area_bounds(&self, area: &GridArea) -> Rect {
        let axis = |tracks: &[(f32, f32)], start: i32, span: i32| {
            let start = start.max(0) as usize;
            let end = (start + span.max(0) as usize).min(tracks.len());
            let origin = tracks
                .get(start)
                .map_or_else(|| tracks.last().map_or(0.0, |(p, s)| p + s), |(p, _)| *p);
            let extent: f32 = tracks
                .get(start..end)
                .map_or(0.0, |t| t.iter().map(|(_, s)| s).sum());
            (origin, extent)
        };
        let (x, width) = axis(&self.columns, area.pos.x, area.span.x);
        let (y, height) = axis(&self.rows, area.pos.y, area.span.y);
        Rect::new(x, y, width, height)
    }

    /// Position that centres an item of `item` size inside `area`.
    #[must_use]
    pub fn centered_in(&self, area: &GridArea, item: Size) -> Point {
        let bounds = self.area_bounds(area);
        Point::new(
            bounds.x + (bounds.width - item.width) / 2.0,
            bounds.y + (bounds.height - item.height) / 2.0,
        )
    }
}

/// Which edges of a cell get a separator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Borders(u8);

impl Borders {
    /// No separators
    pub const NONE: Self = Self(0);
    /// Top edge
    pub const TOP: Self = Self(1);
    /// Bottom edge
    pub const BOTTOM: Self = Self(1 << 1);
    /// Left edge
    pub const LEFT: Self = Self(1 << 2);
    /// Right edge
    pub const RIGHT: Self = Self(1 << 3);
    /// Every edge
    pub const ALL: Self = Self(0b1111);

    /// Whether every edge in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no edge is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Line segments for the set edges of `bounds`, in top, bottom, left,
    /// right order.
    #[must_use]
    pub fn lines(self, bounds: &Rect) -> Vec<(Point, Point)> {
        let top_left = bounds.origin();
        let top_right = Point::new(bounds.right(), bounds.y);
        let bottom_left = Point::new(bounds.x, bounds.bottom());
        let bottom_right = Point::new(bounds.right(), bounds.bottom());

        [
            (Self::TOP, (top_left, top_right)),
            (Self::BOTTOM, (bottom_left, bottom_right)),
            (Self::LEFT, (top_left, bottom_left)),
            (Self::RIGHT, (top_right, bottom_right)),
        ]
        .into_iter()
        .filter(|(edge, _)| self.contains(*edge))
        .map(|(_, line)| line)
        .collect()
    }
}

impl BitOr for Borders {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Borders {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
