//! Directional focus navigation over grids of spanning cells.
//!
//! Navigation runs in two stages. The linear probe walks from the cursor in
//! the input direction and accepts the first focusable cell that is not the
//! cursor's own cell. For vertical moves a perpendicular fan-out follows
//! when the probe fails: row by row along the direction, the search spreads
//! sideways from the cursor's column, alternating forward and backward.

use crate::grid::{GridArea, GridCoord};

/// Whether the linear probe wraps around the grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    /// Wrap with euclidean modulo; stop when back at the cursor
    Yes,
    /// Stop at the grid edge
    #[default]
    No,
}

/// What the navigator needs to know about the cell covering a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCell {
    /// Stable identity of the cell (distinguishes spanning cells)
    pub index: usize,
    /// Whether the cell can take focus
    pub focusable: bool,
}

/// A grid the navigator can search.
pub trait FocusGrid {
    /// Columns and rows.
    fn grid_size(&self) -> GridCoord;

    /// The cell covering `coord`, if any.
    fn cell_at(&self, coord: GridCoord) -> Option<FocusCell>;
}

fn accepts(grid: &impl FocusGrid, coord: GridCoord, current: Option<usize>) -> bool {
    grid.cell_at(coord)
        .is_some_and(|cell| cell.focusable && Some(cell.index) != current)
}

/// Linear probe from `cursor` along `dir`.
#[must_use]
pub fn probe(
    grid: &impl FocusGrid,
    cursor: GridCoord,
    dir: GridCoord,
    wrap: Wrap,
) -> Option<GridCoord> {
    if dir == GridCoord::default() {
        return None;
    }
    let size = grid.grid_size();
    let current = grid.cell_at(cursor).map(|c| c.index);

    let step = |pos: GridCoord| match wrap {
        Wrap::Yes => (pos + dir).wrapped(size),
        Wrap::No => pos + dir,
    };

    let mut candidate = step(cursor);
    loop {
        let keep_going = match wrap {
            Wrap::Yes => candidate != cursor,
            Wrap::No => candidate.in_bounds(size),
        };
        if !keep_going {
            return None;
        }
        if accepts(grid, candidate, current) {
            return Some(candidate);
        }
        candidate = step(candidate);
    }
}

/// Perpendicular fan-out from `cursor` along `dir`.
#[must_use]
pub fn fan_out(grid: &impl FocusGrid, cursor: GridCoord, dir: GridCoord) -> Option<GridCoord> {
    if dir == GridCoord::default() {
        return None;
    }
    let size = grid.grid_size();
    let current = grid.cell_at(cursor).map(|c| c.index);
    let axis = GridCoord::new(i32::from(dir.x == 0), i32::from(dir.y == 0));
    let reach = size.x.max(size.y);

    let mut line = cursor + dir;
    while line.in_bounds(size) {
        for offset in 0..reach {
            let forward = GridCoord::new(line.x + axis.x * offset, line.y + axis.y * offset);
            let backward = GridCoord::new(line.x - axis.x * offset, line.y - axis.y * offset);
            let forward_in = forward.in_bounds(size);
            let backward_in = backward.in_bounds(size);
            if !forward_in && !backward_in {
                break;
            }
            if forward_in && accepts(grid, forward, current) {
                return Some(forward);
            }
            if offset > 0 && backward_in && accepts(grid, backward, current) {
                return Some(backward);
            }
        }
        line = line + dir;
    }
    None
}

/// Full directional move: probe, then fan-out for vertical directions.
///
/// Returns the coordinate the cursor should move to, or `None` when there
/// is nowhere to go.
#[must_use]
pub fn navigate(
    grid: &impl FocusGrid,
    cursor: GridCoord,
    dir: GridCoord,
    wrap: Wrap,
) -> Option<GridCoord> {
    probe(grid, cursor, dir, wrap).or_else(|| {
        if dir.x == 0 {
            fan_out(grid, cursor, dir)
        } else {
            None
        }
    })
}

// =============================================================================
// CellMap
// =============================================================================

/// A placed cell: its area and focus flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCell {
    /// Covered area
    pub area: GridArea,
    /// Whether the cell can take focus
    pub focusable: bool,
}

/// Occupancy of a fixed-size grid.
///
/// Cells are identified by insertion index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMap {
    size: GridCoord,
    cells: Vec<PlacedCell>,
}

impl CellMap {
    /// Create an empty map.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    #[must_use]
    pub fn new(size: GridCoord) -> Self {
        assert!(
            size.x > 0 && size.y > 0,
            "grid dimensions must be positive, got {size:?}"
        );
        Self {
            size,
            cells: Vec::new(),
        }
    }

    /// Place a cell and return its index.
    ///
    /// # Panics
    ///
    /// Panics if the area leaves the grid or overlaps an existing cell.
    pub fn place(&mut self, area: GridArea, focusable: bool) -> usize {
        assert!(area.fits(self.size), "cell {area:?} exceeds grid {:?}", self.size);
        assert!(
            !self.cells.iter().any(|c| c.area.overlaps(&area)),
            "cell {area:?} overlaps an existing cell"
        );
        self.cells.push(PlacedCell { area, focusable });
        self.cells.len() - 1
    }

    /// Placed cells in insertion order.
    #[must_use]
    pub fn cells(&self) -> &[PlacedCell] {
        &self.cells
    }

    /// Index of the cell covering `coord`.
    #[must_use]
    pub fn index_at(&self, coord: GridCoord) -> Option<usize> {
        if !coord.in_bounds(self.size) {
            return None;
        }
        self.cells.iter().position(|c| c.area.contains(coord))
    }

    /// Anchor of the first focusable cell.
    #[must_use]
    pub fn first_focusable(&self) -> Option<GridCoord> {
        self.cells.iter().find(|c| c.focusable).map(|c| c.area.pos)
    }

    /// Whether `coord` is covered by a focusable cell.
    #[must_use]
    pub fn is_focusable(&self, coord: GridCoord) -> bool {
        self.index_at(coord)
            .is_some_and(|i| self.cells[i].focusable)
    }
}

impl FocusGrid for CellMap {
    fn grid_size(&self) -> GridCoord {
        self.size
    }

    fn cell_at(&self, coord: GridCoord) -> Option<FocusCell> {
        self.index_at(coord).map(|index| FocusCell {
            index,
            focusable: self.cells[index].focusable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const UP: GridCoord = GridCoord::new(0, -1);
    const DOWN: GridCoord = GridCoord::new(0, 1);
    const LEFT: GridCoord = GridCoord::new(-1, 0);
    const RIGHT: GridCoord = GridCoord::new(1, 0);

    fn uniform(cols: i32, rows: i32) -> CellMap {
        let mut map = CellMap::new(GridCoord::new(cols, rows));
        for y in 0..rows {
            for x in 0..cols {
                map.place(GridArea::cell(x, y), true);
            }
        }
        map
    }

    // =========================================================================
    // Probe Tests
    // =========================================================================

    #[test]
    fn test_probe_no_wrap_stops_at_edge() {
        let map = uniform(3, 1);
        let at_edge = GridCoord::new(2, 0);
        assert_eq!(probe(&map, at_edge, RIGHT, Wrap::No), None);
        assert_eq!(
            probe(&map, GridCoord::new(0, 0), RIGHT, Wrap::No),
            Some(GridCoord::new(1, 0))
        );
    }

    #[test]
    fn test_probe_wrap_goes_around() {
        let map = uniform(3, 1);
        assert_eq!(
            probe(&map, GridCoord::new(2, 0), RIGHT, Wrap::Yes),
            Some(GridCoord::new(0, 0))
        );
        assert_eq!(
            probe(&map, GridCoord::new(0, 0), LEFT, Wrap::Yes),
            Some(GridCoord::new(2, 0))
        );
    }

    #[test]
    fn test_probe_wrap_single_focusable_fails() {
        let mut map = CellMap::new(GridCoord::new(3, 1));
        map.place(GridArea::cell(0, 0), true);
        map.place(GridArea::cell(1, 0), false);
        assert_eq!(probe(&map, GridCoord::new(0, 0), RIGHT, Wrap::Yes), None);
    }

    #[test]
    fn test_probe_skips_own_spanning_cell() {
        let mut map = CellMap::new(GridCoord::new(4, 1));
        map.place(GridArea::cell(0, 0).spanning(3, 1), true);
        map.place(GridArea::cell(3, 0), true);
        assert_eq!(
            probe(&map, GridCoord::new(0, 0), RIGHT, Wrap::No),
            Some(GridCoord::new(3, 0))
        );
    }

    #[test]
    fn test_probe_skips_unfocusable_and_empty() {
        let mut map = CellMap::new(GridCoord::new(1, 4));
        map.place(GridArea::cell(0, 0), true);
        map.place(GridArea::cell(0, 1), false);
        map.place(GridArea::cell(0, 3), true);
        assert_eq!(
            probe(&map, GridCoord::new(0, 0), DOWN, Wrap::No),
            Some(GridCoord::new(0, 3))
        );
    }

    // =========================================================================
    // Fan-out Tests
    // =========================================================================

    #[test]
    fn test_fan_out_prefers_forward_offset() {
        // row 0: cursor at column 1; row 1: focusable at columns 0 and 2
        let mut map = CellMap::new(GridCoord::new(3, 2));
        map.place(GridArea::cell(1, 0), true);
        map.place(GridArea::cell(0, 1), true);
        map.place(GridArea::cell(2, 1), true);
        assert_eq!(
            fan_out(&map, GridCoord::new(1, 0), DOWN),
            Some(GridCoord::new(2, 1))
        );
    }

    #[test]
    fn test_fan_out_nearest_offset_wins() {
        let mut map = CellMap::new(GridCoord::new(5, 2));
        map.place(GridArea::cell(3, 0), true);
        map.place(GridArea::cell(2, 1), true);
        map.place(GridArea::cell(0, 1), true);
        // offset 1 backward (2) beats offset 3 backward (0)
        assert_eq!(
            fan_out(&map, GridCoord::new(3, 0), DOWN),
            Some(GridCoord::new(2, 1))
        );
    }

    #[test]
    fn test_fan_out_continues_to_later_rows() {
        let mut map = CellMap::new(GridCoord::new(3, 3));
        map.place(GridArea::cell(0, 0), true);
        map.place(GridArea::cell(2, 2), true);
        assert_eq!(
            fan_out(&map, GridCoord::new(0, 0), DOWN),
            Some(GridCoord::new(2, 2))
        );
    }

    #[test]
    fn test_fan_out_exhausted() {
        let mut map = CellMap::new(GridCoord::new(3, 3));
        map.place(GridArea::cell(0, 2), true);
        assert_eq!(fan_out(&map, GridCoord::new(0, 2), DOWN), None);
        assert_eq!(fan_out(&map, GridCoord::new(0, 2), UP), None);
    }

    #[test]
    fn test_navigate_uses_fan_out_for_vertical_only() {
        let mut map = CellMap::new(GridCoord::new(3, 2));
        map.place(GridArea::cell(0, 0), true);
        map.place(GridArea::cell(2, 1), true);
        assert_eq!(
            navigate(&map, GridCoord::new(0, 0), DOWN, Wrap::No),
            Some(GridCoord::new(2, 1))
        );
        assert_eq!(navigate(&map, GridCoord::new(0, 0), RIGHT, Wrap::No), None);
    }

    #[test]
    fn test_zero_direction_is_no_move() {
        let map = uniform(2, 2);
        assert_eq!(
            navigate(&map, GridCoord::new(0, 0), GridCoord::default(), Wrap::Yes),
            None
        );
    }

    // =========================================================================
    // CellMap Tests
    // =========================================================================

    #[test]
    fn test_cell_map_lookup() {
        let mut map = CellMap::new(GridCoord::new(2, 2));
        let a = map.place(GridArea::cell(0, 0).spanning(2, 1), false);
        let b = map.place(GridArea::cell(1, 1), true);
        assert_eq!(map.index_at(GridCoord::new(1, 0)), Some(a));
        assert_eq!(map.index_at(GridCoord::new(1, 1)), Some(b));
        assert_eq!(map.index_at(GridCoord::new(0, 1)), None);
        assert_eq!(map.index_at(GridCoord::new(5, 5)), None);
        assert_eq!(map.first_focusable(), Some(GridCoord::new(1, 1)));
        assert!(map.is_focusable(GridCoord::new(1, 1)));
    }

    #[test]
    #[should_panic(expected = "overlaps")]
    fn test_cell_map_rejects_overlap() {
        let mut map = CellMap::new(GridCoord::new(2, 2));
        map.place(GridArea::cell(0, 0).spanning(2, 2), true);
        map.place(GridArea::cell(1, 1), true);
    }

    #[test]
    #[should_panic(expected = "exceeds grid")]
    fn test_cell_map_rejects_out_of_bounds() {
        let mut map = CellMap::new(GridCoord::new(2, 2));
        map.place(GridArea::cell(1, 0).spanning(2, 1), true);
    }

    fn direction() -> impl Strategy<Value = GridCoord> {
        prop_oneof![Just(UP), Just(DOWN), Just(LEFT), Just(RIGHT)]
    }

    proptest! {
        #[test]
        fn prop_wrap_returns_to_start(cols in 1i32..6, rows in 1i32..6, sx in 0i32..6, sy in 0i32..6, dir in direction()) {
            let map = uniform(cols, rows);
            let start = GridCoord::new(sx % cols, sy % rows);
            let mut cursor = start;
            let mut returned = false;
            for _ in 0..(cols * rows) {
                match probe(&map, cursor, dir, Wrap::Yes) {
                    Some(next) => cursor = next,
                    None => break,
                }
                if cursor == start {
                    returned = true;
                    break;
                }
            }
            let line_len = if dir.x == 0 { rows } else { cols };
            // a line of one cell has nowhere to go
            prop_assert!(returned || line_len == 1);
        }

        #[test]
        fn prop_no_wrap_at_boundary_is_no_move(cols in 1i32..6, rows in 1i32..6, dir in direction()) {
            let map = uniform(cols, rows);
            let edge = GridCoord::new(
                if dir.x > 0 { cols - 1 } else { 0 },
                if dir.y > 0 { rows - 1 } else { 0 },
            );
            let edge = GridCoord::new(if dir.x == 0 { 0 } else { edge.x }, if dir.y == 0 { 0 } else { edge.y });
            prop_assert_eq!(navigate(&map, edge, dir, Wrap::No), None);
        }

        #[test]
        fn prop_navigate_lands_on_distinct_focusable(
            cols in 1i32..6,
            rows in 1i32..6,
            mask in prop::collection::vec(any::<bool>(), 36),
            dir in direction(),
            wrap in prop_oneof![Just(Wrap::Yes), Just(Wrap::No)],
        ) {
            let mut map = CellMap::new(GridCoord::new(cols, rows));
            for y in 0..rows {
                for x in 0..cols {
                    map.place(GridArea::cell(x, y), mask[(y * 6 + x) as usize]);
                }
            }
            let cursor = GridCoord::new(0, 0);
            if let Some(target) = navigate(&map, cursor, dir, wrap) {
                prop_assert!(map.is_focusable(target));
                prop_assert_ne!(target, cursor);
            }
        }
    }
}
