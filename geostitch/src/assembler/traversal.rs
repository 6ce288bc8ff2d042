//! Row-major geodesic traversal of the tile grid.
//!
//! Walks the planned grid one tile at a time, yielding for each tile its
//! grid indices, geographic center, and pixel offset in the output canvas.
//! The first center sits half a tile diagonal southeast of the rectangle's
//! upper-left corner; within a row the cursor steps due east one tile span
//! at a time; each new row restarts from the previous row's start stepped
//! due south, never from the running cursor, so east-west stepping error
//! cannot compound into north-south drift.

use crate::geo::stepper::{
    geodesic_destination, BEARING_EAST, BEARING_SOUTH, BEARING_SOUTHEAST,
};
use crate::geo::GeoPoint;
use crate::grid::GridPlan;

/// One tile's precomputed placement: where on Earth it is centered and
/// where in the canvas it lands.
///
/// Fully determined by the grid indices; this pair is the whole correctness
/// contract between traversal and assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    /// Row index in the grid (0 = northmost).
    pub grid_row: u32,
    /// Column index in the grid (0 = westmost).
    pub grid_col: u32,
    /// Geographic center of the tile.
    pub center: GeoPoint,
    /// Horizontal pixel offset of the tile's top-left corner in the canvas.
    pub offset_x: u32,
    /// Vertical pixel offset of the tile's top-left corner in the canvas.
    pub offset_y: u32,
}

/// Iterator yielding every tile placement of a [`GridPlan`] in row-major
/// order.
///
/// # Example
///
/// ```
/// use geostitch::assembler::GridTraversal;
/// use geostitch::config::StitchConfig;
/// use geostitch::geo::{GeoPoint, MapArea};
/// use geostitch::grid;
///
/// let area = MapArea::new(
///     GeoPoint::new(50.070309, 20.148801).unwrap(),
///     GeoPoint::new(50.066805, 20.152602).unwrap(),
///     17,
/// )
/// .unwrap();
/// let plan = grid::plan(&area, &StitchConfig::default()).unwrap();
/// let placements: Vec<_> = GridTraversal::new(area.upper_left(), &plan).collect();
/// assert_eq!(placements.len() as u32, plan.tile_count());
/// ```
pub struct GridTraversal {
    tiles_x: u32,
    tiles_y: u32,
    tile_size_px: u32,
    step_distance_m: f64,
    /// Center of the current row's first tile.
    row_start: GeoPoint,
    /// Center of the next tile to yield.
    cursor: GeoPoint,
    grid_row: u32,
    grid_col: u32,
}

impl GridTraversal {
    /// Start a traversal at the first (northwest) tile of the plan.
    pub fn new(upper_left: GeoPoint, plan: &GridPlan) -> Self {
        let first_center =
            geodesic_destination(upper_left, BEARING_SOUTHEAST, plan.diagonal_distance_m);
        Self {
            tiles_x: plan.tiles_x,
            tiles_y: plan.tiles_y,
            tile_size_px: plan.tile_size_px,
            step_distance_m: plan.step_distance_m,
            row_start: first_center,
            cursor: first_center,
            grid_row: 0,
            grid_col: 0,
        }
    }

    fn remaining(&self) -> usize {
        let total = self.tiles_x as u64 * self.tiles_y as u64;
        let done = self.grid_row as u64 * self.tiles_x as u64 + self.grid_col as u64;
        (total - done) as usize
    }
}

impl Iterator for GridTraversal {
    type Item = TilePlacement;

    fn next(&mut self) -> Option<TilePlacement> {
        if self.grid_row >= self.tiles_y {
            return None;
        }

        let placement = TilePlacement {
            grid_row: self.grid_row,
            grid_col: self.grid_col,
            center: self.cursor,
            offset_x: self.grid_col * self.tile_size_px,
            offset_y: self.grid_row * self.tile_size_px,
        };

        if self.grid_col + 1 < self.tiles_x {
            self.cursor = geodesic_destination(self.cursor, BEARING_EAST, self.step_distance_m);
            self.grid_col += 1;
        } else {
            // Re-derive the next row's west edge from this row's start
            self.row_start =
                geodesic_destination(self.row_start, BEARING_SOUTH, self.step_distance_m);
            self.cursor = self.row_start;
            self.grid_col = 0;
            self.grid_row += 1;
        }

        Some(placement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridTraversal {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::stepper::geodesic_distance;

    fn test_plan(tiles_x: u32, tiles_y: u32) -> GridPlan {
        // Roughly zoom 17 at 50N with 640 px tiles
        let meter_per_pixel = 0.7666;
        GridPlan {
            meter_per_pixel,
            canvas_width_px: tiles_x * 640,
            canvas_height_px: tiles_y * 640,
            tiles_x,
            tiles_y,
            tile_size_px: 640,
            step_distance_m: 640.0 * meter_per_pixel,
            diagonal_distance_m: std::f64::consts::SQRT_2 * 640.0 * meter_per_pixel / 2.0,
        }
    }

    fn upper_left() -> GeoPoint {
        GeoPoint::new(50.070309, 20.148801).unwrap()
    }

    #[test]
    fn test_yields_exactly_tile_count_placements() {
        let plan = test_plan(3, 2);
        let placements: Vec<_> = GridTraversal::new(upper_left(), &plan).collect();
        assert_eq!(placements.len(), 6);
    }

    #[test]
    fn test_exact_size_iterator() {
        let plan = test_plan(3, 2);
        let mut traversal = GridTraversal::new(upper_left(), &plan);
        assert_eq!(traversal.len(), 6);
        traversal.next();
        assert_eq!(traversal.len(), 5);
        for _ in traversal.by_ref() {}
        assert_eq!(traversal.len(), 0);
    }

    #[test]
    fn test_row_major_order_and_offsets() {
        let plan = test_plan(2, 2);
        let placements: Vec<_> = GridTraversal::new(upper_left(), &plan).collect();

        let expected = [(0, 0, 0, 0), (0, 1, 640, 0), (1, 0, 0, 640), (1, 1, 640, 640)];
        for (placement, (row, col, x, y)) in placements.iter().zip(expected) {
            assert_eq!(placement.grid_row, row);
            assert_eq!(placement.grid_col, col);
            assert_eq!(placement.offset_x, x);
            assert_eq!(placement.offset_y, y);
        }
    }

    #[test]
    fn test_first_center_is_half_diagonal_southeast_of_corner() {
        let plan = test_plan(1, 1);
        let ul = upper_left();
        let first = GridTraversal::new(ul, &plan).next().unwrap();

        assert!(first.center.lat() < ul.lat());
        assert!(first.center.lon() > ul.lon());
        let d = geodesic_distance(ul, first.center);
        assert!(
            (d - plan.diagonal_distance_m).abs() < 0.01,
            "first center was {} m from the corner, expected {}",
            d,
            plan.diagonal_distance_m
        );
    }

    #[test]
    fn test_adjacent_columns_are_one_step_apart() {
        let plan = test_plan(3, 1);
        let placements: Vec<_> = GridTraversal::new(upper_left(), &plan).collect();

        for pair in placements.windows(2) {
            let d = geodesic_distance(pair[0].center, pair[1].center);
            assert!(
                (d - plan.step_distance_m).abs() < 0.01,
                "column spacing was {} m",
                d
            );
        }
    }

    #[test]
    fn test_rows_restart_on_the_west_edge() {
        let plan = test_plan(3, 3);
        let placements: Vec<_> = GridTraversal::new(upper_left(), &plan).collect();

        let row_starts: Vec<_> = placements
            .iter()
            .filter(|p| p.grid_col == 0)
            .map(|p| p.center)
            .collect();
        assert_eq!(row_starts.len(), 3);

        // Stepping due south follows the meridian, so every row start
        // shares the first row's longitude
        for start in &row_starts[1..] {
            assert!(
                (start.lon() - row_starts[0].lon()).abs() < 1e-9,
                "row start drifted east-west: {} vs {}",
                start.lon(),
                row_starts[0].lon()
            );
        }

        // And consecutive row starts are one step apart going south
        for pair in row_starts.windows(2) {
            assert!(pair[1].lat() < pair[0].lat());
            let d = geodesic_distance(pair[0], pair[1]);
            assert!(
                (d - plan.step_distance_m).abs() < 0.01,
                "row spacing was {} m",
                d
            );
        }
    }

    #[test]
    fn test_single_tile_grid_yields_one_placement() {
        let plan = test_plan(1, 1);
        let placements: Vec<_> = GridTraversal::new(upper_left(), &plan).collect();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].offset_x, 0);
        assert_eq!(placements[0].offset_y, 0);
    }
}
