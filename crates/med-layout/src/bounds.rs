// ABOUTME: Bounding box of a sparse module grid.
// ABOUTME: Maps unbounded grid coordinates onto zero-based rendered rows and columns.

use med_core::Module;

/// Extent of the placed modules on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub cols: usize,
    pub rows: usize,
}

impl BoundingBox {
    /// The single origin cell used when nothing is placed yet
    pub fn origin() -> Self {
        Self {
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
            cols: 1,
            rows: 1,
        }
    }

    /// Rendered (column, row) of a module, counted from the top-left of the box
    pub fn cell_of(&self, module: &Module) -> (usize, usize) {
        (
            span_len(self.min_x, module.x) - 1,
            span_len(self.min_y, module.y) - 1,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::origin()
    }
}

pub fn compute_bounds(modules: &[Module]) -> BoundingBox {
    let Some(first) = modules.first() else {
        return BoundingBox::origin();
    };

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for m in &modules[1..] {
        min_x = min_x.min(m.x);
        max_x = max_x.max(m.x);
        min_y = min_y.min(m.y);
        max_y = max_y.max(m.y);
    }

    BoundingBox {
        min_x,
        max_x,
        min_y,
        max_y,
        cols: span_len(min_x, max_x),
        rows: span_len(min_y, max_y),
    }
}

/// Number of grid lines from `lo` to `hi` inclusive, without i32 overflow
pub(crate) fn span_len(lo: i32, hi: i32) -> usize {
    (hi as i64 - lo as i64 + 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use med_core::OpeningType;

    fn m(x: i32, y: i32) -> Module {
        Module::new(OpeningType::PanoFijo, x, y)
    }

    #[test]
    fn empty_grid_is_one_cell() {
        let bounds = compute_bounds(&[]);
        assert_eq!(bounds, BoundingBox::origin());
        assert_eq!((bounds.cols, bounds.rows), (1, 1));
    }

    #[test]
    fn extent_covers_every_module() {
        let modules = [m(2, 0), m(-1, 3), m(0, -2)];
        let bounds = compute_bounds(&modules);
        assert_eq!((bounds.min_x, bounds.max_x), (-1, 2));
        assert_eq!((bounds.min_y, bounds.max_y), (-2, 3));
        assert_eq!(bounds.cols, 4);
        assert_eq!(bounds.rows, 6);
    }

    #[test]
    fn holes_still_count_as_lines() {
        // An L shape leaves (1, 1) empty but the box is still 2x2
        let bounds = compute_bounds(&[m(0, 0), m(1, 0), m(0, 1)]);
        assert_eq!((bounds.cols, bounds.rows), (2, 2));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let modules = [m(i32::MIN, 0), m(i32::MAX, i32::MIN)];
        let bounds = compute_bounds(&modules);
        assert_eq!(bounds.cols as u64, 1u64 << 32);
        assert_eq!(bounds.rows, (1usize << 31) + 1);
        assert_eq!(bounds.cell_of(&modules[1]), (u32::MAX as usize, 0));
    }

    #[test]
    fn cells_are_relative_to_the_minimum() {
        let modules = [m(0, 0), m(0, -1)];
        let bounds = compute_bounds(&modules);
        assert_eq!(bounds.min_y, -1);
        assert_eq!(bounds.rows, 2);
        assert_eq!(bounds.cell_of(&modules[0]), (0, 1));
        assert_eq!(bounds.cell_of(&modules[1]), (0, 0));
    }
}
