// ABOUTME: Placement and removal of modules on the sparse measurement grid.
// ABOUTME: Also finds the open neighbour cells offered as expansion handles.

use med_core::{Module, OpeningType, Side};

use crate::bounds::span_len;

/// Most rows or columns a set may span
pub const MAX_GRID_LINES: usize = 64;

/// Result of removing a module from the grid
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    /// The module is gone and the rest are kept in order
    Removed(Vec<Module>),
    /// The sole module was removed: the grid starts over empty and the
    /// type picker reopens at the origin
    Reset,
    /// Index out of range, nothing removed
    Unchanged,
}

/// An unoccupied neighbour of a placed module where a new one can go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle {
    /// Index of the module the handle hangs off
    pub module: usize,
    pub side: Side,
    pub x: i32,
    pub y: i32,
}

pub fn is_occupied(modules: &[Module], x: i32, y: i32) -> bool {
    modules.iter().any(|m| m.at(x, y))
}

/// Whether a module at (x, y) keeps the grid within `MAX_GRID_LINES` on both axes
pub fn fits_grid(modules: &[Module], x: i32, y: i32) -> bool {
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (x, x, y, y);
    for m in modules {
        min_x = min_x.min(m.x);
        max_x = max_x.max(m.x);
        min_y = min_y.min(m.y);
        max_y = max_y.max(m.y);
    }
    span_len(min_x, max_x) <= MAX_GRID_LINES && span_len(min_y, max_y) <= MAX_GRID_LINES
}

/// Place a module at (x, y), or `None` if that cell is taken
pub fn place_module(
    modules: &[Module],
    type_id: OpeningType,
    x: i32,
    y: i32,
) -> Option<Vec<Module>> {
    if is_occupied(modules, x, y) {
        return None;
    }
    let mut next = modules.to_vec();
    next.push(Module::new(type_id, x, y));
    Some(next)
}

pub fn remove_module(modules: &[Module], index: usize) -> Removal {
    if modules.len() <= 1 {
        return Removal::Reset;
    }
    if index >= modules.len() {
        return Removal::Unchanged;
    }
    let mut next = modules.to_vec();
    next.remove(index);
    Removal::Removed(next)
}

/// Open neighbour cells of every module, in module order then top/bottom/left/right
pub fn expansion_handles(modules: &[Module]) -> Vec<Handle> {
    let mut handles = Vec::new();
    for (idx, m) in modules.iter().enumerate() {
        for side in Side::all() {
            let (dx, dy) = side.offset();
            let (Some(x), Some(y)) = (m.x.checked_add(dx), m.y.checked_add(dy)) else {
                continue;
            };
            if !is_occupied(modules, x, y) {
                handles.push(Handle {
                    module: idx,
                    side: *side,
                    x,
                    y,
                });
            }
        }
    }
    handles
}
