// ABOUTME: Measurement grid layout for openings.
// ABOUTME: Places modules on a sparse grid and splits total width/height by proportional ratios.

mod bounds;
mod grid;
mod ratios;
mod session;

pub use bounds::{compute_bounds, BoundingBox};
pub use grid::{
    expansion_handles, fits_grid, is_occupied, place_module, remove_module, Handle, Removal,
    MAX_GRID_LINES,
};
pub use ratios::{clamp_total, compute_spans, edit_span, parse_length, reconcile_ratios};
pub use session::{Command, EditSession, LayoutError, Outcome};
