// ABOUTME: Technical sheet generation for measurement projects.
// ABOUTME: Lays out each set in millimeters and renders it as plain text.

pub mod sheet;
pub mod text;

pub use sheet::{layout_project, layout_set, CellRect, ProjectSheet, SetSheet};
pub use text::{render_grid, render_project, render_set};
