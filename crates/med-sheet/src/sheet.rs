// ABOUTME: Technical sheet layout for projects and their measurement sets.
// ABOUTME: Turns ratios and totals into millimeter rectangles for each placed opening.

use med_core::{MeasurementSet, OpeningType, Project, Side};
use med_layout::{compute_bounds, compute_spans, reconcile_ratios};

/// Title used for sets made of more than one opening
pub const COMPOSITE_TITLE: &str = "CONJUNTO";

/// Rectangle of one placed opening, in mm from the frame's top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct CellRect {
    pub type_id: OpeningType,
    pub col: usize,
    pub row: usize,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetSheet {
    pub code: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub cols: usize,
    pub rows: usize,
    pub col_widths: Vec<i64>,
    pub row_heights: Vec<i64>,
    pub cells: Vec<CellRect>,
    pub trim: Vec<Side>,
    pub location: String,
    pub glass: String,
    pub notes: String,
}

impl SetSheet {
    /// Partial widths are only worth printing with more than one column
    pub fn show_col_labels(&self) -> bool {
        self.cols > 1
    }

    pub fn show_row_labels(&self) -> bool {
        self.rows > 1
    }

    pub fn cell_at(&self, col: usize, row: usize) -> Option<&CellRect> {
        self.cells.iter().find(|c| c.col == col && c.row == row)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSheet {
    pub studio: String,
    pub name: String,
    pub client: String,
    pub address: String,
    pub line: Option<String>,
    pub color: Option<String>,
    pub glass: Option<String>,
    pub sets: Vec<SetSheet>,
}

pub fn set_title(set: &MeasurementSet) -> String {
    match set.modules.as_slice() {
        [] => "ABERTURA".to_string(),
        [only] => only.type_id.label().to_string(),
        _ => COMPOSITE_TITLE.to_string(),
    }
}

pub fn layout_set(set: &MeasurementSet) -> SetSheet {
    let bounds = compute_bounds(&set.modules);
    let col_ratios = reconcile_ratios(&set.col_ratios, bounds.cols);
    let row_ratios = reconcile_ratios(&set.row_ratios, bounds.rows);
    let col_widths = compute_spans(&col_ratios, set.width as f64);
    let row_heights = compute_spans(&row_ratios, set.height as f64);

    let col_offsets = offsets(&col_widths);
    let row_offsets = offsets(&row_heights);

    let cells = set
        .modules
        .iter()
        .map(|m| {
            let (col, row) = bounds.cell_of(m);
            CellRect {
                type_id: m.type_id,
                col,
                row,
                x: col_offsets[col],
                y: row_offsets[row],
                width: col_widths[col],
                height: row_heights[row],
            }
        })
        .collect();

    SetSheet {
        code: set.display_code().to_string(),
        title: set_title(set),
        width: set.width,
        height: set.height,
        cols: bounds.cols,
        rows: bounds.rows,
        col_widths,
        row_heights,
        cells,
        trim: set.trim.sides(),
        location: set.location.clone(),
        glass: set.glass.clone(),
        notes: set.notes.clone(),
    }
}

pub fn layout_project(project: &Project, studio: &str) -> ProjectSheet {
    ProjectSheet {
        studio: studio.to_string(),
        name: project.name.clone(),
        client: project.client.clone(),
        address: project.address.clone(),
        line: project.line.clone(),
        color: project.color.clone(),
        glass: project.glass.clone(),
        sets: project.measurements.iter().map(|m| layout_set(&m.set)).collect(),
    }
}

/// Running start position of each span
fn offsets(spans: &[i64]) -> Vec<i64> {
    let mut acc = 0;
    spans
        .iter()
        .map(|s| {
            let start = acc;
            acc += s;
            start
        })
        .collect()
}
