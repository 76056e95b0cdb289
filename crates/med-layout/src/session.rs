// ABOUTME: Edit session over one measurement set, driven by command values.
// ABOUTME: Keeps ratio arrays in step with the grid bounds after every change.

use med_core::{MeasurementSet, Module, OpeningType, Side};

use crate::bounds::{compute_bounds, BoundingBox};
use crate::grid::{self, Handle, Removal};
use crate::ratios::{self, clamp_total, compute_spans, edit_span, parse_length};

/// One user action against the draft set
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the type picker targeting a grid cell
    OpenPicker { x: i32, y: i32 },
    ClosePicker,
    /// Place the chosen type at the picker's cell
    Choose(OpeningType),
    Place { type_id: OpeningType, x: i32, y: i32 },
    Remove(usize),
    SetWidth(String),
    SetHeight(String),
    /// Type a literal width for one column
    SetColumnSpan { index: usize, value: String },
    /// Type a literal height for one row
    SetRowSpan { index: usize, value: String },
    SetCode(String),
    SetLocation(String),
    SetGlass(String),
    SetNotes(String),
    ToggleTrim(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
    /// The last module was removed and the grid started over
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Select at least one opening before saving")]
    NoModules,
}

/// Draft state of a measurement set while it is being edited
#[derive(Debug, Clone)]
pub struct EditSession {
    set: MeasurementSet,
    picker: Option<(i32, i32)>,
}

impl EditSession {
    /// Start an empty set with the picker open at the origin
    pub fn new(width: u32, height: u32) -> Self {
        let mut session = Self {
            set: MeasurementSet::new(width, height),
            picker: Some((0, 0)),
        };
        session.sync_ratios();
        session
    }

    /// Edit an existing set; stale or missing ratios are reset to the grid shape
    pub fn open(set: MeasurementSet) -> Self {
        let mut session = Self { set, picker: None };
        session.sync_ratios();
        session
    }

    pub fn set(&self) -> &MeasurementSet {
        &self.set
    }

    pub fn modules(&self) -> &[Module] {
        &self.set.modules
    }

    /// Cell the type picker is targeting, if open
    pub fn picker(&self) -> Option<(i32, i32)> {
        self.picker
    }

    pub fn bounds(&self) -> BoundingBox {
        compute_bounds(&self.set.modules)
    }

    pub fn col_ratios(&self) -> &[f64] {
        &self.set.col_ratios
    }

    pub fn row_ratios(&self) -> &[f64] {
        &self.set.row_ratios
    }

    /// Column widths in mm
    pub fn col_spans(&self) -> Vec<i64> {
        compute_spans(&self.set.col_ratios, self.set.width as f64)
    }

    /// Row heights in mm
    pub fn row_spans(&self) -> Vec<i64> {
        compute_spans(&self.set.row_ratios, self.set.height as f64)
    }

    pub fn handles(&self) -> Vec<Handle> {
        grid::expansion_handles(&self.set.modules)
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::OpenPicker { x, y } => {
                if grid::is_occupied(&self.set.modules, x, y)
                    || !grid::fits_grid(&self.set.modules, x, y)
                {
                    return Outcome::Unchanged;
                }
                self.picker = Some((x, y));
                Outcome::Changed
            }
            Command::ClosePicker => match self.picker.take() {
                Some(_) => Outcome::Changed,
                None => Outcome::Unchanged,
            },
            Command::Choose(type_id) => match self.picker {
                Some((x, y)) => self.place(type_id, x, y),
                None => Outcome::Unchanged,
            },
            Command::Place { type_id, x, y } => self.place(type_id, x, y),
            Command::Remove(index) => self.remove(index),
            Command::SetWidth(text) => {
                self.set.width = parse_dimension(&text);
                Outcome::Changed
            }
            Command::SetHeight(text) => {
                self.set.height = parse_dimension(&text);
                Outcome::Changed
            }
            Command::SetColumnSpan { index, value } => {
                if index >= self.set.col_ratios.len() {
                    return Outcome::Unchanged;
                }
                self.set.col_ratios = edit_span(
                    &self.set.col_ratios,
                    index,
                    parse_length(&value),
                    clamp_total(self.set.width as f64),
                );
                Outcome::Changed
            }
            Command::SetRowSpan { index, value } => {
                if index >= self.set.row_ratios.len() {
                    return Outcome::Unchanged;
                }
                self.set.row_ratios = edit_span(
                    &self.set.row_ratios,
                    index,
                    parse_length(&value),
                    clamp_total(self.set.height as f64),
                );
                Outcome::Changed
            }
            Command::SetCode(text) => {
                self.set.code = text;
                Outcome::Changed
            }
            Command::SetLocation(text) => {
                self.set.location = text;
                Outcome::Changed
            }
            Command::SetGlass(text) => {
                self.set.glass = text;
                Outcome::Changed
            }
            Command::SetNotes(text) => {
                self.set.notes = text;
                Outcome::Changed
            }
            Command::ToggleTrim(side) => {
                self.set.trim.toggle(side);
                Outcome::Changed
            }
        }
    }

    /// The set ready to be persisted; an empty code gets `placeholder_code`
    pub fn finish(&self, placeholder_code: &str) -> Result<MeasurementSet, LayoutError> {
        if !self.set.has_modules() {
            return Err(LayoutError::NoModules);
        }
        let mut set = self.set.clone();
        if set.code.trim().is_empty() {
            set.code = placeholder_code.to_string();
        }
        Ok(set)
    }

    fn place(&mut self, type_id: OpeningType, x: i32, y: i32) -> Outcome {
        if !grid::fits_grid(&self.set.modules, x, y) {
            tracing::debug!("Cell ({}, {}) is outside the grid limits", x, y);
            return Outcome::Unchanged;
        }
        let Some(modules) = grid::place_module(&self.set.modules, type_id, x, y) else {
            tracing::debug!("Cell ({}, {}) already taken", x, y);
            return Outcome::Unchanged;
        };
        self.set.modules = modules;
        self.picker = None;
        tracing::debug!("Placed {} at ({}, {})", type_id, x, y);
        self.sync_ratios();
        Outcome::Changed
    }

    fn remove(&mut self, index: usize) -> Outcome {
        match grid::remove_module(&self.set.modules, index) {
            Removal::Removed(modules) => {
                self.set.modules = modules;
                tracing::debug!("Removed module {}", index);
                self.sync_ratios();
                Outcome::Changed
            }
            Removal::Reset => {
                self.set.modules.clear();
                self.picker = Some((0, 0));
                tracing::debug!("Removed last module, grid reset");
                self.sync_ratios();
                Outcome::Reset
            }
            Removal::Unchanged => Outcome::Unchanged,
        }
    }

    fn sync_ratios(&mut self) {
        let bounds = self.bounds();
        if self.set.col_ratios.len() != bounds.cols {
            tracing::debug!("Column ratios reset to {} entries", bounds.cols);
            self.set.col_ratios = ratios::reconcile_ratios(&self.set.col_ratios, bounds.cols);
        }
        if self.set.row_ratios.len() != bounds.rows {
            tracing::debug!("Row ratios reset to {} entries", bounds.rows);
            self.set.row_ratios = ratios::reconcile_ratios(&self.set.row_ratios, bounds.rows);
        }
    }
}

/// Whole millimeters from typed text; negatives and garbage become 0
fn parse_dimension(text: &str) -> u32 {
    let value = parse_length(text).max(0.0).trunc();
    if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value as u32
    }
}
