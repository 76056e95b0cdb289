// ABOUTME: Plain-text rendering of technical sheets.
// ABOUTME: Draws each set as a labelled character grid with its partial dimensions.

use std::fmt::Write;

use crate::sheet::{ProjectSheet, SetSheet};

const CELL_WIDTH: usize = 14;

pub fn render_project(sheet: &ProjectSheet) -> String {
    let mut out = String::new();
    let rule = "=".repeat(48);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "PLANILLA TECNICA - {}", sheet.studio);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Proyecto:    {}", sheet.name);
    let _ = writeln!(out, "Cliente:     {}", sheet.client);
    let _ = writeln!(out, "Obra:        {}", or_default(&sheet.address, "No especificada"));
    let _ = writeln!(
        out,
        "Linea/Color: {} / {}",
        sheet.line.as_deref().unwrap_or("-"),
        sheet.color.as_deref().unwrap_or("-")
    );
    if let Some(glass) = sheet.glass.as_deref().filter(|g| !g.is_empty()) {
        let _ = writeln!(out, "Vidrio:      {}", glass);
    }
    let _ = writeln!(out, "{}", rule);

    for (idx, set) in sheet.sets.iter().enumerate() {
        out.push('\n');
        let _ = writeln!(out, "{}. {} - {}", idx + 1, set.code, set.title);
        out.push_str(&render_set(set));
    }
    out
}

/// Dimensions, drawing and details of a single set
pub fn render_set(set: &SetSheet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} x {} mm", set.width, set.height);
    out.push_str(&render_grid(set));

    if !set.trim.is_empty() {
        let sides: Vec<&str> = set.trim.iter().map(|s| s.label()).collect();
        let _ = writeln!(out, "Tapajuntas: {}", sides.join(", "));
    }
    if !set.location.is_empty() {
        let _ = writeln!(out, "Ubicacion: {}", set.location);
    }
    if !set.glass.is_empty() {
        let _ = writeln!(out, "Vidrio: {}", set.glass);
    }
    if !set.notes.is_empty() {
        let _ = writeln!(out, "Notas: {}", set.notes);
    }
    out
}

/// Character grid: one box per grid cell, row heights on the right,
/// column widths underneath. Empty cells are left blank.
pub fn render_grid(set: &SetSheet) -> String {
    let mut out = String::new();
    let border = {
        let mut line = String::from("+");
        for _ in 0..set.cols {
            line.push_str(&"-".repeat(CELL_WIDTH));
            line.push('+');
        }
        line
    };

    out.push_str(&border);
    out.push('\n');
    for row in 0..set.rows {
        out.push('|');
        for col in 0..set.cols {
            let label = set
                .cell_at(col, row)
                .map(|c| c.type_id.label())
                .unwrap_or("");
            let _ = write!(out, "{}|", fit(label, CELL_WIDTH));
        }
        if set.show_row_labels() {
            let _ = write!(out, " {}", set.row_heights[row]);
        }
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
    }

    if set.show_col_labels() {
        out.push(' ');
        for width in &set.col_widths {
            let _ = write!(out, "{} ", fit(&format!("{} mm", width), CELL_WIDTH));
        }
        out.push('\n');
    }
    out
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Center `text` in `width` columns, truncating if needed
fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    let len = truncated.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), truncated, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::layout_set;
    use med_core::{MeasurementSet, Module, OpeningType, Side};

    #[test]
    fn fit_centers_and_truncates() {
        assert_eq!(fit("AB", 6), "  AB  ");
        assert_eq!(fit("ABC", 6), " ABC  ");
        assert_eq!(fit("ABCDEFGH", 4), "ABCD");
        assert_eq!(fit("PAÑO", 6), " PAÑO ");
    }

    #[test]
    fn single_cell_grid() {
        let set = MeasurementSet {
            modules: vec![Module::new(OpeningType::Ventiluz, 0, 0)],
            ..MeasurementSet::default()
        };
        let grid = render_grid(&layout_set(&set));
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("+{}+", "-".repeat(CELL_WIDTH)));
        assert_eq!(lines[1], format!("|{}|", fit("VENTILUZ", CELL_WIDTH)));
    }

    #[test]
    fn multi_column_grid_prints_widths() {
        let set = MeasurementSet {
            width: 1600,
            modules: vec![
                Module::new(OpeningType::PanoFijo, 0, 0),
                Module::new(OpeningType::PanoFijo, 1, 0),
            ],
            col_ratios: vec![1000.0, 600.0],
            row_ratios: vec![1.0],
            ..MeasurementSet::default()
        };
        let grid = render_grid(&layout_set(&set));
        assert!(grid.contains("1000 mm"));
        assert!(grid.contains("600 mm"));
    }

    #[test]
    fn set_details_list_trim_and_notes() {
        let mut set = MeasurementSet {
            code: "V3".to_string(),
            notes: "Con mosquitero".to_string(),
            modules: vec![Module::new(OpeningType::Sliding2, 0, 0)],
            ..MeasurementSet::default()
        };
        set.trim.toggle(Side::Top);
        set.trim.toggle(Side::Right);

        let text = render_set(&layout_set(&set));
        assert!(text.starts_with("800 x 1200 mm\n"));
        assert!(text.contains("Tapajuntas: SUP, DER"));
        assert!(text.contains("Notas: Con mosquitero"));
        assert!(!text.contains("Vidrio"));
    }
}
