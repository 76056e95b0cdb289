// ABOUTME: Line-oriented editor for a measurement set.
// ABOUTME: Parses text commands into grid edit commands and reports the resulting layout.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use med_core::{MeasurementSet, OpeningType, Side};
use med_layout::{Command, EditSession, Outcome};
use med_sheet::{layout_set, render_grid};

/// A parsed editor input line
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Apply(Command),
    Show,
    Handles,
    Save,
    Cancel,
}

pub const HELP: &str = "\
commands:
  pick X Y            open the type picker at a grid cell
  choose TYPE         place TYPE at the picker cell
  close               close the picker
  place TYPE X Y      place TYPE at a grid cell
  remove I            remove the I-th opening
  width MM | height MM
  col I MM | row I MM set one column width / row height
  code|location|glass|notes TEXT
  trim top|bottom|left|right
  show | handles | save | cancel";

/// Parse one input line; blank lines and `#` comments yield `None`
pub fn parse_line(line: &str) -> Result<Option<Line>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let parsed = match head.to_ascii_lowercase().as_str() {
        "show" => Line::Show,
        "handles" => Line::Handles,
        "save" => Line::Save,
        "cancel" => Line::Cancel,
        "close" => Line::Apply(Command::ClosePicker),
        "pick" => {
            let [x, y] = expect_args::<2>(&args, "pick X Y")?;
            Line::Apply(Command::OpenPicker {
                x: int(x)?,
                y: int(y)?,
            })
        }
        "choose" => {
            let [type_id] = expect_args::<1>(&args, "choose TYPE")?;
            Line::Apply(Command::Choose(type_id.parse::<OpeningType>()?))
        }
        "place" => {
            let [type_id, x, y] = expect_args::<3>(&args, "place TYPE X Y")?;
            Line::Apply(Command::Place {
                type_id: type_id.parse::<OpeningType>()?,
                x: int(x)?,
                y: int(y)?,
            })
        }
        "remove" => {
            let [index] = expect_args::<1>(&args, "remove I")?;
            Line::Apply(Command::Remove(index_arg(index)?))
        }
        // Values stay raw text: the session parses them leniently
        "width" => Line::Apply(Command::SetWidth(rest.to_string())),
        "height" => Line::Apply(Command::SetHeight(rest.to_string())),
        "col" | "row" => {
            let (index, value) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            let index = index_arg(index)?;
            let value = value.trim().to_string();
            if head.eq_ignore_ascii_case("col") {
                Line::Apply(Command::SetColumnSpan { index, value })
            } else {
                Line::Apply(Command::SetRowSpan { index, value })
            }
        }
        "code" => Line::Apply(Command::SetCode(rest.to_string())),
        "location" => Line::Apply(Command::SetLocation(rest.to_string())),
        "glass" => Line::Apply(Command::SetGlass(rest.to_string())),
        "notes" => Line::Apply(Command::SetNotes(rest.to_string())),
        "trim" => {
            let [side] = expect_args::<1>(&args, "trim SIDE")?;
            Line::Apply(Command::ToggleTrim(side.parse::<Side>().map_err(|e| anyhow!(e))?))
        }
        other => bail!("Unknown command: {}", other),
    };
    Ok(Some(parsed))
}

/// Drive `session` from `input` until `save` succeeds (returns the set) or
/// the user cancels / input ends (returns `None`).
pub fn run<R: BufRead, W: Write>(
    session: &mut EditSession,
    placeholder_code: &str,
    input: R,
    out: &mut W,
) -> Result<Option<MeasurementSet>> {
    if let Some((x, y)) = session.picker() {
        writeln!(out, "picker open at ({}, {})", x, y)?;
    }

    for line in input.lines() {
        let line = line.context("Failed to read editor input")?;
        let parsed = match parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        match parsed {
            Line::Apply(command) => match session.apply(command) {
                Outcome::Changed => {
                    if let Some((x, y)) = session.picker() {
                        writeln!(out, "picker open at ({}, {})", x, y)?;
                    }
                }
                Outcome::Unchanged => writeln!(out, "no change")?,
                Outcome::Reset => {
                    writeln!(out, "last opening removed, picker open at (0, 0)")?;
                }
            },
            Line::Show => show(session, out)?,
            Line::Handles => {
                for handle in session.handles() {
                    writeln!(
                        out,
                        "opening {} {:?} -> ({}, {})",
                        handle.module, handle.side, handle.x, handle.y
                    )?;
                }
            }
            Line::Save => match session.finish(placeholder_code) {
                Ok(set) => return Ok(Some(set)),
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Line::Cancel => return Ok(None),
        }
    }

    tracing::warn!("Editor input ended without save");
    Ok(None)
}

fn show<W: Write>(session: &EditSession, out: &mut W) -> Result<()> {
    let set = session.set();
    writeln!(out, "{} - {} x {} mm", set.display_code(), set.width, set.height)?;
    write!(out, "{}", render_grid(&layout_set(set)))?;
    for (idx, m) in set.modules.iter().enumerate() {
        writeln!(out, "  [{}] {} at ({}, {})", idx, m.type_id.label(), m.x, m.y)?;
    }
    Ok(())
}

fn expect_args<'a, const N: usize>(args: &[&'a str], usage: &str) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| anyhow!("usage: {}", usage))
}

fn int(arg: &str) -> Result<i32> {
    arg.parse::<i32>()
        .with_context(|| format!("Not a grid coordinate: {}", arg))
}

fn index_arg(arg: &str) -> Result<usize> {
    arg.parse::<usize>()
        .with_context(|| format!("Not an index: {}", arg))
}
