// ABOUTME: Value types for measurement sets and the projects that own them.
// ABOUTME: These are the records handed between the grid editor, the store and the sheet.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::OpeningType;

/// Reference code shown when a set has none
pub const PLACEHOLDER_CODE: &str = "S/C";

/// One placed opening at an integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub type_id: OpeningType,
    pub x: i32,
    pub y: i32,
}

impl Module {
    pub fn new(type_id: OpeningType, x: i32, y: i32) -> Self {
        Self { type_id, x, y }
    }

    pub fn at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

/// One of the four outer edges of a set's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub fn all() -> &'static [Side] {
        &[Side::Top, Side::Bottom, Side::Left, Side::Right]
    }

    /// Grid offset of the neighbouring cell on this side (y grows downwards)
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Side::Top => (0, -1),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
            Side::Right => (1, 0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Top => "SUP",
            Side::Bottom => "INF",
            Side::Left => "IZQ",
            Side::Right => "DER",
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "sup" => Ok(Side::Top),
            "bottom" | "inf" => Ok(Side::Bottom),
            "left" | "izq" => Ok(Side::Left),
            "right" | "der" => Ok(Side::Right),
            other => Err(format!("Unknown side: {}", other)),
        }
    }
}

/// Trim ("tapajuntas") presence on each outer edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trim {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Trim {
    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn toggle(&mut self, side: Side) {
        let flag = match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *flag = !*flag;
    }

    /// Edges with trim, in top/bottom/left/right order
    pub fn sides(&self) -> Vec<Side> {
        Side::all().iter().copied().filter(|s| self.get(*s)).collect()
    }
}

/// A grid arrangement of modules sharing one overall size and trim setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeasurementSet {
    pub code: String,
    pub modules: Vec<Module>,
    /// Total width in mm
    #[serde(deserialize_with = "whole_mm")]
    pub width: u32,
    /// Total height in mm
    #[serde(deserialize_with = "whole_mm")]
    pub height: u32,
    pub location: String,
    pub color: String,
    pub glass: String,
    #[serde(rename = "tapajuntas")]
    pub trim: Trim,
    pub notes: String,
    /// Relative weight of each grid row (may be empty or stale on load)
    pub row_ratios: Vec<f64>,
    /// Relative weight of each grid column (may be empty or stale on load)
    pub col_ratios: Vec<f64>,
}

impl MeasurementSet {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn has_modules(&self) -> bool {
        !self.modules.is_empty()
    }

    /// Code to display, falling back to the placeholder
    pub fn display_code(&self) -> &str {
        if self.code.trim().is_empty() {
            PLACEHOLDER_CODE
        } else {
            &self.code
        }
    }
}

impl Default for MeasurementSet {
    fn default() -> Self {
        Self {
            code: String::new(),
            modules: Vec::new(),
            width: 800,
            height: 1200,
            location: String::new(),
            color: String::new(),
            glass: String::new(),
            trim: Trim::default(),
            notes: String::new(),
            row_ratios: Vec::new(),
            col_ratios: Vec::new(),
        }
    }
}

/// Read a stored length as whole mm: negatives become 0, fractions are dropped
/// and numeric strings are accepted
fn whole_mm<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    struct WholeMm;

    impl<'de> de::Visitor<'de> for WholeMm {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a length in millimeters")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            Ok(v.min(u32::MAX as u64) as u32)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            Ok(v.clamp(0, u32::MAX as i64) as u32)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if !v.is_finite() || v <= 0.0 {
                return Ok(0);
            }
            Ok(v.trunc().min(u32::MAX as f64) as u32)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            self.visit_f64(v.trim().parse().unwrap_or(0.0))
        }

        fn visit_unit<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(WholeMm)
}

/// A measurement set once committed to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub created_at: u64,
    #[serde(flatten)]
    pub set: MeasurementSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Aluminum profile line
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub glass: Option<String>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    pub created_at: u64,
}

impl Project {
    pub fn measurement(&self, id: &str) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_toggle_and_sides() {
        let mut trim = Trim::default();
        assert!(trim.sides().is_empty());

        trim.toggle(Side::Left);
        trim.toggle(Side::Top);
        assert_eq!(trim.sides(), vec![Side::Top, Side::Left]);

        trim.toggle(Side::Top);
        assert!(!trim.get(Side::Top));
        assert_eq!(trim.sides(), vec![Side::Left]);
    }

    #[test]
    fn side_offsets_point_at_neighbours() {
        assert_eq!(Side::Top.offset(), (0, -1));
        assert_eq!(Side::Bottom.offset(), (0, 1));
        assert_eq!(Side::Left.offset(), (-1, 0));
        assert_eq!(Side::Right.offset(), (1, 0));
        assert_eq!("izq".parse::<Side>(), Ok(Side::Left));
        assert!("up".parse::<Side>().is_err());
    }

    #[test]
    fn display_code_falls_back_to_placeholder() {
        let mut set = MeasurementSet::new(800, 1200);
        assert_eq!(set.display_code(), "S/C");
        set.code = "V1".to_string();
        assert_eq!(set.display_code(), "V1");
    }

    #[test]
    fn record_without_ratios_deserializes() {
        let json = r#"{
            "id": "abc",
            "createdAt": 5,
            "code": "P1",
            "modules": [{"typeId": "pano_fijo", "x": 0, "y": 0}],
            "width": 900,
            "height": 2000,
            "tapajuntas": {"top": true, "bottom": false, "left": false, "right": true}
        }"#;
        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, "abc");
        assert_eq!(m.set.modules, vec![Module::new(OpeningType::PanoFijo, 0, 0)]);
        assert!(m.set.col_ratios.is_empty());
        assert_eq!(m.set.trim.sides(), vec![Side::Top, Side::Right]);
    }

    #[test]
    fn odd_stored_sizes_still_load() {
        let json = r#"{"id": "n", "createdAt": 1, "width": -5, "height": 1500.7}"#;
        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!((m.set.width, m.set.height), (0, 1500));

        let json = r#"{"id": "s", "createdAt": 1, "width": "900", "height": null}"#;
        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!((m.set.width, m.set.height), (900, 0));

        let json = r#"{"id": "b", "createdAt": 1, "width": 1e12}"#;
        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!((m.set.width, m.set.height), (u32::MAX, 1200));
    }
}
