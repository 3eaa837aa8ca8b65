//! The persisted note record
//!
//! A note is a single flat JSON document:
//!
//! ```json
//! {
//!     "content": "...",
//!     "geometry": { "x": 100, "y": 100, "width": 280, "height": 280 },
//!     "always_on_top": false
//! }
//! ```
//!
//! Every field is optional on read. A bad field falls back to its own
//! default without discarding the others.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::NoteError;

/// Width used when no geometry has been saved
pub const DEFAULT_WIDTH: i32 = 280;
/// Height used when no geometry has been saved
pub const DEFAULT_HEIGHT: i32 = 280;
/// Smallest width the window may be resized to
pub const MIN_WIDTH: i32 = 150;
/// Smallest height the window may be resized to
pub const MIN_HEIGHT: i32 = 120;
/// DPI at which one logical pixel is one physical pixel
pub const BASE_DPI: u32 = 96;

/// Scale a pixel value from logical to physical at `dpi`
pub fn scale_px(px: i32, dpi: u32) -> i32 {
    ((px as f64) * (dpi as f64) / BASE_DPI as f64).round() as i32
}

/// Scale a pixel value from physical to logical at `dpi`
pub fn unscale_px(px: i32, dpi: u32) -> i32 {
    ((px as f64) * BASE_DPI as f64 / (dpi as f64)).round() as i32
}

/// Window placement
///
/// The origin is in screen coordinates, which are already physical and
/// shared by every monitor. The size is in logical (96 DPI) pixels so the
/// note keeps its apparent size across scale factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Logical size to physical at `dpi`; the origin is left alone
    pub fn to_physical(self, dpi: u32) -> Self {
        Self {
            width: scale_px(self.width, dpi),
            height: scale_px(self.height, dpi),
            ..self
        }
    }

    /// Physical size to logical at `dpi`; the origin is left alone
    pub fn to_logical(self, dpi: u32) -> Self {
        Self {
            width: unscale_px(self.width, dpi),
            height: unscale_px(self.height, dpi),
            ..self
        }
    }

    /// Enlarge to at least `min_width` x `min_height`, keeping the origin
    pub fn clamp_to_min(self, min_width: i32, min_height: i32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
            ..self
        }
    }
}

/// The single note entity
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Note text, always LF line endings
    pub content: String,

    /// Last saved placement; `None` means "default size, centred"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    /// Whether the window stays above other windows
    #[serde(rename = "always_on_top")]
    pub pinned: bool,
}

impl Note {
    /// Parse a note document. Never fails: malformed input yields defaults.
    pub fn from_json_str(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log!("Note document is not valid JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Extract each field independently from a parsed document
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            log!("Note document root is not an object, using defaults");
            return Self::default();
        };

        let content = obj
            .get("content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default();

        let geometry = obj.get("geometry").and_then(|g| {
            match serde_json::from_value::<Geometry>(g.clone()) {
                Ok(geo) => Some(geo.clamp_to_min(MIN_WIDTH, MIN_HEIGHT)),
                Err(e) => {
                    log!("Ignoring malformed geometry: {}", e);
                    None
                }
            }
        });

        let pinned = obj
            .get("always_on_top")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Self {
            content,
            geometry,
            pinned,
        }
    }

    /// Serialize as pretty JSON with 4-space indentation, non-ASCII unescaped
    pub fn to_json_string(&self) -> Result<String, NoteError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Width and height to use, falling back to the defaults
    pub fn size_or_default(&self) -> (i32, i32) {
        self.geometry
            .map(|g| (g.width, g.height))
            .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpi_scaling_keeps_origin() {
        let logical = Geometry::new(3000, -200, 280, 200);

        let physical = logical.to_physical(144);
        assert_eq!(physical, Geometry::new(3000, -200, 420, 300));
        assert_eq!(physical.to_logical(144), logical);

        // same scale both ways: repeated save and restore does not drift
        let mut g = logical;
        for _ in 0..5 {
            g = g.to_physical(120).to_logical(120);
        }
        assert_eq!(g, logical);
    }

    #[test]
    fn test_scale_px() {
        assert_eq!(unscale_px(150, BASE_DPI), 150);
        assert_eq!(scale_px(150, 192), 300);
    }

    #[test]
    fn test_full_document() {
        let json = r#"{
            "content": "buy milk\nwalk dog",
            "geometry": {"x": 10, "y": 20, "width": 300, "height": 200},
            "always_on_top": true
        }"#;
        let note = Note::from_json_str(json);

        assert_eq!(note.content, "buy milk\nwalk dog");
        assert_eq!(note.geometry, Some(Geometry::new(10, 20, 300, 200)));
        assert!(note.pinned);
    }

    #[test]
    fn test_garbage_yields_defaults() {
        assert_eq!(Note::from_json_str("not json {"), Note::default());
        assert_eq!(Note::from_json_str(""), Note::default());
        assert_eq!(Note::from_json_str("[1, 2, 3]"), Note::default());
        assert_eq!(Note::from_json_str("\"just a string\""), Note::default());
    }

    #[test]
    fn test_empty_object_yields_defaults() {
        let note = Note::from_json_str("{}");
        assert_eq!(note.content, "");
        assert_eq!(note.geometry, None);
        assert!(!note.pinned);
        assert_eq!(note.size_or_default(), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn test_bad_geometry_keeps_other_fields() {
        let json = r#"{
            "content": "keep me",
            "geometry": {"x": 10, "y": 20, "width": 300},
            "always_on_top": true
        }"#;
        let note = Note::from_json_str(json);

        assert_eq!(note.content, "keep me");
        assert_eq!(note.geometry, None);
        assert!(note.pinned);
    }

    #[test]
    fn test_wrong_field_types_fall_back_individually() {
        let json = r#"{
            "content": 42,
            "geometry": {"x": 1, "y": 2, "width": 200, "height": 150},
            "always_on_top": "yes"
        }"#;
        let note = Note::from_json_str(json);

        assert_eq!(note.content, "");
        assert_eq!(note.geometry, Some(Geometry::new(1, 2, 200, 150)));
        assert!(!note.pinned);
    }

    #[test]
    fn test_geometry_below_minimum_is_enlarged() {
        let json = r#"{"geometry": {"x": 5, "y": 6, "width": 40, "height": 300}}"#;
        let note = Note::from_json_str(json);

        assert_eq!(note.geometry, Some(Geometry::new(5, 6, MIN_WIDTH, 300)));
    }

    #[test]
    fn test_serialized_shape() {
        let note = Note {
            content: "便签".to_string(),
            geometry: Some(Geometry::new(1, 2, 280, 280)),
            pinned: true,
        };
        let json = note.to_json_string().unwrap();

        // Non-ASCII stays readable and indentation is four spaces
        assert!(json.contains("\"content\": \"便签\""));
        assert!(json.contains("\n    \"always_on_top\": true"));

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["geometry"]["width"], 280);
        assert_eq!(value["always_on_top"], true);
    }

    #[test]
    fn test_absent_geometry_not_written() {
        let json = Note::default().to_json_string().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("geometry").is_none());
        assert_eq!(value["content"], "");
        assert_eq!(value["always_on_top"], false);
    }

    #[test]
    fn test_geometry_edges() {
        let g = Geometry::new(10, 20, 100, 50);
        assert_eq!(g.right(), 110);
        assert_eq!(g.bottom(), 70);
    }
}
