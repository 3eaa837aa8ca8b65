//! Platform flavours of the note chrome
//!
//! The Windows and macOS flavours are the same program. They differ in icon
//! format, which side the title-bar buttons sit on, and the details that
//! follow from that.

use serde::{Deserialize, Serialize};

/// Which side of the title bar holds the buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonOrder {
    /// Right-aligned: pin, then close
    Trailing,
    /// Left-aligned: close, then pin
    Leading,
}

/// Which bottom corner holds the size grip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GripCorner {
    BottomLeft,
    BottomRight,
}

/// Margins of a horizontal bar (left, top, right, bottom)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Windows,
    #[serde(alias = "mac")]
    MacOs,
}

impl Default for Variant {
    fn default() -> Self {
        Self::native()
    }
}

impl Variant {
    /// The flavour matching the build target
    pub fn native() -> Self {
        if cfg!(target_os = "macos") {
            Variant::MacOs
        } else {
            Variant::Windows
        }
    }

    /// Tray icon file, looked up next to the executable
    pub fn icon_file_name(&self) -> &'static str {
        match self {
            Variant::Windows => "icon.ico",
            Variant::MacOs => "icon.png",
        }
    }

    pub fn button_order(&self) -> ButtonOrder {
        match self {
            Variant::Windows => ButtonOrder::Trailing,
            Variant::MacOs => ButtonOrder::Leading,
        }
    }

    pub fn grip_corner(&self) -> GripCorner {
        match self {
            Variant::Windows => GripCorner::BottomLeft,
            Variant::MacOs => GripCorner::BottomRight,
        }
    }

    pub fn title_margins(&self) -> Margins {
        match self {
            Variant::Windows => Margins::new(0.0, 0.0, 5.0, 0.0),
            Variant::MacOs => Margins::new(5.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn bottom_margins(&self) -> Margins {
        match self {
            Variant::Windows => Margins::new(5.0, 0.0, 5.0, 5.0),
            Variant::MacOs => Margins::new(5.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn default_font_family(&self) -> &'static str {
        match self {
            Variant::Windows => "Microsoft YaHei",
            Variant::MacOs => "Helvetica Neue",
        }
    }

    /// macOS starts in the tray only
    pub fn starts_visible(&self) -> bool {
        matches!(self, Variant::Windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_tables() {
        assert_eq!(Variant::Windows.icon_file_name(), "icon.ico");
        assert_eq!(Variant::MacOs.icon_file_name(), "icon.png");
        assert_eq!(Variant::Windows.button_order(), ButtonOrder::Trailing);
        assert_eq!(Variant::MacOs.button_order(), ButtonOrder::Leading);
        assert_eq!(Variant::Windows.grip_corner(), GripCorner::BottomLeft);
        assert_eq!(Variant::MacOs.grip_corner(), GripCorner::BottomRight);
        assert!(Variant::Windows.starts_visible());
        assert!(!Variant::MacOs.starts_visible());
    }

    #[test]
    fn test_variant_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            variant: Variant,
        }

        let w: Wrapper = toml::from_str("variant = \"macos\"").unwrap();
        assert_eq!(w.variant, Variant::MacOs);
        let w: Wrapper = toml::from_str("variant = \"mac\"").unwrap();
        assert_eq!(w.variant, Variant::MacOs);
        let w: Wrapper = toml::from_str("variant = \"windows\"").unwrap();
        assert_eq!(w.variant, Variant::Windows);
    }
}
