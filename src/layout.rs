//! Note window layout and hit testing
//!
//! ```text
//! +------------------------------------+
//! |                       [pin] [x]    |  title bar (drag handle)
//! +------------------------------------+
//! |                                    |
//! |  text                              |
//! |                                    |
//! +------------------------------------+
//! | [grip]                    [Save]   |  bottom bar
//! +------------------------------------+
//! ```
//!
//! Shown for the Windows variant; macOS mirrors the buttons and the grip.
//! All coordinates are logical pixels relative to the client area.

use crate::rect::Rect;
use crate::variant::{ButtonOrder, GripCorner, Variant};

pub const TITLE_BAR_HEIGHT: f32 = 25.0;
pub const BUTTON_SIZE: f32 = 22.0;
pub const BUTTON_SPACING: f32 = 5.0;
pub const SAVE_BUTTON_WIDTH: f32 = 44.0;
pub const SAVE_BUTTON_HEIGHT: f32 = 24.0;
pub const GRIP_SIZE: f32 = 16.0;
pub const TEXT_PADDING: f32 = 5.0;

/// What lies under a point of the note window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Region {
    PinButton,
    CloseButton,
    SaveButton,
    SizeGrip,
    TitleBar,
    Text,
    #[default]
    None,
}

impl Region {
    /// Regions that behave like push buttons
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            Region::PinButton | Region::CloseButton | Region::SaveButton
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteLayout {
    pub bounds: Rect,
    pub title_bar: Rect,
    pub pin_button: Rect,
    pub close_button: Rect,
    /// Area behind the text control, padding included
    pub text_area: Rect,
    pub bottom_bar: Rect,
    pub save_button: Rect,
    pub size_grip: Rect,
}

impl NoteLayout {
    /// Lay out a client area of `width` x `height`
    pub fn compute(width: f32, height: f32, variant: Variant) -> Self {
        let bounds = Rect::from_pos_size(0.0, 0.0, width, height);
        let title_bar = Rect::from_pos_size(0.0, 0.0, width, TITLE_BAR_HEIGHT);

        let title_margins = variant.title_margins();
        let button_top = (TITLE_BAR_HEIGHT - BUTTON_SIZE) / 2.0;
        let (pin_button, close_button) = match variant.button_order() {
            ButtonOrder::Trailing => {
                let close_left = width - title_margins.right - BUTTON_SIZE;
                let pin_left = close_left - BUTTON_SPACING - BUTTON_SIZE;
                (
                    Rect::from_pos_size(pin_left, button_top, BUTTON_SIZE, BUTTON_SIZE),
                    Rect::from_pos_size(close_left, button_top, BUTTON_SIZE, BUTTON_SIZE),
                )
            }
            ButtonOrder::Leading => {
                let close_left = title_margins.left;
                let pin_left = close_left + BUTTON_SIZE + BUTTON_SPACING;
                (
                    Rect::from_pos_size(pin_left, button_top, BUTTON_SIZE, BUTTON_SIZE),
                    Rect::from_pos_size(close_left, button_top, BUTTON_SIZE, BUTTON_SIZE),
                )
            }
        };

        let bottom_margins = variant.bottom_margins();
        let bottom_bar_height = SAVE_BUTTON_HEIGHT + bottom_margins.top + bottom_margins.bottom;
        let bottom_bar = Rect::new(0.0, height - bottom_bar_height, width, height);

        let row_top = bottom_bar.top + bottom_margins.top;
        let row_bottom = bottom_bar.bottom - bottom_margins.bottom;
        let row_center = (row_top + row_bottom) / 2.0;

        let save_left = width - bottom_margins.right - SAVE_BUTTON_WIDTH;
        let grip_left = match variant.grip_corner() {
            GripCorner::BottomLeft => bottom_margins.left,
            GripCorner::BottomRight => width - bottom_margins.right - GRIP_SIZE,
        };
        // The grip hugs the bottom of the row; the save button shifts left of it.
        let save_left = match variant.grip_corner() {
            GripCorner::BottomLeft => save_left,
            GripCorner::BottomRight => save_left - GRIP_SIZE,
        };
        let save_button = Rect::from_pos_size(
            save_left,
            row_center - SAVE_BUTTON_HEIGHT / 2.0,
            SAVE_BUTTON_WIDTH,
            SAVE_BUTTON_HEIGHT,
        );
        let size_grip = Rect::from_pos_size(grip_left, row_bottom - GRIP_SIZE, GRIP_SIZE, GRIP_SIZE);

        let text_area = Rect::new(0.0, TITLE_BAR_HEIGHT, width, bottom_bar.top.max(TITLE_BAR_HEIGHT));

        Self {
            bounds,
            title_bar,
            pin_button,
            close_button,
            text_area,
            bottom_bar,
            save_button,
            size_grip,
        }
    }

    /// Where the text itself goes, inside the padding
    pub fn text_rect(&self) -> Rect {
        self.text_area.inset(TEXT_PADDING)
    }

    /// Classify a client-area point; buttons win over the title bar
    pub fn hit_test(&self, x: f32, y: f32) -> Region {
        if !self.bounds.contains(x, y) {
            return Region::None;
        }
        if self.pin_button.contains(x, y) {
            Region::PinButton
        } else if self.close_button.contains(x, y) {
            Region::CloseButton
        } else if self.title_bar.contains(x, y) {
            Region::TitleBar
        } else if self.save_button.contains(x, y) {
            Region::SaveButton
        } else if self.size_grip.contains(x, y) {
            Region::SizeGrip
        } else if self.text_area.contains(x, y) {
            Region::Text
        } else {
            Region::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_buttons_trail() {
        let layout = NoteLayout::compute(280.0, 280.0, Variant::Windows);

        // close sits 5px from the right edge, pin to its left
        assert_eq!(layout.close_button.right, 275.0);
        assert_eq!(layout.pin_button.right, layout.close_button.left - BUTTON_SPACING);
        assert!(layout.pin_button.left > 140.0);
    }

    #[test]
    fn test_macos_buttons_lead() {
        let layout = NoteLayout::compute(280.0, 280.0, Variant::MacOs);

        assert_eq!(layout.close_button.left, 5.0);
        assert_eq!(layout.pin_button.left, layout.close_button.right + BUTTON_SPACING);
        assert!(layout.pin_button.right < 140.0);
    }

    #[test]
    fn test_buttons_centered_in_title_bar() {
        let layout = NoteLayout::compute(280.0, 280.0, Variant::Windows);
        assert_eq!(layout.pin_button.top, 1.5);
        assert_eq!(layout.pin_button.bottom, 23.5);
    }

    #[test]
    fn test_grip_corner_follows_variant() {
        let win = NoteLayout::compute(300.0, 200.0, Variant::Windows);
        assert_eq!(win.size_grip.left, 5.0);
        assert_eq!(win.size_grip.bottom, 195.0);
        assert_eq!(win.save_button.right, 295.0);

        let mac = NoteLayout::compute(300.0, 200.0, Variant::MacOs);
        assert_eq!(mac.size_grip.right, 300.0);
        assert_eq!(mac.size_grip.bottom, 200.0);
        assert!(mac.save_button.right <= mac.size_grip.left);
    }

    #[test]
    fn test_text_area_between_bars() {
        let layout = NoteLayout::compute(280.0, 280.0, Variant::Windows);

        assert_eq!(layout.text_area.top, TITLE_BAR_HEIGHT);
        assert_eq!(layout.text_area.bottom, layout.bottom_bar.top);
        assert_eq!(layout.text_rect().left, TEXT_PADDING);
        assert!(!layout.text_rect().is_empty());
    }

    #[test]
    fn test_hit_test_priority() {
        let layout = NoteLayout::compute(280.0, 280.0, Variant::Windows);

        let (px, py) = layout.pin_button.center();
        assert_eq!(layout.hit_test(px, py), Region::PinButton);
        let (cx, cy) = layout.close_button.center();
        assert_eq!(layout.hit_test(cx, cy), Region::CloseButton);
        assert_eq!(layout.hit_test(10.0, 10.0), Region::TitleBar);
        let (sx, sy) = layout.save_button.center();
        assert_eq!(layout.hit_test(sx, sy), Region::SaveButton);
        let (gx, gy) = layout.size_grip.center();
        assert_eq!(layout.hit_test(gx, gy), Region::SizeGrip);
        assert_eq!(layout.hit_test(140.0, 140.0), Region::Text);
        assert_eq!(layout.hit_test(-1.0, 10.0), Region::None);
        assert_eq!(layout.hit_test(280.0, 10.0), Region::None);
    }

    #[test]
    fn test_tiny_window_keeps_text_area_ordered() {
        let layout = NoteLayout::compute(50.0, 30.0, Variant::Windows);
        assert!(layout.text_area.bottom >= layout.text_area.top);
    }
}
