//! Note window state machine
//!
//! Everything the window does in response to input, minus the Win32 calls:
//! - pin (always on top) toggling
//! - show/hide to the tray
//! - push-button press/release tracking over the painted chrome
//! - starting and ending drag and resize gestures
//!
//! The front end feeds pointer events in and applies the returned
//! [`Command`]s and placements.

use crate::interaction::{DragTracker, Point, ResizeTracker};
use crate::layout::Region;
use crate::note::Geometry;
use crate::variant::Variant;

/// Action requested by a button click
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePin,
    Hide,
    Save,
}

impl Command {
    fn for_button(region: Region) -> Option<Self> {
        match region {
            Region::PinButton => Some(Command::TogglePin),
            Region::CloseButton => Some(Command::Hide),
            Region::SaveButton => Some(Command::Save),
            _ => None,
        }
    }
}

/// Entries of the tray context menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum TrayCommand {
    ToggleVisibility = 1,
    Quit = 2,
}

impl TrayCommand {
    pub const ALL: [TrayCommand; 2] = [TrayCommand::ToggleVisibility, TrayCommand::Quit];

    pub fn id(&self) -> u32 {
        *self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrayCommand::ToggleVisibility => "Show/Hide Note",
            TrayCommand::Quit => "Quit",
        }
    }
}

/// How the user poked the tray icon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayActivation {
    /// Primary click
    Trigger,
    /// Secondary click
    Context,
    DoubleClick,
}

/// What the front end should do after a tray activation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayResponse {
    ToggleVisibility,
    ShowMenu,
    Ignore,
}

/// What a pointer event did to the window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEffect {
    /// Nothing changed
    None,
    /// Hover or press highlight changed; repaint
    Repaint,
    /// Move the window to this origin
    Move(Point),
    /// Move and resize the window
    Resize(Geometry),
    /// A gesture started; capture the mouse
    Capture,
}

pub struct NoteState {
    variant: Variant,
    pinned: bool,
    visible: bool,
    hovered: Region,
    pressed: Region,
    drag: DragTracker,
    resize: ResizeTracker,
    /// Set by a tray double-click; swallows the release that follows it
    ignore_next_trigger: bool,
}

impl NoteState {
    pub fn new(variant: Variant, pinned: bool) -> Self {
        Self {
            variant,
            pinned,
            visible: false,
            hovered: Region::None,
            pressed: Region::None,
            drag: DragTracker::new(),
            resize: ResizeTracker::new(variant.grip_corner()),
            ignore_next_trigger: false,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hovered(&self) -> Region {
        self.hovered
    }

    pub fn pressed(&self) -> Region {
        self.pressed
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    /// Minimum window size in the units geometry is given in
    pub fn set_min_size(&mut self, min_width: i32, min_height: i32) {
        self.resize.set_min_size(min_width, min_height);
    }

    /// Flip the pin state and return the new value
    pub fn toggle_pin(&mut self) -> bool {
        self.pinned = !self.pinned;
        log!("NoteState: pinned={}", self.pinned);
        self.pinned
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.cancel_gestures();
        }
    }

    /// Adopt the window's real visibility, e.g. after it was hidden behind our back
    pub fn sync_visible(&mut self, shown: bool) {
        if self.visible != shown {
            log!("NoteState: visibility out of sync, window shown={}", shown);
            self.set_visible(shown);
        }
    }

    /// Flip visibility and return whether the window is now shown
    pub fn toggle_visibility(&mut self) -> bool {
        self.set_visible(!self.visible);
        self.visible
    }

    /// Closing never quits; it hides to the tray
    pub fn request_close(&mut self) {
        self.set_visible(false);
    }

    /// A double-click arrives as click, double-click, click; it toggles once
    pub fn on_tray_activation(&mut self, activation: TrayActivation) -> TrayResponse {
        match activation {
            TrayActivation::Trigger if std::mem::take(&mut self.ignore_next_trigger) => {
                TrayResponse::Ignore
            }
            TrayActivation::Trigger => TrayResponse::ToggleVisibility,
            TrayActivation::Context => TrayResponse::ShowMenu,
            TrayActivation::DoubleClick => {
                self.ignore_next_trigger = true;
                TrayResponse::Ignore
            }
        }
    }

    /// Left button pressed over `region`
    pub fn pointer_down(&mut self, region: Region, cursor: Point, geometry: Geometry) -> PointerEffect {
        match region {
            r if r.is_button() => {
                self.pressed = r;
                PointerEffect::Capture
            }
            Region::TitleBar => {
                self.drag.begin(cursor, Point::new(geometry.x, geometry.y));
                PointerEffect::Capture
            }
            Region::SizeGrip => {
                self.resize.begin(cursor, geometry);
                PointerEffect::Capture
            }
            _ => PointerEffect::None,
        }
    }

    /// Pointer moved; `region` is what lies under it now
    pub fn pointer_move(&mut self, region: Region, cursor: Point) -> PointerEffect {
        if let Some(origin) = self.drag.update(cursor) {
            return PointerEffect::Move(origin);
        }
        if let Some(geometry) = self.resize.update(cursor) {
            return PointerEffect::Resize(geometry);
        }
        if self.hovered != region {
            self.hovered = region;
            return PointerEffect::Repaint;
        }
        PointerEffect::None
    }

    /// Pointer left the window
    pub fn pointer_leave(&mut self) -> PointerEffect {
        if self.hovered == Region::None {
            return PointerEffect::None;
        }
        self.hovered = Region::None;
        PointerEffect::Repaint
    }

    /// Left button released over `region`; a click fires only over the pressed button
    pub fn pointer_up(&mut self, region: Region) -> Option<Command> {
        self.drag.end();
        self.resize.end();

        let pressed = std::mem::take(&mut self.pressed);
        if pressed.is_button() && pressed == region {
            Command::for_button(pressed)
        } else {
            None
        }
    }

    /// Drop any in-flight gesture, e.g. when capture is lost
    pub fn cancel_gestures(&mut self) {
        self.drag.end();
        self.resize.end();
        self.pressed = Region::None;
        self.hovered = Region::None;
    }
}
