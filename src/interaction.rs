//! Drag-to-move and grip resize tracking
//!
//! Both trackers work in screen coordinates. They only compute new window
//! placements; applying them is the front end's job.

use crate::note::{Geometry, MIN_HEIGHT, MIN_WIDTH};
use crate::variant::GripCorner;

/// A point in screen coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Tracks a title-bar drag
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    /// Cursor position relative to the window origin at press time
    offset: Option<Point>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging: remember where the cursor grabbed the window
    pub fn begin(&mut self, cursor: Point, window_origin: Point) {
        self.offset = Some(Point::new(
            cursor.x - window_origin.x,
            cursor.y - window_origin.y,
        ));
    }

    /// New window origin for the current cursor, if dragging
    pub fn update(&self, cursor: Point) -> Option<Point> {
        self.offset
            .map(|off| Point::new(cursor.x - off.x, cursor.y - off.y))
    }

    pub fn end(&mut self) {
        self.offset = None;
    }

    pub fn is_active(&self) -> bool {
        self.offset.is_some()
    }
}

#[derive(Clone, Copy, Debug)]
struct ResizeAnchor {
    cursor: Point,
    geometry: Geometry,
}

/// Tracks a resize from the size grip
#[derive(Clone, Copy, Debug)]
pub struct ResizeTracker {
    corner: GripCorner,
    min_width: i32,
    min_height: i32,
    anchor: Option<ResizeAnchor>,
}

impl ResizeTracker {
    pub fn new(corner: GripCorner) -> Self {
        Self::with_min_size(corner, MIN_WIDTH, MIN_HEIGHT)
    }

    pub fn with_min_size(corner: GripCorner, min_width: i32, min_height: i32) -> Self {
        Self {
            corner,
            min_width,
            min_height,
            anchor: None,
        }
    }

    pub fn corner(&self) -> GripCorner {
        self.corner
    }

    /// Minimum width and height, in the units geometry is given in
    pub fn min_size(&self) -> (i32, i32) {
        (self.min_width, self.min_height)
    }

    /// Set the minimum size, e.g. after a DPI change
    pub fn set_min_size(&mut self, min_width: i32, min_height: i32) {
        self.min_width = min_width;
        self.min_height = min_height;
    }

    pub fn begin(&mut self, cursor: Point, geometry: Geometry) {
        self.anchor = Some(ResizeAnchor { cursor, geometry });
    }

    /// New window placement for the current cursor, if resizing
    pub fn update(&self, cursor: Point) -> Option<Geometry> {
        let anchor = self.anchor?;
        let start = anchor.geometry;
        let dx = cursor.x - anchor.cursor.x;
        let dy = cursor.y - anchor.cursor.y;

        let height = (start.height + dy).max(self.min_height);

        let geometry = match self.corner {
            GripCorner::BottomRight => {
                let width = (start.width + dx).max(self.min_width);
                Geometry::new(start.x, start.y, width, height)
            }
            GripCorner::BottomLeft => {
                // Right edge stays put; the left edge follows the cursor.
                let width = (start.width - dx).max(self.min_width);
                Geometry::new(start.right() - width, start.y, width, height)
            }
        };

        Some(geometry)
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut drag = DragTracker::new();
        assert!(!drag.is_active());
        assert_eq!(drag.update(Point::new(5, 5)), None);

        // Grab the window 30px right and 10px below its origin
        drag.begin(Point::new(130, 210), Point::new(100, 200));
        assert!(drag.is_active());

        assert_eq!(drag.update(Point::new(130, 210)), Some(Point::new(100, 200)));
        assert_eq!(drag.update(Point::new(200, 300)), Some(Point::new(170, 290)));
        assert_eq!(drag.update(Point::new(0, 0)), Some(Point::new(-30, -10)));

        drag.end();
        assert!(!drag.is_active());
        assert_eq!(drag.update(Point::new(200, 300)), None);
    }

    #[test]
    fn test_resize_bottom_right_grows_from_origin() {
        let mut resize = ResizeTracker::new(GripCorner::BottomRight);
        resize.begin(Point::new(380, 380), Geometry::new(100, 100, 280, 280));

        assert_eq!(
            resize.update(Point::new(400, 420)),
            Some(Geometry::new(100, 100, 300, 320))
        );
    }

    #[test]
    fn test_resize_bottom_left_keeps_right_edge() {
        let mut resize = ResizeTracker::new(GripCorner::BottomLeft);
        resize.begin(Point::new(100, 380), Geometry::new(100, 100, 280, 280));

        let g = resize.update(Point::new(80, 390)).unwrap();
        assert_eq!(g, Geometry::new(80, 100, 300, 290));
        assert_eq!(g.right(), 380);

        let g = resize.update(Point::new(150, 380)).unwrap();
        assert_eq!(g, Geometry::new(150, 100, 230, 280));
    }

    #[test]
    fn test_resize_respects_minimum() {
        let mut resize = ResizeTracker::new(GripCorner::BottomLeft);
        resize.begin(Point::new(100, 380), Geometry::new(100, 100, 280, 280));

        // Drag far past the right edge and above the top
        let g = resize.update(Point::new(1000, 0)).unwrap();
        assert_eq!(g.width, MIN_WIDTH);
        assert_eq!(g.height, MIN_HEIGHT);
        assert_eq!(g.right(), 380);

        let mut resize = ResizeTracker::new(GripCorner::BottomRight);
        resize.begin(Point::new(380, 380), Geometry::new(100, 100, 280, 280));
        let g = resize.update(Point::new(0, 0)).unwrap();
        assert_eq!(g, Geometry::new(100, 100, MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn test_resize_inactive_until_begin() {
        let mut resize = ResizeTracker::new(GripCorner::BottomRight);
        assert_eq!(resize.update(Point::new(1, 1)), None);
        resize.begin(Point::new(0, 0), Geometry::new(0, 0, 200, 200));
        assert!(resize.is_active());
        resize.end();
        assert!(!resize.is_active());
    }

    #[test]
    fn test_custom_min_size() {
        let mut resize = ResizeTracker::with_min_size(GripCorner::BottomRight, 300, 240);
        assert_eq!(resize.min_size(), (300, 240));
        resize.begin(Point::new(0, 0), Geometry::new(0, 0, 400, 400));
        assert_eq!(
            resize.update(Point::new(-500, -500)),
            Some(Geometry::new(0, 0, 300, 240))
        );
        resize.set_min_size(10, 10);
        assert_eq!(
            resize.update(Point::new(-300, -300)),
            Some(Geometry::new(0, 0, 100, 100))
        );
    }
}
