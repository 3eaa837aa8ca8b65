//! Rectangle value type for layout bounds and hit testing

/// A rectangle defined by its bounds, in logical pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a new rectangle from bounds
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from position and size
    pub fn from_pos_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Check if a point is inside this rectangle (right/bottom exclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Inset rectangle uniformly
    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    /// Scale every edge, e.g. from logical to physical pixels
    pub fn scale(&self, factor: f32) -> Rect {
        Rect::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_pos_size() {
        let r = Rect::from_pos_size(10.0, 20.0, 100.0, 50.0);

        assert_eq!(r.left, 10.0);
        assert_eq!(r.top, 20.0);
        assert_eq!(r.right, 110.0);
        assert_eq!(r.bottom, 70.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert!(r.contains(50.0, 50.0));
        assert!(r.contains(0.0, 0.0));
        assert!(!r.contains(100.0, 100.0)); // Exclusive bounds
        assert!(!r.contains(-1.0, 50.0));
    }

    #[test]
    fn test_rect_inset_and_scale() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(r.inset(10.0), Rect::new(10.0, 10.0, 90.0, 90.0));
        assert_eq!(r.scale(1.5), Rect::new(0.0, 0.0, 150.0, 150.0));
        assert!(r.inset(60.0).is_empty());
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.center(), (50.0, 25.0));
    }
}
