#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are CSS pixels in viewport coordinates (origin at the top-left
//! of the viewport, `y` growing downwards), as reported by a bounding-box
//! query on the host side.

/// A read-only snapshot of an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge. Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Reflect this rectangle horizontally across a container of the given width.
    ///
    /// This is what a page looks like when its direction flips: an element at
    /// `left` ends up with its right edge at `container_width - left`.
    #[must_use]
    pub fn mirrored_in(&self, container_width: f64) -> Rect {
        Rect::new(
            container_width - self.right(),
            self.y,
            self.width,
            self.height,
        )
    }

    /// Return a copy moved by the given deltas.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// Pixel gap between the anchor and the popup.
///
/// `x` applies to horizontal alignment edges, `y` to the vertical side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spacing {
    pub x: f64,
    pub y: f64,
}

impl Spacing {
    /// Create a new spacing.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same gap on both axes.
    pub const fn all(val: f64) -> Self {
        Self { x: val, y: val }
    }

    /// Horizontal gap only.
    pub const fn horizontal(val: f64) -> Self {
        Self { x: val, y: 0.0 }
    }

    /// Vertical gap only.
    pub const fn vertical(val: f64) -> Self {
        Self { x: 0.0, y: val }
    }
}

impl From<f64> for Spacing {
    fn from(val: f64) -> Self {
        Self::all(val)
    }
}

impl From<(f64, f64)> for Spacing {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A measured popup: its laid-out box plus the size of its scrollable content.
///
/// Content can be wider or taller than the laid-out box (for example a menu
/// whose items overflow); positioning always uses the larger of the two.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopupBox {
    /// Bounding box as rendered.
    pub rect: Rect,
    /// `scrollWidth` of the popup element.
    pub scroll_width: f64,
    /// `scrollHeight` of the popup element.
    pub scroll_height: f64,
}

impl PopupBox {
    /// A popup whose content fits its box exactly.
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            scroll_width: rect.width,
            scroll_height: rect.height,
        }
    }

    /// Set the scrollable content size.
    #[must_use]
    pub fn with_scroll_size(mut self, width: f64, height: f64) -> Self {
        self.scroll_width = width;
        self.scroll_height = height;
        self
    }

    /// The size used for positioning: the laid-out box widened to the content.
    #[inline]
    pub fn effective_size(&self) -> Size {
        Size::new(self.rect.width, self.rect.height)
            .max(Size::new(self.scroll_width, self.scroll_height))
    }
}

impl From<Rect> for PopupBox {
    fn from(rect: Rect) -> Self {
        Self::new(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::{PopupBox, Rect, Size, Spacing};

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 25.0);
        assert_eq!(r.center_y(), 40.0);
    }

    #[test]
    fn rect_from_size_and_default() {
        assert_eq!(Rect::from_size(80.0, 24.0), Rect::new(0.0, 0.0, 80.0, 24.0));
        assert_eq!(Rect::default(), Rect::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn rect_is_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(5.0, 5.0, 10.0, -1.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn rect_contains_boundary_conditions() {
        let r = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(4.5, 4.5));
        // Right and bottom edges are exclusive
        assert!(!r.contains(5.0, 0.0));
        assert!(!r.contains(0.0, 5.0));
    }

    #[test]
    fn rect_mirrored_in_container() {
        let r = Rect::new(200.0, 100.0, 50.0, 20.0);
        let m = r.mirrored_in(1000.0);
        assert_eq!(m, Rect::new(750.0, 100.0, 50.0, 20.0));
        // Mirroring twice is the identity.
        assert_eq!(m.mirrored_in(1000.0), r);
    }

    #[test]
    fn rect_translate() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).translate(10.0, -2.0);
        assert_eq!(r, Rect::new(11.0, 0.0, 3.0, 4.0));
    }

    #[test]
    fn size_max_is_componentwise() {
        let a = Size::new(10.0, 50.0);
        let b = Size::new(30.0, 20.0);
        assert_eq!(a.max(b), Size::new(30.0, 50.0));
    }

    #[test]
    fn spacing_constructors_and_conversions() {
        assert_eq!(Spacing::all(3.0), Spacing::from(3.0));
        assert_eq!(Spacing::horizontal(2.0), Spacing::new(2.0, 0.0));
        assert_eq!(Spacing::vertical(4.0), Spacing::new(0.0, 4.0));
        assert_eq!(Spacing::from((1.0, 2.0)), Spacing::new(1.0, 2.0));
        assert_eq!(Spacing::default(), Spacing::new(0.0, 0.0));
    }

    #[test]
    fn popup_box_widens_to_scroll_size() {
        let popup = PopupBox::new(Rect::new(0.0, 0.0, 100.0, 40.0)).with_scroll_size(140.0, 20.0);
        assert_eq!(popup.effective_size(), Size::new(140.0, 40.0));
    }

    #[test]
    fn popup_box_from_rect_fits_content() {
        let popup = PopupBox::from(Rect::new(0.0, 0.0, 100.0, 40.0));
        assert_eq!(popup.effective_size(), Size::new(100.0, 40.0));
    }
}
