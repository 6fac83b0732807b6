//! Geometry primitives: rectangles, sizes, insets.
//!
//! Coordinates are `f64` in a y-down space. A [`Rect`] is always read
//! relative to some box's coordinate space; the rect type itself does not
//! know which one.

use num_traits::Float;

use crate::relation::Anchor;

/// Horizontal or vertical axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// x / width.
    Horizontal,
    /// y / height.
    Vertical,
}

/// Width × height dimensions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle: origin plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The zero rectangle.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Left edge.
    pub fn min_x(&self) -> f64 {
        self.x
    }

    /// Horizontal center.
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Vertical center.
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Read one anchor of this rect.
    pub fn anchor(&self, anchor: Anchor) -> f64 {
        match anchor {
            Anchor::Left => self.min_x(),
            Anchor::Right => self.max_x(),
            Anchor::CenterX => self.mid_x(),
            Anchor::Top => self.min_y(),
            Anchor::Bottom => self.max_y(),
            Anchor::CenterY => self.mid_y(),
            Anchor::Width => self.width,
            Anchor::Height => self.height,
        }
    }

    /// Move or resize so that `anchor` reads `value`.
    ///
    /// Positional anchors move the origin on their own axis and keep the
    /// size; `Width`/`Height` change the size and keep the origin. Nothing
    /// else is touched.
    pub fn set_anchor(&mut self, anchor: Anchor, value: f64) {
        match anchor {
            Anchor::Left => self.x = value,
            Anchor::Right => self.x = value - self.width,
            Anchor::CenterX => self.x = value - self.width / 2.0,
            Anchor::Top => self.y = value,
            Anchor::Bottom => self.y = value - self.height,
            Anchor::CenterY => self.y = value - self.height / 2.0,
            Anchor::Width => self.width = value,
            Anchor::Height => self.height = value,
        }
    }

    /// Builder form of [`set_anchor`](Self::set_anchor).
    pub fn with_anchor(mut self, anchor: Anchor, value: f64) -> Self {
        self.set_anchor(anchor, value);
        self
    }

    /// Offset the origin.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Smallest rect containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.min_x().min(other.min_x());
        let y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::new(x, y, max_x - x, max_y - y)
    }

    /// Half-open containment: min edges inclusive, max edges exclusive.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x() && x < self.max_x() && y >= self.min_y() && y < self.max_y()
    }

    /// Snap to the pixel grid of a display with the given scale factor.
    ///
    /// Min edges are floored and max edges ceiled, so the snapped rect
    /// always covers the original. A non-positive or non-finite scale
    /// returns the rect unchanged.
    pub fn snap(self, scale: f64) -> Rect {
        if !(scale.is_finite() && scale > 0.0) {
            return self;
        }
        let x0 = Float::floor(self.min_x() * scale) / scale;
        let y0 = Float::floor(self.min_y() * scale) / scale;
        let x1 = Float::ceil(self.max_x() * scale) / scale;
        let y1 = Float::ceil(self.max_y() * scale) / scale;
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// Tolerance used when comparing resolved coordinates.
pub const EPSILON: f64 = 1e-9;

pub(crate) fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    Float::abs(a - b) <= epsilon
}

/// Edge insets in CSS order: top, right, bottom, left.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create insets (CSS order: top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same inset on every edge.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// `vertical` on top and bottom, `horizontal` on left and right.
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left + right.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Top + bottom.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}
