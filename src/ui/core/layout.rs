use super::geom::{Alignment, BoundsChange, GeomError, Point, Rect};

/// Non-negative insets around a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u16; 4]", into = "[u16; 4]")]
pub struct Spacing {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl Spacing {
    pub const fn new(left: u16, top: u16, right: u16, bottom: u16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn all(v: u16) -> Self {
        Self::new(v, v, v, v)
    }

    pub const fn xy(x: u16, y: u16) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn horizontal(&self) -> i32 {
        i32::from(self.left) + i32::from(self.right)
    }

    pub fn vertical(&self) -> i32 {
        i32::from(self.top) + i32::from(self.bottom)
    }

    pub fn top_left(&self) -> Point {
        Point::new(i32::from(self.left), i32::from(self.top))
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(i32::from(self.right), i32::from(self.bottom))
    }
}

impl From<[u16; 4]> for Spacing {
    fn from([left, top, right, bottom]: [u16; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<Spacing> for [u16; 4] {
    fn from(s: Spacing) -> Self {
        [s.left, s.top, s.right, s.bottom]
    }
}

/// Split position: an absolute coordinate or a fraction of the span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SplitAt {
    Abs(i32),
    Ratio(f32),
}

impl From<i32> for SplitAt {
    fn from(v: i32) -> Self {
        SplitAt::Abs(v)
    }
}

impl From<f32> for SplitAt {
    fn from(v: f32) -> Self {
        SplitAt::Ratio(v)
    }
}

impl SplitAt {
    fn resolve(self, start: i32, span: i32) -> i32 {
        match self {
            SplitAt::Abs(v) => v,
            SplitAt::Ratio(r) => start + (span as f32 * r.rem_euclid(1.0)).round() as i32,
        }
    }
}

impl Rect {
    pub fn expand(self, s: Spacing) -> Rect {
        Rect::new(
            self.left() - i32::from(s.left),
            self.top() - i32::from(s.top),
            self.width() + s.horizontal(),
            self.height() + s.vertical(),
        )
    }

    pub fn reduce(self, s: Spacing) -> Rect {
        Rect::new(
            self.left() + i32::from(s.left),
            self.top() + i32::from(s.top),
            self.width() - s.horizontal(),
            self.height() - s.vertical(),
        )
    }

    pub fn grow(self, amount: i32) -> Rect {
        Rect::new(
            self.left() - amount,
            self.top() - amount,
            self.width() + amount * 2,
            self.height() + amount * 2,
        )
    }

    pub fn shrink(self, amount: i32) -> Rect {
        self.grow(-amount)
    }

    /// Splits at a horizontal line; the first half is above it.
    pub fn split_v(self, at: impl Into<SplitAt>) -> (Rect, Rect) {
        let y = at.into().resolve(self.top(), self.height());
        if y <= self.top() {
            return (Rect::new(self.left(), self.top(), self.width(), 0), self);
        }
        if y >= self.bottom() {
            return (self, Rect::new(self.left(), self.bottom(), self.width(), 0));
        }
        (
            Rect::from_edges(self.left(), self.top(), self.right(), y),
            Rect::from_edges(self.left(), y, self.right(), self.bottom()),
        )
    }

    /// Splits at a vertical line; the first half is left of it.
    pub fn split_h(self, at: impl Into<SplitAt>) -> (Rect, Rect) {
        let x = at.into().resolve(self.left(), self.width());
        if x <= self.left() {
            return (Rect::new(self.left(), self.top(), 0, self.height()), self);
        }
        if x >= self.right() {
            return (self, Rect::new(self.right(), self.top(), 0, self.height()));
        }
        (
            Rect::from_edges(self.left(), self.top(), x, self.bottom()),
            Rect::from_edges(x, self.top(), self.right(), self.bottom()),
        )
    }

    pub fn align_to(self, other: &Rect, alignment: Alignment) -> Rect {
        let mut out = self;
        if alignment.contains(Alignment::CENTER) {
            out.set_left(other.center().x - self.width() / 2);
        } else if alignment.contains(Alignment::LEFT) {
            out.set_left(other.left());
        } else if alignment.contains(Alignment::RIGHT) {
            out.set_right(other.right());
        }

        if alignment.contains(Alignment::MIDDLE) {
            out.set_top(other.center().y - self.height() / 2);
        } else if alignment.contains(Alignment::TOP) {
            out.set_top(other.top());
        } else if alignment.contains(Alignment::BOTTOM) {
            out.set_bottom(other.bottom());
        }
        out
    }

    /// Moves the flagged edges that differ from the current ones. Unflagged edges stay put.
    pub fn set_bounds(&mut self, left: i32, top: i32, right: i32, bottom: i32, changed: BoundsChange) {
        let mut l = self.left();
        let mut t = self.top();
        let mut r = self.right();
        let mut b = self.bottom();
        if changed.contains(BoundsChange::LEFT) && left != l {
            l = left;
        }
        if changed.contains(BoundsChange::TOP) && top != t {
            t = top;
        }
        if changed.contains(BoundsChange::RIGHT) && right != r {
            r = right;
        }
        if changed.contains(BoundsChange::BOTTOM) && bottom != b {
            b = bottom;
        }
        *self = Rect::from_edges(l, t, r, b);
    }

    /// Keeps the rectangle around `smaller` and inside `larger`.
    pub fn clamp(&mut self, smaller: &Rect, larger: &Rect) -> Result<(), GeomError> {
        if !larger.contains_rect(smaller) {
            return Err(GeomError::NotContained);
        }
        let left = larger.left().max(self.left().min(smaller.left()));
        let top = larger.top().max(self.top().min(smaller.top()));
        let right = smaller.right().max(self.right().min(larger.right()));
        let bottom = smaller.bottom().max(self.bottom().min(larger.bottom()));
        self.set_bounds(left, top, right, bottom, BoundsChange::ALL);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/layout.rs"]
mod tests;
