use std::fmt;
use std::ops::{Add, AddAssign, Index, Mul, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeomError {
    IndexOutOfRange(usize),
    NotContained,
    NonPositiveScale,
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeomError::IndexOutOfRange(i) => write!(f, "index {i} out of range [0, 2)"),
            GeomError::NotContained => write!(f, "smaller rectangle is not inside larger one"),
            GeomError::NonPositiveScale => write!(f, "scale factor must be positive"),
        }
    }
}

impl std::error::Error for GeomError {}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn get(&self, index: usize) -> Result<i32, GeomError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            i => Err(GeomError::IndexOutOfRange(i)),
        }
    }

    /// Larger of the two per-axis magnitudes.
    pub fn max_abs(&self) -> i32 {
        self.x.abs().max(self.y.abs())
    }
}

impl Index<usize> for Point {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            i => panic!("{}", GeomError::IndexOutOfRange(i)),
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Width and height, never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    pub fn get(&self, index: usize) -> Result<i32, GeomError> {
        match index {
            0 => Ok(self.width),
            1 => Ok(self.height),
            i => Err(GeomError::IndexOutOfRange(i)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<[i32; 2]> for Size {
    fn from([width, height]: [i32; 2]) -> Self {
        Size::new(width, height)
    }
}

impl From<Size> for [i32; 2] {
    fn from(s: Size) -> Self {
        [s.width, s.height]
    }
}

impl Index<usize> for Size {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        match index {
            0 => &self.width,
            1 => &self.height,
            i => panic!("{}", GeomError::IndexOutOfRange(i)),
        }
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl Mul<i32> for Size {
    type Output = Size;

    fn mul(self, rhs: i32) -> Size {
        Size::new(self.width * rhs, self.height * rhs)
    }
}

/// Axis-aligned rectangle. Width and height are clamped to zero on every write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: if w < 0 { 0 } else { w },
            h: if h < 0 { 0 } else { h },
        }
    }

    pub fn from_parts(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.w
    }

    pub fn height(&self) -> i32 {
        self.h
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Moves the rectangle so its right edge lands on `right`.
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Moves the rectangle so its bottom edge lands on `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    pub fn set_width(&mut self, width: i32) {
        self.w = width.max(0);
    }

    pub fn set_height(&mut self, height: i32) {
        self.h = height.max(0);
    }

    pub fn set_location(&mut self, location: Point) {
        self.x = location.x;
        self.y = location.y;
    }

    pub fn set_size(&mut self, size: Size) {
        self.set_width(size.width);
        self.set_height(size.height);
    }

    pub fn translate(self, offset: Point) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    pub fn contains(&self, p: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(self.x >= other.right()
            || other.x >= self.right()
            || self.y >= other.bottom()
            || other.y >= self.bottom())
    }

    /// Overlap of both rectangles, or `Rect::ZERO` when they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        if !self.intersects(other) {
            return Rect::ZERO;
        }
        Rect::from_edges(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::from_edges(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Scales the rectangle about `origin`.
    pub fn scale(self, factor: f32, origin: Point) -> Result<Rect, GeomError> {
        if factor <= 0.0 {
            return Err(GeomError::NonPositiveScale);
        }
        let dx = ((origin.x - self.x) as f32 * factor).round() as i32;
        let dy = ((origin.y - self.y) as f32 * factor).round() as i32;
        Ok(Rect::new(
            origin.x - dx,
            origin.y - dy,
            (self.w as f32 * factor).round() as i32,
            (self.h as f32 * factor).round() as i32,
        ))
    }
}

macro_rules! flag_ops {
    ($ty:ident) => {
        impl $ty {
            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn bits(self) -> u8 {
                self.0
            }

            pub const fn contains(self, other: Self) -> bool {
                (self.0 & other.0) == other.0
            }

            pub const fn intersects(self, other: Self) -> bool {
                (self.0 & other.0) != 0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }
        }

        impl ::std::ops::BitOr for $ty {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self::Output {
                Self(self.0 | rhs.0)
            }
        }

        impl ::std::ops::BitOrAssign for $ty {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}

pub(crate) use flag_ops;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alignment(u8);

impl Alignment {
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const TOP: Self = Self(1 << 2);
    pub const BOTTOM: Self = Self(1 << 3);
    pub const CENTER: Self = Self(Self::LEFT.0 | Self::RIGHT.0);
    pub const MIDDLE: Self = Self(Self::TOP.0 | Self::BOTTOM.0);
}

flag_ops!(Alignment);

/// Edges touched by `Rect::set_bounds`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundsChange(u8);

impl BoundsChange {
    pub const LEFT: Self = Self(1 << 0);
    pub const TOP: Self = Self(1 << 1);
    pub const RIGHT: Self = Self(1 << 2);
    pub const BOTTOM: Self = Self(1 << 3);
    pub const LOCATION: Self = Self(Self::LEFT.0 | Self::TOP.0);
    pub const SIZE: Self = Self(Self::RIGHT.0 | Self::BOTTOM.0);
    pub const ALL: Self = Self(Self::LOCATION.0 | Self::SIZE.0);
}

flag_ops!(BoundsChange);

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/geom.rs"]
mod tests;
