//! Generic 2D geometry primitives shared by the style, layout and compute
//! modules. Kept deliberately tiny and `Copy`-friendly, matching the
//! teacher's `geometry` module.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A physical axis: horizontal or vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsoluteAxis {
    Horizontal,
    Vertical,
}

impl AbsoluteAxis {
    pub fn other_axis(&self) -> AbsoluteAxis {
        match self {
            AbsoluteAxis::Horizontal => AbsoluteAxis::Vertical,
            AbsoluteAxis::Vertical => AbsoluteAxis::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point<f64> {
    pub const ZERO: Point<f64> = Point { x: 0.0, y: 0.0 };
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Size<U> {
        Size { width: f(self.width), height: f(self.height) }
    }

    /// Returns the component for the given axis (width for `Horizontal`).
    pub fn get_abs(&self, axis: AbsoluteAxis) -> &T {
        match axis {
            AbsoluteAxis::Horizontal => &self.width,
            AbsoluteAxis::Vertical => &self.height,
        }
    }

    pub fn get_abs_mut(&mut self, axis: AbsoluteAxis) -> &mut T {
        match axis {
            AbsoluteAxis::Horizontal => &mut self.width,
            AbsoluteAxis::Vertical => &mut self.height,
        }
    }
}

impl Size<f64> {
    pub const ZERO: Size<f64> = Size { width: 0.0, height: 0.0 };
    pub const NAN: Size<f64> = Size { width: f64::NAN, height: f64::NAN };

    pub fn main(&self, direction: crate::style::FlexDirection) -> f64 {
        if direction.is_row() {
            self.width
        } else {
            self.height
        }
    }

    pub fn cross(&self, direction: crate::style::FlexDirection) -> f64 {
        if direction.is_row() {
            self.height
        } else {
            self.width
        }
    }
}

/// A rectangle's four physical edges, used for resolved margin/padding/border
/// once they've been pulled out of the six-slot `Edge` arrays (see
/// `style::edge`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect<T> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

impl<T: Copy> Rect<T> {
    pub const fn new(left: T, top: T, right: T, bottom: T) -> Self {
        Self { left, top, right, bottom }
    }
}

impl Rect<f64> {
    pub const ZERO: Rect<f64> = Rect { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 };

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn main(&self, direction: crate::style::FlexDirection) -> f64 {
        if direction.is_row() {
            self.horizontal()
        } else {
            self.vertical()
        }
    }

    pub fn cross(&self, direction: crate::style::FlexDirection) -> f64 {
        if direction.is_row() {
            self.vertical()
        } else {
            self.horizontal()
        }
    }
}
