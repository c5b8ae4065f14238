//! The style data model (§3 "Style") and the small enumerations §6 pins to
//! fixed numeric discriminants for cross-implementation compatibility.

pub mod edge;
pub mod value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use edge::{Edge, EdgeNumbers, EdgeValues, Gutter};
pub use value::{Unit, Value};

use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Display {
    #[default]
    Flex = 0,
    None = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PositionType {
    Static = 0,
    #[default]
    Relative = 1,
    Absolute = 2,
}

/// Default is `Column`, a documented deviation from CSS (§6 table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FlexDirection {
    #[default]
    Column = 0,
    ColumnReverse = 1,
    Row = 2,
    RowReverse = 3,
}

impl FlexDirection {
    pub fn is_row(&self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }

    pub fn main_axis(&self) -> crate::geometry::AbsoluteAxis {
        if self.is_row() {
            crate::geometry::AbsoluteAxis::Horizontal
        } else {
            crate::geometry::AbsoluteAxis::Vertical
        }
    }

    pub fn cross_axis(&self) -> crate::geometry::AbsoluteAxis {
        self.main_axis().other_axis()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FlexWrap {
    #[default]
    NoWrap = 0,
    Wrap = 1,
    WrapReverse = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Align {
    Auto = 0,
    FlexStart = 1,
    Center = 2,
    FlexEnd = 3,
    #[default]
    Stretch = 4,
    Baseline = 5,
    SpaceBetween = 6,
    SpaceAround = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Justify {
    #[default]
    FlexStart = 0,
    Center = 1,
    FlexEnd = 2,
    SpaceBetween = 3,
    SpaceAround = 4,
    SpaceEvenly = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Overflow {
    #[default]
    Visible = 0,
    Hidden = 1,
    Scroll = 2,
}

impl Overflow {
    pub fn promotes_shrink(&self) -> bool {
        !matches!(self, Overflow::Visible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Direction {
    Inherit = 0,
    #[default]
    Ltr = 1,
    Rtl = 2,
}

/// Mode a measure callback receives for each axis (§6 "Measure callback
/// contract"). Distinct from the plain NaN-sentineled `f64` "available size"
/// used internally by the algorithm proper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum MeasureMode {
    #[default]
    Undefined = 0,
    Exactly = 1,
    AtMost = 2,
}

/// The fixed style record (§3). Defaults match the table in §3, which is
/// Yoga-compatible rather than CSS-compatible (`flex_direction = Column`,
/// `flex_shrink = 0`, `align_items = Stretch`, `position_type = Relative`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    pub display: Display,
    pub position_type: PositionType,
    pub position: EdgeValues,

    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub flex_grow: f64,
    pub flex_shrink: f64,
    pub flex_basis: Value,

    pub align_items: Align,
    pub align_self: Align,
    pub align_content: Align,
    pub justify_content: Justify,

    pub size: Size<Value>,
    pub min_size: Size<Value>,
    pub max_size: Size<Value>,
    pub aspect_ratio: f64,

    pub margin: EdgeValues,
    pub padding: EdgeValues,
    pub border: EdgeNumbers,
    pub gap: Size<f64>,

    pub overflow: Overflow,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            display: Display::default(),
            position_type: PositionType::default(),
            position: EdgeValues::default(),
            flex_direction: FlexDirection::default(),
            flex_wrap: FlexWrap::default(),
            flex_grow: 0.0,
            flex_shrink: 0.0,
            flex_basis: Value::AUTO,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            align_content: Align::FlexStart,
            justify_content: Justify::default(),
            size: Size::new(Value::AUTO, Value::AUTO),
            min_size: Size::new(Value::UNDEFINED, Value::UNDEFINED),
            max_size: Size::new(Value::UNDEFINED, Value::UNDEFINED),
            aspect_ratio: f64::NAN,
            margin: EdgeValues::default(),
            padding: EdgeValues::default(),
            border: EdgeNumbers::default(),
            gap: Size::new(0.0, 0.0),
            overflow: Overflow::default(),
        }
    }
}

impl Style {
    pub fn set_gap(&mut self, gutter: Gutter, value: f64) {
        match gutter {
            Gutter::Column => self.gap.width = value,
            Gutter::Row => self.gap.height = value,
            Gutter::All => self.gap = Size::new(value, value),
        }
    }

    pub fn resolved_align_self(&self, parent_align_items: Align) -> Align {
        if self.align_self == Align::Auto {
            parent_align_items
        } else {
            self.align_self
        }
    }
}
