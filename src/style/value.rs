//! The `Value` scalar and its `Unit` tag (§3 "Value").

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Matches the `unit` constant group in §6 exactly; the numeric discriminants
/// are part of the wire-compatible surface so keep them pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Unit {
    #[default]
    Undefined = 0,
    Point = 1,
    Percent = 2,
    Auto = 3,
}

/// A scalar `(magnitude, unit)` pair. See §3: POINT carries the magnitude
/// directly; PERCENT resolves against a supplied reference size (0 when the
/// reference is NaN); AUTO/UNDEFINED resolve to 0 for spacing, NaN for
/// main/cross sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Value {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Default for Value {
    fn default() -> Self {
        Value::UNDEFINED
    }
}

impl Value {
    pub const UNDEFINED: Value = Value { magnitude: f64::NAN, unit: Unit::Undefined };
    pub const AUTO: Value = Value { magnitude: f64::NAN, unit: Unit::Auto };
    pub const ZERO: Value = Value { magnitude: 0.0, unit: Unit::Point };

    pub const fn points(magnitude: f64) -> Self {
        Value { magnitude, unit: Unit::Point }
    }

    pub const fn percent(fraction: f64) -> Self {
        Value { magnitude: fraction * 100.0, unit: Unit::Percent }
    }

    pub const fn auto() -> Self {
        Value::AUTO
    }

    pub const fn undefined() -> Self {
        Value::UNDEFINED
    }

    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self.unit, Unit::Undefined | Unit::Auto)
    }

    /// Resolves against a spacing context: auto/undefined -> 0.
    pub fn resolve_spacing(&self, available: f64) -> f64 {
        match self.unit {
            Unit::Point => self.magnitude,
            Unit::Percent => {
                if available.is_nan() {
                    0.0
                } else {
                    available * (self.magnitude / 100.0)
                }
            }
            Unit::Auto | Unit::Undefined => 0.0,
        }
    }

    /// Resolves against a main/cross-size context: auto/undefined -> NaN
    /// ("unconstrained").
    pub fn resolve_size(&self, available: f64) -> f64 {
        match self.unit {
            Unit::Point => self.magnitude,
            Unit::Percent => {
                if available.is_nan() {
                    0.0
                } else {
                    available * (self.magnitude / 100.0)
                }
            }
            Unit::Auto | Unit::Undefined => f64::NAN,
        }
    }

    /// Construct a width/height value from a raw number, aliasing NaN to
    /// AUTO (§6: "Passing NaN to set_width/set_height is aliased to AUTO").
    pub fn from_size_input(value: f64) -> Self {
        if value.is_nan() {
            Value::AUTO
        } else {
            Value::points(value)
        }
    }

    /// Construct a position-edge value from a raw number, aliasing NaN to
    /// UNDEFINED ("clears the edge").
    pub fn from_position_input(value: f64) -> Self {
        if value.is_nan() {
            Value::UNDEFINED
        } else {
            Value::points(value)
        }
    }
}
