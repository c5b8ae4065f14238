//! The six-slot "Edge array" (§3) and the enumeration that indexes it (§6).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::style::value::Value;
use crate::style::{Direction, FlexDirection};

/// Matches the `edge` constant group in §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Edge {
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
    Start = 4,
    End = 5,
    Horizontal = 6,
    Vertical = 7,
    All = 8,
}

/// Matches the `gutter` constant group in §6: the setter argument for the
/// two `gap` scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Gutter {
    Column = 0,
    Row = 1,
    All = 2,
}

const LEFT: usize = 0;
const TOP: usize = 1;
const RIGHT: usize = 2;
const BOTTOM: usize = 3;
const START: usize = 4;
const END: usize = 5;

/// A six-slot `[left, top, right, bottom, start, end]` array of `Value`s.
/// Slots 0-3 are physical, 4-5 logical. Used for margin, padding and the
/// `position` offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeValues([Value; 6]);

impl Default for EdgeValues {
    fn default() -> Self {
        EdgeValues([Value::UNDEFINED; 6])
    }
}

impl EdgeValues {
    pub fn zero() -> Self {
        EdgeValues([Value::ZERO; 6])
    }

    pub fn auto() -> Self {
        EdgeValues([Value::AUTO; 6])
    }

    /// Sets a single physical or logical slot directly, for setters that
    /// operate per-edge (§6). `Edge::Horizontal`/`Vertical`/`All` expand to
    /// their physical members.
    pub fn set(&mut self, edge: Edge, value: Value) {
        match edge {
            Edge::Left => self.0[LEFT] = value,
            Edge::Top => self.0[TOP] = value,
            Edge::Right => self.0[RIGHT] = value,
            Edge::Bottom => self.0[BOTTOM] = value,
            Edge::Start => self.0[START] = value,
            Edge::End => self.0[END] = value,
            Edge::Horizontal => {
                self.0[LEFT] = value;
                self.0[RIGHT] = value;
            }
            Edge::Vertical => {
                self.0[TOP] = value;
                self.0[BOTTOM] = value;
            }
            Edge::All => self.0 = [value; 6],
        }
    }

    pub fn get_raw(&self, edge: Edge) -> Value {
        match edge {
            Edge::Left => self.0[LEFT],
            Edge::Top => self.0[TOP],
            Edge::Right => self.0[RIGHT],
            Edge::Bottom => self.0[BOTTOM],
            Edge::Start => self.0[START],
            Edge::End => self.0[END],
            _ => Value::UNDEFINED,
        }
    }

    /// Resolves one physical edge (0=left,1=top,2=right,3=bottom), honoring
    /// logical start/end precedence on the inline axis (§4.4).
    pub fn resolve_spacing(&self, physical: usize, direction: Direction, available: f64) -> f64 {
        self.logical_slot_for(physical, direction)
            .map(|slot| self.0[slot])
            .filter(|v| v.unit != crate::style::value::Unit::Undefined)
            .unwrap_or(self.0[physical])
            .resolve_spacing(available)
    }

    pub fn resolve_size(&self, physical: usize, direction: Direction, available: f64) -> f64 {
        self.logical_slot_for(physical, direction)
            .map(|slot| self.0[slot])
            .filter(|v| v.unit != crate::style::value::Unit::Undefined)
            .unwrap_or(self.0[physical])
            .resolve_size(available)
    }

    pub fn raw_value_for(&self, physical: usize, direction: Direction) -> Value {
        match self.logical_slot_for(physical, direction) {
            Some(slot) if self.0[slot].unit != crate::style::value::Unit::Undefined => self.0[slot],
            _ => self.0[physical],
        }
    }

    pub fn is_auto(&self, physical: usize, direction: Direction) -> bool {
        self.raw_value_for(physical, direction).is_auto()
    }

    /// `start` maps to left under LTR, right under RTL (and vice versa for
    /// `end`); this only applies to inline-axis physical edges (left/right).
    /// Block-axis edges (top/bottom) never consult the logical slots.
    fn logical_slot_for(&self, physical: usize, direction: Direction) -> Option<usize> {
        match physical {
            LEFT => Some(if direction == Direction::Rtl { END } else { START }),
            RIGHT => Some(if direction == Direction::Rtl { START } else { END }),
            _ => None,
        }
    }

    pub fn resolve_main_start_end(
        &self,
        flex_direction: FlexDirection,
        direction: Direction,
    ) -> (usize, usize) {
        if flex_direction.is_row() {
            if flex_direction.is_reverse() ^ (direction == Direction::Rtl) {
                (RIGHT, LEFT)
            } else {
                (LEFT, RIGHT)
            }
        } else if flex_direction.is_reverse() {
            (BOTTOM, TOP)
        } else {
            (TOP, BOTTOM)
        }
    }
}

/// A six-slot array of plain numbers (always points), used for `border`.
/// NaN is the "not set" sentinel for the logical slots 4-5.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeNumbers([f64; 6]);

impl Default for EdgeNumbers {
    fn default() -> Self {
        EdgeNumbers([0.0, 0.0, 0.0, 0.0, f64::NAN, f64::NAN])
    }
}

impl EdgeNumbers {
    pub fn zero() -> Self {
        EdgeNumbers([0.0; 6])
    }

    pub fn set(&mut self, edge: Edge, value: f64) {
        match edge {
            Edge::Left => self.0[LEFT] = value,
            Edge::Top => self.0[TOP] = value,
            Edge::Right => self.0[RIGHT] = value,
            Edge::Bottom => self.0[BOTTOM] = value,
            Edge::Start => self.0[START] = value,
            Edge::End => self.0[END] = value,
            Edge::Horizontal => {
                self.0[LEFT] = value;
                self.0[RIGHT] = value;
            }
            Edge::Vertical => {
                self.0[TOP] = value;
                self.0[BOTTOM] = value;
            }
            Edge::All => self.0 = [value; 6],
        }
    }

    pub fn resolve(&self, physical: usize, direction: Direction) -> f64 {
        let logical = match physical {
            LEFT => Some(if direction == Direction::Rtl { END } else { START }),
            RIGHT => Some(if direction == Direction::Rtl { START } else { END }),
            _ => None,
        };
        if let Some(slot) = logical {
            if !self.0[slot].is_nan() {
                return self.0[slot];
            }
        }
        self.0[physical].max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_start_overrides_physical_left_under_ltr() {
        let mut edges = EdgeValues::zero();
        edges.set(Edge::Left, Value::points(5.0));
        edges.set(Edge::Start, Value::points(9.0));
        assert_eq!(edges.resolve_spacing(LEFT, Direction::Ltr, f64::NAN), 9.0);
    }

    #[test]
    fn start_maps_to_right_under_rtl() {
        let mut edges = EdgeValues::zero();
        edges.set(Edge::Start, Value::points(9.0));
        assert_eq!(edges.resolve_spacing(RIGHT, Direction::Rtl, f64::NAN), 9.0);
    }

    #[test]
    fn percent_with_nan_available_resolves_to_zero() {
        let mut edges = EdgeValues::zero();
        edges.set(Edge::Top, Value::percent(0.5));
        assert_eq!(edges.resolve_spacing(TOP, Direction::Ltr, f64::NAN), 0.0);
    }
}
