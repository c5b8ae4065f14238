//! Convenience re-export of the common public surface. `use flexnode::prelude::*;`
//! pulls in the tree, the style types, and the error type without naming each
//! module individually.

pub use crate::error::{Error, Result};
pub use crate::layout::Layout;
pub use crate::node::{BaselineFunc, MeasureFunc, NodeId, Tree};
pub use crate::style::{
    Align, Direction, Display, Edge, EdgeNumbers, EdgeValues, FlexDirection, FlexWrap, Gutter, Justify,
    MeasureMode, Overflow, PositionType, Style, Unit, Value,
};
