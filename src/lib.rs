//! A CSS Flexbox Level 1 (subset) layout engine with incremental relayout.
//!
//! The tree lives in a slotmap arena (`node::Tree`); styles are plain data
//! (`style::Style`); the eleven-phase algorithm and the reduced intrinsic
//! measurer live under `compute` and are reached only through
//! `Tree::calculate_layout`. Nothing under `compute` is part of the public
//! surface — callers only ever see styles in, layout out.

mod compute;
#[cfg(feature = "debug")]
mod debug;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod node;
pub mod prelude;
mod sys;
pub mod style;

pub use error::{Error, Result};
pub use layout::Layout;
pub use node::{BaselineFunc, MeasureFunc, NodeId, Tree};
pub use style::{
    Align, Direction, Display, Edge, EdgeNumbers, EdgeValues, FlexDirection, FlexWrap, Gutter, Justify,
    MeasureMode, Overflow, PositionType, Style, Unit, Value,
};
