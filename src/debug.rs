//! A `println!`-based tracer for the layout algorithm, enabled by the
//! `debug` feature. Mirrors the teacher's `NODE_LOGGER`: a thread-local
//! indent depth plus a handful of `push_node`/`pop_node`/`log` helpers
//! called from the hot path behind `#[cfg(feature = "debug")]` so they cost
//! nothing when the feature is off.

use std::cell::RefCell;
use std::fmt::Debug;

use crate::node::NodeId;

thread_local! {
    static INDENT: RefCell<usize> = const { RefCell::new(0) };
}

pub(crate) struct NodeLogger;

pub(crate) static NODE_LOGGER: NodeLogger = NodeLogger;

impl NodeLogger {
    pub(crate) fn push_node(&self, node: NodeId) {
        self.log(&format!("{node:?}"));
        INDENT.with(|indent| *indent.borrow_mut() += 1);
    }

    pub(crate) fn pop_node(&self) {
        INDENT.with(|indent| {
            let mut indent = indent.borrow_mut();
            *indent = indent.saturating_sub(1);
        });
    }

    pub(crate) fn log(&self, message: &str) {
        let depth = INDENT.with(|indent| *indent.borrow());
        println!("{}{}", "  ".repeat(depth), message);
    }

    pub(crate) fn labelled_debug_log<T: Debug>(&self, label: &str, value: T) {
        let depth = INDENT.with(|indent| *indent.borrow());
        println!("{}{label}: {value:?}", "  ".repeat(depth));
    }
}
