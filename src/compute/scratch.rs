//! Reusable per-call scratch buffers for the recursive layout pipeline (§5
//! "must not allocate" on the hot paths, §9 "a per-call context passed down
//! the recursion"). A `ScratchFrame` holds every `Vec` the line-breaking and
//! flex-distribution code needs; `with_frame` checks one out of a
//! thread-local pool, clears it, and hands it to the caller instead of each
//! phase allocating its own.
//!
//! Recursion is depth-first, so at any instant at most one `flexbox::compute`
//! call per stack frame is actually using a `ScratchFrame` — a child's
//! recursive call checks out a second frame from the pool (allocating a new
//! one only the first time that depth is reached) rather than reusing its
//! parent's, and returns its frame to the pool before the parent's own call
//! resumes. Across a whole layout pass the pool settles at one frame per
//! level of tree depth and never grows past that.

use std::cell::RefCell;

use crate::node::NodeId;

pub(crate) struct LineLayout {
    pub start_offset: f64,
    pub item_spacing: f64,
    pub effective_main: f64,
    pub cross_offset: f64,
    pub cross_size: f64,
    pub baseline: f64,
}

#[derive(Default)]
pub(crate) struct ScratchFrame {
    /// Phase 5 input snapshot: `node`'s own children, before the
    /// relative/absolute split.
    pub own_children: Vec<NodeId>,
    /// Phase 5 output: children participating in flex layout, in source
    /// order.
    pub relative_children: Vec<NodeId>,
    /// Phase 6a output, flattened: every relative child in line order, with
    /// `line_bounds` marking where each line starts and ends. Line `li`
    /// spans `line_children[line_bounds[li]..line_bounds[li + 1]]`.
    pub line_children: Vec<NodeId>,
    pub line_bounds: Vec<usize>,
    /// Scratch for `WrapReverse`'s line-order flip; swapped with
    /// `line_children`/`line_bounds` rather than allocated fresh.
    pub reverse_buf: Vec<NodeId>,
    pub reverse_bounds: Vec<usize>,
    pub line_used_main: Vec<f64>,
    pub line_layouts: Vec<LineLayout>,
}

impl ScratchFrame {
    fn clear(&mut self) {
        self.own_children.clear();
        self.relative_children.clear();
        self.line_children.clear();
        self.line_bounds.clear();
        self.reverse_buf.clear();
        self.reverse_bounds.clear();
        self.line_used_main.clear();
        self.line_layouts.clear();
    }
}

thread_local! {
    static POOL: RefCell<Vec<ScratchFrame>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` with a freshly-cleared scratch frame. The frame is popped out of
/// the thread-local pool (allocating a new one if the pool is empty) before
/// `f` runs and pushed back after, so the pool's `RefCell` is never borrowed
/// across `f` — a nested call made by child recursion inside `f` pops its
/// own frame rather than hitting an already-borrowed `RefCell`.
pub(crate) fn with_frame<R>(f: impl FnOnce(&mut ScratchFrame) -> R) -> R {
    let mut frame = POOL.with(|pool| pool.borrow_mut().pop()).unwrap_or_default();
    frame.clear();
    let result = f(&mut frame);
    POOL.with(|pool| pool.borrow_mut().push(frame));
    result
}
