//! The node model: a strict-ownership forest stored in a slotmap arena
//! (§3 "Relationships and ownership", §4.5, §6). A child is logically owned
//! by exactly one parent's `children` list; the `parent` field is a
//! non-owning back-reference used only by `mark_dirty` and detach-on-insert
//! (§9 "Ownership is strict tree ownership").

mod cache;
#[cfg(feature = "random")]
pub mod random;

pub use cache::{MeasureCache, SizingCache};

use slotmap::SlotMap;

use crate::compute;
use crate::error::{Error, Result};
use crate::layout::{FlexInfo, Layout};
use crate::style::{Direction, Edge, Gutter, MeasureMode, Style, Value};

slotmap::new_key_type! {
    /// Opaque handle into a `Tree`. Stable across mutation, invalidated only
    /// by `destroy`.
    pub struct NodeId;
}

pub type MeasureFunc = Box<dyn FnMut(f64, MeasureMode, f64, MeasureMode) -> (f64, f64)>;
pub type BaselineFunc = Box<dyn Fn(f64, f64) -> f64>;

pub(crate) struct NodeData {
    pub style: Style,
    pub flex: FlexInfo,
    pub layout: Layout,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub measure_func: Option<MeasureFunc>,
    pub baseline_func: Option<BaselineFunc>,
    pub measure_cache: MeasureCache,
    pub sizing_cache: SizingCache,
    pub is_dirty: bool,
    pub has_new_layout: bool,
    /// Only meaningful when `calculate_layout` is invoked directly on this
    /// node (normally the tree root); backs the O(1) no-change fast path.
    pub last_calc: Option<(f64, f64, Direction)>,
}

impl NodeData {
    fn new(style: Style) -> Self {
        NodeData {
            style,
            flex: FlexInfo::default(),
            layout: Layout::ZERO,
            parent: None,
            children: Vec::new(),
            measure_func: None,
            baseline_func: None,
            measure_cache: MeasureCache::default(),
            sizing_cache: SizingCache::default(),
            is_dirty: true,
            has_new_layout: false,
            last_calc: None,
        }
    }
}

/// The owning arena of all nodes. This is the crate's main public entry
/// point, analogous to the teacher's `Taffy` struct.
#[derive(Default)]
pub struct Tree {
    nodes: SlotMap<NodeId, NodeData>,
}

impl Tree {
    pub fn new() -> Self {
        Tree { nodes: SlotMap::with_key() }
    }

    fn get(&self, node: NodeId) -> Result<&NodeData> {
        self.nodes.get(node).ok_or(Error::InvalidNodeId(node))
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(node).ok_or(Error::InvalidNodeId(node))
    }

    // ---- Lifecycle -------------------------------------------------

    pub fn new_leaf(&mut self, style: Style) -> NodeId {
        self.nodes.insert(NodeData::new(style))
    }

    pub fn new_with_children(&mut self, style: Style, children: &[NodeId]) -> Result<NodeId> {
        for &child in children {
            if !self.nodes.contains_key(child) {
                return Err(Error::InvalidChildNode(child));
            }
        }
        let parent = self.nodes.insert(NodeData::new(style));
        for (index, &child) in children.iter().enumerate() {
            self.insert_child(parent, index, child)?;
        }
        Ok(parent)
    }

    /// Detaches `node`, releases its caches and children (recursively, but
    /// without any other teardown work — §3 "Lifecycle").
    pub fn destroy(&mut self, node: NodeId) -> Result<()> {
        self.detach(node)?;
        self.destroy_subtree(node)
    }

    fn destroy_subtree(&mut self, node: NodeId) -> Result<()> {
        let children = self.get(node)?.children.clone();
        for child in children {
            self.destroy_subtree(child)?;
        }
        self.nodes.remove(node);
        Ok(())
    }

    // ---- Tree operations --------------------------------------------

    fn detach(&mut self, node: NodeId) -> Result<()> {
        let old_parent = self.get(node)?.parent;
        if let Some(parent) = old_parent {
            let siblings = &mut self.get_mut(parent)?.children;
            if let Some(pos) = siblings.iter().position(|&c| c == node) {
                siblings.remove(pos);
                self.invalidate_siblings_from(parent, pos)?;
            }
            self.get_mut(node)?.parent = None;
        }
        Ok(())
    }

    /// `insert_child` detaches `child` from its previous parent first,
    /// clamps `index` into bounds, invalidates every sibling from `index+1`
    /// onward (their positions may shift), and marks `parent` dirty (§4.5).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::InvalidParentNode(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(Error::InvalidChildNode(child));
        }
        self.detach(child)?;

        let len = self.get(parent)?.children.len();
        let index = index.min(len);

        self.get_mut(parent)?.children.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);
        self.invalidate_siblings_from(parent, index + 1)?;
        self.mark_dirty(parent)?;
        Ok(())
    }

    /// Symmetric to `insert_child`: invalidates siblings from the removal
    /// index onward.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let pos = self
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(Error::InvalidChildNode(child))?;
        self.get_mut(parent)?.children.remove(pos);
        self.get_mut(child)?.parent = None;
        self.invalidate_siblings_from(parent, pos)?;
        self.mark_dirty(parent)?;
        Ok(())
    }

    fn invalidate_siblings_from(&mut self, parent: NodeId, from_index: usize) -> Result<()> {
        let siblings = self.get(parent)?.children.clone();
        for &sibling in siblings.iter().skip(from_index) {
            self.get_mut(sibling)?.flex.fingerprint.valid = false;
        }
        Ok(())
    }

    pub fn get_child(&self, parent: NodeId, index: usize) -> Result<NodeId> {
        let data = self.get(parent)?;
        data.children
            .get(index)
            .copied()
            .ok_or(Error::ChildIndexOutOfBounds { parent, child_count: data.children.len(), index })
    }

    pub fn get_parent(&self, node: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(node)?.parent)
    }

    pub fn get_child_count(&self, node: NodeId) -> Result<usize> {
        Ok(self.get(node)?.children.len())
    }

    pub(crate) fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn is_childless(&self, node: NodeId) -> bool {
        self.nodes.get(node).map(|d| d.children.is_empty()).unwrap_or(true)
    }

    pub(crate) fn is_dirty_unchecked(&self, node: NodeId) -> bool {
        self.nodes[node].is_dirty
    }

    // ---- Style ---------------------------------------------------------

    pub fn style(&self, node: NodeId) -> Result<&Style> {
        Ok(&self.get(node)?.style)
    }

    pub(crate) fn style_unchecked(&self, node: NodeId) -> &Style {
        &self.nodes[node].style
    }

    pub(crate) fn flex(&self, node: NodeId) -> &FlexInfo {
        &self.nodes[node].flex
    }

    pub(crate) fn flex_mut(&mut self, node: NodeId) -> &mut FlexInfo {
        &mut self.nodes.get_mut(node).expect("valid node").flex
    }

    pub(crate) fn layout_unchecked(&self, node: NodeId) -> &Layout {
        &self.nodes[node].layout
    }

    pub(crate) fn layout_mut(&mut self, node: NodeId) -> &mut Layout {
        &mut self.nodes.get_mut(node).expect("valid node").layout
    }

    pub(crate) fn measure_cache_mut(&mut self, node: NodeId) -> &mut MeasureCache {
        &mut self.nodes.get_mut(node).expect("valid node").measure_cache
    }

    pub(crate) fn sizing_cache(&self, node: NodeId) -> &SizingCache {
        &self.nodes[node].sizing_cache
    }

    pub(crate) fn sizing_cache_mut(&mut self, node: NodeId) -> &mut SizingCache {
        &mut self.nodes.get_mut(node).expect("valid node").sizing_cache
    }

    pub(crate) fn measure_func_mut(&mut self, node: NodeId) -> Option<&mut MeasureFunc> {
        self.nodes.get_mut(node).expect("valid node").measure_func.as_mut()
    }

    pub(crate) fn baseline_func(&self, node: NodeId) -> Option<&BaselineFunc> {
        self.nodes[node].baseline_func.as_ref()
    }

    /// Whole-style replace. This is the primary style-mutation entry point
    /// (matching the teacher's `Taffy::set_style`); it always calls
    /// `mark_dirty`.
    pub fn set_style(&mut self, node: NodeId, style: Style) -> Result<()> {
        self.get_mut(node)?.style = style;
        self.mark_dirty(node)
    }

    /// Applies `f` to the node's style and marks it dirty. The building
    /// block every convenience setter below is written in terms of.
    pub fn modify_style(&mut self, node: NodeId, f: impl FnOnce(&mut Style)) -> Result<()> {
        f(&mut self.get_mut(node)?.style);
        self.mark_dirty(node)
    }

    /// NaN is aliased to `AUTO` (§6).
    pub fn set_width(&mut self, node: NodeId, value: f64) -> Result<()> {
        self.modify_style(node, |s| s.size.width = Value::from_size_input(value))
    }

    pub fn set_height(&mut self, node: NodeId, value: f64) -> Result<()> {
        self.modify_style(node, |s| s.size.height = Value::from_size_input(value))
    }

    pub fn set_width_value(&mut self, node: NodeId, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.size.width = value)
    }

    pub fn set_height_value(&mut self, node: NodeId, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.size.height = value)
    }

    pub fn set_min_width(&mut self, node: NodeId, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.min_size.width = value)
    }

    pub fn set_min_height(&mut self, node: NodeId, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.min_size.height = value)
    }

    pub fn set_max_width(&mut self, node: NodeId, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.max_size.width = value)
    }

    pub fn set_max_height(&mut self, node: NodeId, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.max_size.height = value)
    }

    pub fn set_flex_grow(&mut self, node: NodeId, value: f64) -> Result<()> {
        self.modify_style(node, |s| s.flex_grow = value)
    }

    pub fn set_flex_shrink(&mut self, node: NodeId, value: f64) -> Result<()> {
        self.modify_style(node, |s| s.flex_shrink = value)
    }

    pub fn set_flex_basis(&mut self, node: NodeId, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.flex_basis = value)
    }

    /// NaN clears the edge to `UNDEFINED` (§6).
    pub fn set_position(&mut self, node: NodeId, edge: Edge, value: f64) -> Result<()> {
        self.modify_style(node, |s| s.position.set(edge, Value::from_position_input(value)))
    }

    pub fn set_margin(&mut self, node: NodeId, edge: Edge, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.margin.set(edge, value))
    }

    pub fn set_padding(&mut self, node: NodeId, edge: Edge, value: Value) -> Result<()> {
        self.modify_style(node, |s| s.padding.set(edge, value))
    }

    pub fn set_border(&mut self, node: NodeId, edge: Edge, value: f64) -> Result<()> {
        self.modify_style(node, |s| s.border.set(edge, value))
    }

    pub fn set_gap(&mut self, node: NodeId, gutter: Gutter, value: f64) -> Result<()> {
        self.modify_style(node, |s| s.set_gap(gutter, value))
    }

    pub fn set_aspect_ratio(&mut self, node: NodeId, value: f64) -> Result<()> {
        self.modify_style(node, |s| s.aspect_ratio = value)
    }

    // ---- Measure / baseline callbacks -----------------------------------

    pub fn set_measure_func(&mut self, node: NodeId, f: MeasureFunc) -> Result<()> {
        self.get_mut(node)?.measure_func = Some(f);
        self.mark_dirty(node)
    }

    pub fn unset_measure_func(&mut self, node: NodeId) -> Result<()> {
        self.get_mut(node)?.measure_func = None;
        self.mark_dirty(node)
    }

    pub fn has_measure_func(&self, node: NodeId) -> Result<bool> {
        Ok(self.get(node)?.measure_func.is_some())
    }

    pub(crate) fn has_measure_func_unchecked(&self, node: NodeId) -> bool {
        self.nodes[node].measure_func.is_some()
    }

    pub fn set_baseline_func(&mut self, node: NodeId, f: BaselineFunc) -> Result<()> {
        self.get_mut(node)?.baseline_func = Some(f);
        self.mark_dirty(node)
    }

    pub fn unset_baseline_func(&mut self, node: NodeId) -> Result<()> {
        self.get_mut(node)?.baseline_func = None;
        self.mark_dirty(node)
    }

    // ---- Dirty propagation (§4.5, invariant I5) -------------------------

    pub fn is_dirty(&self, node: NodeId) -> Result<bool> {
        Ok(self.get(node)?.is_dirty)
    }

    /// Walks from `node` upward to root. At every node touched: clears the
    /// measure cache, clears the sizing cache, invalidates the fingerprint.
    /// Stops ascending once an already-dirty ancestor is reached, but that
    /// ancestor's own caches are still cleared on the way up (I5: "do not
    /// stop without clearing").
    pub fn mark_dirty(&mut self, node: NodeId) -> Result<()> {
        if !self.nodes.contains_key(node) {
            return Err(Error::InvalidNodeId(node));
        }
        let mut current = Some(node);
        while let Some(id) = current {
            let data = self.nodes.get_mut(id).expect("valid node");
            let already_dirty = data.is_dirty;
            data.is_dirty = true;
            data.measure_cache.clear();
            data.sizing_cache.invalidate();
            data.flex.fingerprint.valid = false;
            if already_dirty {
                break;
            }
            current = data.parent;
        }
        Ok(())
    }

    pub fn has_new_layout(&self, node: NodeId) -> Result<bool> {
        Ok(self.get(node)?.has_new_layout)
    }

    pub fn mark_layout_seen(&mut self, node: NodeId) -> Result<()> {
        self.get_mut(node)?.has_new_layout = false;
        Ok(())
    }

    // ---- Layout ----------------------------------------------------------

    /// `None` is treated as NaN (unconstrained/shrink-to-fit), per §4.5.
    pub fn calculate_layout(
        &mut self,
        node: NodeId,
        avail_w: Option<f64>,
        avail_h: Option<f64>,
        direction: Direction,
    ) -> Result<()> {
        let avail_w = avail_w.unwrap_or(f64::NAN);
        let avail_h = avail_h.unwrap_or(f64::NAN);

        if !self.get(node)?.is_dirty {
            if let Some((w, h, d)) = self.get(node)?.last_calc {
                if crate::sys::nan_aware_eq(w, avail_w) && crate::sys::nan_aware_eq(h, avail_h) && d == direction {
                    return Ok(());
                }
            }
        }

        self.get_mut(node)?.last_calc = Some((avail_w, avail_h, direction));
        self.invalidate_sizing_cache_subtree(node)?;

        compute::layout_node(self, node, avail_w, avail_h, 0.0, 0.0, 0.0, 0.0, direction);

        self.clear_dirty_subtree(node)?;
        Ok(())
    }

    fn invalidate_sizing_cache_subtree(&mut self, node: NodeId) -> Result<()> {
        self.get_mut(node)?.sizing_cache.invalidate();
        let children = self.get(node)?.children.clone();
        for child in children {
            self.invalidate_sizing_cache_subtree(child)?;
        }
        Ok(())
    }

    fn clear_dirty_subtree(&mut self, node: NodeId) -> Result<()> {
        let data = self.get_mut(node)?;
        data.is_dirty = false;
        data.has_new_layout = true;
        let children = data.children.clone();
        for child in children {
            self.clear_dirty_subtree(child)?;
        }
        Ok(())
    }

    // ---- Computed output -------------------------------------------------

    pub fn get_computed_left(&self, node: NodeId) -> Result<f64> {
        Ok(self.get(node)?.layout.left)
    }

    pub fn get_computed_top(&self, node: NodeId) -> Result<f64> {
        Ok(self.get(node)?.layout.top)
    }

    pub fn get_computed_width(&self, node: NodeId) -> Result<f64> {
        Ok(self.get(node)?.layout.width)
    }

    pub fn get_computed_height(&self, node: NodeId) -> Result<f64> {
        Ok(self.get(node)?.layout.height)
    }

    pub fn layout(&self, node: NodeId) -> Result<Layout> {
        Ok(self.get(node)?.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_child_detaches_from_previous_parent() {
        let mut tree = Tree::new();
        let child = tree.new_leaf(Style::default());
        let parent_a = tree.new_with_children(Style::default(), &[child]).unwrap();
        let parent_b = tree.new_leaf(Style::default());

        tree.insert_child(parent_b, 0, child).unwrap();

        assert_eq!(tree.get_child_count(parent_a).unwrap(), 0);
        assert_eq!(tree.get_child_count(parent_b).unwrap(), 1);
        assert_eq!(tree.get_parent(child).unwrap(), Some(parent_b));
    }

    #[test]
    fn mark_dirty_stops_at_already_dirty_ancestor_but_still_clears_it() {
        let mut tree = Tree::new();
        let leaf = tree.new_leaf(Style::default());
        let mid = tree.new_with_children(Style::default(), &[leaf]).unwrap();
        let root = tree.new_with_children(Style::default(), &[mid]).unwrap();

        tree.calculate_layout(root, Some(100.0), Some(100.0), Direction::Ltr).unwrap();
        assert!(!tree.is_dirty(root).unwrap());

        // Dirty `mid` first so it is already dirty when `leaf` is dirtied.
        tree.mark_dirty(mid).unwrap();
        assert!(tree.is_dirty(root).unwrap());

        // Re-layout clears everything again.
        tree.calculate_layout(root, Some(100.0), Some(100.0), Direction::Ltr).unwrap();
        assert!(!tree.is_dirty(leaf).unwrap());

        tree.mark_dirty(leaf).unwrap();
        assert!(tree.is_dirty(mid).unwrap());
        assert!(tree.is_dirty(root).unwrap());
    }

    #[test]
    fn destroy_releases_subtree() {
        let mut tree = Tree::new();
        let leaf = tree.new_leaf(Style::default());
        let root = tree.new_with_children(Style::default(), &[leaf]).unwrap();
        tree.destroy(root).unwrap();
        assert!(tree.style(leaf).is_err());
    }
}
