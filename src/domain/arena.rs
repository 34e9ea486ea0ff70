use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{ForestError, ForestResult};
use crate::domain::traversal::{AncestorIndices, Ancestors, Flatten, SubtreeIndices, TraversalMode};

/// Node in the arena-based forest.
///
/// Links are arena indices: `parent` is a non-owning back reference,
/// `children` keeps insertion (or later append) order.
#[derive(Debug)]
pub struct ForestNode<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<Index>,
    pub(crate) children: Vec<Index>,
}

impl<T> ForestNode<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Index of the parent node, `None` for roots.
    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Forest of rooted trees built from a flat collection of values.
///
/// Values identify their nodes: every value appears at most once, and all
/// lookups go through a value index kept in step with the arena.
pub struct Forest<T> {
    pub(crate) arena: Arena<ForestNode<T>>,
    pub(crate) roots: Vec<Index>,
    pub(crate) index: HashMap<T, Index>,
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Forest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forest")
            .field("roots", &self.roots)
            .field("arena", &self.arena)
            .finish()
    }
}

impl<T> Forest<T> {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_node(&self, idx: Index) -> Option<&ForestNode<T>> {
        self.arena.get(idx)
    }

    pub(crate) fn root_indices(&self) -> &[Index] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Values of the roots, in root order.
    pub fn roots(&self) -> impl Iterator<Item = &T> + '_ {
        self.roots
            .iter()
            .filter_map(|&idx| self.get_node(idx).map(|node| &node.value))
    }

    /// Sum of the sizes of all roots.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|&root| self.size(root)).sum()
    }

    /// Height of the tallest tree, counted in nodes.
    pub fn depth(&self) -> ForestResult<usize> {
        self.roots
            .iter()
            .map(|&root| self.depth_below(root))
            .max()
            .ok_or(ForestError::EmptyForestDepth)
    }

    /// Values of the whole forest in the given traversal order.
    pub fn flatten(&self, mode: TraversalMode) -> Flatten<'_, T> {
        Flatten::over_forest(self, mode)
    }

    /// Every node without children, in breadth-first forest order.
    pub fn leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        for &root in &self.roots {
            for idx in SubtreeIndices::new(self, root) {
                if let Some(node) = self.get_node(idx) {
                    if node.is_leaf() {
                        leaves.push(&node.value);
                    }
                }
            }
        }
        leaves
    }

    /// 0 for a root, otherwise one more than the parent's level.
    pub(crate) fn level(&self, idx: Index) -> usize {
        AncestorIndices::new(self, idx, true).count()
    }

    /// 1 for a leaf, otherwise one more than the deepest child.
    ///
    /// Walks breadth-first carrying the depth along, so deep chains do not
    /// grow the call stack.
    pub(crate) fn depth_below(&self, idx: Index) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        queue.push_back((idx, 1));

        while let Some((current, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(current) {
                for &child in &node.children {
                    queue.push_back((child, depth + 1));
                }
            }
        }

        max_depth
    }

    /// The node itself plus all its descendants.
    pub(crate) fn size(&self, idx: Index) -> usize {
        SubtreeIndices::new(self, idx).count()
    }
}

impl<T: Eq + Hash + Clone + fmt::Debug> Forest<T> {
    pub(crate) fn locate(&self, value: &T) -> Option<Index> {
        self.index.get(value).copied()
    }

    pub(crate) fn require(&self, value: &T, role: &'static str) -> ForestResult<Index> {
        self.locate(value)
            .ok_or_else(|| ForestError::not_found(role, value))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn contains(&self, value: &T) -> bool {
        self.locate(value).is_some()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn level_of(&self, value: &T) -> ForestResult<usize> {
        let idx = self.require(value, "value")?;
        Ok(self.level(idx))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn depth_of(&self, value: &T) -> ForestResult<usize> {
        let idx = self.require(value, "value")?;
        Ok(self.depth_below(idx))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn size_of(&self, value: &T) -> ForestResult<usize> {
        let idx = self.require(value, "value")?;
        Ok(self.size(idx))
    }

    /// Parent value of a node, `None` when the node is a root.
    #[instrument(level = "trace", skip(self))]
    pub fn parent_of(&self, value: &T) -> ForestResult<Option<&T>> {
        let idx = self.require(value, "value")?;
        Ok(self
            .get_node(idx)
            .and_then(|node| node.parent)
            .and_then(|parent| self.get_node(parent))
            .map(|parent| &parent.value))
    }

    /// Direct children of a node, in order.
    #[instrument(level = "trace", skip(self))]
    pub fn children_of(&self, value: &T) -> ForestResult<Vec<&T>> {
        let idx = self.require(value, "value")?;
        Ok(self
            .get_node(idx)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&child| self.get_node(child).map(|c| &c.value))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Whether `parent` is an ancestor of `child` at any distance, roots
    /// included.
    ///
    /// Unlike [`Forest::traverse_to_root`], the walk does reach the root, so
    /// a node moved under a root reports that root as its parent.
    #[instrument(level = "trace", skip(self))]
    pub fn is_child_of(&self, parent: &T, child: &T) -> ForestResult<bool> {
        let parent_idx = self.require(parent, "parent")?;
        let child_idx = self.require(child, "child")?;
        Ok(AncestorIndices::new(self, child_idx, true).any(|idx| idx == parent_idx))
    }

    /// Strict ancestors of a value, nearest first, stopping before the root.
    ///
    /// A root, and a direct child of a root, both yield nothing.
    #[instrument(level = "trace", skip(self))]
    pub fn traverse_to_root(&self, value: &T) -> ForestResult<Ancestors<'_, T>> {
        let idx = self.require(value, "value")?;
        Ok(Ancestors::new(AncestorIndices::new(self, idx, false)))
    }

    /// Values of the subtree rooted at `value` in the given traversal order.
    #[instrument(level = "trace", skip(self))]
    pub fn flatten_from(&self, value: &T, mode: TraversalMode) -> ForestResult<Flatten<'_, T>> {
        let idx = self.require(value, "value")?;
        Ok(Flatten::over_subtree(self, idx, mode))
    }
}
