//! Traversal orders and the iterators walking the arena.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

use crate::domain::arena::Forest;
use crate::domain::error::ForestError;

/// Order in which `flatten` visits the nodes of a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalMode {
    /// Level by level: a node, then all its children, then grandchildren.
    #[default]
    BreadthFirst,
    /// Stack discipline: children are pushed left to right and popped last
    /// in, first out, so the last child's subtree is emitted first.
    DepthFirst,
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalMode::BreadthFirst => write!(f, "breadth-first"),
            TraversalMode::DepthFirst => write!(f, "depth-first"),
        }
    }
}

impl FromStr for TraversalMode {
    type Err = ForestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breadth-first" | "breadthfirst" | "bfs" => Ok(TraversalMode::BreadthFirst),
            "depth-first" | "depthfirst" | "dfs" => Ok(TraversalMode::DepthFirst),
            _ => Err(ForestError::InvalidTraversalMode(s.to_string())),
        }
    }
}

/// Iterator over the values of a forest or of one subtree.
///
/// Roots are processed one after another; each root's subtree is exhausted
/// before the next root is started. Nothing is cached: the walk follows the
/// structure as it is when the iterator advances.
pub struct Flatten<'a, T> {
    forest: &'a Forest<T>,
    mode: TraversalMode,
    pending_roots: std::slice::Iter<'a, Index>,
    frontier: VecDeque<Index>,
}

impl<'a, T> Flatten<'a, T> {
    pub(crate) fn over_forest(forest: &'a Forest<T>, mode: TraversalMode) -> Self {
        Self {
            forest,
            mode,
            pending_roots: forest.root_indices().iter(),
            frontier: VecDeque::new(),
        }
    }

    pub(crate) fn over_subtree(forest: &'a Forest<T>, start: Index, mode: TraversalMode) -> Self {
        let no_roots: &'a [Index] = &[];
        Self {
            forest,
            mode,
            pending_roots: no_roots.iter(),
            frontier: VecDeque::from([start]),
        }
    }

    fn next_index(&mut self) -> Option<Index> {
        loop {
            let next = match self.mode {
                TraversalMode::BreadthFirst => self.frontier.pop_front(),
                TraversalMode::DepthFirst => self.frontier.pop_back(),
            };
            if let Some(idx) = next {
                if let Some(node) = self.forest.get_node(idx) {
                    self.frontier.extend(node.children.iter().copied());
                }
                return Some(idx);
            }
            let root = self.pending_roots.next()?;
            self.frontier.push_back(*root);
        }
    }
}

impl<'a, T> Iterator for Flatten<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let forest = self.forest;
        while let Some(idx) = self.next_index() {
            if let Some(node) = forest.get_node(idx) {
                return Some(&node.value);
            }
        }
        None
    }
}

/// Index-level variant used internally by metrics and removal.
pub(crate) struct SubtreeIndices<'a, T> {
    inner: Flatten<'a, T>,
}

impl<'a, T> SubtreeIndices<'a, T> {
    pub(crate) fn new(forest: &'a Forest<T>, start: Index) -> Self {
        Self {
            inner: Flatten::over_subtree(forest, start, TraversalMode::BreadthFirst),
        }
    }
}

impl<'a, T> Iterator for SubtreeIndices<'a, T> {
    type Item = Index;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_index()
    }
}

/// Walks parent links upward from a node, excluding the node itself.
///
/// With `include_root` unset the walk stops before yielding the topmost
/// ancestor.
pub(crate) struct AncestorIndices<'a, T> {
    forest: &'a Forest<T>,
    next: Option<Index>,
    include_root: bool,
}

impl<'a, T> AncestorIndices<'a, T> {
    pub(crate) fn new(forest: &'a Forest<T>, start: Index, include_root: bool) -> Self {
        Self {
            forest,
            next: forest.get_node(start).and_then(|node| node.parent),
            include_root,
        }
    }
}

impl<'a, T> Iterator for AncestorIndices<'a, T> {
    type Item = Index;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.forest.get_node(idx)?;
        if node.parent.is_none() && !self.include_root {
            self.next = None;
            return None;
        }
        self.next = node.parent;
        Some(idx)
    }
}

/// Values of the strict ancestors of a node, nearest first.
pub struct Ancestors<'a, T> {
    inner: AncestorIndices<'a, T>,
}

impl<'a, T> Ancestors<'a, T> {
    pub(crate) fn new(inner: AncestorIndices<'a, T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let forest = self.inner.forest;
        let idx = self.inner.next()?;
        forest.get_node(idx).map(|node| &node.value)
    }
}
