//! Forest construction from a flat collection plus one relationship accessor.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{Forest, ForestNode};
use crate::domain::error::{ForestError, ForestResult};
use crate::domain::traversal::SubtreeIndices;

type ParentAccessor<'a, T> = Box<dyn Fn(&T) -> Option<T> + 'a>;
type ChildrenAccessor<'a, T> = Box<dyn Fn(&T) -> Option<Vec<T>> + 'a>;

/// How the builder discovers links between values.
pub enum Relationship<'a, T> {
    /// `value -> parent value`, `None` for roots.
    Parent(ParentAccessor<'a, T>),
    /// `value -> direct children`, `None` or empty for leaves.
    Children(ChildrenAccessor<'a, T>),
}

impl<'a, T> Relationship<'a, T> {
    pub fn parent<F>(accessor: F) -> Self
    where
        F: Fn(&T) -> Option<T> + 'a,
    {
        Relationship::Parent(Box::new(accessor))
    }

    pub fn children<F, C>(accessor: F) -> Self
    where
        F: Fn(&T) -> Option<C> + 'a,
        C: IntoIterator<Item = T>,
    {
        Relationship::Children(Box::new(move |value| {
            accessor(value).map(|children| children.into_iter().collect())
        }))
    }
}

impl<T> fmt::Debug for Relationship<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relationship::Parent(_) => write!(f, "Relationship::Parent"),
            Relationship::Children(_) => write!(f, "Relationship::Children"),
        }
    }
}

/// Opt-in shape declaration for value types that carry their own links.
///
/// Override exactly one accessor. Declaring neither or both makes
/// [`Forest::from_shape`] fail instead of guessing.
pub trait DetectShape: Sized {
    fn parent_accessor() -> Option<fn(&Self) -> Option<Self>> {
        None
    }

    fn children_accessor() -> Option<fn(&Self) -> Option<Vec<Self>>> {
        None
    }
}

/// Picks the relationship a [`DetectShape`] type declares.
pub fn detect_relationship<T: DetectShape + 'static>() -> ForestResult<Relationship<'static, T>> {
    match (T::parent_accessor(), T::children_accessor()) {
        (Some(parent), None) => Ok(Relationship::parent(parent)),
        (None, Some(children)) => Ok(Relationship::children(children)),
        (Some(_), Some(_)) => Err(ForestError::AmbiguousShape),
        (None, None) => Err(ForestError::NoShapeFound),
    }
}

impl<T: Eq + Hash + Clone + fmt::Debug> Forest<T> {
    /// Builds a forest from `values`, linking them through `relationship`.
    ///
    /// All nodes are created first, then links are resolved, then each node
    /// is placed either in the root list or in its parent's children, both in
    /// input order. A value referenced by the accessor but absent from
    /// `values` is never linked: a missing parent turns the node into a root,
    /// a missing child is ignored.
    ///
    /// # Errors
    ///
    ///  - `DuplicateValue` when two input values compare equal.
    ///  - `CycleDetected` when the links loop back on themselves.
    #[instrument(level = "debug", skip(values))]
    pub fn build<I>(values: I, relationship: Relationship<'_, T>) -> ForestResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut forest = Forest::new();
        let order = forest.wrap_values(values)?;

        match relationship {
            Relationship::Parent(accessor) => forest.link_parents(&order, accessor),
            Relationship::Children(accessor) => forest.link_children(&order, accessor),
        }

        for &idx in &order {
            let parent = forest.arena[idx].parent;
            match parent {
                None => forest.roots.push(idx),
                Some(parent) => forest.arena[parent].children.push(idx),
            }
        }

        forest.check_reachable(&order)?;
        debug!(
            roots = forest.roots.len(),
            nodes = order.len(),
            "forest built"
        );
        Ok(forest)
    }

    pub fn from_parents<I, F>(values: I, parent: F) -> ForestResult<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> Option<T>,
    {
        Self::build(values, Relationship::parent(parent))
    }

    pub fn from_children<I, F, C>(values: I, children: F) -> ForestResult<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> Option<C>,
        C: IntoIterator<Item = T>,
    {
        Self::build(values, Relationship::children(children))
    }

    /// Builds with the accessor the value type declares via [`DetectShape`].
    pub fn from_shape<I>(values: I) -> ForestResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: DetectShape + 'static,
    {
        Self::build(values, detect_relationship::<T>()?)
    }

    /// One unlinked node per value; the value index doubles as duplicate
    /// detector.
    fn wrap_values<I>(&mut self, values: I) -> ForestResult<Vec<Index>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut order = Vec::new();
        for value in values {
            if self.index.contains_key(&value) {
                return Err(ForestError::duplicate(&value));
            }
            let idx = self.arena.insert(ForestNode::new(value.clone()));
            self.index.insert(value, idx);
            order.push(idx);
        }
        Ok(order)
    }

    fn link_parents(&mut self, order: &[Index], accessor: ParentAccessor<'_, T>) {
        for &idx in order {
            let Some(parent) = accessor(&self.arena[idx].value) else {
                continue;
            };
            match self.index.get(&parent) {
                Some(&parent_idx) => self.arena[idx].parent = Some(parent_idx),
                None => debug!(
                    value = ?self.arena[idx].value,
                    parent = ?parent,
                    "parent not in collection, treating as root"
                ),
            }
        }
    }

    fn link_children(&mut self, order: &[Index], accessor: ChildrenAccessor<'_, T>) {
        for &idx in order {
            let Some(children) = accessor(&self.arena[idx].value) else {
                continue;
            };
            for child in children {
                match self.index.get(&child) {
                    Some(&child_idx) => self.arena[child_idx].parent = Some(idx),
                    None => debug!(child = ?child, "child not in collection, ignored"),
                }
            }
        }
    }

    /// Nodes caught in a parent loop are placed under each other but never
    /// under a root.
    fn check_reachable(&self, order: &[Index]) -> ForestResult<()> {
        let reached: HashSet<Index> = self
            .roots
            .iter()
            .flat_map(|&root| SubtreeIndices::new(self, root))
            .collect();
        if reached.len() == order.len() {
            return Ok(());
        }
        match order.iter().find(|idx| !reached.contains(*idx)) {
            Some(&idx) => Err(ForestError::CycleDetected(format!(
                "{:?}",
                self.arena[idx].value
            ))),
            None => Ok(()),
        }
    }
}
