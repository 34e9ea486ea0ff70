//! Structural edits: add, remove (with or without promotion), move.
//!
//! Every edit locates all the nodes it needs before touching any link, so a
//! failed call leaves the forest as it was.

use std::fmt;
use std::hash::Hash;
use std::mem::take;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{Forest, ForestNode};
use crate::domain::error::{ForestError, ForestResult};
use crate::domain::traversal::{AncestorIndices, SubtreeIndices};

impl<T: Eq + Hash + Clone + fmt::Debug> Forest<T> {
    /// Appends `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    ///  - `ValueNotFound` when `parent` is not in the forest.
    ///  - `DuplicateValue` when `child` already is.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child_of(&mut self, parent: &T, child: T) -> ForestResult<()> {
        let parent_idx = self.require(parent, "parent")?;
        if self.contains(&child) {
            return Err(ForestError::duplicate(&child));
        }

        let mut node = ForestNode::new(child.clone());
        node.parent = Some(parent_idx);
        let idx = self.arena.insert(node);
        self.index.insert(child, idx);
        self.arena[parent_idx].children.push(idx);
        Ok(())
    }

    /// Removes the node holding `value` and returns the value.
    ///
    /// With `remove_descendants` the whole subtree goes with it. Otherwise its
    /// children are promoted: they take the removed node's place under its
    /// former parent (or become roots), appended after the existing siblings.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, value: &T, remove_descendants: bool) -> ForestResult<T> {
        let idx = self.require(value, "value")?;

        if remove_descendants {
            let subtree: Vec<Index> = SubtreeIndices::new(self, idx).collect();
            self.detach(idx);
            for &descendant in subtree.iter().skip(1) {
                self.discard(descendant);
            }
            debug!(removed = subtree.len(), "subtree removed");
        } else {
            let parent = self.arena[idx].parent;
            let children = take(&mut self.arena[idx].children);
            for &child in &children {
                self.arena[child].parent = parent;
            }
            self.detach(idx);
            debug!(promoted = children.len(), "children promoted");
            match parent {
                Some(parent) => self.arena[parent].children.extend(children),
                None => self.roots.extend(children),
            }
        }

        self.discard(idx)
            .ok_or_else(|| ForestError::not_found("value", value))
    }

    /// Re-parents the node holding `value` as the last child of `new_parent`.
    ///
    /// # Errors
    ///
    ///  - `ValueNotFound` when either value is absent.
    ///  - `WouldCreateCycle` when `new_parent` is the node itself or one of
    ///    its descendants.
    #[instrument(level = "debug", skip(self))]
    pub fn move_to(&mut self, value: &T, new_parent: &T) -> ForestResult<()> {
        let idx = self.require(value, "value")?;
        let parent_idx = self.require(new_parent, "new parent")?;

        let loops_back = idx == parent_idx
            || AncestorIndices::new(self, parent_idx, true).any(|ancestor| ancestor == idx);
        if loops_back {
            return Err(ForestError::WouldCreateCycle {
                value: format!("{:?}", value),
                new_parent: format!("{:?}", new_parent),
            });
        }

        self.detach(idx);
        self.arena[idx].parent = Some(parent_idx);
        self.arena[parent_idx].children.push(idx);
        Ok(())
    }

    /// Unlinks a node from its parent's children, or from the root list.
    fn detach(&mut self, idx: Index) {
        match self.arena[idx].parent.take() {
            Some(parent) => self.arena[parent].children.retain(|&child| child != idx),
            None => self.roots.retain(|&root| root != idx),
        }
    }

    /// Drops a node from the arena and the value index.
    fn discard(&mut self, idx: Index) -> Option<T> {
        let node = self.arena.remove(idx)?;
        self.index.remove(&node.value);
        Some(node.value)
    }
}
