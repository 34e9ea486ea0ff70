//! Rendering a forest as text trees.

use std::fmt::Display;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::Forest;

pub trait ForestConvert {
    /// One `termtree` per root, in root order.
    fn to_tree_strings(&self) -> Vec<Tree<String>>;
}

impl<T: Display> ForestConvert for Forest<T> {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_strings(&self) -> Vec<Tree<String>> {
        fn build_tree<T: Display>(
            forest: &Forest<T>,
            node_idx: Index,
            parent_tree: &mut Tree<String>,
        ) {
            if let Some(node) = forest.get_node(node_idx) {
                for &child_idx in node.children() {
                    if let Some(child) = forest.get_node(child_idx) {
                        let mut child_tree = Tree::new(child.value().to_string());
                        build_tree(forest, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        self.root_indices()
            .iter()
            .filter_map(|&root_idx| {
                let root = self.get_node(root_idx)?;
                let mut tree = Tree::new(root.value().to_string());
                build_tree(self, root_idx, &mut tree);
                Some(tree)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_two_roots_when_rendering_then_one_tree_per_root() {
        let forest = Forest::from_parents(vec!["a", "b", "c"], |v: &&str| {
            (*v == "c").then_some("a")
        })
        .unwrap();

        let trees = forest.to_tree_strings();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].root, "a");
        assert_eq!(trees[0].leaves.len(), 1);
        assert_eq!(trees[0].leaves[0].root, "c");
        assert_eq!(trees[1].root, "b");
        assert!(trees[1].leaves.is_empty());
    }
}
