//! forrest: build navigable forests from flat collections.
//!
//! A [`Forest`] is built from a collection of distinct values plus one
//! relationship accessor (value to parent, or value to children) and then
//! supports level/depth/size queries, breadth-first and depth-first
//! flattening, ancestor walks and structural edits.
//!
//! ```
//! use std::collections::HashMap;
//! use forrest::{Forest, TraversalMode};
//!
//! let parents: HashMap<&str, &str> = [("b", "a"), ("c", "a")].into_iter().collect();
//! let forest = Forest::from_parents(["a", "b", "c"], |v| parents.get(v).copied()).unwrap();
//! let order: Vec<_> = forest.flatten(TraversalMode::BreadthFirst).copied().collect();
//! assert_eq!(order, vec!["a", "b", "c"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{
    detect_relationship, Ancestors, DetectShape, Flatten, Forest, ForestError, ForestNode,
    ForestResult, HierarchyFile, HierarchyParseError, Relationship, Shape, TraversalMode,
};
