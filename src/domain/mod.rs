//! Domain layer: the forest, its builder and its edits
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod edit;
pub mod entities;
pub mod error;
pub mod traversal;

pub use arena::{Forest, ForestNode};
pub use builder::{detect_relationship, DetectShape, Relationship};
pub use entities::{HierarchyFile, HierarchyParseError, Shape};
pub use error::{ForestError, ForestResult};
pub use traversal::{Ancestors, Flatten, TraversalMode};
