//! Application layer: loading hierarchy files into forests
//!
//! This layer orchestrates domain logic and owns the file I/O boundary.

pub mod error;
pub mod error_ext;
pub mod hierarchy;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use hierarchy::{ForestStats, HierarchyService};
