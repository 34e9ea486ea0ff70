//! Hierarchy service
//!
//! Reads hierarchy files from disk and turns them into forests.

use std::fmt;
use std::hash::Hash;
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Forest, HierarchyFile};

/// Whole-forest metrics, with `depth` absent for an empty forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestStats {
    pub roots: usize,
    pub nodes: usize,
    pub depth: Option<usize>,
}

impl ForestStats {
    pub fn of<T: Eq + Hash + Clone + fmt::Debug>(forest: &Forest<T>) -> Self {
        Self {
            roots: forest.root_count(),
            nodes: forest.node_count(),
            depth: forest.depth().ok(),
        }
    }
}

/// Service for loading hierarchy files.
#[derive(Debug, Default)]
pub struct HierarchyService;

impl HierarchyService {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a hierarchy file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<HierarchyFile> {
        let content = std::fs::read_to_string(path).with_path_context("read hierarchy", path)?;
        let file = HierarchyFile::parse(&content).map_err(|source| ApplicationError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("load: {} names declared", file.names.len());
        Ok(file)
    }

    /// Read a hierarchy file and build its forest.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, path: &Path) -> ApplicationResult<Forest<String>> {
        let file = self.load(path)?;
        Ok(file.to_forest()?)
    }
}
