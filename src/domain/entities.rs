//! Hierarchy declarations: the plain-text input the CLI builds forests from.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::arena::Forest;
use crate::domain::error::{ForestError, ForestResult};

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\s:>]+)\s*(?:(?P<op>[:>])\s*(?P<rest>.*))?$")
        .expect("declaration pattern is valid")
});

/// Which relationship form a hierarchy file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Only bare names, every value is a root.
    Standalone,
    /// `name: parent` lines.
    Parents,
    /// `parent > child child` lines.
    Children,
}

/// Parsed hierarchy file.
///
/// ```text
/// # comment
/// root
/// child: root
/// ```
/// or, in children form,
/// ```text
/// root > child1 child2
/// child1 > grandchild
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyFile {
    /// Every name in order of first mention
    pub names: Vec<String>,
    /// Declared parent per name (parent form)
    pub parents: HashMap<String, String>,
    /// Declared children per name (children form)
    pub children: HashMap<String, Vec<String>>,
}

/// Error parsing a hierarchy file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyParseError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {name} declares more than one parent")]
    MultipleParents { line: usize, name: String },
}

impl HierarchyFile {
    /// Parse hierarchy file content.
    ///
    /// Text after `#` is a comment; blank lines are skipped. Line numbers in
    /// errors are 1-based.
    pub fn parse(content: &str) -> Result<Self, HierarchyParseError> {
        let mut file = Self::default();
        let mut seen = HashSet::new();

        for (number, line) in content.lines().enumerate() {
            let line_no = number + 1;
            let trimmed = line.split('#').next().unwrap_or_default().trim();
            if trimmed.is_empty() {
                continue;
            }

            let caps = DECLARATION
                .captures(trimmed)
                .ok_or_else(|| HierarchyParseError::Syntax {
                    line: line_no,
                    message: format!("cannot parse declaration '{}'", trimmed),
                })?;
            let name = &caps["name"];
            file.mention(&mut seen, name);

            let rest = caps.name("rest").map(|m| m.as_str().trim()).unwrap_or("");
            match caps.name("op").map(|m| m.as_str()) {
                None => {}
                Some(":") => {
                    let parent = single_token(rest, line_no)?;
                    if file.parents.contains_key(name) {
                        return Err(HierarchyParseError::MultipleParents {
                            line: line_no,
                            name: name.to_string(),
                        });
                    }
                    file.mention(&mut seen, parent);
                    file.parents.insert(name.to_string(), parent.to_string());
                }
                Some(_) => {
                    let children = file.children.entry(name.to_string()).or_default();
                    let mut mentioned = Vec::new();
                    for child in rest.split_whitespace() {
                        validate_token(child, line_no)?;
                        children.push(child.to_string());
                        mentioned.push(child);
                    }
                    for child in mentioned {
                        file.mention(&mut seen, child);
                    }
                }
            }
        }

        Ok(file)
    }

    fn mention(&mut self, seen: &mut HashSet<String>, name: &str) {
        if seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    /// The relationship form used by the file.
    ///
    /// # Errors
    ///
    /// `AmbiguousShape` when parent and children declarations are mixed.
    pub fn shape(&self) -> ForestResult<Shape> {
        match (self.parents.is_empty(), self.children.is_empty()) {
            (true, true) => Ok(Shape::Standalone),
            (false, true) => Ok(Shape::Parents),
            (true, false) => Ok(Shape::Children),
            (false, false) => Err(ForestError::AmbiguousShape),
        }
    }

    /// Builds the forest these declarations describe.
    pub fn to_forest(&self) -> ForestResult<Forest<String>> {
        let values = self.names.iter().cloned();
        match self.shape()? {
            Shape::Children => {
                Forest::from_children(values, |name: &String| self.children.get(name).cloned())
            }
            Shape::Parents | Shape::Standalone => {
                Forest::from_parents(values, |name: &String| self.parents.get(name).cloned())
            }
        }
    }
}

fn single_token(rest: &str, line: usize) -> Result<&str, HierarchyParseError> {
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => {
            validate_token(token, line)?;
            Ok(token)
        }
        (None, _) => Err(HierarchyParseError::Syntax {
            line,
            message: "missing parent after ':'".to_string(),
        }),
        (Some(_), Some(_)) => Err(HierarchyParseError::Syntax {
            line,
            message: format!("expected a single parent, got '{}'", rest),
        }),
    }
}

fn validate_token(token: &str, line: usize) -> Result<(), HierarchyParseError> {
    if token.contains([':', '>']) {
        return Err(HierarchyParseError::Syntax {
            line,
            message: format!("invalid name '{}'", token),
        });
    }
    Ok(())
}
