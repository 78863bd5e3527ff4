//! Hierarchy table - the generator's whole input.
//!
//! A table names the outer namespace, the shape grammar and, per hierarchy,
//! its includes and one shape line per variant. It is either loaded from
//! JSON or built with [`default_table`], then turned into a validated
//! [`Schema`] by [`Table::parse`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TableError;
use crate::ir::{Hierarchy, Schema, Variant};
use crate::naming::{
    header_file_name, inner_namespace, is_identifier, VALUE_GETTER_CLASS, VISITOR_CLASS,
};
use crate::shape::{parse_shape, Grammar};

/// The top-level table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Table {
    /// Outer C++ namespace and include-guard prefix.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Grammar used for every shape line.
    #[serde(default)]
    pub grammar: Grammar,

    /// Hierarchies in generation order. A hierarchy may only include the
    /// headers of hierarchies listed before it.
    pub hierarchies: Vec<HierarchyEntry>,
}

fn default_namespace() -> String {
    "slang".into()
}

/// One hierarchy as written in the table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HierarchyEntry {
    /// Base class name, e.g. `Expr`.
    pub name: String,

    /// Emitted as `#include <...>`.
    #[serde(default)]
    pub std_includes: Vec<String>,

    /// Emitted as `#include "..."`.
    #[serde(default)]
    pub user_includes: Vec<String>,

    /// One shape line per variant: `ClassName with Type field, ...`.
    pub variants: Vec<String>,
}

impl Table {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let json = fs::read_to_string(path).map_err(|source| TableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse every shape line and validate names and include dependencies.
    pub fn parse(&self) -> Result<Schema, TableError> {
        if !is_identifier(&self.namespace) {
            return Err(TableError::InvalidNamespace(self.namespace.clone()));
        }

        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut folded: HashMap<String, usize> = HashMap::new();
        for (i, entry) in self.hierarchies.iter().enumerate() {
            if !is_identifier(&entry.name) {
                return Err(TableError::InvalidHierarchyName(entry.name.clone()));
            }
            if positions.insert(header_file_name(&entry.name), i).is_some() {
                return Err(TableError::DuplicateHierarchy(entry.name.clone()));
            }
            // Guard and inner namespace are case-folded.
            if let Some(first) = folded.insert(inner_namespace(&entry.name), i) {
                return Err(TableError::CaseCollision {
                    first: self.hierarchies[first].name.clone(),
                    second: entry.name.clone(),
                });
            }
        }

        let mut hierarchies = Vec::with_capacity(self.hierarchies.len());
        for (position, entry) in self.hierarchies.iter().enumerate() {
            check_includes(&self.hierarchies, position, &positions)?;
            let hierarchy = entry.parse(self.grammar)?;
            debug!(
                "parsed hierarchy {} ({} variants)",
                hierarchy.name,
                hierarchy.variants.len()
            );
            hierarchies.push(hierarchy);
        }

        Ok(Schema {
            namespace: self.namespace.clone(),
            hierarchies,
        })
    }
}

impl HierarchyEntry {
    fn parse(&self, grammar: Grammar) -> Result<Hierarchy, TableError> {
        if self.variants.is_empty() {
            return Err(TableError::EmptyHierarchy(self.name.clone()));
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut variants = Vec::with_capacity(self.variants.len());

        for (index, line) in self.variants.iter().enumerate() {
            let variant = parse_shape(line, grammar).map_err(|source| TableError::Shape {
                hierarchy: self.name.clone(),
                index,
                line: line.clone(),
                source,
            })?;

            self.check_variant(index, line, &variant)?;

            if let Some(first) = seen.insert(variant.class_name.clone(), index) {
                return Err(TableError::DuplicateVariant {
                    hierarchy: self.name.clone(),
                    class_name: variant.class_name,
                    first,
                    second: index,
                });
            }
            variants.push(variant);
        }

        Ok(Hierarchy {
            name: self.name.clone(),
            std_includes: self.std_includes.clone(),
            user_includes: self.user_includes.clone(),
            variants,
        })
    }

    fn check_variant(&self, index: usize, line: &str, variant: &Variant) -> Result<(), TableError> {
        let class_name = variant.class_name.as_str();
        if class_name == self.name || class_name == VISITOR_CLASS || class_name == VALUE_GETTER_CLASS {
            return Err(TableError::ReservedName {
                hierarchy: self.name.clone(),
                index,
                class_name: class_name.to_string(),
            });
        }

        let mut fields = Vec::with_capacity(variant.fields.len());
        for field in &variant.fields {
            if fields.contains(&field.name.as_str()) {
                return Err(TableError::DuplicateField {
                    hierarchy: self.name.clone(),
                    index,
                    line: line.to_string(),
                    field: field.name.clone(),
                });
            }
            fields.push(field.name.as_str());
        }
        Ok(())
    }
}

/// A user include naming another hierarchy's header is a dependency on that
/// hierarchy; it must point strictly backwards in the table, which also
/// rules out cycles.
fn check_includes(
    entries: &[HierarchyEntry],
    position: usize,
    positions: &HashMap<String, usize>,
) -> Result<(), TableError> {
    let entry = &entries[position];
    for include in &entry.user_includes {
        let Some(&target) = positions.get(include) else {
            continue;
        };
        if target == position {
            return Err(TableError::SelfInclude {
                hierarchy: entry.name.clone(),
                include: include.clone(),
            });
        }
        if target > position {
            return Err(TableError::ForwardInclude {
                hierarchy: entry.name.clone(),
                include: include.clone(),
                target: entries[target].name.clone(),
            });
        }
    }
    Ok(())
}

/// The slang interpreter's table: expressions, then statements over them.
///
/// This is the node set the generator has always shipped with. The
/// interpreter has since grown hand-maintained nodes (`Logical`, `Call`,
/// `Block`, `If`, `While`, `Fn`, `Return`); `If` and `While` store `then`
/// and `else` members, which cannot be spelled as constructor parameters,
/// so those nodes are not generated from this table.
pub fn default_table() -> Table {
    Table {
        namespace: default_namespace(),
        grammar: Grammar::Baseline,
        hierarchies: vec![
            HierarchyEntry {
                name: "Expr".into(),
                std_includes: vec!["memory".into()],
                user_includes: vec!["Token.hpp".into()],
                variants: vec![
                    "Assign     with Token name, std::shared_ptr<Expr> value".into(),
                    "Binary     with std::shared_ptr<Expr> left, Token oper, std::shared_ptr<Expr> right".into(),
                    "Grouping   with std::shared_ptr<Expr> expression".into(),
                    "Literal    with Object value".into(),
                    "Unary      with Token oper, std::shared_ptr<Expr> right".into(),
                    "Variable   with Token name".into(),
                ],
            },
            HierarchyEntry {
                name: "Stmt".into(),
                std_includes: vec!["memory".into()],
                user_includes: vec!["Token.hpp".into(), "Expr.hpp".into()],
                variants: vec![
                    "Expression with std::shared_ptr<expr::Expr> expression".into(),
                    "Print      with std::shared_ptr<expr::Expr> expression".into(),
                    "Var        with Token name, std::shared_ptr<expr::Expr> initializer".into(),
                ],
            },
        ],
    }
}
