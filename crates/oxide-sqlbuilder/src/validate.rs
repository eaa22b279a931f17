//! Reference collection and validation rules.
//!
//! Validation is a separate pass over a finished tree: the whole tree is
//! walked first, filling a [`ValidationContext`] with every table and
//! column referenced anywhere in it, and only then are rules checked
//! against the collected sets.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, SqlBuilderError};
use crate::node::SqlObject;
use crate::schema::{DbColumn, DbTable};

/// Schema objects referenced by a tree.
#[derive(Debug, Default, Clone)]
pub struct ValidationContext {
    tables: HashSet<DbTable>,
    columns: HashSet<DbColumn>,
}

impl ValidationContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `node` and returns everything it references.
    #[must_use]
    pub fn collect(node: &(impl SqlObject + ?Sized)) -> Self {
        let mut vctx = Self::new();
        node.collect_schema_objects(&mut vctx);
        vctx
    }

    /// Records a referenced table.
    pub fn add_table(&mut self, table: &DbTable) {
        self.tables.insert(table.clone());
    }

    /// Records a referenced column.
    pub fn add_column(&mut self, column: &DbColumn) {
        self.columns.insert(column.clone());
    }

    /// Returns the referenced tables.
    #[must_use]
    pub const fn tables(&self) -> &HashSet<DbTable> {
        &self.tables
    }

    /// Returns the referenced columns.
    #[must_use]
    pub const fn columns(&self) -> &HashSet<DbColumn> {
        &self.columns
    }

    /// Checks that every referenced column belongs to a referenced table.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending columns.
    pub fn validate_column_tables(&self) -> Result<()> {
        let mut orphans: Vec<String> = self
            .columns
            .iter()
            .filter(|column| !self.tables.contains(column.table()))
            .map(|column| format!("{}.{}", column.table().name(), column.name()))
            .collect();
        if orphans.is_empty() {
            return Ok(());
        }
        orphans.sort();
        Err(SqlBuilderError::validation(format!(
            "Columns used for unreferenced tables: {}",
            orphans.join(", ")
        )))
    }
}

/// Runs the rules shared by every statement kind over `node`.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_references(node: &(impl SqlObject + ?Sized)) -> Result<ValidationContext> {
    let vctx = ValidationContext::collect(node);
    debug!(
        tables = vctx.tables.len(),
        columns = vctx.columns.len(),
        "collected schema references"
    );
    vctx.validate_column_tables()?;
    Ok(vctx)
}
