//! CREATE INDEX statements.

use std::fmt;

use tracing::debug;

use super::{CreateStatement, DropQuery, DropType};
use crate::context::SqlContext;
use crate::convert::{ColumnInput, Converter, SqlInput, TableInput};
use crate::error::{Result, SqlBuilderError};
use crate::node::{Node, NodeList, SqlObject};
use crate::schema::DbColumn;
use crate::validate::{validate_references, ValidationContext};

/// A `CREATE [UNIQUE ]INDEX <name> ON <table> (<columns>)` statement.
///
/// Index columns are rendered as plain names: the table is never aliased
/// inside the statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateIndexQuery {
    name: String,
    table: Node,
    columns: NodeList,
    unique: bool,
}

impl CreateIndexQuery {
    /// Creates an index named `name` on `table`, without columns.
    pub fn new(table: impl Into<TableInput>, name: impl Into<String>) -> Self {
        let table: TableInput = table.into();
        Self {
            name: name.into(),
            table: Node::from(table),
            columns: NodeList::new(),
            unique: false,
        }
    }

    /// Sets whether the index enforces uniqueness.
    pub const fn set_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Appends indexed columns in order.
    pub fn add_custom_columns<I, T>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnInput>,
    {
        self.columns
            .extend(columns.into_iter().map(Into::<ColumnInput>::into));
        self
    }

    /// Appends schema columns in order.
    pub fn add_columns<'a>(self, columns: impl IntoIterator<Item = &'a DbColumn>) -> Self {
        self.add_custom_columns(columns)
    }

    /// Appends runtime-shaped columns in order.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBuilderError::UnsupportedInput`] when an input is not a
    /// column, raw text or node.
    pub fn try_add_custom_columns(
        mut self,
        columns: impl IntoIterator<Item = SqlInput>,
    ) -> Result<Self> {
        self.columns.extend_inputs(Converter::Column, columns)?;
        Ok(self)
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the indexed columns.
    #[must_use]
    pub const fn columns(&self) -> &NodeList {
        &self.columns
    }

    /// Checks the statement.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a column belongs to a table the
    /// statement does not reference, or when there are no columns.
    pub fn validate(&self) -> Result<&Self> {
        validate_references(self)?;
        if self.columns.is_empty() {
            debug!(index = %self.name, "create index without columns");
            return Err(SqlBuilderError::validation("Index has no columns"));
        }
        Ok(self)
    }
}

impl CreateStatement for CreateIndexQuery {
    fn drop_query(&self) -> DropQuery {
        DropQuery::new(DropType::Index, Node::identifier(self.name.as_str()))
    }
}

impl SqlObject for CreateIndexQuery {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        let ctx = ctx.with_table_aliases(false);
        out.push_str(if self.unique {
            "CREATE UNIQUE INDEX "
        } else {
            "CREATE INDEX "
        });
        ctx.write_identifier(out, &self.name);
        out.push_str(" ON ");
        self.table.write_sql(out, ctx);
        out.push_str(" (");
        self.columns.write_sql(out, ctx);
        out.push(')');
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        self.table.collect_schema_objects(vctx);
        self.columns.collect_schema_objects(vctx);
    }
}

impl fmt::Display for CreateIndexQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
