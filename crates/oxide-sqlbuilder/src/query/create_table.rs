//! CREATE TABLE statements.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use super::{CreateStatement, DropQuery, DropType};
use crate::context::SqlContext;
use crate::convert::{Converter, SqlInput, TableInput, TypedColumnInput};
use crate::error::{Result, SqlBuilderError};
use crate::node::{Node, NodeHandle, NodeList, SqlObject};
use crate::schema::{DbColumn, DbTable};
use crate::validate::{validate_references, ValidationContext};

// =============================================================================
// Column constraints
// =============================================================================

/// A constraint rendered after a column declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnConstraint {
    /// `NOT NULL`
    NotNull,
    /// `UNIQUE`
    Unique,
    /// `PRIMARY KEY`
    PrimaryKey,
}

impl ColumnConstraint {
    /// Returns the clause appended after the column, including its leading
    /// space.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotNull => " NOT NULL",
            Self::Unique => " UNIQUE",
            Self::PrimaryKey => " PRIMARY KEY",
        }
    }
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().trim_start())
    }
}

/// A column declaration followed by a constraint keyword.
#[derive(Debug, Clone)]
pub struct ConstrainedColumn {
    column: Box<Node>,
    constraint: ColumnConstraint,
}

impl ConstrainedColumn {
    /// Attaches `constraint` to a column declaration.
    #[must_use]
    pub fn new(column: impl Into<TypedColumnInput>, constraint: ColumnConstraint) -> Self {
        let column: TypedColumnInput = column.into();
        Self {
            column: Box::new(Node::from(column)),
            constraint,
        }
    }

    /// Returns the wrapped declaration.
    #[must_use]
    pub fn column(&self) -> &Node {
        &self.column
    }

    /// Returns the attached constraint.
    #[must_use]
    pub const fn constraint(&self) -> ColumnConstraint {
        self.constraint
    }

    /// Unwraps the declaration, dropping the constraint.
    #[must_use]
    pub fn into_inner(self) -> Node {
        *self.column
    }
}

impl SqlObject for ConstrainedColumn {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        self.column.write_sql(out, ctx);
        out.push_str(self.constraint.as_str());
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        self.column.collect_schema_objects(vctx);
    }
}

// =============================================================================
// CreateTableQuery
// =============================================================================

/// A `CREATE TABLE` statement.
///
/// The target table is never rendered with its alias, whatever context the
/// statement is rendered under.
///
/// # Example
///
/// ```rust
/// use oxide_sqlbuilder::query::{ColumnConstraint, CreateTableQuery};
/// use oxide_sqlbuilder::schema::{DataType, DbSpec};
/// use oxide_sqlbuilder::SqlObject;
///
/// let mut spec = DbSpec::new();
/// let users = spec
///     .table("users")
///     .typed_column("id", DataType::Bigint)
///     .typed_column("email", DataType::Varchar(Some(255)))
///     .build();
/// let id = users.column("id").unwrap();
///
/// let query = CreateTableQuery::with_all_columns(&users)
///     .set_column_constraint(&id, ColumnConstraint::PrimaryKey)
///     .set_tablespace("fast");
///
/// assert!(query.validate().is_ok());
/// assert_eq!(
///     query.to_sql(),
///     "CREATE TABLE users (id BIGINT PRIMARY KEY, email VARCHAR(255)) TABLESPACE fast"
/// );
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateTableQuery {
    table: Node,
    columns: NodeList,
    column_handles: HashMap<DbColumn, NodeHandle>,
    tablespace: Option<String>,
}

impl CreateTableQuery {
    /// Creates a statement for `table` without any columns.
    pub fn new(table: impl Into<TableInput>) -> Self {
        let table: TableInput = table.into();
        Self {
            table: Node::from(table),
            columns: NodeList::new(),
            column_handles: HashMap::new(),
            tablespace: None,
        }
    }

    /// Creates a statement for `table` seeded with every declared column, in
    /// declaration order.
    pub fn with_all_columns(table: &DbTable) -> Self {
        Self::new(table).add_custom_columns(table.columns())
    }

    /// Appends column declarations in order.
    pub fn add_custom_columns<I, T>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypedColumnInput>,
    {
        for column in columns {
            let column: TypedColumnInput = column.into();
            self.push_column(Node::from(column));
        }
        self
    }

    /// Appends schema column declarations in order.
    pub fn add_columns<'a>(self, columns: impl IntoIterator<Item = &'a DbColumn>) -> Self {
        self.add_custom_columns(columns)
    }

    /// Appends a schema column declaration with a constraint.
    pub fn add_column(self, column: &DbColumn, constraint: ColumnConstraint) -> Self {
        self.add_custom_column(column, constraint)
    }

    /// Appends any column declaration with a constraint.
    pub fn add_custom_column(
        mut self,
        column: impl Into<TypedColumnInput>,
        constraint: ColumnConstraint,
    ) -> Self {
        self.push_column(ConstrainedColumn::new(column, constraint).into());
        self
    }

    /// Appends runtime-shaped column declarations in order.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBuilderError::UnsupportedInput`] when an input is not a
    /// column, raw text or node; no column is added in that case.
    pub fn try_add_custom_columns(
        mut self,
        columns: impl IntoIterator<Item = SqlInput>,
    ) -> Result<Self> {
        for node in Converter::TypedColumn.convert_all(columns)? {
            self.push_column(node);
        }
        Ok(self)
    }

    /// Replaces the constraint of a previously added schema column, keeping
    /// the column at its position.
    ///
    /// Does nothing if `column` was never added; use
    /// [`contains_column`](Self::contains_column) to check first.
    pub fn set_column_constraint(
        mut self,
        column: &DbColumn,
        constraint: ColumnConstraint,
    ) -> Self {
        let Some(&handle) = self.column_handles.get(column) else {
            warn!(column = ?column, "constraint target is not a column of this statement");
            return self;
        };
        self.columns.replace(handle, |node| {
            let declaration = match node {
                Node::Constrained(constrained) => constrained.into_inner(),
                other => other,
            };
            ConstrainedColumn::new(declaration, constraint).into()
        });
        self
    }

    /// Returns whether `column` was added as a declaration.
    #[must_use]
    pub fn contains_column(&self, column: &DbColumn) -> bool {
        self.column_handles.contains_key(column)
    }

    /// Sets the tablespace the table is created in.
    pub fn set_tablespace(mut self, tablespace: impl Into<String>) -> Self {
        self.tablespace = Some(tablespace.into());
        self
    }

    /// Returns the target node.
    #[must_use]
    pub const fn table(&self) -> &Node {
        &self.table
    }

    /// Returns the column declarations.
    #[must_use]
    pub const fn columns(&self) -> &NodeList {
        &self.columns
    }

    /// Returns the configured tablespace.
    #[must_use]
    pub fn tablespace(&self) -> Option<&str> {
        self.tablespace.as_deref()
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
            debug!("create table without columns");
            return Err(SqlBuilderError::validation("Table has no columns"));
        }
        Ok(self)
    }

    fn push_column(&mut self, node: Node) {
        let column = declared_column(&node).cloned();
        let handle = self.columns.push(node);
        if let Some(column) = column {
            self.column_handles.entry(column).or_insert(handle);
        }
    }
}

/// Returns the schema column a declaration node stands for.
fn declared_column(node: &Node) -> Option<&DbColumn> {
    match node {
        Node::TypedColumn(column) | Node::Column(column) => Some(column),
        Node::Constrained(constrained) => declared_column(constrained.column()),
        _ => None,
    }
}

impl CreateStatement for CreateTableQuery {
    fn drop_query(&self) -> DropQuery {
        DropQuery::new(DropType::Table, self.table.clone())
    }
}

impl SqlObject for CreateTableQuery {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        let ctx = ctx.with_table_aliases(false);
        out.push_str("CREATE TABLE ");
        self.table.write_sql(out, ctx);
        out.push_str(" (");
        self.columns.write_sql(out, ctx);
        out.push(')');
        if let Some(tablespace) = &self.tablespace {
            out.push_str(" TABLESPACE ");
            out.push_str(tablespace);
        }
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        self.table.collect_schema_objects(vctx);
        self.columns.collect_schema_objects(vctx);
    }
}

impl fmt::Display for CreateTableQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
