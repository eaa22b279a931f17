//! Schema objects referenced by statement nodes.
//!
//! Tables, columns and functions are owned outside the node tree. Nodes hold
//! cheap shared handles to them: cloning a handle never copies the
//! description, and two handles are equal only when they point at the same
//! schema object. Two separately built tables with the same name are
//! therefore different tables as far as validation is concerned.
//!
//! # Example
//!
//! ```rust
//! use oxide_sqlbuilder::schema::{DataType, DbSpec};
//!
//! let mut spec = DbSpec::new();
//! let customers = spec
//!     .table("customers")
//!     .typed_column("id", DataType::Integer)
//!     .typed_column("name", DataType::Varchar(Some(255)))
//!     .build();
//!
//! assert_eq!(customers.alias(), Some("t0"));
//! assert_eq!(customers.columns().count(), 2);
//! ```

mod spec;
mod types;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::context::SqlContext;

pub use spec::{DbSpec, DbTableBuilder};
pub use types::DataType;

#[derive(Debug)]
struct TableData {
    schema: Option<String>,
    name: String,
    alias: Option<String>,
    columns: Vec<ColumnData>,
}

#[derive(Debug)]
struct ColumnData {
    name: String,
    data_type: Option<DataType>,
}

/// A table description.
///
/// Equality and hashing use identity, not structure.
#[derive(Clone)]
pub struct DbTable(Arc<TableData>);

impl DbTable {
    /// Starts building a standalone table (no alias unless one is set).
    #[must_use]
    pub fn builder(name: impl Into<String>) -> DbTableBuilder {
        DbTableBuilder::new(name.into())
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the schema the table lives in, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.0.schema.as_deref()
    }

    /// Returns the alias used when table aliases are rendered.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.0.alias.as_deref()
    }

    /// Returns the declared columns in declaration order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = DbColumn> + '_ {
        (0..self.0.columns.len()).map(|index| DbColumn {
            table: self.clone(),
            index,
        })
    }

    /// Looks up a declared column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<DbColumn> {
        self.0
            .columns
            .iter()
            .position(|c| c.name == name)
            .map(|index| DbColumn {
                table: self.clone(),
                index,
            })
    }

    /// Appends the (optionally schema-qualified) table name, never the alias.
    pub fn write_name(&self, out: &mut String, ctx: SqlContext) {
        if let Some(schema) = self.schema() {
            ctx.write_identifier(out, schema);
            out.push('.');
        }
        ctx.write_identifier(out, self.name());
    }

    fn from_parts(
        schema: Option<String>,
        name: String,
        alias: Option<String>,
        columns: Vec<(String, Option<DataType>)>,
    ) -> Self {
        let columns = columns
            .into_iter()
            .map(|(name, data_type)| ColumnData { name, data_type })
            .collect();
        Self(Arc::new(TableData {
            schema,
            name,
            alias,
            columns,
        }))
    }
}

impl PartialEq for DbTable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for DbTable {}

impl Hash for DbTable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for DbTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbTable")
            .field("schema", &self.0.schema)
            .field("name", &self.0.name)
            .field("alias", &self.0.alias)
            .field("columns", &self.0.columns.len())
            .finish()
    }
}

/// A column of a [`DbTable`].
///
/// A column is addressed by its owning table and its declaration index, so
/// it keeps the table description alive but never copies it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DbColumn {
    table: DbTable,
    index: usize,
}

impl DbColumn {
    fn data(&self) -> &ColumnData {
        &self.table.0.columns[self.index]
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data().name
    }

    /// Returns the declared SQL type, if any.
    #[must_use]
    pub fn data_type(&self) -> Option<&DataType> {
        self.data().data_type.as_ref()
    }

    /// Returns the table this column belongs to.
    #[must_use]
    pub const fn table(&self) -> &DbTable {
        &self.table
    }

    /// Appends the column reference, qualified by the table alias when the
    /// context renders aliases and the table has one.
    pub fn write_reference(&self, out: &mut String, ctx: SqlContext) {
        if ctx.use_table_aliases() {
            if let Some(alias) = self.table.alias() {
                ctx.write_identifier(out, alias);
                out.push('.');
            }
        }
        ctx.write_identifier(out, self.name());
    }

    /// Appends the column declaration: its name followed by its type.
    pub fn write_declaration(&self, out: &mut String, ctx: SqlContext) {
        ctx.write_identifier(out, self.name());
        if let Some(data_type) = self.data_type() {
            out.push(' ');
            data_type.write_sql(out);
        }
    }
}

impl fmt::Debug for DbColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DbColumn({}.{})", self.table.name(), self.name())
    }
}

#[derive(Debug)]
struct FunctionData {
    schema: Option<String>,
    name: String,
}

/// A function description.
///
/// Equality and hashing use identity, not structure.
#[derive(Clone)]
pub struct DbFunction(Arc<FunctionData>);

impl DbFunction {
    /// Creates a function description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(FunctionData {
            schema: None,
            name: name.into(),
        }))
    }

    /// Creates a schema-qualified function description.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self(Arc::new(FunctionData {
            schema: Some(schema.into()),
            name: name.into(),
        }))
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the schema the function lives in, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.0.schema.as_deref()
    }

    /// Appends the (optionally schema-qualified) function name.
    pub fn write_name(&self, out: &mut String, ctx: SqlContext) {
        if let Some(schema) = self.schema() {
            ctx.write_identifier(out, schema);
            out.push('.');
        }
        ctx.write_identifier(out, self.name());
    }
}

impl PartialEq for DbFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for DbFunction {}

impl Hash for DbFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for DbFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DbFunction({})", self.name())
    }
}

/// Types that describe a table.
///
/// Implemented by `#[derive(Table)]` from `oxide-sqlbuilder-derive`. The
/// derive returns the same handle on every call, so columns obtained from
/// separate calls compare equal.
pub trait TableSpec {
    /// Returns the table description.
    fn db_table() -> DbTable;

    /// Looks up a column of the table by name.
    #[must_use]
    fn db_column(name: &str) -> Option<DbColumn> {
        Self::db_table().column(name)
    }
}
