//! Builders for schema descriptions.

use super::{DataType, DbFunction, DbTable};

/// Builder for a [`DbTable`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DbTableBuilder {
    schema: Option<String>,
    name: String,
    alias: Option<String>,
    columns: Vec<(String, Option<DataType>)>,
}

impl DbTableBuilder {
    pub(super) const fn new(name: String) -> Self {
        Self {
            schema: None,
            name,
            alias: None,
            columns: Vec::new(),
        }
    }

    /// Sets the schema the table lives in.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the alias rendered after the table name in aliasing positions.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Declares an untyped column.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.push((name.into(), None));
        self
    }

    /// Declares a column with a SQL type.
    pub fn typed_column(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.push((name.into(), Some(data_type)));
        self
    }

    /// Finishes the table description.
    pub fn build(self) -> DbTable {
        DbTable::from_parts(self.schema, self.name, self.alias, self.columns)
    }
}

/// A database description that hands out table aliases.
///
/// Every table created through the same spec gets the next alias in the
/// sequence `t0`, `t1`, ... so that references from different tables stay
/// distinguishable once aliases are rendered.
#[derive(Debug, Default, Clone)]
pub struct DbSpec {
    default_schema: Option<String>,
    next_alias: usize,
}

impl DbSpec {
    /// Creates an empty spec without a default schema.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_schema: None,
            next_alias: 0,
        }
    }

    /// Creates a spec whose tables live in the given schema.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            default_schema: Some(schema.into()),
            next_alias: 0,
        }
    }

    /// Starts a table with the next free alias.
    pub fn table(&mut self, name: impl Into<String>) -> DbTableBuilder {
        let alias = format!("t{}", self.next_alias);
        self.next_alias += 1;
        let builder = DbTableBuilder::new(name.into()).alias(alias);
        match &self.default_schema {
            Some(schema) => builder.schema(schema.clone()),
            None => builder,
        }
    }

    /// Creates a function description in the default schema.
    #[must_use]
    pub fn function(&self, name: impl Into<String>) -> DbFunction {
        match &self.default_schema {
            Some(schema) => DbFunction::with_schema(schema.clone(), name),
            None => DbFunction::new(name),
        }
    }
}
