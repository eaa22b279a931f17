//! The node model.
//!
//! Every SQL fragment, from a single column reference up to a complete
//! statement, is a node: it can append its text to an output buffer under a
//! [`SqlContext`] and report the schema objects it references to a
//! [`ValidationContext`].
//!
//! The fixed grammar surface is the closed [`Node`] enum. User-supplied
//! fragments plug in through [`SqlObject`] and [`Node::Object`].

mod list;

use std::fmt;
use std::sync::Arc;

use crate::context::SqlContext;
use crate::expr::{FunctionCall, InCondition, Subquery};
use crate::query::{ConstrainedColumn, CreateIndexQuery, CreateTableQuery, DropQuery};
use crate::schema::{DbColumn, DbFunction, DbTable};
use crate::validate::ValidationContext;
use crate::value::SqlValue;

pub use list::{NodeHandle, NodeList, DEFAULT_SEPARATOR};

/// The SQL symbol selecting everything, as in `COUNT(*)`.
pub const ALL_SYMBOL: &str = "*";

/// Capability shared by everything that renders to SQL.
///
/// `write_sql` must depend only on `self` and `ctx`, so a node renders the
/// same text every time until it is mutated.
pub trait SqlObject: fmt::Debug + Send + Sync {
    /// Appends this node's text to `out`.
    fn write_sql(&self, out: &mut String, ctx: SqlContext);

    /// Adds every table and column this node references to `vctx`.
    fn collect_schema_objects(&self, vctx: &mut ValidationContext);

    /// Returns true when the node renders to nothing and enclosing lists
    /// should skip it.
    fn is_blank(&self) -> bool {
        false
    }

    /// Renders the node under the default context.
    fn to_sql(&self) -> String {
        self.to_sql_with(SqlContext::new())
    }

    /// Renders the node under the given context.
    fn to_sql_with(&self, ctx: SqlContext) -> String {
        let mut out = String::new();
        self.write_sql(&mut out, ctx);
        out
    }
}

/// A raw SQL fragment, rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CustomSql(String);

impl CustomSql {
    /// Wraps the given text.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    /// Returns the wrapped text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CustomSql {
    fn from(sql: &str) -> Self {
        Self::new(sql)
    }
}

impl From<String> for CustomSql {
    fn from(sql: String) -> Self {
        Self(sql)
    }
}

/// A node of the statement tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// Raw SQL text.
    Custom(CustomSql),
    /// A bare object name, quoted when the context quotes identifiers.
    Identifier(String),
    /// A table reference: its name, then its alias when aliases are rendered.
    Table(DbTable),
    /// A column reference, alias-qualified when aliases are rendered.
    Column(DbColumn),
    /// A column declaration: its name followed by its SQL type.
    TypedColumn(DbColumn),
    /// A function name.
    Function(DbFunction),
    /// An inline literal.
    Value(SqlValue),
    /// A column declaration with a trailing constraint.
    Constrained(ConstrainedColumn),
    /// A function call.
    FunctionCall(FunctionCall),
    /// An IN condition.
    In(InCondition),
    /// A parenthesized nested statement.
    Subquery(Subquery),
    /// A CREATE TABLE statement.
    CreateTable(Box<CreateTableQuery>),
    /// A CREATE INDEX statement.
    CreateIndex(Box<CreateIndexQuery>),
    /// A DROP statement.
    Drop(DropQuery),
    /// A user-supplied node.
    Object(Arc<dyn SqlObject>),
}

impl Node {
    /// Wraps raw SQL text.
    #[must_use]
    pub fn custom(sql: impl Into<String>) -> Self {
        Self::Custom(CustomSql::new(sql))
    }

    /// Names an object by a bare identifier.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Wraps a user-supplied node.
    #[must_use]
    pub fn object(object: impl SqlObject + 'static) -> Self {
        Self::Object(Arc::new(object))
    }
}

impl SqlObject for Node {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        match self {
            Self::Custom(sql) => out.push_str(sql.as_str()),
            Self::Identifier(name) => ctx.write_identifier(out, name),
            Self::Table(table) => {
                table.write_name(out, ctx);
                if ctx.use_table_aliases() {
                    if let Some(alias) = table.alias() {
                        out.push(' ');
                        ctx.write_identifier(out, alias);
                    }
                }
            }
            Self::Column(column) => column.write_reference(out, ctx),
            Self::TypedColumn(column) => column.write_declaration(out, ctx),
            Self::Function(function) => function.write_name(out, ctx),
            Self::Value(value) => value.write_sql(out),
            Self::Constrained(node) => node.write_sql(out, ctx),
            Self::FunctionCall(node) => node.write_sql(out, ctx),
            Self::In(node) => node.write_sql(out, ctx),
            Self::Subquery(node) => node.write_sql(out, ctx),
            Self::CreateTable(node) => node.write_sql(out, ctx),
            Self::CreateIndex(node) => node.write_sql(out, ctx),
            Self::Drop(node) => node.write_sql(out, ctx),
            Self::Object(node) => node.write_sql(out, ctx),
        }
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        match self {
            Self::Custom(_) | Self::Identifier(_) | Self::Function(_) | Self::Value(_) => {}
            Self::Table(table) => vctx.add_table(table),
            Self::Column(column) | Self::TypedColumn(column) => vctx.add_column(column),
            Self::Constrained(node) => node.collect_schema_objects(vctx),
            Self::FunctionCall(node) => node.collect_schema_objects(vctx),
            Self::In(node) => node.collect_schema_objects(vctx),
            Self::Subquery(node) => node.collect_schema_objects(vctx),
            Self::CreateTable(node) => node.collect_schema_objects(vctx),
            Self::CreateIndex(node) => node.collect_schema_objects(vctx),
            Self::Drop(node) => node.collect_schema_objects(vctx),
            Self::Object(node) => node.collect_schema_objects(vctx),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::In(node) => node.is_blank(),
            Self::Object(node) => node.is_blank(),
            _ => false,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl From<CustomSql> for Node {
    fn from(sql: CustomSql) -> Self {
        Self::Custom(sql)
    }
}

impl From<SqlValue> for Node {
    fn from(value: SqlValue) -> Self {
        Self::Value(value)
    }
}

impl From<ConstrainedColumn> for Node {
    fn from(node: ConstrainedColumn) -> Self {
        Self::Constrained(node)
    }
}

impl From<FunctionCall> for Node {
    fn from(node: FunctionCall) -> Self {
        Self::FunctionCall(node)
    }
}

impl From<InCondition> for Node {
    fn from(node: InCondition) -> Self {
        Self::In(node)
    }
}

impl From<Subquery> for Node {
    fn from(node: Subquery) -> Self {
        Self::Subquery(node)
    }
}

impl From<CreateTableQuery> for Node {
    fn from(node: CreateTableQuery) -> Self {
        Self::CreateTable(Box::new(node))
    }
}

impl From<CreateIndexQuery> for Node {
    fn from(node: CreateIndexQuery) -> Self {
        Self::CreateIndex(Box::new(node))
    }
}

impl From<DropQuery> for Node {
    fn from(node: DropQuery) -> Self {
        Self::Drop(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataType;

    #[derive(Debug)]
    struct Placeholder(usize);

    impl SqlObject for Placeholder {
        fn write_sql(&self, out: &mut String, _ctx: SqlContext) {
            out.push('$');
            out.push_str(&self.0.to_string());
        }

        fn collect_schema_objects(&self, _vctx: &mut ValidationContext) {}
    }

    fn orders() -> DbTable {
        DbTable::builder("orders")
            .alias("o")
            .typed_column("total", DataType::Integer)
            .build()
    }

    #[test]
    fn test_table_node_alias_follows_context() {
        let node = Node::Table(orders());
        assert_eq!(node.to_sql(), "orders o");
        assert_eq!(
            node.to_sql_with(SqlContext::new().with_table_aliases(false)),
            "orders"
        );
    }

    #[test]
    fn test_column_nodes() {
        let total = orders().column("total").unwrap();
        assert_eq!(Node::Column(total.clone()).to_sql(), "o.total");
        assert_eq!(Node::TypedColumn(total).to_sql(), "total INTEGER");
    }

    #[test]
    fn test_leaf_nodes() {
        assert_eq!(Node::custom("COUNT(*)").to_sql(), "COUNT(*)");
        assert_eq!(Node::from(SqlValue::Int(3)).to_string(), "3");
        assert_eq!(Node::Function(DbFunction::new("lower")).to_sql(), "lower");
        assert_eq!(Node::identifier("idx").to_sql(), "idx");
        assert_eq!(
            Node::identifier("My \"Idx\"")
                .to_sql_with(SqlContext::new().with_quoted_identifiers(true)),
            "\"My \"\"Idx\"\"\""
        );
    }

    #[test]
    fn test_user_supplied_object() {
        let node = Node::object(Placeholder(2));
        assert_eq!(node.to_sql(), "$2");
        assert!(!node.is_blank());
    }

    #[test]
    fn test_collects_references() {
        let table = orders();
        let total = table.column("total").unwrap();
        let mut vctx = ValidationContext::new();
        Node::Table(table.clone()).collect_schema_objects(&mut vctx);
        Node::Column(total.clone()).collect_schema_objects(&mut vctx);
        Node::custom("x").collect_schema_objects(&mut vctx);
        assert!(vctx.tables().contains(&table));
        assert!(vctx.columns().contains(&total));
        assert_eq!(vctx.columns().len(), 1);
    }
}
