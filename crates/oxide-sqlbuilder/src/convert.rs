//! Input normalization.
//!
//! Builder methods accept several shapes of input and turn each one into
//! exactly one [`Node`]. Which shapes are accepted, and what they become,
//! depends on the call site: a [`DbColumn`] passed as a column declaration
//! renders as `name TYPE`, the same column passed as a value renders as an
//! alias-qualified reference, and a `&str` is raw SQL in a declaration but a
//! quoted literal in a value position.
//!
//! Each call site takes one of the closed input enums below, so every
//! accepted shape is known at compile time and conversion cannot fail:
//!
//! | enum | call site | shapes |
//! |------|-----------|--------|
//! | [`TableInput`] | statement target | table, raw text, node |
//! | [`TypedColumnInput`] | column declaration | column, raw text, node |
//! | [`ColumnInput`] | column reference | column, raw text, node |
//! | [`FunctionInput`] | function name | function, raw text, node |
//! | [`ValueInput`] | value | column, literal, raw [`CustomSql`], node, subquery |
//!
//! Input whose shape is only known at runtime goes through [`SqlInput`] and
//! a [`Converter`] rule instead, which reports shapes the rule does not
//! accept as [`SqlBuilderError::UnsupportedInput`].

use tracing::debug;

use crate::error::{Result, SqlBuilderError};
use crate::expr::{FunctionCall, Subquery};
use crate::node::{CustomSql, Node};
use crate::schema::{DbColumn, DbFunction, DbTable};
use crate::value::{SqlValue, ToSqlValue};

macro_rules! impl_text_and_node_input {
    ($($input:ident),+) => {
        $(
            impl From<&str> for $input {
                fn from(sql: &str) -> Self {
                    Self::Raw(CustomSql::new(sql))
                }
            }

            impl From<String> for $input {
                fn from(sql: String) -> Self {
                    Self::Raw(CustomSql::new(sql))
                }
            }

            impl From<CustomSql> for $input {
                fn from(sql: CustomSql) -> Self {
                    Self::Raw(sql)
                }
            }

            impl From<Node> for $input {
                fn from(node: Node) -> Self {
                    Self::Node(node)
                }
            }
        )+
    };
}

/// Input naming the object a statement targets.
#[derive(Debug, Clone)]
pub enum TableInput {
    /// A table description; rendered as a table reference.
    Table(DbTable),
    /// Raw SQL naming the object.
    Raw(CustomSql),
    /// A prebuilt node, used as is.
    Node(Node),
}

impl From<DbTable> for TableInput {
    fn from(table: DbTable) -> Self {
        Self::Table(table)
    }
}

impl From<&DbTable> for TableInput {
    fn from(table: &DbTable) -> Self {
        Self::Table(table.clone())
    }
}

impl From<TableInput> for Node {
    fn from(input: TableInput) -> Self {
        match input {
            TableInput::Table(table) => Self::Table(table),
            TableInput::Raw(sql) => Self::Custom(sql),
            TableInput::Node(node) => node,
        }
    }
}

/// Input for a column declaration inside DDL.
#[derive(Debug, Clone)]
pub enum TypedColumnInput {
    /// A column description; rendered as `name TYPE`.
    Column(DbColumn),
    /// Raw SQL, usually `"<name> <type>"`.
    Raw(CustomSql),
    /// A prebuilt node, used as is.
    Node(Node),
}

impl From<DbColumn> for TypedColumnInput {
    fn from(column: DbColumn) -> Self {
        Self::Column(column)
    }
}

impl From<&DbColumn> for TypedColumnInput {
    fn from(column: &DbColumn) -> Self {
        Self::Column(column.clone())
    }
}

impl From<TypedColumnInput> for Node {
    fn from(input: TypedColumnInput) -> Self {
        match input {
            TypedColumnInput::Column(column) => Self::TypedColumn(column),
            TypedColumnInput::Raw(sql) => Self::Custom(sql),
            TypedColumnInput::Node(node) => node,
        }
    }
}

/// Input for a column reference.
#[derive(Debug, Clone)]
pub enum ColumnInput {
    /// A column description; rendered as `alias.name` when aliases are on.
    Column(DbColumn),
    /// Raw SQL naming the column.
    Raw(CustomSql),
    /// A prebuilt node, used as is.
    Node(Node),
}

impl From<DbColumn> for ColumnInput {
    fn from(column: DbColumn) -> Self {
        Self::Column(column)
    }
}

impl From<&DbColumn> for ColumnInput {
    fn from(column: &DbColumn) -> Self {
        Self::Column(column.clone())
    }
}

impl From<ColumnInput> for Node {
    fn from(input: ColumnInput) -> Self {
        match input {
            ColumnInput::Column(column) => Self::Column(column),
            ColumnInput::Raw(sql) => Self::Custom(sql),
            ColumnInput::Node(node) => node,
        }
    }
}

/// Input naming a function.
#[derive(Debug, Clone)]
pub enum FunctionInput {
    /// A function description.
    Function(DbFunction),
    /// Raw SQL naming the function.
    Raw(CustomSql),
    /// A prebuilt node, used as is.
    Node(Node),
}

impl From<DbFunction> for FunctionInput {
    fn from(function: DbFunction) -> Self {
        Self::Function(function)
    }
}

impl From<&DbFunction> for FunctionInput {
    fn from(function: &DbFunction) -> Self {
        Self::Function(function.clone())
    }
}

impl From<FunctionInput> for Node {
    fn from(input: FunctionInput) -> Self {
        match input {
            FunctionInput::Function(function) => Self::Function(function),
            FunctionInput::Raw(sql) => Self::Custom(sql),
            FunctionInput::Node(node) => node,
        }
    }
}

impl_text_and_node_input!(TableInput, TypedColumnInput, ColumnInput, FunctionInput);

/// Input for a value position (IN lists, function arguments).
///
/// Plain Rust values become quoted literals; raw SQL must be wrapped in
/// [`CustomSql`] explicitly.
#[derive(Debug, Clone)]
pub enum ValueInput {
    /// A column reference.
    Column(DbColumn),
    /// A literal.
    Value(SqlValue),
    /// Raw SQL.
    Raw(CustomSql),
    /// A nested statement.
    Subquery(Subquery),
    /// A prebuilt node, used as is.
    Node(Node),
}

impl From<DbColumn> for ValueInput {
    fn from(column: DbColumn) -> Self {
        Self::Column(column)
    }
}

impl From<&DbColumn> for ValueInput {
    fn from(column: &DbColumn) -> Self {
        Self::Column(column.clone())
    }
}

impl From<SqlValue> for ValueInput {
    fn from(value: SqlValue) -> Self {
        Self::Value(value)
    }
}

impl From<CustomSql> for ValueInput {
    fn from(sql: CustomSql) -> Self {
        Self::Raw(sql)
    }
}

impl From<Subquery> for ValueInput {
    fn from(subquery: Subquery) -> Self {
        Self::Subquery(subquery)
    }
}

impl From<FunctionCall> for ValueInput {
    fn from(call: FunctionCall) -> Self {
        Self::Node(Node::FunctionCall(call))
    }
}

impl From<Node> for ValueInput {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl<T: ToSqlValue> From<Option<T>> for ValueInput {
    fn from(value: Option<T>) -> Self {
        Self::Value(value.to_sql_value())
    }
}

macro_rules! impl_literal_input {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for ValueInput {
                fn from(value: $ty) -> Self {
                    Self::Value(value.to_sql_value())
                }
            }
        )+
    };
}

impl_literal_input!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str);

impl From<ValueInput> for Node {
    fn from(input: ValueInput) -> Self {
        match input {
            ValueInput::Column(column) => Self::Column(column),
            ValueInput::Value(value) => Self::Value(value),
            ValueInput::Raw(sql) => Self::Custom(sql),
            ValueInput::Subquery(subquery) => Self::Subquery(subquery),
            ValueInput::Node(node) => node,
        }
    }
}

/// Input whose shape is only known at runtime.
#[derive(Debug, Clone)]
pub enum SqlInput {
    /// A table description.
    Table(DbTable),
    /// A column description.
    Column(DbColumn),
    /// A function description.
    Function(DbFunction),
    /// A literal.
    Value(SqlValue),
    /// Raw SQL text.
    Raw(String),
    /// A nested statement, parenthesized where accepted.
    Query(Node),
    /// A prebuilt node, used as is.
    Node(Node),
}

impl SqlInput {
    /// Returns the name of the input's shape.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Table(_) => "table",
            Self::Column(_) => "column",
            Self::Function(_) => "function",
            Self::Value(_) => "value",
            Self::Raw(_) => "raw sql",
            Self::Query(_) => "query",
            Self::Node(_) => "node",
        }
    }
}

impl From<DbTable> for SqlInput {
    fn from(table: DbTable) -> Self {
        Self::Table(table)
    }
}

impl From<DbColumn> for SqlInput {
    fn from(column: DbColumn) -> Self {
        Self::Column(column)
    }
}

impl From<DbFunction> for SqlInput {
    fn from(function: DbFunction) -> Self {
        Self::Function(function)
    }
}

impl From<SqlValue> for SqlInput {
    fn from(value: SqlValue) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for SqlInput {
    fn from(sql: &str) -> Self {
        Self::Raw(String::from(sql))
    }
}

impl From<String> for SqlInput {
    fn from(sql: String) -> Self {
        Self::Raw(sql)
    }
}

impl From<Node> for SqlInput {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

/// Conversion rules for runtime-shaped input, one per kind of call site.
///
/// Every rule passes nodes through unchanged and turns raw text into
/// [`Node::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    /// Column declarations: columns become `name TYPE`.
    TypedColumn,
    /// Column references: columns become alias-qualified references.
    Column,
    /// Values: columns, literals and nested queries.
    ColumnValue,
    /// Statement targets: tables.
    CustomTable,
    /// Function names: functions.
    CustomFunction,
}

impl Converter {
    /// Returns the rule name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TypedColumn => "typed column",
            Self::Column => "column",
            Self::ColumnValue => "column value",
            Self::CustomTable => "table",
            Self::CustomFunction => "function",
        }
    }

    /// Converts one input into a node.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBuilderError::UnsupportedInput`] when the rule does not
    /// accept the input's shape.
    pub fn convert(self, input: SqlInput) -> Result<Node> {
        match (self, input) {
            (_, SqlInput::Node(node)) => Ok(node),
            (_, SqlInput::Raw(sql)) => Ok(Node::custom(sql)),
            (Self::TypedColumn, SqlInput::Column(column)) => Ok(Node::TypedColumn(column)),
            (Self::Column | Self::ColumnValue, SqlInput::Column(column)) => {
                Ok(Node::Column(column))
            }
            (Self::ColumnValue, SqlInput::Value(value)) => Ok(Node::Value(value)),
            (Self::ColumnValue, SqlInput::Query(query @ Node::Subquery(_))) => Ok(query),
            (Self::ColumnValue, SqlInput::Query(query)) => {
                Ok(Node::Subquery(Subquery::new(query)))
            }
            (Self::CustomTable, SqlInput::Table(table)) => Ok(Node::Table(table)),
            (Self::CustomFunction, SqlInput::Function(function)) => Ok(Node::Function(function)),
            (rule, input) => {
                debug!(rule = rule.name(), input = input.kind(), "rejected input");
                Err(SqlBuilderError::UnsupportedInput {
                    rule: rule.name(),
                    input: input.kind(),
                })
            }
        }
    }

    /// Converts every input, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error.
    pub fn convert_all<I>(self, inputs: I) -> Result<Vec<Node>>
    where
        I: IntoIterator<Item = SqlInput>,
    {
        inputs.into_iter().map(|input| self.convert(input)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SqlObject;
    use crate::schema::DataType;

    fn users() -> DbTable {
        DbTable::builder("users")
            .alias("u")
            .typed_column("id", DataType::Integer)
            .build()
    }

    #[test]
    fn test_call_site_decides_column_rendering() {
        let id = users().column("id").unwrap();
        assert_eq!(Node::from(TypedColumnInput::from(&id)).to_sql(), "id INTEGER");
        assert_eq!(Node::from(ColumnInput::from(&id)).to_sql(), "u.id");
        assert_eq!(Node::from(ValueInput::from(&id)).to_sql(), "u.id");
    }

    #[test]
    fn test_call_site_decides_text_rendering() {
        assert_eq!(Node::from(TypedColumnInput::from("id INT")).to_sql(), "id INT");
        assert_eq!(Node::from(ValueInput::from("it's")).to_sql(), "'it''s'");
        assert_eq!(
            Node::from(ValueInput::from(CustomSql::new("CURRENT_DATE"))).to_sql(),
            "CURRENT_DATE"
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(Node::from(ValueInput::from(42)).to_sql(), "42");
        assert_eq!(Node::from(ValueInput::from(true)).to_sql(), "TRUE");
        assert_eq!(Node::from(ValueInput::from(None::<i64>)).to_sql(), "NULL");
    }

    #[test]
    fn test_nodes_pass_through_unwrapped() {
        let node = Node::custom("x");
        match Node::from(ValueInput::from(node)) {
            Node::Custom(sql) => assert_eq!(sql.as_str(), "x"),
            other => panic!("expected custom node, got {other:?}"),
        }
        match Converter::TypedColumn.convert(SqlInput::Node(Node::custom("y"))) {
            Ok(Node::Custom(sql)) => assert_eq!(sql.as_str(), "y"),
            other => panic!("expected custom node, got {other:?}"),
        }
    }

    #[test]
    fn test_dynamic_rules() {
        let table = users();
        let id = table.column("id").unwrap();

        let node = Converter::CustomTable.convert(table.clone().into()).unwrap();
        assert_eq!(node.to_sql(), "users u");
        let node = Converter::TypedColumn.convert(id.clone().into()).unwrap();
        assert_eq!(node.to_sql(), "id INTEGER");
        let node = Converter::Column.convert(id.into()).unwrap();
        assert_eq!(node.to_sql(), "u.id");
        let node = Converter::ColumnValue
            .convert(SqlInput::Query(Node::custom("SELECT 1")))
            .unwrap();
        assert_eq!(node.to_sql(), "(SELECT 1)");
    }

    #[test]
    fn test_nested_query_is_wrapped_once() {
        let wrapped = Node::Subquery(Subquery::new(CustomSql::new("SELECT 1")));
        let node = Converter::ColumnValue
            .convert(SqlInput::Query(wrapped))
            .unwrap();
        assert!(matches!(node, Node::Subquery(_)));
        assert_eq!(node.to_sql(), "(SELECT 1)");
    }

    #[test]
    fn test_dynamic_rule_rejects_unsupported_shape() {
        let err = Converter::CustomTable
            .convert(SqlInput::Value(SqlValue::Int(1)))
            .unwrap_err();
        assert_eq!(
            err,
            SqlBuilderError::UnsupportedInput {
                rule: "table",
                input: "value",
            }
        );
        assert!(Converter::TypedColumn
            .convert(SqlInput::Table(users()))
            .is_err());
        assert!(Converter::Column
            .convert(SqlInput::Query(Node::custom("SELECT 1")))
            .is_err());
    }

    #[test]
    fn test_convert_all_preserves_order() {
        let nodes = Converter::ColumnValue
            .convert_all(vec![
                SqlInput::Value(SqlValue::Int(3)),
                SqlInput::Raw(String::from("b")),
                SqlInput::Value(SqlValue::Int(1)),
            ])
            .unwrap();
        let rendered: Vec<String> = nodes.iter().map(SqlObject::to_sql).collect();
        assert_eq!(rendered, vec!["3", "b", "1"]);
    }
}
