//! IN conditions.

use std::fmt;

use crate::context::SqlContext;
use crate::convert::{ColumnInput, Converter, SqlInput, ValueInput};
use crate::error::Result;
use crate::node::{Node, NodeList, SqlObject};
use crate::validate::ValidationContext;

/// An IN condition: `(<left> [NOT ]IN (v1, v2, ...) )`.
///
/// A negated condition over an empty value set excludes nothing, so it is
/// blank: it renders to nothing and enclosing lists skip it. A non-negated
/// empty condition still renders, as `(<left> IN () )`.
#[derive(Debug, Clone)]
#[must_use]
pub struct InCondition {
    negate: bool,
    left: Box<Node>,
    values: NodeList,
}

impl InCondition {
    /// Creates a condition testing `left` against `values`.
    pub fn new<I, T>(left: impl Into<ColumnInput>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ValueInput>,
    {
        let left: ColumnInput = left.into();
        let mut condition = Self {
            negate: false,
            left: Box::new(Node::from(left)),
            values: NodeList::new(),
        };
        condition.values.extend(values.into_iter().map(Into::<ValueInput>::into));
        condition
    }

    /// Creates a condition from runtime-shaped input.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBuilderError::UnsupportedInput`](crate::SqlBuilderError::UnsupportedInput)
    /// when `left` is not a column, raw text or node, or when a value is not
    /// a value, column, query, raw text or node.
    pub fn try_new(left: SqlInput, values: impl IntoIterator<Item = SqlInput>) -> Result<Self> {
        let left = Converter::Column.convert(left)?;
        let mut condition = Self {
            negate: false,
            left: Box::new(left),
            values: NodeList::new(),
        };
        condition.values.extend_inputs(Converter::ColumnValue, values)?;
        Ok(condition)
    }

    /// Adds one value to the tested set.
    pub fn add_object(self, value: impl Into<ValueInput>) -> Self {
        let value: ValueInput = value.into();
        self.add_objects([value])
    }

    /// Adds values to the tested set, preserving order.
    pub fn add_objects<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ValueInput>,
    {
        self.values.extend(values.into_iter().map(Into::<ValueInput>::into));
        self
    }

    /// Sets whether the condition is negated (`NOT IN`).
    pub const fn set_negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    /// Returns whether the condition is negated.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negate
    }

    /// Returns the tested values.
    #[must_use]
    pub const fn values(&self) -> &NodeList {
        &self.values
    }
}

impl SqlObject for InCondition {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        if self.is_blank() {
            return;
        }
        out.push('(');
        self.left.write_sql(out, ctx);
        out.push_str(if self.negate { " NOT IN (" } else { " IN (" });
        self.values.write_sql(out, ctx);
        out.push_str(") )");
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        self.left.collect_schema_objects(vctx);
        self.values.collect_schema_objects(vctx);
    }

    fn is_blank(&self) -> bool {
        self.negate && self.values.is_empty()
    }
}

impl fmt::Display for InCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Subquery;
    use crate::node::CustomSql;
    use crate::schema::DbTable;
    use crate::value::SqlValue;

    fn empty() -> Vec<i64> {
        Vec::new()
    }

    #[test]
    fn test_empty_polarity() {
        let plain = InCondition::new("x", empty());
        assert!(!plain.is_blank());
        assert_eq!(plain.to_sql(), "(x IN () )");

        let negated = InCondition::new("x", empty()).set_negate(true);
        assert!(negated.is_blank());
        assert_eq!(negated.to_sql(), "");
    }

    #[test]
    fn test_one_value_both_polarities() {
        assert_eq!(InCondition::new("x", [1]).to_sql(), "(x IN (1) )");
        assert_eq!(
            InCondition::new("x", [1]).set_negate(true).to_sql(),
            "(x NOT IN (1) )"
        );
    }

    #[test]
    fn test_three_values_both_polarities() {
        assert_eq!(
            InCondition::new("x", ["a", "b", "c"]).to_sql(),
            "(x IN ('a', 'b', 'c') )"
        );
        let negated = InCondition::new("x", ["a", "b", "c"]).set_negate(true);
        assert!(!negated.is_blank());
        assert_eq!(negated.to_sql(), "(x NOT IN ('a', 'b', 'c') )");
    }

    #[test]
    fn test_add_objects_after_construction() {
        let condition = InCondition::new("status", empty())
            .set_negate(true)
            .add_object("open")
            .add_objects(["held", "late"]);
        assert_eq!(condition.to_sql(), "(status NOT IN ('open', 'held', 'late') )");
        assert_eq!(condition.values().len(), 3);
    }

    #[test]
    fn test_column_and_subquery_values() {
        let table = DbTable::builder("orders").alias("o").column("customer_id").build();
        let customer_id = table.column("customer_id").unwrap();
        let condition = InCondition::new(
            &customer_id,
            [ValueInput::from(Subquery::new(CustomSql::new("SELECT id FROM vip")))],
        );
        assert_eq!(condition.to_sql(), "(o.customer_id IN ((SELECT id FROM vip)) )");

        let vctx = ValidationContext::collect(&condition);
        assert!(vctx.columns().contains(&customer_id));
    }

    #[test]
    fn test_try_new() {
        let condition = InCondition::try_new(
            SqlInput::Raw(String::from("id")),
            vec![SqlInput::Value(SqlValue::Int(4))],
        )
        .unwrap();
        assert_eq!(condition.to_sql(), "(id IN (4) )");

        let err = InCondition::try_new(SqlInput::Value(SqlValue::Int(1)), Vec::new());
        assert!(err.is_err());
    }

    #[test]
    fn test_try_new_keeps_prebuilt_subquery() {
        let vip = Subquery::new(CustomSql::new("SELECT id FROM t"));
        let condition = InCondition::try_new(
            SqlInput::Raw(String::from("x")),
            vec![SqlInput::Query(Node::Subquery(vip))],
        )
        .unwrap();
        assert_eq!(condition.to_sql(), "(x IN ((SELECT id FROM t)) )");
    }
}
