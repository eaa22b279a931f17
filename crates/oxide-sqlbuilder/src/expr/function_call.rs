//! Function calls.

use std::fmt;

use crate::context::SqlContext;
use crate::convert::{Converter, FunctionInput, SqlInput, ValueInput};
use crate::error::Result;
use crate::node::{CustomSql, Node, NodeList, SqlObject, ALL_SYMBOL};
use crate::schema::DbColumn;
use crate::validate::ValidationContext;

/// A function call: `NAME([DISTINCT ]p1, p2, ...)`.
///
/// # Example
///
/// ```rust
/// use oxide_sqlbuilder::expr::FunctionCall;
/// use oxide_sqlbuilder::SqlObject;
///
/// let call = FunctionCall::count().set_distinct(true).add_custom_params(["a", "b"]);
/// assert_eq!(call.to_sql(), "COUNT(DISTINCT 'a', 'b')");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct FunctionCall {
    name: Box<Node>,
    distinct: bool,
    params: NodeList,
}

impl FunctionCall {
    /// Creates a call without parameters.
    pub fn new(name: impl Into<FunctionInput>) -> Self {
        let name: FunctionInput = name.into();
        Self {
            name: Box::new(Node::from(name)),
            distinct: false,
            params: NodeList::new(),
        }
    }

    /// `AVG(...)`.
    pub fn avg() -> Self {
        Self::new(CustomSql::new("AVG"))
    }

    /// `MIN(...)`.
    pub fn min() -> Self {
        Self::new(CustomSql::new("MIN"))
    }

    /// `MAX(...)`.
    pub fn max() -> Self {
        Self::new(CustomSql::new("MAX"))
    }

    /// `SUM(...)`.
    pub fn sum() -> Self {
        Self::new(CustomSql::new("SUM"))
    }

    /// `COUNT(...)`.
    pub fn count() -> Self {
        Self::new(CustomSql::new("COUNT"))
    }

    /// `COUNT(*)`.
    pub fn count_all() -> Self {
        Self::count().add_custom_params([CustomSql::new(ALL_SYMBOL)])
    }

    /// Adds or removes the DISTINCT keyword before the parameters.
    pub const fn set_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Appends parameters in order.
    pub fn add_custom_params<I, T>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ValueInput>,
    {
        self.params
            .extend(params.into_iter().map(Into::<ValueInput>::into));
        self
    }

    /// Appends column references as parameters.
    pub fn add_column_params<'a>(self, columns: impl IntoIterator<Item = &'a DbColumn>) -> Self {
        self.add_custom_params(columns)
    }

    /// Appends one numeric (or other literal) parameter.
    pub fn add_numeric_value_param(self, value: impl Into<ValueInput>) -> Self {
        let value: ValueInput = value.into();
        self.add_custom_params([value])
    }

    /// Appends runtime-shaped parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBuilderError::UnsupportedInput`](crate::SqlBuilderError::UnsupportedInput)
    /// for inputs that are not values, columns, queries, raw text or nodes.
    pub fn try_add_custom_params(
        mut self,
        params: impl IntoIterator<Item = SqlInput>,
    ) -> Result<Self> {
        self.params.extend_inputs(Converter::ColumnValue, params)?;
        Ok(self)
    }

    /// Returns the function name node.
    #[must_use]
    pub fn name(&self) -> &Node {
        &self.name
    }

    /// Returns whether DISTINCT is rendered.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Returns the parameters.
    #[must_use]
    pub const fn params(&self) -> &NodeList {
        &self.params
    }
}

impl SqlObject for FunctionCall {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        self.name.write_sql(out, ctx);
        out.push('(');
        if self.distinct {
            out.push_str("DISTINCT ");
        }
        self.params.write_sql(out, ctx);
        out.push(')');
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        self.name.collect_schema_objects(vctx);
        self.params.collect_schema_objects(vctx);
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
