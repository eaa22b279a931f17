//! Nested statements.

use crate::context::SqlContext;
use crate::node::{Node, SqlObject};
use crate::validate::ValidationContext;

/// A nested statement rendered in parentheses, e.g. as the right-hand side
/// of an IN condition.
#[derive(Debug, Clone)]
pub struct Subquery(Box<Node>);

impl Subquery {
    /// Wraps a statement.
    #[must_use]
    pub fn new(query: impl Into<Node>) -> Self {
        Self(Box::new(query.into()))
    }

    /// Returns the wrapped statement.
    #[must_use]
    pub fn query(&self) -> &Node {
        &self.0
    }
}

impl SqlObject for Subquery {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        out.push('(');
        self.0.write_sql(out, ctx);
        out.push(')');
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        self.0.collect_schema_objects(vctx);
    }
}
