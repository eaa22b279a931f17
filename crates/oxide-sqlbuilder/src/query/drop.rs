//! DROP statements.

use std::fmt;

use crate::context::SqlContext;
use crate::convert::TableInput;
use crate::error::Result;
use crate::node::{Node, SqlObject};
use crate::validate::{validate_references, ValidationContext};

/// The kind of object a [`DropQuery`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropType {
    /// `DROP TABLE`
    Table,
    /// `DROP VIEW`
    View,
    /// `DROP INDEX`
    Index,
    /// `DROP SCHEMA`
    Schema,
    /// `DROP FUNCTION`
    Function,
}

impl DropType {
    /// Returns the object keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Index => "INDEX",
            Self::Schema => "SCHEMA",
            Self::Function => "FUNCTION",
        }
    }
}

/// What happens to objects depending on the dropped one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropBehavior {
    /// Drop dependent objects too.
    Cascade,
    /// Refuse to drop while dependents exist.
    Restrict,
}

impl DropBehavior {
    /// Returns the behavior keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
        }
    }
}

/// A `DROP <kind> <target>` statement.
///
/// ```rust
/// use oxide_sqlbuilder::query::{DropBehavior, DropQuery, DropType};
/// use oxide_sqlbuilder::SqlObject;
///
/// let query = DropQuery::new(DropType::View, "recent_orders").set_behavior(DropBehavior::Cascade);
/// assert_eq!(query.to_sql(), "DROP VIEW recent_orders CASCADE");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct DropQuery {
    kind: DropType,
    target: Box<Node>,
    behavior: Option<DropBehavior>,
}

impl DropQuery {
    /// Creates a statement dropping `target`.
    pub fn new(kind: DropType, target: impl Into<TableInput>) -> Self {
        let target: TableInput = target.into();
        Self {
            kind,
            target: Box::new(Node::from(target)),
            behavior: None,
        }
    }

    /// Sets the behavior toward dependent objects.
    pub const fn set_behavior(mut self, behavior: DropBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Returns the kind of object dropped.
    #[must_use]
    pub const fn kind(&self) -> DropType {
        self.kind
    }

    /// Returns the dropped object.
    #[must_use]
    pub fn target(&self) -> &Node {
        &self.target
    }

    /// Checks the statement's references.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the target references a column of a
    /// table the statement does not reference.
    pub fn validate(&self) -> Result<&Self> {
        validate_references(self)?;
        Ok(self)
    }
}

impl SqlObject for DropQuery {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        let ctx = ctx.with_table_aliases(false);
        out.push_str("DROP ");
        out.push_str(self.kind.as_str());
        out.push(' ');
        self.target.write_sql(out, ctx);
        if let Some(behavior) = self.behavior {
            out.push(' ');
            out.push_str(behavior.as_str());
        }
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        self.target.collect_schema_objects(vctx);
    }
}

impl fmt::Display for DropQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
