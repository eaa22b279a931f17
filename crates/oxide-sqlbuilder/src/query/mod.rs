//! Statement builders.
//!
//! Builders are consuming: every setter takes `self` and returns the
//! updated builder, so statements read as one chain. A statement can be
//! rendered and validated any number of times.

mod create_index;
mod create_table;
mod drop;

pub use create_index::CreateIndexQuery;
pub use create_table::{ColumnConstraint, ConstrainedColumn, CreateTableQuery};
pub use drop::{DropBehavior, DropQuery, DropType};

/// Statements that create a schema object.
pub trait CreateStatement {
    /// Returns the statement dropping the object this statement creates.
    fn drop_query(&self) -> DropQuery;
}
