//! # oxide-sqlbuilder
//!
//! Builds SQL statements as trees of typed nodes and renders them to text.
//!
//! This crate provides:
//! - A node model ([`Node`], [`NodeList`]) where every fragment, from a
//!   column reference to a full statement, renders itself into a buffer
//! - Render contexts ([`SqlContext`]) that change output by position, e.g.
//!   table aliases are never rendered inside DDL
//! - Input normalization: builder methods accept schema objects, raw text,
//!   literal values and prebuilt nodes
//! - An opt-in validation pass that checks structure and schema references
//!
//! ## Building a table
//!
//! ```rust
//! use oxide_sqlbuilder::query::{ColumnConstraint, CreateStatement, CreateTableQuery};
//! use oxide_sqlbuilder::schema::{DataType, DbSpec};
//! use oxide_sqlbuilder::SqlObject;
//!
//! let mut spec = DbSpec::new();
//! let orders = spec
//!     .table("orders")
//!     .typed_column("id", DataType::Bigint)
//!     .typed_column("total", DataType::Integer)
//!     .build();
//!
//! let query = CreateTableQuery::new(&orders)
//!     .add_column(&orders.column("id").unwrap(), ColumnConstraint::PrimaryKey)
//!     .add_column(&orders.column("total").unwrap(), ColumnConstraint::NotNull);
//!
//! query.validate().unwrap();
//! assert_eq!(
//!     query.to_sql(),
//!     "CREATE TABLE orders (id BIGINT PRIMARY KEY, total INTEGER NOT NULL)"
//! );
//! assert_eq!(query.drop_query().to_sql(), "DROP TABLE orders");
//! ```
//!
//! ## Conditions and function calls
//!
//! Outside DDL, columns are qualified by their table alias:
//!
//! ```rust
//! use oxide_sqlbuilder::expr::{FunctionCall, InCondition};
//! use oxide_sqlbuilder::schema::DbSpec;
//! use oxide_sqlbuilder::SqlObject;
//!
//! let mut spec = DbSpec::new();
//! let orders = spec.table("orders").column("status").column("total").build();
//! let status = orders.column("status").unwrap();
//! let total = orders.column("total").unwrap();
//!
//! let open = InCondition::new(&status, ["new", "paid"]);
//! assert_eq!(open.to_sql(), "(t0.status IN ('new', 'paid') )");
//!
//! let sum = FunctionCall::sum().add_column_params([&total]);
//! assert_eq!(sum.to_sql(), "SUM(t0.total)");
//! ```

pub mod context;
pub mod convert;
pub mod error;
pub mod expr;
pub mod node;
pub mod query;
pub mod schema;
pub mod validate;
pub mod value;

pub use context::SqlContext;
pub use convert::{Converter, SqlInput};
pub use error::{Result, SqlBuilderError};
pub use node::{CustomSql, Node, NodeHandle, NodeList, SqlObject};
pub use query::{CreateIndexQuery, CreateStatement, CreateTableQuery, DropQuery};
pub use schema::{DataType, DbColumn, DbFunction, DbSpec, DbTable, TableSpec};
pub use validate::{validate_references, ValidationContext};
pub use value::{SqlValue, ToSqlValue};
