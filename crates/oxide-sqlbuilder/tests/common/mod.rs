#![allow(dead_code)]

use oxide_sqlbuilder::schema::{DataType, DbSpec, DbTable};
use oxide_sqlbuilder::{SqlBuilderError, SqlObject};

/// Installs a test-writer subscriber so `tracing` output shows up in
/// failing tests. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Two tables from one spec: `customers` (alias `t0`) and `orders`
/// (alias `t1`).
pub fn shop() -> (DbTable, DbTable) {
    let mut spec = DbSpec::new();
    let customers = spec
        .table("customers")
        .typed_column("id", DataType::Bigint)
        .typed_column("name", DataType::Varchar(Some(100)))
        .typed_column("email", DataType::Varchar(None))
        .build();
    let orders = spec
        .table("orders")
        .typed_column("id", DataType::Bigint)
        .typed_column("customer_id", DataType::Bigint)
        .typed_column("status", DataType::Text)
        .typed_column(
            "total",
            DataType::Decimal {
                precision: Some(12),
                scale: Some(2),
            },
        )
        .build();
    (customers, orders)
}

/// Renders `node` twice and checks both renderings agree.
pub fn render(node: &impl SqlObject) -> String {
    let first = node.to_sql();
    let second = node.to_sql();
    assert_eq!(first, second, "rendering is not stable");
    first
}

pub fn validation_reason(err: &SqlBuilderError) -> &str {
    err.reason()
        .unwrap_or_else(|| panic!("Expected validation error, got {err:?}"))
}
