//! CREATE TABLE statements end to end: seeding, constraints, render
//! contexts and validation.

mod common;

use common::{init_tracing, render, shop, validation_reason};
use oxide_sqlbuilder::query::{ColumnConstraint, CreateStatement, CreateTableQuery};
use oxide_sqlbuilder::schema::DbTable;
use oxide_sqlbuilder::{CustomSql, Node, NodeList, SqlContext, SqlInput, SqlObject};

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_single_column_table() {
    let table = DbTable::builder("T").column("C").build();
    let query = CreateTableQuery::with_all_columns(&table);
    assert_eq!(render(&query), "CREATE TABLE T (C)");
}

#[test]
fn test_alias_never_rendered_for_target() {
    init_tracing();
    let (customers, _) = shop();
    assert_eq!(customers.alias(), Some("t0"));

    let query = CreateTableQuery::with_all_columns(&customers);
    let expected = "CREATE TABLE customers (id BIGINT, name VARCHAR(100), email VARCHAR)";
    assert_eq!(render(&query), expected);
    assert_eq!(
        query.to_sql_with(SqlContext::new().with_table_aliases(true)),
        expected
    );
}

#[test]
fn test_aliases_come_back_after_the_statement() {
    let (customers, _) = shop();
    let mut list = NodeList::with_separator("; ");
    list.push(CreateTableQuery::with_all_columns(&customers));
    list.push(Node::Column(customers.column("id").unwrap()));
    assert_eq!(
        render(&list),
        "CREATE TABLE customers (id BIGINT, name VARCHAR(100), email VARCHAR); t0.id"
    );
}

#[test]
fn test_quoted_identifiers() {
    let table = DbTable::builder("order").column("select").build();
    let query = CreateTableQuery::with_all_columns(&table);
    assert_eq!(
        query.to_sql_with(SqlContext::new().with_quoted_identifiers(true)),
        r#"CREATE TABLE "order" ("select")"#
    );
}

#[test]
fn test_bulk_add_preserves_order() {
    let (_, orders) = shop();
    let status = orders.column("status").unwrap();
    let id = orders.column("id").unwrap();
    let total = orders.column("total").unwrap();

    let query = CreateTableQuery::new(&orders).add_columns([&total, &id, &status]);
    assert_eq!(
        render(&query),
        "CREATE TABLE orders (total DECIMAL(12, 2), id BIGINT, status TEXT)"
    );
}

#[test]
fn test_tablespace_clause() {
    let (_, orders) = shop();
    let query = CreateTableQuery::with_all_columns(&orders).set_tablespace("archive");
    assert!(render(&query).ends_with(") TABLESPACE archive"));
    assert_eq!(query.tablespace(), Some("archive"));
}

#[test]
fn test_mixed_column_inputs() {
    let (customers, _) = shop();
    let query = CreateTableQuery::new(&customers)
        .add_column(&customers.column("id").unwrap(), ColumnConstraint::PrimaryKey)
        .add_custom_columns(["created_at TIMESTAMP"])
        .add_custom_column(CustomSql::new("nickname TEXT"), ColumnConstraint::Unique)
        .add_custom_columns([Node::TypedColumn(customers.column("email").unwrap())]);
    assert_eq!(
        render(&query),
        "CREATE TABLE customers (id BIGINT PRIMARY KEY, created_at TIMESTAMP, \
         nickname TEXT UNIQUE, email VARCHAR)"
    );
}

// =============================================================================
// Constraint retargeting
// =============================================================================

#[test]
fn test_primary_key_attached_after_the_fact() {
    let (_, orders) = shop();
    let id = orders.column("id").unwrap();
    let query = CreateTableQuery::with_all_columns(&orders)
        .set_column_constraint(&id, ColumnConstraint::PrimaryKey);
    assert_eq!(
        render(&query),
        "CREATE TABLE orders (id BIGINT PRIMARY KEY, customer_id BIGINT, status TEXT, \
         total DECIMAL(12, 2))"
    );
}

#[test]
fn test_retarget_middle_column_keeps_siblings() {
    let (_, orders) = shop();
    let status = orders.column("status").unwrap();
    let query = CreateTableQuery::with_all_columns(&orders)
        .set_column_constraint(&status, ColumnConstraint::NotNull)
        .set_column_constraint(&status, ColumnConstraint::Unique);
    assert_eq!(
        render(&query),
        "CREATE TABLE orders (id BIGINT, customer_id BIGINT, status TEXT UNIQUE, \
         total DECIMAL(12, 2))"
    );
    assert_eq!(query.columns().len(), 4);
}

#[test]
fn test_retarget_miss_is_silent() {
    init_tracing();
    let (customers, orders) = shop();
    let query = CreateTableQuery::with_all_columns(&customers);
    let foreign = orders.column("status").unwrap();
    assert!(!query.contains_column(&foreign));

    let query = query.set_column_constraint(&foreign, ColumnConstraint::NotNull);
    assert_eq!(
        render(&query),
        "CREATE TABLE customers (id BIGINT, name VARCHAR(100), email VARCHAR)"
    );
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_validate_zero_columns() {
    init_tracing();
    let (customers, _) = shop();
    let query = CreateTableQuery::new(&customers);
    let err = query.validate().unwrap_err();
    assert_eq!(validation_reason(&err), "Table has no columns");

    // Rendering never validates.
    assert_eq!(render(&query), "CREATE TABLE customers ()");
}

#[test]
fn test_validate_one_column() {
    let (customers, _) = shop();
    let query = CreateTableQuery::new(&customers).add_custom_columns(["id INT"]);
    assert!(query.validate().is_ok());
}

#[test]
fn test_validate_is_repeatable() {
    let (customers, orders) = shop();
    let good = CreateTableQuery::with_all_columns(&customers);
    assert!(good.validate().is_ok());
    assert!(good.validate().is_ok());

    let bad = CreateTableQuery::new(&customers).add_columns([&orders.column("id").unwrap()]);
    let first = bad.validate().unwrap_err();
    let second = bad.validate().unwrap_err();
    assert_eq!(first, second);
    assert_eq!(
        validation_reason(&first),
        "Columns used for unreferenced tables: orders.id"
    );
}

#[test]
fn test_validate_then_keep_building() {
    let (customers, _) = shop();
    let query = CreateTableQuery::new(&customers);
    assert!(query.validate().is_err());

    let query = query.add_columns([&customers.column("name").unwrap()]);
    assert!(query.validate().is_ok());
    assert_eq!(render(&query), "CREATE TABLE customers (name VARCHAR(100))");
}

// =============================================================================
// Dynamic input and drop
// =============================================================================

#[test]
fn test_dynamic_columns_all_or_nothing() {
    let (customers, orders) = shop();
    let query = CreateTableQuery::new(&customers);
    let result = query.clone().try_add_custom_columns(vec![
        SqlInput::Column(customers.column("id").unwrap()),
        SqlInput::Table(orders),
    ]);
    assert!(result.is_err());
    assert!(query.columns().is_empty());
}

#[test]
fn test_drop_query_mirrors_target() {
    let (customers, _) = shop();
    let query = CreateTableQuery::with_all_columns(&customers).set_tablespace("fast");
    let drop = query.drop_query();
    assert_eq!(render(&drop), "DROP TABLE customers");
    assert!(drop.validate().is_ok());

    let raw = CreateTableQuery::new("scratch").add_custom_columns(["x INT"]);
    assert_eq!(raw.drop_query().to_string(), "DROP TABLE scratch");
}
