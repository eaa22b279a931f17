//! Tests for the `#[derive(Table)]` macro output.
//!
//! These tests verify that the derive macro generates:
//! - A `TableSpec` impl with a stable table handle
//! - Column types inferred from field types or set explicitly
//! - Column accessor functions on the row type

mod common;

use common::render;
use oxide_sqlbuilder::query::{ColumnConstraint, CreateTableQuery};
use oxide_sqlbuilder::schema::{DataType, TableSpec};
use oxide_sqlbuilder::{validate_references, Node, NodeList};
use oxide_sqlbuilder_derive::Table;

// =============================================================================
// Test: Basic struct with default table name (snake_case)
// =============================================================================

#[allow(dead_code)]
#[derive(Debug, Clone, Table)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub active: bool,
    pub avatar: Vec<u8>,
}

#[test]
fn test_default_table_name() {
    let table = UserAccount::db_table();
    assert_eq!(table.name(), "user_account");
    assert_eq!(table.alias(), None);
    assert_eq!(table.schema(), None);
}

#[test]
fn test_inferred_column_types() {
    let table = UserAccount::db_table();
    let types: Vec<Option<DataType>> = table.columns().map(|c| c.data_type().cloned()).collect();
    assert_eq!(
        types,
        vec![
            Some(DataType::Bigint),
            Some(DataType::Varchar(None)),
            Some(DataType::Varchar(None)),
            Some(DataType::Boolean),
            Some(DataType::Blob),
        ]
    );
}

#[test]
fn test_handle_is_stable() {
    assert_eq!(UserAccount::db_table(), UserAccount::db_table());
    assert_eq!(UserAccount::id(), UserAccount::db_column("id").unwrap());
    assert_eq!(UserAccount::email().name(), "email");
}

#[test]
fn test_create_table_from_derived_struct() {
    let query = CreateTableQuery::with_all_columns(&UserAccount::db_table())
        .set_column_constraint(&UserAccount::id(), ColumnConstraint::PrimaryKey)
        .set_column_constraint(&UserAccount::name(), ColumnConstraint::NotNull);
    assert_eq!(
        render(&query),
        "CREATE TABLE user_account (id BIGINT PRIMARY KEY, name VARCHAR NOT NULL, \
         email VARCHAR, active BOOLEAN, avatar BLOB)"
    );
    assert!(query.validate().is_ok());
}

// =============================================================================
// Test: Explicit table and column attributes
// =============================================================================

#[allow(dead_code)]
#[derive(Debug, Table)]
#[table(name = "ledger_entries", schema = "billing", alias = "le")]
pub struct Entry {
    #[column(name = "entry_id")]
    pub id: u32,
    #[column(sql_type = "NUMERIC(18, 4)")]
    pub amount: f64,
    pub note: Option<Note>,
}

#[allow(dead_code)]
#[derive(Debug)]
pub struct Note(String);

#[test]
fn test_table_attributes() {
    let table = Entry::db_table();
    assert_eq!(table.name(), "ledger_entries");
    assert_eq!(table.schema(), Some("billing"));
    assert_eq!(table.alias(), Some("le"));
    assert_eq!(Entry::id().name(), "entry_id");
}

#[test]
fn test_column_attributes_in_ddl() {
    let query = CreateTableQuery::with_all_columns(&Entry::db_table());
    assert_eq!(
        render(&query),
        "CREATE TABLE billing.ledger_entries (entry_id INTEGER, amount NUMERIC(18, 4), note)"
    );
}

#[test]
fn test_derived_columns_render_with_alias_outside_ddl() {
    let mut list = NodeList::new();
    list.push(Node::Table(Entry::db_table()));
    list.push(Node::Column(Entry::amount()));
    assert_eq!(render(&list), "billing.ledger_entries le, le.amount");
    assert!(validate_references(&list).is_ok());
}

#[test]
fn test_derived_tables_are_distinct() {
    let mut list = NodeList::new();
    list.push(Node::Table(Entry::db_table()));
    list.push(Node::Column(UserAccount::id()));
    let err = validate_references(&list).unwrap_err();
    assert_eq!(
        err.reason(),
        Some("Columns used for unreferenced tables: user_account.id")
    );
}
