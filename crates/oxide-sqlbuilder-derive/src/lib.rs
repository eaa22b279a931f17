//! Derive macro describing Rust structs as tables.
//!
//! This crate provides `#[derive(Table)]`, which implements
//! `oxide_sqlbuilder::schema::TableSpec` for a struct with named fields.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Fields, GenericArgument, Ident, LitStr,
    PathArguments, PathSegment, Type,
};

/// Derives `TableSpec` for a struct, describing it as a table with one
/// column per field.
///
/// # Attributes
///
/// - `#[table(name = "table_name")]` - Specifies the SQL table name (optional,
///   defaults to snake_case of struct name)
/// - `#[table(schema = "schema_name")]` - Qualifies the table name
/// - `#[table(alias = "t")]` - Sets the alias rendered outside DDL
///
/// # Field Attributes
///
/// - `#[column(name = "column_name")]` - Specifies the SQL column name
///   (optional, defaults to field name)
/// - `#[column(sql_type = "NUMERIC(12, 4)")]` - Sets the SQL type verbatim
///   instead of inferring it from the field type
///
/// Inferred types: `i8`/`i16`/`u8`/`u16` → `SMALLINT`, `i32`/`u32` →
/// `INTEGER`, `i64`/`u64`/`isize`/`usize` → `BIGINT`, `f32` → `REAL`,
/// `f64` → `DOUBLE`, `bool` → `BOOLEAN`, `String` → `VARCHAR`, `Vec<u8>` →
/// `BLOB`, chrono's `NaiveDate`/`NaiveTime`/`NaiveDateTime`/`DateTime` →
/// `DATE`/`TIME`/`TIMESTAMP`. `Option<T>` takes the type of `T`. Columns of
/// any other type are declared without a type.
///
/// # Generated Items
///
/// For a struct `User`, this macro generates:
///
/// - `impl TableSpec for User`, returning the same `DbTable` handle on every
///   call
/// - One associated function per field on `User` returning its `DbColumn`
#[proc_macro_derive(Table, attributes(table, column))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_table_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_table_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Table derive does not support generic structs",
        ));
    }
    let table_attrs = parse_table_attrs(&input.attrs, struct_name)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Table derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Table derive only supports structs",
            ));
        }
    };

    let mut column_infos: Vec<ColumnInfo> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let column_attrs = parse_column_attrs(&field.attrs)?;
        let data_type = match column_attrs.sql_type {
            Some(sql_type) => Some(quote! {
                ::oxide_sqlbuilder::schema::DataType::Custom(::std::string::String::from(#sql_type))
            }),
            None => infer_data_type(&field.ty),
        };

        column_infos.push(ColumnInfo {
            field_name: field_name.clone(),
            column_name: column_attrs
                .name
                .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string()),
            data_type,
        });
    }

    let table_name = &table_attrs.name;
    let schema_call = table_attrs
        .schema
        .as_ref()
        .map(|schema| quote! { .schema(#schema) });
    let alias_call = table_attrs
        .alias
        .as_ref()
        .map(|alias| quote! { .alias(#alias) });

    let column_calls: Vec<TokenStream2> = column_infos
        .iter()
        .map(|info| {
            let column_name = &info.column_name;
            match &info.data_type {
                Some(data_type) => quote! { .typed_column(#column_name, #data_type) },
                None => quote! { .column(#column_name) },
            }
        })
        .collect();

    let column_accessors: Vec<TokenStream2> = column_infos
        .iter()
        .enumerate()
        .map(|(index, info)| {
            let method_name = &info.field_name;
            let column_name = &info.column_name;
            let doc = format!("Returns the `{column_name}` column.");
            quote! {
                #[doc = #doc]
                #[must_use]
                pub fn #method_name() -> ::oxide_sqlbuilder::schema::DbColumn {
                    let table = <Self as ::oxide_sqlbuilder::schema::TableSpec>::db_table();
                    let column = table.columns().nth(#index);
                    match column {
                        ::std::option::Option::Some(column) => column,
                        ::std::option::Option::None => {
                            ::std::unreachable!("column declared by #[derive(Table)]")
                        }
                    }
                }
            }
        })
        .collect();

    let expanded = quote! {
        impl ::oxide_sqlbuilder::schema::TableSpec for #struct_name {
            fn db_table() -> ::oxide_sqlbuilder::schema::DbTable {
                static TABLE: ::std::sync::OnceLock<::oxide_sqlbuilder::schema::DbTable> =
                    ::std::sync::OnceLock::new();
                TABLE
                    .get_or_init(|| {
                        ::oxide_sqlbuilder::schema::DbTable::builder(#table_name)
                            #schema_call
                            #alias_call
                            #(#column_calls)*
                            .build()
                    })
                    .clone()
            }
        }

        impl #struct_name {
            #(#column_accessors)*
        }
    };

    Ok(expanded)
}

struct ColumnInfo {
    field_name: Ident,
    column_name: String,
    data_type: Option<TokenStream2>,
}

struct TableAttrs {
    name: String,
    schema: Option<String>,
    alias: Option<String>,
}

#[derive(Default)]
struct ColumnAttrs {
    name: Option<String>,
    sql_type: Option<String>,
}

fn parse_table_attrs(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<TableAttrs> {
    let mut name = None;
    let mut schema = None;
    let mut alias = None;
    for attr in attrs {
        if !attr.path().is_ident("table") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let value: LitStr = meta.value()?.parse()?;
            if meta.path.is_ident("name") {
                name = Some(value.value());
            } else if meta.path.is_ident("schema") {
                schema = Some(value.value());
            } else if meta.path.is_ident("alias") {
                alias = Some(value.value());
            } else {
                return Err(meta.error("expected `name`, `schema` or `alias`"));
            }
            Ok(())
        })?;
    }
    Ok(TableAttrs {
        // Default to snake_case of struct name
        name: name.unwrap_or_else(|| to_snake_case(&struct_name.to_string())),
        schema,
        alias,
    })
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("column") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let value: LitStr = meta.value()?.parse()?;
            if meta.path.is_ident("name") {
                result.name = Some(value.value());
            } else if meta.path.is_ident("sql_type") {
                result.sql_type = Some(value.value());
            } else {
                return Err(meta.error("expected `name` or `sql_type`"));
            }
            Ok(())
        })?;
    }
    Ok(result)
}

fn infer_data_type(ty: &Type) -> Option<TokenStream2> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let variant = match segment.ident.to_string().as_str() {
        "Option" => return infer_data_type(generic_argument(segment)?),
        "Vec" => {
            if !is_ident(generic_argument(segment)?, "u8") {
                return None;
            }
            quote!(Blob)
        }
        "i8" | "i16" | "u8" | "u16" => quote!(Smallint),
        "i32" | "u32" => quote!(Integer),
        "i64" | "u64" | "isize" | "usize" => quote!(Bigint),
        "f32" => quote!(Real),
        "f64" => quote!(Double),
        "bool" => quote!(Boolean),
        "String" => quote!(Varchar(::std::option::Option::None)),
        "NaiveDate" => quote!(Date),
        "NaiveTime" => quote!(Time),
        "NaiveDateTime" | "DateTime" => quote!(Timestamp),
        _ => return None,
    };
    Some(quote!(::oxide_sqlbuilder::schema::DataType::#variant))
}

fn generic_argument(segment: &PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn is_ident(ty: &Type, name: &str) -> bool {
    matches!(ty, Type::Path(path) if path.path.is_ident(name))
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
