use super::{
    error::{parse_db_err, ApiError},
    query::{build_where_and_order_by_and_pagination, WhereColumnInfo},
    ApiInfo,
};
use crate::{
    db::{FromRow, NamedParams, Row, Transaction, Value},
    entities::Timestamp,
    util::validate::{KeyError, ValidationErrors},
};
use anyhow::anyhow;
use std::collections::BTreeMap;

pub type Keys = BTreeMap<String, Value>;

/// A key field of a resource and how to parse it from
/// a raw request parameter.
#[derive(Debug, Clone, Copy)]
pub struct KeyFieldInfo {
    pub field: &'static str,
    pub func: fn(&str) -> Result<Value, String>,
}

pub fn get_int_key(raw: &str) -> Result<Value, String> {
    raw.parse::<i64>()
        .map(Value::Int)
        .map_err(|err| err.to_string())
}

pub trait Identifier {
    /// The keys of this object and whether they are actually set.
    fn keys(&self) -> (Keys, bool);
    fn set_keys(&mut self, keys: &Keys) -> Result<(), KeyError>;
    fn key_fields_info(&self) -> &'static [KeyFieldInfo];
    /// Identifies the object in the audit log.
    fn audit_name(&self) -> String;
    fn type_name(&self) -> &'static str;
}

pub trait Validator {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// A resource bound to a request that can be handled
/// by the generic CRUD functions.
pub trait ApiResource: Identifier {
    type Tx: Transaction;

    fn api_info(&self) -> &ApiInfo<'_, Self::Tx>;

    /// Values for the `:name` placeholders of the SQL templates.
    fn named_params(&self) -> NamedParams;

    fn set_last_updated(&mut self, last_updated: Timestamp);
}

pub trait GenericCreator: ApiResource {
    fn insert_query(&self) -> &'static str;
}

pub trait GenericReader: ApiResource {
    type ReadObj: FromRow + 'static;

    fn select_query(&self) -> &'static str;
    fn param_columns(&self) -> &'static [WhereColumnInfo];
}

pub trait GenericUpdater: ApiResource {
    fn update_query(&self) -> &'static str;
}

pub trait GenericDeleter: ApiResource {
    fn delete_query(&self) -> &'static str;
}

pub trait Creator: Identifier + Validator {
    fn create(&mut self) -> Result<(), ApiError>;
}

pub trait Reader {
    type Record;
    fn read(&self) -> Result<Vec<Self::Record>, ApiError>;
}

pub trait Updater: Identifier + Validator {
    fn update(&mut self) -> Result<(), ApiError>;
}

pub trait Deleter: Identifier {
    fn delete(&mut self) -> Result<(), ApiError>;
}

pub trait Crud: Creator + Reader + Updater + Deleter {}

impl<T> Crud for T where T: Creator + Reader + Updater + Deleter {}

struct Inserted {
    id: i64,
    last_updated: Timestamp,
}

impl FromRow for Inserted {
    fn from_row(row: &dyn Row) -> anyhow::Result<Self> {
        let id = row.get_int("id")?.ok_or_else(|| anyhow!("missing id"))?;
        let LastUpdated(last_updated) = LastUpdated::from_row(row)?;
        Ok(Self { id, last_updated })
    }
}

struct LastUpdated(Timestamp);

impl FromRow for LastUpdated {
    fn from_row(row: &dyn Row) -> anyhow::Result<Self> {
        row.get_int("last_updated")?
            .map(Timestamp::from_millis)
            .map(Self)
            .ok_or_else(|| anyhow!("missing last_updated"))
    }
}

pub fn generic_create<T: GenericCreator>(val: &mut T) -> Result<(), ApiError> {
    let type_name = val.type_name();
    let rows: Vec<Inserted> = val
        .api_info()
        .tx
        .query_named(val.insert_query(), &val.named_params())
        .map_err(|err| parse_db_err(err, type_name))?;
    let mut rows = rows.into_iter();
    let Some(Inserted { id, last_updated }) = rows.next() else {
        return Err(ApiError::internal(anyhow!(
            "{type_name} create: no {type_name} was inserted, no id was returned"
        )));
    };
    if rows.next().is_some() {
        return Err(ApiError::internal(anyhow!(
            "too many ids returned from {type_name} insert"
        )));
    }
    val.set_keys(&Keys::from([("id".to_string(), Value::Int(id))]))?;
    val.set_last_updated(last_updated);
    Ok(())
}

pub fn generic_read<T: GenericReader>(val: &T) -> Result<Vec<T::ReadObj>, ApiError> {
    let info = val.api_info();
    let clauses = build_where_and_order_by_and_pagination(&info.params, val.param_columns())
        .map_err(|errs| ApiError::bad_request(errs.join(", ")))?;
    let query = clauses.append_to(val.select_query());
    info.tx
        .query_named(&query, &clauses.values)
        .map_err(|err| ApiError::internal(anyhow!("querying {}: {err}", val.type_name())))
}

pub fn generic_update<T: GenericUpdater>(val: &mut T) -> Result<(), ApiError> {
    let type_name = val.type_name();
    let rows: Vec<LastUpdated> = val
        .api_info()
        .tx
        .query_named(val.update_query(), &val.named_params())
        .map_err(|err| parse_db_err(err, type_name))?;
    match rows.as_slice() {
        [] => Err(ApiError::not_found(format!(
            "no {type_name} found with this id"
        ))),
        [LastUpdated(last_updated)] => {
            val.set_last_updated(*last_updated);
            Ok(())
        }
        rows => Err(ApiError::internal(anyhow!(
            "{type_name} update affected too many rows: {}",
            rows.len()
        ))),
    }
}

pub fn generic_delete<T: GenericDeleter>(val: &T) -> Result<(), ApiError> {
    let type_name = val.type_name();
    let count = val
        .api_info()
        .tx
        .exec_named(val.delete_query(), &val.named_params())
        .map_err(|err| ApiError::internal(anyhow!("deleting {type_name}: {err}")))?;
    match count {
        0 => Err(ApiError::not_found(format!(
            "no {type_name} with that key found"
        ))),
        1 => Ok(()),
        n => Err(ApiError::internal(anyhow!(
            "{type_name} delete affected too many rows: {n}"
        ))),
    }
}
