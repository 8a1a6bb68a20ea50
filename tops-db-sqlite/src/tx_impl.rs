use diesel::{
    query_builder::BoxedSqlQuery,
    result::{DatabaseErrorKind, Error as DieselError},
    sql_types::{BigInt, Nullable, Text},
    sqlite::{Sqlite, SqliteConnection},
    RunQueryDsl as _,
};
use tops_core::db::{self, DbError, FromRow, NamedParams, Transaction, Value};

use super::{
    named::{self, Positional},
    row::Loaded,
    DbConnection,
};

pub fn from_diesel_err(err: DieselError) -> DbError {
    match err {
        DieselError::NotFound => DbError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DbError::UniqueViolation(info.message().to_string())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DbError::ForeignKeyViolation(info.message().to_string())
        }
        _ => DbError::Other(err.into()),
    }
}

fn prepare<'f>(
    sql: &str,
    params: &NamedParams,
) -> db::Result<BoxedSqlQuery<'f, Sqlite, diesel::query_builder::SqlQuery>> {
    let Positional { sql, values } =
        named::expand(sql, params).map_err(|err| DbError::Other(err.into()))?;
    log::trace!("Executing SQL: {sql}");
    let mut query = diesel::sql_query(sql).into_boxed::<Sqlite>();
    for value in values {
        query = match value {
            Value::Null => query.bind::<Nullable<Text>, _>(None::<String>),
            Value::Int(v) => query.bind::<BigInt, _>(v),
            Value::Text(v) => query.bind::<Text, _>(v),
        };
    }
    Ok(query)
}

fn query_named<R>(conn: &mut SqliteConnection, sql: &str, params: &NamedParams) -> db::Result<Vec<R>>
where
    R: FromRow + 'static,
{
    Ok(prepare(sql, params)?
        .load::<Loaded<R>>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|Loaded(record)| record)
        .collect())
}

fn exec_named(conn: &mut SqliteConnection, sql: &str, params: &NamedParams) -> db::Result<usize> {
    prepare(sql, params)?
        .execute(conn)
        .map_err(from_diesel_err)
}

impl Transaction for DbConnection<'_> {
    fn query_named<R>(&self, sql: &str, params: &NamedParams) -> db::Result<Vec<R>>
    where
        R: FromRow + 'static,
    {
        query_named(&mut self.conn.borrow_mut(), sql, params)
    }

    fn exec_named(&self, sql: &str, params: &NamedParams) -> db::Result<usize> {
        exec_named(&mut self.conn.borrow_mut(), sql, params)
    }
}
