use anyhow::anyhow;
use diesel::{
    deserialize::{self, QueryableByName},
    row::NamedRow,
    sql_types::{BigInt, Nullable, Text},
    sqlite::Sqlite,
};
use std::marker::PhantomData;
use tops_core::db::{FromRow, Row};

/// A record loaded by a raw SQL query.
pub struct Loaded<R>(pub R);

impl<R> QueryableByName<Sqlite> for Loaded<R>
where
    R: FromRow,
{
    fn build<'a>(row: &impl NamedRow<'a, Sqlite>) -> deserialize::Result<Self> {
        let row = SqliteRow {
            row,
            _row_lifetime: PhantomData,
        };
        R::from_row(&row).map(Self).map_err(Into::into)
    }
}

struct SqliteRow<'r, 'a, N> {
    row: &'r N,
    _row_lifetime: PhantomData<&'a ()>,
}

impl<'a, N> SqliteRow<'_, 'a, N>
where
    N: NamedRow<'a, Sqlite>,
{
    fn get<ST, T>(&self, column: &str) -> anyhow::Result<T>
    where
        T: deserialize::FromSql<ST, Sqlite>,
    {
        NamedRow::get::<ST, T>(self.row, column)
            .map_err(|err| anyhow!("failed to read column '{column}': {err}"))
    }
}

impl<'a, N> Row for SqliteRow<'_, 'a, N>
where
    N: NamedRow<'a, Sqlite>,
{
    fn get_int(&self, column: &str) -> anyhow::Result<Option<i64>> {
        self.get::<Nullable<BigInt>, Option<i64>>(column)
    }

    fn get_text(&self, column: &str) -> anyhow::Result<Option<String>> {
        self.get::<Nullable<Text>, Option<String>>(column)
    }
}
