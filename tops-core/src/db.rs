// Low-level database access.
// The generic CRUD functions only talk to the database through
// these traits. Statements are SQL templates with `:name`
// placeholders that are bound from `NamedParams`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("no rows in result set")]
    NotFound,
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// A single bindable SQL value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(from: i64) -> Self {
        Self::Int(from)
    }
}

impl From<String> for Value {
    fn from(from: String) -> Self {
        Self::Text(from)
    }
}

impl From<&str> for Value {
    fn from(from: &str) -> Self {
        Self::Text(from.to_owned())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(from: Option<T>) -> Self {
        from.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Values for the `:name` placeholders of a statement.
///
/// Insertion order is preserved and setting an existing
/// name replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedParams(Vec<(String, Value)>);

impl NamedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn extend(&mut self, other: NamedParams) {
        for (name, value) in other.0 {
            self.set(name, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<N, V> FromIterator<(N, V)> for NamedParams
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.set(name, value);
        }
        params
    }
}

/// Typed access to the columns of a result row by name.
pub trait Row {
    fn get_int(&self, column: &str) -> anyhow::Result<Option<i64>>;
    fn get_text(&self, column: &str) -> anyhow::Result<Option<String>>;
}

/// Construct a typed record from a result row.
pub trait FromRow: Sized {
    fn from_row(row: &dyn Row) -> anyhow::Result<Self>;
}

pub trait Transaction {
    /// Execute a statement and collect all returned rows.
    fn query_named<R>(&self, sql: &str, params: &NamedParams) -> Result<Vec<R>>
    where
        R: FromRow + 'static;

    /// Execute a statement and return the number of affected rows.
    fn exec_named(&self, sql: &str, params: &NamedParams) -> Result<usize>;

    /// Execute a statement that is expected to return a row.
    ///
    /// Additional rows are ignored.
    fn query_row_named<R>(&self, sql: &str, params: &NamedParams) -> Result<R>
    where
        R: FromRow + 'static,
    {
        self.query_named(sql, params)?
            .into_iter()
            .next()
            .ok_or(DbError::NotFound)
    }
}
