//! In-memory stand-in for the database.
//!
//! `MockDb` recognizes the statements issued by the generic CRUD
//! functions for comments by their leading keyword and evaluates them
//! against plain collections. Every statement is recorded.

use crate::{
    api::{ApiInfo, Params},
    db::{self, DbError, FromRow, NamedParams, Row, Transaction, Value},
    entities::*,
};
use anyhow::anyhow;
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
};

#[derive(Debug, Clone)]
pub struct StoredComment {
    pub author_id: i64,
    pub request_id: i64,
    pub value: String,
    pub last_updated: Timestamp,
}

#[derive(Default)]
pub struct MockDb {
    pub users: HashMap<i64, String>,
    pub requests: HashMap<i64, String>,
    pub comments: RefCell<BTreeMap<i64, StoredComment>>,
    pub statements: RefCell<Vec<String>>,
    pub fail_with: RefCell<Option<fn() -> DbError>>,
    next_id: Cell<i64>,
}

impl MockDb {
    pub fn new() -> Self {
        let mut db = Self::default();
        db.users.insert(1, "alice".into());
        db.users.insert(2, "bob".into());
        db.requests.insert(123, "demo1".into());
        db.requests.insert(456, "demo2".into());
        db.next_id.set(1);
        db
    }

    pub fn api_info(&self, user_id: i64) -> ApiInfo<'_, Self> {
        self.api_info_with_params(user_id, Params::new())
    }

    pub fn api_info_with_params(&self, user_id: i64, params: Params) -> ApiInfo<'_, Self> {
        let user_name = self.users.get(&user_id).cloned().unwrap_or_default();
        ApiInfo::new(CurrentUser::new(user_id, user_name), params, self)
    }

    pub fn insert_comment(&self, author_id: i64, request_id: i64, value: &str) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.comments.borrow_mut().insert(
            id,
            StoredComment {
                author_id,
                request_id,
                value: value.into(),
                last_updated: Timestamp::from_millis(0),
            },
        );
        id
    }

    pub fn executed(&self, keyword: &str) -> usize {
        self.statements
            .borrow()
            .iter()
            .filter(|sql| sql.trim_start().starts_with(keyword))
            .count()
    }

    fn joined_row(&self, id: i64, c: &StoredComment) -> MapRow {
        MapRow::default()
            .with("id", id)
            .with("author_id", c.author_id)
            .with("author", self.users.get(&c.author_id).cloned())
            .with("deliveryservice_request_id", c.request_id)
            .with("xml_id", self.requests.get(&c.request_id).cloned())
            .with("value", c.value.clone())
            .with("last_updated", c.last_updated.as_millis())
    }

    fn matches(&self, id: i64, c: &StoredComment, params: &NamedParams) -> bool {
        params.iter().all(|(name, value)| {
            let actual = match name {
                "id" => id.to_string(),
                "authorId" => c.author_id.to_string(),
                "author" => self.users.get(&c.author_id).cloned().unwrap_or_default(),
                "deliveryServiceRequestId" => c.request_id.to_string(),
                _ => return true,
            };
            match value {
                Value::Int(v) => v.to_string() == actual,
                Value::Text(v) => *v == actual,
                Value::Null => false,
            }
        })
    }
}

fn int_param(params: &NamedParams, name: &str) -> db::Result<i64> {
    match params.get(name) {
        Some(Value::Int(v)) => Ok(*v),
        _ => Err(anyhow!("NOT NULL constraint failed: {name}").into()),
    }
}

fn text_param(params: &NamedParams, name: &str) -> db::Result<String> {
    match params.get(name) {
        Some(Value::Text(v)) => Ok(v.clone()),
        _ => Err(anyhow!("NOT NULL constraint failed: {name}").into()),
    }
}

impl Transaction for MockDb {
    fn query_named<R>(&self, sql: &str, params: &NamedParams) -> db::Result<Vec<R>>
    where
        R: FromRow + 'static,
    {
        self.statements.borrow_mut().push(sql.to_string());
        if let Some(fail) = *self.fail_with.borrow() {
            return Err(fail());
        }
        let rows = match sql.split_whitespace().next() {
            Some("INSERT") => {
                let author_id = int_param(params, "author_id")?;
                let request_id = int_param(params, "deliveryservice_request_id")?;
                let value = text_param(params, "value")?;
                if !self.users.contains_key(&author_id) || !self.requests.contains_key(&request_id)
                {
                    return Err(DbError::ForeignKeyViolation("FOREIGN KEY".into()));
                }
                let id = self.insert_comment(author_id, request_id, &value);
                let last_updated = Timestamp::now();
                self.comments
                    .borrow_mut()
                    .get_mut(&id)
                    .expect("inserted")
                    .last_updated = last_updated;
                vec![MapRow::default()
                    .with("id", id)
                    .with("last_updated", last_updated.as_millis())]
            }
            Some("SELECT") => self
                .comments
                .borrow()
                .iter()
                .filter(|(id, c)| self.matches(**id, c, params))
                .map(|(id, c)| self.joined_row(*id, c))
                .collect(),
            Some("UPDATE") => {
                let id = int_param(params, "id")?;
                let request_id = int_param(params, "deliveryservice_request_id")?;
                let value = text_param(params, "value")?;
                let mut comments = self.comments.borrow_mut();
                let updated = match comments.get_mut(&id) {
                    Some(c) => {
                        c.request_id = request_id;
                        c.value = value;
                        c.last_updated = Timestamp::now();
                        vec![MapRow::default().with("last_updated", c.last_updated.as_millis())]
                    }
                    None => vec![],
                };
                updated
            }
            _ => return Err(anyhow!("unexpected query: {sql}").into()),
        };
        rows.iter()
            .map(|row| R::from_row(row).map_err(DbError::Other))
            .collect()
    }

    fn exec_named(&self, sql: &str, params: &NamedParams) -> db::Result<usize> {
        self.statements.borrow_mut().push(sql.to_string());
        if let Some(fail) = *self.fail_with.borrow() {
            return Err(fail());
        }
        match sql.split_whitespace().next() {
            Some("DELETE") => {
                let id = int_param(params, "id")?;
                Ok(self.comments.borrow_mut().remove(&id).map_or(0, |_| 1))
            }
            _ => Err(anyhow!("unexpected statement: {sql}").into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MapRow(HashMap<&'static str, Value>);

impl MapRow {
    pub fn with(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.0.insert(column, value.into());
        self
    }
}

impl Row for MapRow {
    fn get_int(&self, column: &str) -> anyhow::Result<Option<i64>> {
        match self.0.get(column) {
            Some(Value::Int(v)) => Ok(Some(*v)),
            Some(Value::Null) => Ok(None),
            Some(Value::Text(_)) => Err(anyhow!("column {column} is not an integer")),
            None => Err(anyhow!("missing column {column}")),
        }
    }

    fn get_text(&self, column: &str) -> anyhow::Result<Option<String>> {
        match self.0.get(column) {
            Some(Value::Text(v)) => Ok(Some(v.clone())),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(_)) => Err(anyhow!("column {column} is not a text")),
            None => Err(anyhow!("missing column {column}")),
        }
    }
}
