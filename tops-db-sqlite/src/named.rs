// Rewrites `:name` placeholders into positional `?` parameters
// because SQLite statements prepared by diesel only bind by position.

use thiserror::Error;
use tops_core::db::{NamedParams, Value};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamedParamError {
    #[error("no value for named parameter ':{0}'")]
    Missing(String),
}

/// Positional SQL and the values to bind in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positional {
    pub sql: String,
    pub values: Vec<Value>,
}

pub fn expand(sql: &str, params: &NamedParams) -> Result<Positional, NamedParamError> {
    let mut expanded = String::with_capacity(sql.len());
    let mut values = vec![];
    let mut chars = sql.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            '\'' | '"' => {
                expanded.push(c);
                for (_, next) in chars.by_ref() {
                    expanded.push(next);
                    if next == c {
                        break;
                    }
                }
            }
            ':' => match chars.peek() {
                Some((_, ':')) => {
                    expanded.push_str("::");
                    chars.next();
                }
                Some((_, next)) if is_name_start(*next) => {
                    let mut end = sql.len();
                    chars.next();
                    while let Some((i, next)) = chars.peek() {
                        if is_name_char(*next) {
                            chars.next();
                        } else {
                            end = *i;
                            break;
                        }
                    }
                    let name = &sql[start + 1..end];
                    let value = params
                        .get(name)
                        .ok_or_else(|| NamedParamError::Missing(name.to_string()))?;
                    expanded.push('?');
                    values.push(value.clone());
                }
                _ => expanded.push(c),
            },
            _ => expanded.push(c),
        }
    }
    Ok(Positional {
        sql: expanded,
        values,
    })
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
