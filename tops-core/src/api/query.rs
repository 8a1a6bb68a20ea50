use super::Params;
use crate::{db::NamedParams, util::validate::Checker};

/// Maps a query parameter onto the column it filters.
#[derive(Debug, Clone, Copy)]
pub struct WhereColumnInfo {
    pub param: &'static str,
    pub column: &'static str,
    pub checker: Option<Checker>,
}

impl WhereColumnInfo {
    pub const fn new(param: &'static str, column: &'static str, checker: Option<Checker>) -> Self {
        Self {
            param,
            column,
            checker,
        }
    }
}

/// SQL clauses to append to a select statement.
///
/// Every clause is either empty or starts on a new line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryClauses {
    pub where_clause: String,
    pub order_by: String,
    pub pagination: String,
    pub values: NamedParams,
}

impl QueryClauses {
    pub fn append_to(&self, select_query: &str) -> String {
        format!(
            "{select_query}{}{}{}",
            self.where_clause, self.order_by, self.pagination
        )
    }
}

pub fn build_where_and_order_by_and_pagination(
    params: &Params,
    columns: &[WhereColumnInfo],
) -> Result<QueryClauses, Vec<String>> {
    let mut errs = vec![];
    let mut criteria = vec![];
    let mut values = NamedParams::new();
    for info in columns {
        let Some(value) = params.get(info.param) else {
            continue;
        };
        if let Some(check) = info.checker {
            if let Err(err) = check(value) {
                errs.push(format!("{} {err}", info.param));
                continue;
            }
        }
        criteria.push(format!("{}=:{}", info.column, info.param));
        values.set(info.param, value.as_str());
    }
    let pagination = match pagination_clause(params) {
        Ok(pagination) => pagination,
        Err(mut pagination_errs) => {
            errs.append(&mut pagination_errs);
            String::new()
        }
    };
    if !errs.is_empty() {
        return Err(errs);
    }

    let where_clause = if criteria.is_empty() {
        String::new()
    } else {
        format!("\nWHERE {}", criteria.join(" AND "))
    };

    let order_by = match params.get("orderby") {
        Some(orderby) => match columns.iter().find(|info| info.param == orderby) {
            Some(info) => {
                let mut order_by = format!("\nORDER BY {}", info.column);
                if params.get("sortOrder").map(String::as_str) == Some("desc") {
                    order_by.push_str(" DESC");
                }
                order_by
            }
            None => {
                log::debug!("Column '{orderby}' is not configured to support being ordered by");
                String::new()
            }
        },
        None => String::new(),
    };

    Ok(QueryClauses {
        where_clause,
        order_by,
        pagination,
        values,
    })
}

fn pagination_clause(params: &Params) -> Result<String, Vec<String>> {
    let Some(limit) = params.get("limit") else {
        if params.contains_key("offset") || params.contains_key("page") {
            return Err(vec![
                "limit parameter is required for offset and page".to_string()
            ]);
        }
        return Ok(String::new());
    };
    let mut errs = vec![];
    let limit = match limit.parse::<i64>() {
        Ok(limit) if limit >= -1 => limit,
        Ok(_) => {
            errs.push("limit parameter must be bigger than -1".to_string());
            -1
        }
        Err(_) => {
            errs.push("limit parameter must be an integer".to_string());
            -1
        }
    };
    let offset = if let Some(offset) = params.get("offset") {
        match offset.parse::<i64>() {
            Ok(offset) if offset >= 0 => Some(offset),
            Ok(_) => {
                errs.push("offset parameter must not be negative".to_string());
                None
            }
            Err(_) => {
                errs.push("offset parameter must be an integer".to_string());
                None
            }
        }
    } else if let Some(page) = params.get("page") {
        match page.parse::<i64>() {
            Ok(page) if page >= 1 => match (page - 1).checked_mul(limit.max(0)) {
                Some(offset) => Some(offset),
                None => {
                    errs.push("page parameter is too large".to_string());
                    None
                }
            },
            Ok(_) => {
                errs.push("page parameter must be a positive integer".to_string());
                None
            }
            Err(_) => {
                errs.push("page parameter must be an integer".to_string());
                None
            }
        }
    } else {
        None
    };
    if !errs.is_empty() {
        return Err(errs);
    }
    // SQLite only accepts OFFSET after LIMIT, -1 means unlimited
    let mut pagination = format!("\nLIMIT {limit}");
    if let Some(offset) = offset {
        pagination.push_str(&format!("\nOFFSET {offset}"));
    }
    Ok(pagination)
}
