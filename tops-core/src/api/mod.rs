use crate::entities::CurrentUser;
use std::collections::BTreeMap;

mod crud;
mod error;
pub mod handlers;
pub mod query;

pub use self::{crud::*, error::*, query::WhereColumnInfo};

/// Raw query and path parameters of a request.
pub type Params = BTreeMap<String, String>;

/// Context of a single request.
///
/// Every resource is bound to one of these for the duration of
/// the request and all statements run in its transaction.
pub struct ApiInfo<'a, T> {
    pub user: CurrentUser,
    pub params: Params,
    pub tx: &'a T,
}

impl<'a, T> ApiInfo<'a, T> {
    pub fn new(user: CurrentUser, params: Params, tx: &'a T) -> Self {
        Self { user, params, tx }
    }
}
