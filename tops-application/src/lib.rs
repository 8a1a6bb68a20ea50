#[macro_use]
extern crate log;

mod create_comment;
mod delete_comment;
mod read_comments;
mod update_comment;

pub mod prelude {
    pub use super::{create_comment::*, delete_comment::*, read_comments::*, update_comment::*};
}

pub type Result<T> = std::result::Result<T, ApiError>;

pub(crate) use tops_core::{
    api::{handlers, ApiError, ApiInfo, Params},
    entities::*,
    resources::comment::CommentResource,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use tops_db_sqlite::Connections;
}
