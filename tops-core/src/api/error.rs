use crate::{
    db::DbError,
    util::validate::{KeyError, ValidationErrors},
};
use http::StatusCode;
use std::fmt;

/// Failure of a single request.
///
/// Either a client error, whose message may be shown to the caller,
/// or a server error, whose cause must only be logged. Together with
/// the paired status code this is the `(user error, system error,
/// status)` triple rendered by the request pipeline.
#[derive(Debug)]
pub enum ApiError {
    User { message: String, status: StatusCode },
    System { err: anyhow::Error, status: StatusCode },
}

impl ApiError {
    pub fn user(status: StatusCode, message: impl Into<String>) -> Self {
        debug_assert!(status.is_client_error());
        Self::User {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::user(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::user(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::System {
            err: err.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::User { status, .. } | Self::System { status, .. } => *status,
        }
    }

    pub fn user_error(&self) -> Option<&str> {
        match self {
            Self::User { message, .. } => Some(message),
            Self::System { .. } => None,
        }
    }

    pub fn system_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::User { .. } => None,
            Self::System { err, .. } => Some(err),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::User { message, .. } => f.write_str(message),
            Self::System { err, .. } => write!(f, "{err:#}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<KeyError> for ApiError {
    fn from(err: KeyError) -> Self {
        Self::internal(err)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        Self::internal(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err)
    }
}

/// Classify a database error of the given resource type.
pub fn parse_db_err(err: DbError, type_name: &str) -> ApiError {
    match err {
        DbError::NotFound => ApiError::not_found(format!("no {type_name} found with this id")),
        DbError::UniqueViolation(detail) => {
            log::debug!("Unique constraint violation on {type_name}: {detail}");
            ApiError::bad_request(format!("{type_name} already exists"))
        }
        DbError::ForeignKeyViolation(detail) => {
            log::debug!("Foreign key violation on {type_name}: {detail}");
            ApiError::bad_request(format!("{type_name} references a resource that does not exist"))
        }
        DbError::Other(err) => {
            ApiError::internal(err.context(format!("{type_name} database error")))
        }
    }
}
