use crate::{
    api::{
        generic_create, generic_delete, generic_read, generic_update, get_int_key, parse_db_err,
        ApiError, ApiInfo, ApiResource, Creator, Deleter, GenericCreator, GenericDeleter,
        GenericReader, GenericUpdater, Identifier, KeyFieldInfo, Keys, Reader, Updater,
        Validator, WhereColumnInfo,
    },
    db::{FromRow, NamedParams, Row, Transaction, Value},
    entities::{DeliveryServiceRequestComment, Timestamp},
    util::validate::{is_int, KeyError, ValidationErrors},
};

pub const TYPE_NAME: &str = "deliveryservice_request_comment";

const KEY_FIELDS: &[KeyFieldInfo] = &[KeyFieldInfo {
    field: "id",
    func: get_int_key,
}];

const PARAM_COLUMNS: &[WhereColumnInfo] = &[
    WhereColumnInfo::new("authorId", "dsrc.author_id", None),
    WhereColumnInfo::new("author", "a.username", None),
    WhereColumnInfo::new(
        "deliveryServiceRequestId",
        "dsrc.deliveryservice_request_id",
        None,
    ),
    WhereColumnInfo::new("id", "dsrc.id", Some(is_int)),
];

const INSERT_QUERY: &str = "INSERT INTO deliveryservice_request_comment (
author_id,
deliveryservice_request_id,
value) VALUES (
:author_id,
:deliveryservice_request_id,
:value) RETURNING id,last_updated";

const SELECT_QUERY: &str = "SELECT
a.username AS author,
dsrc.author_id,
dsrc.deliveryservice_request_id,
dsr.deliveryservice->>'xmlId' as xml_id,
dsrc.id,
dsrc.last_updated,
dsrc.value
FROM deliveryservice_request_comment dsrc
JOIN tm_user a ON dsrc.author_id = a.id
JOIN deliveryservice_request dsr ON dsrc.deliveryservice_request_id = dsr.id
";

// last_updated is stamped in unix milliseconds by the statement itself
const UPDATE_QUERY: &str = "UPDATE
deliveryservice_request_comment SET
deliveryservice_request_id=:deliveryservice_request_id,
value=:value,
last_updated=CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)
WHERE id=:id RETURNING last_updated";

const DELETE_QUERY: &str = "DELETE FROM deliveryservice_request_comment WHERE id = :id";

/// Binds a delivery service request comment to a request.
///
/// Only the author of a comment is allowed to update or
/// delete it. The author is always the user who created
/// the comment and cannot be changed afterwards.
pub struct CommentResource<'a, T> {
    info: &'a ApiInfo<'a, T>,
    comment: DeliveryServiceRequestComment,
}

impl<'a, T> CommentResource<'a, T>
where
    T: Transaction,
{
    pub fn new(info: &'a ApiInfo<'a, T>) -> Self {
        Self::with_comment(info, DeliveryServiceRequestComment::default())
    }

    pub fn with_comment(info: &'a ApiInfo<'a, T>, comment: DeliveryServiceRequestComment) -> Self {
        Self { info, comment }
    }

    pub fn comment(&self) -> &DeliveryServiceRequestComment {
        &self.comment
    }

    pub fn into_comment(self) -> DeliveryServiceRequestComment {
        self.comment
    }

    /// Re-read the stored comment within the current transaction.
    fn load_current(&self) -> Result<DeliveryServiceRequestComment, ApiError> {
        let id = self
            .comment
            .id
            .ok_or_else(|| ApiError::bad_request("missing key: id"))?;
        let query = format!("{SELECT_QUERY}WHERE dsrc.id=:id");
        let params = NamedParams::new().with("id", id);
        self.info
            .tx
            .query_row_named(&query, &params)
            .map_err(|err| parse_db_err(err, TYPE_NAME))
    }
}

impl<T> Identifier for CommentResource<'_, T> {
    fn keys(&self) -> (Keys, bool) {
        let (id, is_set) = match self.comment.id {
            Some(id) => (id, true),
            None => (0, false),
        };
        (Keys::from([("id".to_string(), Value::Int(id))]), is_set)
    }

    fn set_keys(&mut self, keys: &Keys) -> Result<(), KeyError> {
        match keys.get("id") {
            Some(Value::Int(id)) => {
                self.comment.id = Some(*id);
                Ok(())
            }
            Some(_) => Err(KeyError::WrongType("id")),
            None => Err(KeyError::Missing("id")),
        }
    }

    fn key_fields_info(&self) -> &'static [KeyFieldInfo] {
        KEY_FIELDS
    }

    fn audit_name(&self) -> String {
        self.comment
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

impl<T> Validator for CommentResource<'_, T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::new()
            .require(
                "deliveryServiceRequestId",
                &self.comment.delivery_service_request_id,
            )
            .require("value", &self.comment.value)
            .into_result()
    }
}

impl<T> ApiResource for CommentResource<'_, T>
where
    T: Transaction,
{
    type Tx = T;

    fn api_info(&self) -> &ApiInfo<'_, T> {
        self.info
    }

    fn named_params(&self) -> NamedParams {
        let DeliveryServiceRequestComment {
            id,
            author_id,
            delivery_service_request_id,
            value,
            ..
        } = &self.comment;
        NamedParams::new()
            .with("id", *id)
            .with("author_id", *author_id)
            .with("deliveryservice_request_id", *delivery_service_request_id)
            .with("value", value.clone())
    }

    fn set_last_updated(&mut self, last_updated: Timestamp) {
        self.comment.last_updated = Some(last_updated);
    }
}

impl<T: Transaction> GenericCreator for CommentResource<'_, T> {
    fn insert_query(&self) -> &'static str {
        INSERT_QUERY
    }
}

impl<T: Transaction> GenericReader for CommentResource<'_, T> {
    type ReadObj = DeliveryServiceRequestComment;

    fn select_query(&self) -> &'static str {
        SELECT_QUERY
    }

    fn param_columns(&self) -> &'static [WhereColumnInfo] {
        PARAM_COLUMNS
    }
}

impl<T: Transaction> GenericUpdater for CommentResource<'_, T> {
    fn update_query(&self) -> &'static str {
        UPDATE_QUERY
    }
}

impl<T: Transaction> GenericDeleter for CommentResource<'_, T> {
    fn delete_query(&self) -> &'static str {
        DELETE_QUERY
    }
}

impl<T: Transaction> Creator for CommentResource<'_, T> {
    fn create(&mut self) -> Result<(), ApiError> {
        // The caller is the author
        self.comment.author_id = Some(self.info.user.id);
        generic_create(self)
    }
}

impl<T: Transaction> Reader for CommentResource<'_, T> {
    type Record = DeliveryServiceRequestComment;

    fn read(&self) -> Result<Vec<Self::Record>, ApiError> {
        generic_read(self)
    }
}

impl<T: Transaction> Updater for CommentResource<'_, T> {
    fn update(&mut self) -> Result<(), ApiError> {
        let current = self.load_current()?;
        if !current.is_authored_by(self.info.user.id) {
            return Err(ApiError::bad_request(
                "Comments can only be updated by the author",
            ));
        }
        generic_update(self)
    }
}

impl<T: Transaction> Deleter for CommentResource<'_, T> {
    fn delete(&mut self) -> Result<(), ApiError> {
        let current = self.load_current()?;
        if !current.is_authored_by(self.info.user.id) {
            return Err(ApiError::bad_request(
                "Comments can only be deleted by the author",
            ));
        }
        generic_delete(self)
    }
}

impl FromRow for DeliveryServiceRequestComment {
    fn from_row(row: &dyn Row) -> anyhow::Result<Self> {
        Ok(Self {
            id: row.get_int("id")?,
            author_id: row.get_int("author_id")?,
            author: row.get_text("author")?,
            delivery_service_request_id: row.get_int("deliveryservice_request_id")?,
            xml_id: row.get_text("xml_id")?,
            value: row.get_text("value")?,
            last_updated: row.get_int("last_updated")?.map(Timestamp::from_millis),
        })
    }
}
