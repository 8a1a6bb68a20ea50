use crate::time::Timestamp;

/// A comment on a delivery service request.
///
/// All fields are optional because the same record is used for
/// incoming (partial) requests and for fully joined query results.
/// `author` and `xml_id` are only populated when reading.
#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryServiceRequestComment {
    pub id                          : Option<i64>,
    pub author_id                   : Option<i64>,
    pub author                      : Option<String>,
    pub delivery_service_request_id : Option<i64>,
    pub xml_id                      : Option<String>,
    pub value                       : Option<String>,
    pub last_updated                : Option<Timestamp>,
}

impl DeliveryServiceRequestComment {
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authored_by_requires_a_known_author() {
        let mut comment = DeliveryServiceRequestComment::default();
        assert!(!comment.is_authored_by(0));
        comment.author_id = Some(3);
        assert!(comment.is_authored_by(3));
        assert!(!comment.is_authored_by(4));
    }
}
