use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

/// Wire representation of a delivery service request comment.
///
/// Fields that are assigned by the server (`authorId`, `author`,
/// `xmlId` and `lastUpdated`) are accepted when deserializing, but
/// they are discarded when converting into an entity.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceRequestComment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_service_request_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl Alert {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            text: text.into(),
        }
    }
}

/// Envelope of every response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Response<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_comment_in_camel_case() {
        let comment = DeliveryServiceRequestComment {
            id: Some(5),
            author_id: Some(2),
            author: Some("admin".into()),
            delivery_service_request_id: Some(123),
            xml_id: Some("demo1".into()),
            value: Some("looks good".into()),
            last_updated: None,
        };
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 5,
                "authorId": 2,
                "author": "admin",
                "deliveryServiceRequestId": 123,
                "xmlId": "demo1",
                "value": "looks good",
            })
        );
    }

    #[test]
    fn deserialize_partial_comment() {
        let comment: DeliveryServiceRequestComment =
            serde_json::from_str(r#"{"deliveryServiceRequestId":7,"value":""}"#).unwrap();
        assert_eq!(comment.delivery_service_request_id, Some(7));
        assert_eq!(comment.value.as_deref(), Some(""));
        assert!(comment.id.is_none());
    }

    #[test]
    fn response_envelope_omits_empty_alerts() {
        let res = Response {
            response: Some(1),
            alerts: vec![],
        };
        assert_eq!(serde_json::to_string(&res).unwrap(), r#"{"response":1}"#);
    }
}
