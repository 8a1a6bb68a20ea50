use super::*;
use tops_entities as e;

impl From<e::comment::DeliveryServiceRequestComment> for DeliveryServiceRequestComment {
    fn from(from: e::comment::DeliveryServiceRequestComment) -> Self {
        let e::comment::DeliveryServiceRequestComment {
            id,
            author_id,
            author,
            delivery_service_request_id,
            xml_id,
            value,
            last_updated,
        } = from;
        Self {
            id,
            author_id,
            author,
            delivery_service_request_id,
            xml_id,
            value,
            last_updated: last_updated.map(|ts| ts.to_string()),
        }
    }
}

// Only client-owned fields survive the conversion.
impl From<DeliveryServiceRequestComment> for e::comment::DeliveryServiceRequestComment {
    fn from(from: DeliveryServiceRequestComment) -> Self {
        let DeliveryServiceRequestComment {
            id,
            delivery_service_request_id,
            value,
            ..
        } = from;
        Self {
            id,
            delivery_service_request_id,
            value,
            ..Default::default()
        }
    }
}
