pub use comment_builder::*;

pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub mod comment_builder {

    use crate::{comment::DeliveryServiceRequestComment, time::Timestamp};

    use super::Builder;

    #[derive(Debug)]
    pub struct CommentBuild {
        comment: DeliveryServiceRequestComment,
    }

    impl CommentBuild {
        pub fn id(mut self, id: i64) -> Self {
            self.comment.id = Some(id);
            self
        }
        pub fn author_id(mut self, author_id: i64) -> Self {
            self.comment.author_id = Some(author_id);
            self
        }
        pub fn request_id(mut self, request_id: i64) -> Self {
            self.comment.delivery_service_request_id = Some(request_id);
            self
        }
        pub fn value(mut self, value: &str) -> Self {
            self.comment.value = Some(value.into());
            self
        }
        pub fn last_updated(mut self, last_updated: Timestamp) -> Self {
            self.comment.last_updated = Some(last_updated);
            self
        }
        pub fn finish(self) -> DeliveryServiceRequestComment {
            self.comment
        }
    }

    impl Builder for DeliveryServiceRequestComment {
        type Build = CommentBuild;
        fn build() -> CommentBuild {
            CommentBuild {
                comment: DeliveryServiceRequestComment::default(),
            }
        }
    }
}
