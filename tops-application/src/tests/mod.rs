
pub mod prelude {

    pub use tops_core::{
        api::{ApiError, Params},
        db::{NamedParams, Transaction},
        entities::*,
    };
    pub use tops_entities::builders::*;

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::prelude as flows;

    pub fn id_param(id: i64) -> Params {
        Params::from([("id".to_string(), id.to_string())])
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            tops_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            Self { db_connections }
        }

        pub fn create_user(&self, id: i64, username: &str) -> CurrentUser {
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|tx| {
                    tx.exec_named(
                        "INSERT INTO tm_user (id, username) VALUES (:id, :username)",
                        &NamedParams::new().with("id", id).with("username", username),
                    )
                })
                .unwrap();
            CurrentUser::new(id, username)
        }

        pub fn create_request(&self, id: i64, author: &CurrentUser, xml_id: &str) {
            let deliveryservice = format!(r#"{{"xmlId":"{xml_id}","active":true}}"#);
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|tx| {
                    tx.exec_named(
                        "INSERT INTO deliveryservice_request \
                         (id, author_id, change_type, status, deliveryservice) \
                         VALUES (:id, :author_id, 'update', 'draft', :deliveryservice)",
                        &NamedParams::new()
                            .with("id", id)
                            .with("author_id", author.id)
                            .with("deliveryservice", deliveryservice),
                    )
                })
                .unwrap();
        }

        pub fn create_comment(
            &self,
            author: &CurrentUser,
            request_id: i64,
            value: &str,
        ) -> DeliveryServiceRequestComment {
            let comment = DeliveryServiceRequestComment::build()
                .request_id(request_id)
                .value(value)
                .finish();
            flows::create_comment(&self.db_connections, author, comment).unwrap()
        }

        pub fn read_comments(&self, params: Params) -> Vec<DeliveryServiceRequestComment> {
            let reader = CurrentUser::new(0, "reader");
            flows::read_comments(&self.db_connections, &reader, params).unwrap()
        }

        pub fn try_get_comment(&self, id: i64) -> Option<DeliveryServiceRequestComment> {
            let mut comments = self.read_comments(id_param(id));
            assert!(comments.len() <= 1);
            comments.pop()
        }

        pub fn comment_exists(&self, id: i64) -> bool {
            self.try_get_comment(id).is_some()
        }
    }
}
