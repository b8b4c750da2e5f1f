use std::sync::Arc;

use crate::{
    app::Session,
    models::User,
    storage::{ArcStorage, sqlite::Sqlite},
};

pub(crate) async fn memory_storage() -> ArcStorage {
    Arc::new(Sqlite::new(None).await.expect("in-memory storage"))
}

/// A session already logged in as `user`.
pub(crate) async fn logged_in(user: User) -> Session {
    let session = Session::new(memory_storage().await);
    session.save_token("jwt-token").await.expect("save token");
    session.save_user(&user).await.expect("save user");
    session
}
