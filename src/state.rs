use std::sync::Arc;

use crate::db::{DbPool, OrmConn, create_orm_conn};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(pool: DbPool, jwt_secret: impl Into<Arc<str>>) -> Self {
        let orm = create_orm_conn(&pool);
        Self {
            pool,
            orm,
            jwt_secret: jwt_secret.into(),
        }
    }
}
