//! Shared application state for all routes.

use crate::auth::TokenKeys;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: PgPool, secret: &str) -> Self {
        Self {
            pool,
            tokens: Arc::new(TokenKeys::new(secret)),
        }
    }
}
