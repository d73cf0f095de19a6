use std::sync::Arc;

use crate::engine::{LeaderboardEngine, SharedSource};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LeaderboardEngine<SharedSource>>,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(engine: LeaderboardEngine<SharedSource>, cors_origin: String) -> Self {
        Self {
            engine: Arc::new(engine),
            cors_origin,
        }
    }
}
