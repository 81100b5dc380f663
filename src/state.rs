use std::sync::Arc;

use axum::extract::FromRef;

use crate::chain::QuizRegistry;
use crate::config::Config;
use crate::storage::MetadataStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub registry: Arc<dyn QuizRegistry>,
    pub metadata: Arc<dyn MetadataStore>,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
