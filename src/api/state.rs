use std::sync::Arc;

use crate::application::SessionFactory;
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<dyn SessionFactory>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, sessions: Arc<dyn SessionFactory>) -> Self {
        Self { config, sessions }
    }
}
