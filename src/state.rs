//! Application state shared by all handlers.

use std::sync::Arc;

use crate::trainer::Trainer;

#[derive(Clone)]
pub struct AppState {
    pub trainer: Arc<Trainer>,
}

impl AppState {
    pub fn new(trainer: Trainer) -> Self {
        Self {
            trainer: Arc::new(trainer),
        }
    }
}
