use crate::store::Directory;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            directory: Arc::new(Directory::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
