use std::{path::PathBuf, sync::Arc};

use crate::repository::TodoListRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn TodoListRepository>,
    pub public_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(repo: Arc<dyn TodoListRepository>) -> Self {
        Self {
            repo,
            public_dir: None,
        }
    }

    /// Serves files from `dir` for paths no route claims.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }
}
