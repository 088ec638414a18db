use std::sync::Arc;
use crate::{
    config::Settings,
    service::ServiceContext,
};

/// Shared by every handler: the repositories and services over one pool,
/// plus the settings upload handling and login read from.
#[derive(Clone)]
pub struct AppState {
    pub service_context: Arc<ServiceContext>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Self {
        Self { service_context, settings }
    }

    pub fn uploads_dir(&self) -> &str {
        &self.settings.uploads.dir
    }

    pub fn max_upload_size(&self) -> usize {
        self.settings.uploads.max_file_size
    }
}
