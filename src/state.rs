use crate::client::SubscriptionApi;
use crate::editor::Editor;
use crate::manager::RecordManager;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<RecordManager>,
    pub editor: Arc<Mutex<Editor>>,
}

impl AppState {
    pub fn new(api: Arc<dyn SubscriptionApi>) -> Self {
        Self {
            manager: Arc::new(RecordManager::new(api)),
            editor: Arc::new(Mutex::new(Editor::default())),
        }
    }
}
