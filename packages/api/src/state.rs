// ABOUTME: Shared state handed to every handler
// ABOUTME: Bundles the catalog store, the admin credentials and the notifier

use std::sync::Arc;

use sleep_storage::CatalogStore;

use crate::auth::AdminAuth;
use crate::notify::{LogNotifier, Notifier};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub auth: Arc<AdminAuth>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, auth: AdminAuth) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}
