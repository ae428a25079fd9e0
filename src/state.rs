use std::sync::Arc;

use crate::mailer::Mailer;
use crate::store::TicketStore;

/// Shared application state, constructed once at startup and handed to the
/// route handlers through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TicketStore>,
    /// `None` when SMTP is not configured; handlers then skip notification.
    pub mailer: Option<Arc<Mailer>>,
}

impl AppState {
    pub fn new(store: Arc<dyn TicketStore>, mailer: Option<Arc<Mailer>>) -> Self {
        Self { store, mailer }
    }
}
