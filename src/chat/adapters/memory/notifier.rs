//! Recording implementation of the [`UserNotifier`] port.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::chat::ports::notifier::{Notice, UserNotifier};

/// Notifier that records every delivered notice for inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<RwLock<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the delivered notices, in delivery order.
    ///
    /// Returns an empty vector if the internal lock is poisoned.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .read()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserNotifier for RecordingNotifier {
    async fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.write() {
            notices.push(notice.clone());
        }
    }
}
