//! User-facing notification port.
//!
//! Carries toast-style notices back to the acting user. Failure notices show
//! either a validation message (safe by construction) or a generic body;
//! internal error detail stays in the server-side log.

use async_trait::async_trait;

/// Visual severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    /// Informational notice.
    Info,
    /// Failure notice.
    Danger,
}

/// A toast-style notice shown to the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    title: String,
    body: String,
    severity: NoticeSeverity,
}

impl Notice {
    /// Creates a failure notice.
    #[must_use]
    pub fn danger(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: NoticeSeverity::Danger,
        }
    }

    /// Creates an informational notice.
    #[must_use]
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: NoticeSeverity::Info,
        }
    }

    /// Returns the notice title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the notice body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the notice severity.
    #[must_use]
    pub const fn severity(&self) -> NoticeSeverity {
        self.severity
    }
}

/// Port for delivering notices to the acting user.
#[async_trait]
pub trait UserNotifier: Send + Sync {
    /// Delivers one notice.
    async fn notify(&self, notice: &Notice);
}
