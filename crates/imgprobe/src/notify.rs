//! Desktop notification on hits.

use thiserror::Error;

pub const HIT_TITLE: &str = "New image found";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("desktop notification failed: {0}")]
    Desktop(#[from] notify_rust::error::Error),

    #[error("notification failed: {0}")]
    Other(String),
}

pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Raises an OS-level notification.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    icon:     Option<String>,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_owned(),
            icon:     None,
        }
    }
}

impl DesktopNotifier {
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let mut notification = notify_rust::Notification::new();
        notification.appname(&self.app_name).summary(title).body(body);
        if let Some(icon) = &self.icon {
            notification.icon(icon);
        }
        notification.show().map(drop)?;
        Ok(())
    }
}
