/// Toast banner surfaced to the operator after an action completes or
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// Seam between the controllers and whatever renders notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Default sink: structured log lines instead of a widget.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => tracing::info!(message = %toast.message, "toast"),
            ToastLevel::Error => tracing::error!(message = %toast.message, "toast"),
        }
    }
}
