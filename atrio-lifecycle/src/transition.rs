/// A single user-facing action that moves a record to its next status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusAction<S: 'static> {
    pub to: S,
    pub label: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("cannot delete a record in status {status}")]
    DeleteForbidden { status: &'static str },

    #[error("unknown status value: {0}")]
    UnknownStatus(String),
}
