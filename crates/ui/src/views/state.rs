use dioxus::prelude::*;

/// User-visible failure for the single error banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The writing service answered but reported its own error message.
    Service(String),
    /// Transport, status, or decode failure. The cause is logged, not shown.
    Unavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Service(message) => message,
            ViewError::Unavailable => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unavailable),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
