//! # Async Operation State
//!
//! The observable state of one async operation. Modelled as an enum so that
//! "success carries data", "error carries an error" and "never both" are
//! enforced by the type rather than checked at runtime.

use crate::error::ApiError;

/// Coarse status of an [`AsyncState`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

/// State of an async operation owned by a [`ResourceHook`](crate::ResourceHook).
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncState<T> {
    /// Nothing has been executed yet, or the hook was reset.
    Idle,
    /// An execution is in flight.
    Loading,
    /// The latest execution resolved with a value.
    Success(T),
    /// The latest execution failed.
    Error(ApiError),
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        AsyncState::Idle
    }
}

impl<T> AsyncState<T> {
    pub fn status(&self) -> Status {
        match self {
            AsyncState::Idle => Status::Idle,
            AsyncState::Loading => Status::Loading,
            AsyncState::Success(_) => Status::Success,
            AsyncState::Error(_) => Status::Error,
        }
    }

    /// The stored value. `Some` exactly when the status is `Success`.
    pub fn data(&self) -> Option<&T> {
        match self {
            AsyncState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// The stored error. `Some` exactly when the status is `Error`.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            AsyncState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncState::Loading)
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            AsyncState::Success(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_the_status() {
        let states: Vec<AsyncState<u32>> = vec![
            AsyncState::Idle,
            AsyncState::Loading,
            AsyncState::Success(7),
            AsyncState::Error(ApiError::Cancelled),
        ];

        for state in states {
            match state.status() {
                Status::Success => {
                    assert_eq!(state.data(), Some(&7));
                    assert!(state.error().is_none());
                }
                Status::Error => {
                    assert!(state.data().is_none());
                    assert!(state.error().is_some());
                }
                Status::Idle | Status::Loading => {
                    assert!(state.data().is_none());
                    assert!(state.error().is_none());
                }
            }
        }
    }

    #[test]
    fn default_is_idle() {
        let state: AsyncState<String> = AsyncState::default();
        assert_eq!(state.status(), Status::Idle);
    }
}
