//! Explicit session context shared by the transport and the auth layer.
//!
//! Nothing reads authentication state from globals: whoever needs to know
//! whether the console is signed in is handed a [`Session`].

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Cheaply cloneable handle to the current bearer token.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_token() {
        let session = Session::new();
        let clone = session.clone();
        assert!(!clone.is_authenticated());

        session.set_token("abc");
        assert_eq!(clone.token().as_deref(), Some("abc"));

        clone.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn debug_output_hides_the_token() {
        let session = Session::with_token("secret-token");
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
